//! In-memory surface for exercising the display loop without a terminal.

use super::frame::{ColoredRect, Rgb};
use super::surface::Surface;

/// One presented frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub background: Rgb,
    pub rects: Vec<ColoredRect>,
}

/// In-memory surface that keeps every presented frame.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    frames: Vec<Frame>,
    pending: Option<Frame>,
    polls: usize,
    quit_after: Option<usize>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests quit on the `polls`-th call to `poll_quit`.
    pub fn quit_after(polls: usize) -> Self {
        Self {
            quit_after: Some(polls),
            ..Self::default()
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn polls(&self) -> usize {
        self.polls
    }
}

impl Surface for HeadlessSurface {
    fn poll_quit(&mut self) -> anyhow::Result<bool> {
        self.polls += 1;
        Ok(self.quit_after.is_some_and(|limit| self.polls >= limit))
    }

    fn clear(&mut self, color: Rgb) {
        self.pending = Some(Frame {
            background: color,
            rects: Vec::new(),
        });
    }

    fn fill_rect(&mut self, rect: &ColoredRect) {
        if let Some(frame) = self.pending.as_mut() {
            frame.rects.push(*rect);
        }
    }

    fn present(&mut self) -> anyhow::Result<()> {
        let frame = self
            .pending
            .take()
            .ok_or_else(|| anyhow::anyhow!("present called without clear"))?;
        self.frames.push(frame);
        Ok(())
    }
}
