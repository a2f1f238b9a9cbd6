//! Bar geometry for one display tick.
//!
//! Left channel bars grow upward from the horizontal midline, right channel
//! bars grow downward from it. Heights are amplitude times the full canvas
//! height, so a full-scale bucket reaches past the top (or bottom) edge.

use serde::{Deserialize, Serialize};

use super::envelope::envelope;
use crate::config::VisualizerConfig;

/// 24-bit colour, written as `[r, g, b]` in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Axis-aligned filled rectangle in canvas pixels.
///
/// Coordinates and sizes are signed: `y` goes negative for bars taller than
/// half the canvas, and `width` is non-positive when bars are packed tighter
/// than the 2px gap. Such rectangles are kept, surfaces simply draw nothing
/// for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColoredRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub color: Rgb,
}

impl ColoredRect {
    /// True when the rectangle covers no pixels.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Gap in pixels between neighbouring bars.
const BAR_GAP: i32 = 2;

/// Converts channel windows into bar rectangles.
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    bar_count: usize,
    width: u32,
    height: u32,
    left_color: Rgb,
    right_color: Rgb,
}

impl FrameRenderer {
    pub fn new(config: &VisualizerConfig) -> Self {
        Self {
            bar_count: config.display.bar_count,
            width: config.display.width,
            height: config.display.height,
            left_color: config.colors.left,
            right_color: config.colors.right,
        }
    }

    /// Produces two rectangles per bar, left channel first.
    pub fn render(&self, left: &[f32], right: &[f32]) -> Vec<ColoredRect> {
        if self.bar_count == 0 {
            return Vec::new();
        }

        let bar_width = (self.width as usize / self.bar_count) as i32;
        let midline = (self.height / 2) as i32;
        let left_env = envelope(left, self.bar_count);
        let right_env = envelope(right, self.bar_count);
        let mut rects = Vec::with_capacity(self.bar_count * 2);

        for (i, (left_amp, right_amp)) in left_env.into_iter().zip(right_env).enumerate() {
            let x = i as i32 * bar_width;
            let left_height = self.bar_height(left_amp);
            let right_height = self.bar_height(right_amp);

            rects.push(ColoredRect {
                x,
                y: midline - left_height,
                width: bar_width - BAR_GAP,
                height: left_height,
                color: self.left_color,
            });
            rects.push(ColoredRect {
                x,
                y: midline,
                width: bar_width - BAR_GAP,
                height: right_height,
                color: self.right_color,
            });
        }

        rects
    }

    fn bar_height(&self, amplitude: f32) -> i32 {
        (amplitude * self.height as f32).floor() as i32
    }
}
