//! Fixed-rate display loop.
//!
//! A `Session` owns everything that lives for the duration of the visualization:
//! the decoded samples, the playback cursor, the bar renderer and the frame clock.
//! Each tick polls for quit, draws the bars for the window under the cursor,
//! advances the cursor and then waits out the rest of the frame interval.

use std::thread;
use std::time::{Duration, Instant};

use super::cursor::PlaybackCursor;
use super::frame::{FrameRenderer, Rgb};
use super::surface::Surface;
use crate::audio::SampleSource;
use crate::config::VisualizerConfig;

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// A frame was drawn and the cursor advanced.
    Rendered,
    /// The window under the cursor was empty; the cursor went back to zero and
    /// nothing was drawn.
    Looped,
}

/// Counters reported when the loop ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub frames: u64,
    pub loops: u64,
}

/// Sleeps so that consecutive ticks are at least one frame interval apart.
#[derive(Debug)]
pub struct FrameClock {
    interval: Duration,
    last_tick: Instant,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / fps.max(1),
            last_tick: Instant::now(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Blocks until one interval has passed since the previous call.
    pub fn wait(&mut self) {
        let elapsed = self.last_tick.elapsed();
        if elapsed < self.interval {
            thread::sleep(self.interval - elapsed);
        }
        self.last_tick = Instant::now();
    }
}

/// State for one visualization run.
pub struct Session {
    source: SampleSource,
    cursor: PlaybackCursor,
    renderer: FrameRenderer,
    background: Rgb,
    frame_size: usize,
    clock: FrameClock,
}

impl Session {
    pub fn new(source: SampleSource, config: &VisualizerConfig) -> Self {
        Self {
            source,
            cursor: PlaybackCursor::new(),
            renderer: FrameRenderer::new(config),
            background: config.colors.background,
            frame_size: config.display.frame_size,
            clock: FrameClock::new(config.display.fps),
        }
    }

    /// Draws the window under the cursor and advances it, or wraps the cursor
    /// when the window is exhausted.
    ///
    /// # Errors
    /// - If the surface fails to present the frame
    pub fn tick<S: Surface>(&mut self, surface: &mut S) -> anyhow::Result<Tick> {
        let left = self.cursor.window(self.source.left(), self.frame_size);
        let right = self.cursor.window(self.source.right(), self.frame_size);

        if left.is_empty() || right.is_empty() {
            tracing::debug!(
                "End of audio at sample {}, looping",
                self.cursor.position()
            );
            self.cursor.reset();
            return Ok(Tick::Looped);
        }

        let rects = self.renderer.render(left, right);

        surface.clear(self.background);
        for rect in &rects {
            surface.fill_rect(rect);
        }
        surface.present()?;

        self.cursor.advance(self.frame_size);
        Ok(Tick::Rendered)
    }

    /// Runs ticks at the configured frame rate until the surface reports quit.
    ///
    /// The tick in which quit is observed still completes.
    ///
    /// # Errors
    /// - If polling or presenting on the surface fails
    pub fn run<S: Surface>(&mut self, surface: &mut S) -> anyhow::Result<RunSummary> {
        tracing::debug!(
            "Entering display loop: {} samples per tick, {:?} per frame",
            self.frame_size,
            self.clock.interval()
        );

        let mut summary = RunSummary::default();
        loop {
            let quit = surface.poll_quit()?;

            match self.tick(surface)? {
                Tick::Rendered => summary.frames += 1,
                Tick::Looped => summary.loops += 1,
            }
            summary.ticks += 1;

            if summary.ticks.is_multiple_of(300) {
                tracing::debug!(
                    "Display: {} ticks, {} frames, {} loops",
                    summary.ticks,
                    summary.frames,
                    summary.loops
                );
            }

            self.clock.wait();

            if quit {
                tracing::info!("Quit requested after {} ticks", summary.ticks);
                break;
            }
        }

        Ok(summary)
    }
}
