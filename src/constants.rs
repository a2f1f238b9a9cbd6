//! Default display constants.
//!
//! These are the values used when no configuration file overrides them.

use crate::visualizer::Rgb;

/// Terminal title shown while the visualizer runs.
pub const WINDOW_TITLE: &str = "Stereo Music Visualizer";

/// Logical canvas width in pixels.
pub const WINDOW_WIDTH: u32 = 900;
/// Logical canvas height in pixels.
pub const WINDOW_HEIGHT: u32 = 500;
/// Number of bars per channel.
pub const BAR_COUNT: usize = 60;
/// Target ticks per second.
pub const FPS: u32 = 30;
/// Samples per channel consumed by each tick.
pub const FRAME_SIZE: usize = 1024;

pub const BG_COLOR: Rgb = Rgb(0, 0, 0);
/// Blue-ish, drawn upward from the midline.
pub const LEFT_COLOR: Rgb = Rgb(0, 200, 255);
/// Orange-ish, drawn downward from the midline.
pub const RIGHT_COLOR: Rgb = Rgb(255, 100, 0);
