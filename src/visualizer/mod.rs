//! Stereo bar visualization.
//!
//! Turns the window of samples under a looping playback cursor into bar
//! rectangles once per tick and hands them to a drawing surface.

pub mod cursor;
pub mod display;
pub mod envelope;
pub mod frame;
#[cfg(test)]
pub mod headless;
pub mod surface;
pub mod ui;

pub use display::Session;
pub use frame::Rgb;
pub use ui::TerminalSurface;
