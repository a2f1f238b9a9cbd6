//! Drawing surface abstraction.
//!
//! The display loop only needs to ask whether the user wants to quit and to
//! draw filled rectangles onto a cleared canvas. Backends implement `Surface`.

use super::frame::{ColoredRect, Rgb};

/// Presentation backend driven by the display loop.
pub trait Surface {
    /// Drains pending input and reports whether a quit was requested.
    fn poll_quit(&mut self) -> anyhow::Result<bool>;

    /// Starts a new frame filled with `color`.
    fn clear(&mut self, color: Rgb);

    /// Adds a filled rectangle to the frame being built.
    fn fill_rect(&mut self, rect: &ColoredRect);

    /// Shows the frame built since the last `clear`.
    fn present(&mut self) -> anyhow::Result<()>;
}
