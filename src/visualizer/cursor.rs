//! Looping playback position.

/// Sample offset into the channel buffers.
///
/// The cursor only moves forward. Reaching the end is noticed when a window
/// read comes back empty, at which point the caller resets it to zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackCursor {
    position: usize,
}

impl PlaybackCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves forward by `frame_size` samples and returns the new position.
    pub fn advance(&mut self, frame_size: usize) -> usize {
        self.position = self.position.saturating_add(frame_size);
        self.position
    }

    /// Returns up to `frame_size` samples starting at the cursor.
    ///
    /// Empty once the cursor has run past the end of `buffer`.
    pub fn window<'a>(&self, buffer: &'a [f32], frame_size: usize) -> &'a [f32] {
        let start = self.position.min(buffer.len());
        let end = self.position.saturating_add(frame_size).min(buffer.len());
        &buffer[start..end]
    }

    /// Wraps back to the start of the buffer.
    pub fn reset(&mut self) {
        self.position = 0;
    }
}
