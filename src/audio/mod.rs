//! Audio file loading for stereobars.
//!
//! Decodes a linear-PCM WAV file once at startup into two normalized channel
//! buffers that the visualizer reads from for the rest of the session.

pub mod error;
pub mod source;

pub use source::SampleSource;
