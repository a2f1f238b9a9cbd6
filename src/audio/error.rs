use std::path::PathBuf;
use thiserror::Error;

/// Failures while turning an audio file into sample buffers.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not decode '{}' as a PCM WAV file", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
    #[error("'{}' contains no audio samples", path.display())]
    Empty { path: PathBuf },
    #[error("'{}' declares a sample rate of 0 Hz", path.display())]
    InvalidSampleRate { path: PathBuf },
}
