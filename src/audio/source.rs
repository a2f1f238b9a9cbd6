//! Sample source backed by a decoded WAV file.
//!
//! Features:
//! - Reads 8/16/24/32-bit integer and 32-bit float PCM through hound
//! - Splits interleaved frames into left/right buffers (mono feeds both)
//! - Normalizes each channel to a peak of 1.0, leaving silent channels at zero

use hound::{SampleFormat, WavReader};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use super::error::LoadError;

/// Normalized, immutable left/right sample buffers plus their sample rate.
///
/// Both buffers always have the same length. For mono input they are the same
/// allocation.
#[derive(Debug, Clone)]
pub struct SampleSource {
    left: Arc<[f32]>,
    right: Arc<[f32]>,
    sample_rate: u32,
}

impl SampleSource {
    /// Decodes and normalizes the WAV file at `path`.
    ///
    /// # Errors
    /// - `LoadError::Decode` if the file cannot be opened or is not a readable PCM WAV
    /// - `LoadError::InvalidSampleRate` if the header declares 0 Hz
    /// - `LoadError::Empty` if the file holds no sample frames
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let decode_error = |source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        };

        let reader = WavReader::open(path).map_err(decode_error)?;
        let spec = reader.spec();

        tracing::debug!(
            "WAV header: {} channel(s), {}Hz, {} bits, {:?}",
            spec.channels,
            spec.sample_rate,
            spec.bits_per_sample,
            spec.sample_format
        );

        if spec.sample_rate == 0 {
            return Err(LoadError::InvalidSampleRate {
                path: path.to_path_buf(),
            });
        }

        let interleaved = read_interleaved(reader).map_err(decode_error)?;
        let (left, right) = deinterleave(&interleaved, spec.channels as usize);

        if left.is_empty() {
            return Err(LoadError::Empty {
                path: path.to_path_buf(),
            });
        }

        let source = Self::from_channels(left, right, spec.sample_rate);
        tracing::info!(
            "Loaded {}: {} frames, {:.2}s at {}Hz ({})",
            path.display(),
            source.len(),
            source.duration().as_secs_f32(),
            source.sample_rate(),
            if source.is_mono() { "mono" } else { "stereo" }
        );

        Ok(source)
    }

    /// Builds a source from raw channel data, normalizing each channel.
    ///
    /// Passing `None` for `right` produces a mono source whose channels share storage.
    pub(crate) fn from_channels(
        mut left: Vec<f32>,
        right: Option<Vec<f32>>,
        sample_rate: u32,
    ) -> Self {
        normalize(&mut left);
        let left: Arc<[f32]> = left.into();

        let right = match right {
            Some(mut right) => {
                debug_assert_eq!(left.len(), right.len(), "channel lengths differ");
                normalize(&mut right);
                right.into()
            }
            None => Arc::clone(&left),
        };

        Self {
            left,
            right,
            sample_rate,
        }
    }

    pub fn left(&self) -> &[f32] {
        &self.left
    }

    pub fn right(&self) -> &[f32] {
        &self.right
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of frames per channel.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Whether both channels read the same underlying buffer.
    pub fn is_mono(&self) -> bool {
        Arc::ptr_eq(&self.left, &self.right)
    }

    /// Playing time of the buffer, zero when the sample rate is unknown.
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.len() as f64 / f64::from(self.sample_rate))
    }
}

/// Reads every sample of the file as `f32`, keeping the interleaved layout.
///
/// Integer samples keep their raw magnitude; normalization rescales them later.
fn read_interleaved<R: Read>(mut reader: WavReader<R>) -> Result<Vec<f32>, hound::Error> {
    match reader.spec().sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect(),
        SampleFormat::Int => reader
            .samples::<i32>()
            .map(|sample| sample.map(|s| s as f32))
            .collect(),
    }
}

/// Splits interleaved frames into the first two channels.
///
/// Returns `None` for the right channel when the input is mono. Channels past
/// the second are ignored, as is a trailing partial frame.
fn deinterleave(samples: &[f32], channels: usize) -> (Vec<f32>, Option<Vec<f32>>) {
    match channels {
        0 => (Vec::new(), None),
        1 => (samples.to_vec(), None),
        _ => {
            let (left, right) = samples
                .chunks_exact(channels)
                .map(|frame| (frame[0], frame[1]))
                .unzip();
            (left, Some(right))
        }
    }
}

/// Scales samples so the largest magnitude becomes 1.0.
///
/// A silent channel (peak of exactly zero) is left as is.
fn normalize(samples: &mut [f32]) {
    let peak = samples.iter().fold(0.0f32, |peak, s| peak.max(s.abs()));
    if peak == 0.0 {
        return;
    }
    for sample in samples.iter_mut() {
        *sample /= peak;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};
    use std::path::PathBuf;

    /// Writes a 16-bit integer WAV into the temp directory and returns its path.
    pub(crate) fn write_i16_wav(name: &str, channels: u16, sample_rate: u32, samples: &[i16]) -> PathBuf {
        let path = temp_wav_path(name);
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for &sample in samples {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
        path
    }

    pub(crate) fn temp_wav_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("stereobars_{}_{}.wav", std::process::id(), name))
    }

    fn peak(samples: &[f32]) -> f32 {
        samples.iter().fold(0.0f32, |peak, s| peak.max(s.abs()))
    }

    #[test]
    fn test_stereo_channels_normalized_independently() {
        let samples = [100i16, -2000, -400, 1000, 200, 500];
        let path = write_i16_wav("stereo_norm", 2, 44100, &samples);

        let source = SampleSource::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(source.len(), 3);
        assert_eq!(source.sample_rate(), 44100);
        assert!(!source.is_mono());
        assert_eq!(source.left(), &[0.25, -1.0, 0.5]);
        assert_eq!(source.right(), &[-1.0, 0.5, 0.25]);
        assert!((peak(source.left()) - 1.0).abs() < f32::EPSILON);
        assert!((peak(source.right()) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_mono_feeds_both_channels() {
        let path = write_i16_wav("mono", 1, 8000, &[0, 16, -32, 8]);

        let source = SampleSource::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(source.is_mono());
        assert_eq!(source.left(), source.right());
        assert_eq!(source.left(), &[0.0, 0.5, -1.0, 0.25]);
    }

    #[test]
    fn test_silent_channel_stays_zero() {
        // Left is a full-scale square wave, right is silent.
        let samples: Vec<i16> = (0..64)
            .flat_map(|i| [if i % 2 == 0 { i16::MAX } else { -i16::MAX }, 0])
            .collect();
        let path = write_i16_wav("silent_right", 2, 8000, &samples);

        let source = SampleSource::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(source.right().iter().all(|&s| s == 0.0));
        assert!(source.left().iter().all(|&s| s.abs() == 1.0));
    }

    #[test]
    fn test_float_samples() {
        let path = temp_wav_path("float");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 22050,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for sample in [0.1f32, -0.4, 0.2] {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();

        let source = SampleSource::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!((source.left()[1] + 1.0).abs() < 1e-6);
        assert!((source.left()[0] - 0.25).abs() < 1e-6);
        assert!(source.left().iter().all(|s| (-1.0..=1.0).contains(s)));
    }

    #[test]
    fn test_extra_channels_ignored() {
        let samples = [1i16, 2, 30, 4, 8, 60];
        let path = write_i16_wav("three_channels", 3, 8000, &samples);

        let source = SampleSource::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(source.len(), 2);
        assert_eq!(source.left(), &[0.25, 1.0]);
        assert_eq!(source.right(), &[0.25, 1.0]);
    }

    #[test]
    fn test_empty_file_rejected() {
        let path = write_i16_wav("empty", 2, 8000, &[]);

        let result = SampleSource::load(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(LoadError::Empty { .. })));
    }

    #[test]
    fn test_garbage_file_rejected() {
        let path = temp_wav_path("garbage");
        std::fs::write(&path, b"definitely not a RIFF header").unwrap();

        let result = SampleSource::load(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(LoadError::Decode { .. })));
    }

    #[test]
    fn test_missing_file_rejected() {
        let result = SampleSource::load(Path::new("/nonexistent/stereobars/missing.wav"));
        assert!(matches!(result, Err(LoadError::Decode { .. })));
    }

    #[test]
    fn test_normalize_silence_has_no_nan() {
        let mut samples = vec![0.0f32; 16];
        normalize(&mut samples);
        assert!(samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_duration() {
        let source = SampleSource::from_channels(vec![0.0; 16000], None, 8000);
        assert_eq!(source.duration(), Duration::from_secs(2));
    }

    #[test]
    fn test_zero_rate_duration() {
        let source = SampleSource::from_channels(vec![0.5; 100], None, 0);
        assert_eq!(source.duration(), Duration::ZERO);
    }
}
