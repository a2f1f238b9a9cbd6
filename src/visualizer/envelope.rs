//! Amplitude envelope of a sample window.
//!
//! A window is split into equal contiguous buckets and each bucket is reduced
//! to the mean of its absolute sample values.

/// Number of samples in each bucket of a `window_len`-sample window.
///
/// Never zero, so a window shorter than the bucket count still yields
/// one-sample buckets (and empty ones past the end).
pub fn bucket_step(window_len: usize, bucket_count: usize) -> usize {
    if bucket_count == 0 {
        return 1;
    }
    (window_len / bucket_count).max(1)
}

/// Mean absolute amplitude of bucket `bucket_index` out of `bucket_count`.
///
/// Samples left over after `bucket_count` equal buckets are not counted.
/// Returns 0.0 for a bucket that falls outside the window.
pub fn amplitude(window: &[f32], bucket_index: usize, bucket_count: usize) -> f32 {
    if bucket_count == 0 {
        return 0.0;
    }

    let step = bucket_step(window.len(), bucket_count);
    let start = (bucket_index * step).min(window.len());
    let end = ((bucket_index + 1) * step).min(window.len());
    let bucket = &window[start..end];

    if bucket.is_empty() {
        return 0.0;
    }

    bucket.iter().map(|s| s.abs()).sum::<f32>() / bucket.len() as f32
}

/// Amplitudes of every bucket in the window.
pub fn envelope(window: &[f32], bucket_count: usize) -> Vec<f32> {
    (0..bucket_count)
        .map(|i| amplitude(window, i, bucket_count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_window() {
        let window = vec![0.0; 1024];
        assert!(envelope(&window, 60).iter().all(|&a| a == 0.0));
    }

    #[test]
    fn test_mean_of_absolute_values() {
        let window = [0.5, -0.5, 1.0, -0.0, -0.25, 0.75];
        assert_eq!(amplitude(&window, 0, 3), 0.5);
        assert_eq!(amplitude(&window, 1, 3), 0.5);
        assert_eq!(amplitude(&window, 2, 3), 0.5);
    }

    #[test]
    fn test_remainder_dropped() {
        // 7 samples into 3 buckets of 2; the trailing 1.0 is never read.
        let window = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0];
        assert_eq!(bucket_step(window.len(), 3), 2);
        assert_eq!(envelope(&window, 3), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_partition_covers_floor() {
        for (len, buckets) in [(1024, 60), (1000, 7), (60, 60), (59, 60), (3, 10)] {
            let step = bucket_step(len, buckets);
            let examined = (0..buckets)
                .map(|i| ((i + 1) * step).min(len) - (i * step).min(len))
                .sum::<usize>();
            if len >= buckets {
                assert_eq!(step, len / buckets);
                assert_eq!(examined, buckets * (len / buckets));
            }
            assert!(examined <= len);
        }
    }

    #[test]
    fn test_short_window_leaves_trailing_buckets_empty() {
        let window = [1.0, -1.0, 0.5];
        let env = envelope(&window, 5);
        assert_eq!(env, vec![1.0, 1.0, 0.5, 0.0, 0.0]);
    }

    #[test]
    fn test_amplitude_bounded() {
        let window: Vec<f32> = (0..997).map(|i| ((i as f32) * 0.37).sin()).collect();
        for a in envelope(&window, 60) {
            assert!((0.0..=1.0).contains(&a));
        }
        assert_eq!(envelope(&[1.0; 128], 8), vec![1.0; 8]);
    }

    #[test]
    fn test_zero_buckets() {
        assert!(envelope(&[1.0, 1.0], 0).is_empty());
        assert_eq!(amplitude(&[1.0, 1.0], 0, 0), 0.0);
    }
}
