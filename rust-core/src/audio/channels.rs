//! Channel selection for interleaved PCM
//!
//! Multi-channel audio is reduced to mono by picking a single channel out
//! of each frame (stride = channel count, offset = channel index).

use crate::error::{Error, Result};

/// Extract one channel from interleaved samples
///
/// # Arguments
/// * `raw` - Interleaved samples `[c0, c1, .., c0, c1, ..]`
/// * `channel_count` - Number of interleaved channels (stride)
/// * `channel` - Channel index to keep (offset)
pub fn extract_channel(raw: &[i16], channel_count: usize, channel: usize) -> Result<Vec<i16>> {
    if channel_count < 1 {
        return Err(Error::InvalidChannelCount(
            "at least one channel is required".to_string(),
        ));
    }

    if raw.len() % channel_count != 0 {
        return Err(Error::InvalidChannelCount(format!(
            "{} samples cannot be split into {}-channel frames",
            raw.len(),
            channel_count
        )));
    }

    if channel >= channel_count {
        return Err(Error::InvalidChannelCount(format!(
            "channel {} requested from {}-channel audio",
            channel, channel_count
        )));
    }

    Ok(raw.iter().skip(channel).step_by(channel_count).copied().collect())
}

/// Reduce interleaved samples to mono by keeping the first channel
pub fn reduce(raw: &[i16], channel_count: usize) -> Result<Vec<i16>> {
    extract_channel(raw, channel_count, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mono_is_identity() {
        let raw = vec![1, 2, 3, 4, 5];
        assert_eq!(reduce(&raw, 1).unwrap(), raw);
    }

    #[test]
    fn test_stereo_keeps_left() {
        // Frames (L0,R0), (L1,R1), (L2,R2)
        let raw = vec![10, -10, 20, -20, 30, -30];
        assert_eq!(reduce(&raw, 2).unwrap(), vec![10, 20, 30]);
        assert_eq!(extract_channel(&raw, 2, 1).unwrap(), vec![-10, -20, -30]);
    }

    #[test]
    fn test_multichannel_stride() {
        let raw: Vec<i16> = (0..12).collect();
        assert_eq!(reduce(&raw, 4).unwrap(), vec![0, 4, 8]);
        assert_eq!(extract_channel(&raw, 3, 2).unwrap(), vec![2, 5, 8, 11]);
    }

    #[test]
    fn test_invalid_channel_counts() {
        assert!(matches!(reduce(&[1, 2], 0), Err(Error::InvalidChannelCount(_))));
        assert!(matches!(reduce(&[1, 2, 3], 2), Err(Error::InvalidChannelCount(_))));
        assert!(matches!(
            extract_channel(&[1, 2], 2, 2),
            Err(Error::InvalidChannelCount(_))
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(reduce(&[], 2).unwrap().is_empty());
    }
}
