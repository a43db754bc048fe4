//! 16-bit little-endian PCM codec
//!
//! Converts between raw WAV payload bytes and integer samples. Encoding
//! saturates out-of-range values instead of wrapping them.

use crate::error::{Error, Result};

/// Bytes per sample for 16-bit PCM
pub const SAMPLE_WIDTH: usize = 2;

/// Decode interleaved little-endian 16-bit samples
///
/// # Arguments
/// * `bytes` - Raw PCM payload
/// * `channel_count` - Number of interleaved channels
/// * `sample_width` - Bytes per sample (only 2 is supported)
///
/// # Returns
/// Interleaved samples, `bytes.len() / 2` of them
pub fn decode(bytes: &[u8], channel_count: usize, sample_width: usize) -> Result<Vec<i16>> {
    if sample_width != SAMPLE_WIDTH {
        return Err(Error::UnsupportedFormat(format!(
            "expected 16-bit audio (2 bytes/sample), found {} bytes/sample",
            sample_width
        )));
    }

    if channel_count < 1 {
        return Err(Error::InvalidChannelCount(
            "at least one channel is required".to_string(),
        ));
    }

    let frame_size = SAMPLE_WIDTH * channel_count;
    if bytes.len() % frame_size != 0 {
        return Err(Error::CorruptData(format!(
            "{} payload bytes is not a whole number of {}-byte frames",
            bytes.len(),
            frame_size
        )));
    }

    Ok(bytes
        .chunks_exact(SAMPLE_WIDTH)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect())
}

/// Clamp a real-valued sample into the 16-bit range
///
/// Fractions truncate toward zero, NaN becomes 0.
#[inline]
pub fn saturate(sample: f64) -> i16 {
    if sample.is_nan() {
        return 0;
    }
    sample.clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}

/// Quantize real-valued samples to 16-bit with saturation
pub fn quantize(samples: &[f64]) -> Vec<i16> {
    samples.iter().map(|&s| saturate(s)).collect()
}

/// Encode samples as little-endian 16-bit PCM
///
/// Every sample is clamped to `[-32768, 32767]` before serialization, so
/// the output is always exactly `2 * samples.len()` bytes.
pub fn encode<T: Copy + Into<f64>>(samples: &[T]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * SAMPLE_WIDTH);

    for &sample in samples {
        bytes.extend_from_slice(&saturate(sample.into()).to_le_bytes());
    }

    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_samples() {
        let samples: Vec<i16> = vec![0, 1, -1, 12345, -12345, i16::MAX, i16::MIN];
        let bytes = encode(&samples);

        assert_eq!(bytes.len(), 2 * samples.len());
        assert_eq!(decode(&bytes, 1, 2).unwrap(), samples);
    }

    #[test]
    fn test_decode_little_endian() {
        let bytes = [0x01, 0x00, 0xFF, 0xFF, 0x00, 0x80];
        assert_eq!(decode(&bytes, 1, 2).unwrap(), vec![1, -1, i16::MIN]);
    }

    #[test]
    fn test_decode_rejects_other_widths() {
        let bytes = [0u8; 12];
        assert!(matches!(decode(&bytes, 1, 3), Err(Error::UnsupportedFormat(_))));
        assert!(matches!(decode(&bytes, 1, 1), Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_decode_rejects_partial_frames() {
        // Odd byte count
        assert!(matches!(decode(&[0u8; 5], 1, 2), Err(Error::CorruptData(_))));

        // Whole samples but not whole stereo frames
        assert!(matches!(decode(&[0u8; 6], 2, 2), Err(Error::CorruptData(_))));
    }

    #[test]
    fn test_decode_rejects_zero_channels() {
        assert!(matches!(decode(&[0u8; 4], 0, 2), Err(Error::InvalidChannelCount(_))));
    }

    #[test]
    fn test_encode_saturates_instead_of_wrapping() {
        let samples = [40000.0, -40000.0, 32767.9, -32768.5, 1.7, -1.7, f64::NAN];
        let decoded = decode(&encode(&samples), 1, 2).unwrap();

        assert_eq!(decoded, vec![i16::MAX, i16::MIN, i16::MAX, i16::MIN, 1, -1, 0]);
    }

    #[test]
    fn test_empty_input() {
        assert!(encode::<i16>(&[]).is_empty());
        assert!(decode(&[], 2, 2).unwrap().is_empty());
    }
}
