//! WAV container reading and writing with hound
//!
//! hound parses the RIFF header; the `data` payload is then read as raw
//! bytes and decoded by the PCM codec so that width and truncation checks
//! happen in one place.

use super::channels;
use super::codec;
use super::signal::SignalBuffer;
use crate::error::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::fs::File;
use std::io::{BufReader, Read, Seek, Write};
use std::path::Path;

/// Upper bound on the up-front payload reservation; larger payloads grow as read
const MAX_PREALLOC_BYTES: usize = 1 << 20;

/// Decoded contents of a WAV file (still interleaved)
#[derive(Debug, Clone)]
pub struct WavFile {
    /// Number of interleaved channels
    pub channels: u16,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Bits per sample (always 16 once decoded)
    pub bits_per_sample: u16,

    /// Interleaved samples
    pub samples: Vec<i16>,
}

impl WavFile {
    /// Number of frames (samples per channel)
    pub fn num_frames(&self) -> usize {
        self.samples.len() / usize::from(self.channels.max(1))
    }

    /// Down-mix to a mono signal by keeping the first channel
    pub fn into_mono(self) -> Result<SignalBuffer> {
        let samples = channels::reduce(&self.samples, usize::from(self.channels))?;
        SignalBuffer::new(samples, self.sample_rate)
    }
}

fn map_hound_error(err: hound::Error) -> Error {
    match err {
        hound::Error::IoError(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            Error::CorruptData("unexpected end of file".to_string())
        }
        hound::Error::IoError(e) => Error::Io(e),
        hound::Error::Unsupported => {
            Error::UnsupportedFormat("WAV encoding not supported".to_string())
        }
        other => Error::CorruptData(other.to_string()),
    }
}

/// Read a 16-bit PCM WAV file from disk
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<WavFile> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::FileNotFound(path.display().to_string()),
        _ => Error::Io(e),
    })?;

    read_wav_from(BufReader::new(file))
}

/// Read a 16-bit PCM WAV stream
///
/// # Arguments
/// * `reader` - Source positioned at the start of the RIFF header
pub fn read_wav_from<R: Read>(reader: R) -> Result<WavFile> {
    let wav = WavReader::new(reader).map_err(map_hound_error)?;
    let spec = wav.spec();

    if spec.sample_format != SampleFormat::Int {
        return Err(Error::UnsupportedFormat(
            "floating-point WAV data, expected 16-bit integer PCM".to_string(),
        ));
    }
    if spec.channels == 0 {
        return Err(Error::InvalidChannelCount(
            "header declares zero channels".to_string(),
        ));
    }

    let sample_width = usize::from(spec.bits_per_sample).div_ceil(8);
    let expected_bytes = wav.len() as usize * sample_width;

    // The inner reader is positioned at the start of the data chunk
    let mut payload = Vec::with_capacity(expected_bytes.min(MAX_PREALLOC_BYTES));
    wav.into_inner()
        .take(expected_bytes as u64)
        .read_to_end(&mut payload)?;

    let samples = codec::decode(&payload, usize::from(spec.channels), sample_width)?;

    if payload.len() < expected_bytes {
        return Err(Error::CorruptData(format!(
            "data chunk truncated: expected {} bytes, found {}",
            expected_bytes,
            payload.len()
        )));
    }

    tracing::debug!(
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        bits_per_sample = spec.bits_per_sample,
        samples = samples.len(),
        "decoded WAV payload"
    );

    Ok(WavFile {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        samples,
    })
}

fn mono_spec(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Write a mono 16-bit PCM WAV file
pub fn write_wav<P: AsRef<Path>>(path: P, signal: &SignalBuffer) -> Result<()> {
    let writer =
        WavWriter::create(path, mono_spec(signal.sample_rate())).map_err(map_hound_error)?;
    write_samples(writer, signal)
}

/// Write a mono 16-bit PCM WAV stream
pub fn write_wav_to<W: Write + Seek>(writer: W, signal: &SignalBuffer) -> Result<()> {
    let writer = WavWriter::new(writer, mono_spec(signal.sample_rate())).map_err(map_hound_error)?;
    write_samples(writer, signal)
}

fn write_samples<W: Write + Seek>(mut writer: WavWriter<W>, signal: &SignalBuffer) -> Result<()> {
    for &sample in signal.samples() {
        writer.write_sample(sample).map_err(map_hound_error)?;
    }
    writer.finalize().map_err(map_hound_error)?;

    tracing::debug!(
        sample_rate = signal.sample_rate(),
        samples = signal.len(),
        "wrote mono WAV"
    );

    Ok(())
}
