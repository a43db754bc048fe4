//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use std::path::Path;
use wavkit::audio::{read_wav, SignalBuffer};

/// Load a WAV file and reduce it to its first channel.
pub fn load_mono(path: &Path) -> anyhow::Result<SignalBuffer> {
    let wav = read_wav(path).with_context(|| format!("reading {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        channels = wav.channels,
        sample_rate = wav.sample_rate,
        frames = wav.num_frames(),
        "loaded input"
    );

    Ok(wav.into_mono()?)
}
