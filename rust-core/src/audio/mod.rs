//! PCM decoding, channel reduction, limiting and WAV container I/O

pub mod channels;
pub mod codec;
pub mod limiter;
pub mod signal;
pub mod wav;

pub use limiter::{limit, LimiterThreshold};
pub use signal::SignalBuffer;
pub use wav::{read_wav, read_wav_from, write_wav, write_wav_to, WavFile};
