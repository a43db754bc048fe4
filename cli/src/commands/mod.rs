//! CLI command implementations.

pub mod common;
pub mod filter;
pub mod limit;
pub mod spectrum;
pub mod waveform;
