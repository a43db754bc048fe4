//! CSV export of waveform and spectrum series
//!
//! Plotting is left to external tools; these writers emit the same series
//! the display tools would draw.

use crate::audio::SignalBuffer;
use crate::error::Result;
use crate::spectrum::Spectrum;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write `time_s,amplitude` rows for every sample
pub fn write_waveform_csv<W: Write>(mut out: W, signal: &SignalBuffer) -> Result<()> {
    writeln!(out, "time_s,amplitude")?;
    for (t, &s) in signal.time_axis().iter().zip(signal.samples()) {
        writeln!(out, "{:.6},{}", t, s)?;
    }
    out.flush()?;
    Ok(())
}

/// Write `frequency_hz,magnitude` rows for every bin
pub fn write_spectrum_csv<W: Write>(mut out: W, spectrum: &Spectrum) -> Result<()> {
    writeln!(out, "frequency_hz,magnitude")?;
    for (f, m) in spectrum.frequencies.iter().zip(&spectrum.magnitudes) {
        writeln!(out, "{:.6},{:.6}", f, m)?;
    }
    out.flush()?;
    Ok(())
}

/// Export a waveform to a CSV file
pub fn export_waveform_csv(signal: &SignalBuffer, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path)?;
    write_waveform_csv(BufWriter::new(file), signal)
}

/// Export a spectrum to a CSV file
pub fn export_spectrum_csv(spectrum: &Spectrum, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path)?;
    write_spectrum_csv(BufWriter::new(file), spectrum)
}
