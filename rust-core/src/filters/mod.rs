//! Band-pass IIR design and recursive filtering

pub mod design;
pub mod iir;

pub use design::{
    design_bandpass_iir, frequency_response, magnitude_response_db, FilterCoefficients,
    FilterSpec, Sos,
};
pub use iir::{apply, IirFilter};
