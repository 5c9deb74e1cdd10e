//! GSM 06.10 Full-Rate Speech Codec
//!
//! Regular pulse excitation with long-term prediction (RPE-LTP), coding
//! 160 samples of 13-bit PCM at 8 kHz into 260 bits (a 33-byte frame with a
//! 4-bit magic nibble). The implementation is bit-exact fixed-point:
//!
//! - `basic_ops`: saturating word arithmetic
//! - `preprocess`: offset compensation and preemphasis
//! - `lpc`: autocorrelation, Schur recursion, LAR quantization
//! - `short_term`: LAR interpolation and lattice filters
//! - `long_term`: LTP lag and gain search, LTP synthesis
//! - `rpe`: weighting filter, grid selection, APCM quantization
//! - `frame`: parameter set and bit layout
//!
//! [`GsmEncoder`] and [`GsmDecoder`] work one frame at a time without
//! allocating; [`Gsm610Codec`] wraps both in the
//! [`AudioCodec`](crate::types::AudioCodec) interface.

pub mod basic_ops;
pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod frame;
pub mod long_term;
pub mod lpc;
pub mod preprocess;
pub mod rpe;
pub mod short_term;
pub mod state;
pub mod tables;

#[cfg(test)]
mod tests;

pub use codec::Gsm610Codec;
pub use decoder::GsmDecoder;
pub use encoder::GsmEncoder;
pub use frame::{GSM_FRAME_BYTES, GSM_MAGIC, GsmFrameParams, SubframeParams};
pub use state::GSM_FRAME_SAMPLES;
