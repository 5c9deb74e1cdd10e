//! Dialogic VOX ADPCM Codec
//!
//! 4-bit adaptive differential PCM over a 12-bit predictor, as used by
//! Dialogic telephony boards for voice-mail storage.
//!
//! # Architecture
//!
//! - `codec`: frame-level codec implementing [`AudioCodec`](crate::types::AudioCodec)
//! - `adpcm`: per-sample encode/decode steps
//! - `tables`: step size and index adjustment tables
//! - `state`: predictor state

pub mod adpcm;
pub mod codec;
pub mod state;
pub mod tables;

#[cfg(test)]
mod tests;

pub use adpcm::{decode_sample, encode_sample, reconstruct};
pub use codec::{VOX_FRAME_SIZE, VoxCodec};
pub use state::{PREDICTOR_MAX, PREDICTOR_MIN, VoxState};
