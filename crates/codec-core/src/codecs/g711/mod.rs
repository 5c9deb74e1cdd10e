//! G.711 μ-law and A-law Companders
//!
//! Stateless logarithmic segment companding of 16-bit linear PCM to 8-bit
//! codes. Two equivalent implementations live side by side:
//!
//! - `tables`: bias plus segment-table compression and 256-entry expansion
//!   tables (the reference output)
//! - `reference`: comparison-ladder compression and closed-form expansion
//! - `codec`: frame-level codec implementing [`AudioCodec`](crate::types::AudioCodec)

pub mod codec;
pub mod reference;
pub mod tables;

#[cfg(test)]
mod tests;

pub use codec::{CompandingLaw, G711_FRAME_SIZE, G711Codec};
pub use reference::{alaw_compress_ladder, alaw_expand_arith, ulaw_compress_ladder, ulaw_expand_arith};
pub use tables::{alaw_compress, alaw_expand, ulaw_compress, ulaw_expand};
