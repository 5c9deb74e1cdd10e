//! VOX Codec Implementation
//!
//! Frame-level wrapper around the per-sample ADPCM steps. Encoded data packs
//! two nibbles per byte, first sample in the high nibble, as Dialogic `.vox`
//! files do.

use super::adpcm::{decode_sample, encode_sample};
use super::state::VoxState;
use crate::error::{CodecError, Result};
use crate::types::{AudioCodec, CodecConfig, CodecInfo, CodecType};
use crate::utils::validate_samples;

/// Default frame size in samples (20ms at 8kHz)
pub const VOX_FRAME_SIZE: usize = 160;

/// Dialogic VOX ADPCM codec
///
/// # Example
/// ```
/// use rstelecom_codec_core::codecs::vox::VoxCodec;
/// use rstelecom_codec_core::types::AudioCodec;
///
/// let mut codec = VoxCodec::default();
/// let encoded = codec.encode(&[0i16; 160]).unwrap();
/// assert_eq!(encoded.len(), 80);
///
/// let decoded = codec.decode(&encoded).unwrap();
/// assert_eq!(decoded.len(), 160);
/// ```
#[derive(Debug, Clone)]
pub struct VoxCodec {
    sample_rate: u32,
    encoder: VoxState,
    decoder: VoxState,
}

impl VoxCodec {
    /// Create a new VOX codec from configuration
    pub fn new(config: CodecConfig) -> Result<Self> {
        if config.codec_type != CodecType::Vox {
            return Err(CodecError::unsupported_codec(format!("{:?}", config.codec_type)));
        }
        config.validate()?;

        Ok(Self {
            sample_rate: config.sample_rate.hz(),
            encoder: VoxState::new(),
            decoder: VoxState::new(),
        })
    }

    /// Encode one sample and return its nibble
    #[inline]
    pub fn encode_sample(&mut self, sample: i16) -> u8 {
        encode_sample(&mut self.encoder, sample)
    }

    /// Decode one nibble and return its sample
    #[inline]
    pub fn decode_sample(&mut self, nibble: u8) -> i16 {
        decode_sample(&mut self.decoder, nibble)
    }

    /// Pass one sample through encoder and decoder
    #[inline]
    pub fn round_trip_sample(&mut self, sample: i16) -> i16 {
        let nibble = self.encode_sample(sample);
        self.decode_sample(nibble)
    }

    /// Current encoder state
    pub fn encoder_state(&self) -> &VoxState {
        &self.encoder
    }

    /// Current decoder state
    pub fn decoder_state(&self) -> &VoxState {
        &self.decoder
    }
}

impl Default for VoxCodec {
    fn default() -> Self {
        Self {
            sample_rate: 8000,
            encoder: VoxState::new(),
            decoder: VoxState::new(),
        }
    }
}

impl AudioCodec for VoxCodec {
    /// Odd-length input is padded with an encoded silent sample in the last
    /// byte, so the encoder steps once per nibble the decoder will read.
    fn encode(&mut self, samples: &[i16]) -> Result<Vec<u8>> {
        validate_samples(samples)?;

        let mut encoded = Vec::with_capacity(samples.len().div_ceil(2));
        for pair in samples.chunks(2) {
            let high = self.encode_sample(pair[0]);
            let low = self.encode_sample(pair.get(1).copied().unwrap_or(0));
            encoded.push((high << 4) | low);
        }

        Ok(encoded)
    }

    fn decode(&mut self, data: &[u8]) -> Result<Vec<i16>> {
        if data.is_empty() {
            return Err(CodecError::invalid_format("Encoded data cannot be empty"));
        }

        let mut decoded = Vec::with_capacity(data.len() * 2);
        for &byte in data {
            decoded.push(self.decode_sample(byte >> 4));
            decoded.push(self.decode_sample(byte & 0x0F));
        }

        Ok(decoded)
    }

    fn info(&self) -> CodecInfo {
        CodecInfo {
            name: "VOX",
            sample_rate: self.sample_rate,
            channels: 1,
            bitrate: self.sample_rate * 4,
            frame_size: VOX_FRAME_SIZE,
            encoded_frame_size: VOX_FRAME_SIZE / 2,
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.encoder.reset();
        self.decoder.reset();
        Ok(())
    }

    fn frame_size(&self) -> usize {
        VOX_FRAME_SIZE
    }

    fn supports_variable_frame_size(&self) -> bool {
        true
    }
}
