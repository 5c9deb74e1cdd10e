//! G.711 Codec Implementation

use super::tables::{alaw_compress, alaw_expand, ulaw_compress, ulaw_expand};
use crate::error::{CodecError, Result};
use crate::types::{AudioCodec, CodecConfig, CodecInfo, CodecType};
use crate::utils::{validate_buffer_size, validate_samples};

/// Default frame size in samples (20ms at 8kHz)
pub const G711_FRAME_SIZE: usize = 160;

/// Companding law
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompandingLaw {
    /// μ-law (North America, Japan)
    MuLaw,
    /// A-law (Europe, international links)
    ALaw,
}

impl CompandingLaw {
    /// Compress one 16-bit sample
    #[inline]
    pub fn compress(self, sample: i16) -> u8 {
        match self {
            Self::MuLaw => ulaw_compress(sample),
            Self::ALaw => alaw_compress(sample),
        }
    }

    /// Expand one compressed byte
    #[inline]
    pub fn expand(self, compressed: u8) -> i16 {
        match self {
            Self::MuLaw => ulaw_expand(compressed),
            Self::ALaw => alaw_expand(compressed),
        }
    }

    /// Compress then expand one sample
    #[inline]
    pub fn round_trip(self, sample: i16) -> i16 {
        self.expand(self.compress(sample))
    }
}

/// G.711 codec, one byte per sample
///
/// The compander is stateless, so `reset` is a no-op and any frame length is
/// accepted.
#[derive(Debug, Clone, Copy)]
pub struct G711Codec {
    law: CompandingLaw,
}

impl G711Codec {
    /// Create a μ-law codec from configuration
    pub fn new_pcmu(config: CodecConfig) -> Result<Self> {
        Self::with_config(config, CodecType::G711Pcmu, CompandingLaw::MuLaw)
    }

    /// Create an A-law codec from configuration
    pub fn new_pcma(config: CodecConfig) -> Result<Self> {
        Self::with_config(config, CodecType::G711Pcma, CompandingLaw::ALaw)
    }

    fn with_config(config: CodecConfig, expected: CodecType, law: CompandingLaw) -> Result<Self> {
        if config.codec_type != expected {
            return Err(CodecError::unsupported_codec(format!("{:?}", config.codec_type)));
        }
        config.validate()?;
        Ok(Self { law })
    }

    /// Create a codec for a companding law with default settings
    pub fn for_law(law: CompandingLaw) -> Self {
        Self { law }
    }

    /// Companding law of this codec
    pub fn law(&self) -> CompandingLaw {
        self.law
    }

    /// Compress samples into a caller-provided buffer
    pub fn compress_into(&self, samples: &[i16], output: &mut [u8]) -> Result<usize> {
        validate_buffer_size(samples.len(), output.len())?;
        for (out, &sample) in output.iter_mut().zip(samples) {
            *out = self.law.compress(sample);
        }
        Ok(samples.len())
    }

    /// Expand bytes into a caller-provided buffer
    pub fn expand_into(&self, data: &[u8], output: &mut [i16]) -> Result<usize> {
        validate_buffer_size(data.len(), output.len())?;
        for (out, &byte) in output.iter_mut().zip(data) {
            *out = self.law.expand(byte);
        }
        Ok(data.len())
    }
}

impl AudioCodec for G711Codec {
    fn encode(&mut self, samples: &[i16]) -> Result<Vec<u8>> {
        validate_samples(samples)?;
        Ok(samples.iter().map(|&sample| self.law.compress(sample)).collect())
    }

    fn decode(&mut self, data: &[u8]) -> Result<Vec<i16>> {
        if data.is_empty() {
            return Err(CodecError::invalid_format("Encoded data cannot be empty"));
        }
        Ok(data.iter().map(|&byte| self.law.expand(byte)).collect())
    }

    fn info(&self) -> CodecInfo {
        CodecInfo {
            name: match self.law {
                CompandingLaw::MuLaw => "PCMU",
                CompandingLaw::ALaw => "PCMA",
            },
            sample_rate: 8000,
            channels: 1,
            bitrate: 64000,
            frame_size: G711_FRAME_SIZE,
            encoded_frame_size: G711_FRAME_SIZE,
        }
    }

    fn reset(&mut self) -> Result<()> {
        Ok(())
    }

    fn frame_size(&self) -> usize {
        G711_FRAME_SIZE
    }

    fn supports_variable_frame_size(&self) -> bool {
        true
    }
}
