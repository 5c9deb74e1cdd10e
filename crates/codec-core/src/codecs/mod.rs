//! Codec implementations and factory

use crate::error::{CodecError, Result};
use crate::types::{AudioCodec, CodecConfig, CodecType};

// Codec implementations
#[cfg(feature = "g711")]
pub mod g711;

#[cfg(feature = "gsm")]
pub mod gsm;

#[cfg(feature = "vox")]
pub mod vox;

/// Codec factory for creating codec instances
pub struct CodecFactory;

impl CodecFactory {
    /// Create a codec instance from configuration
    pub fn create(config: CodecConfig) -> Result<Box<dyn AudioCodec>> {
        // Validate configuration first
        config.validate()?;

        match config.codec_type {
            #[cfg(feature = "vox")]
            CodecType::Vox => {
                let codec = vox::VoxCodec::new(config)?;
                Ok(Box::new(codec))
            }

            #[cfg(feature = "g711")]
            CodecType::G711Pcmu => {
                let codec = g711::G711Codec::new_pcmu(config)?;
                Ok(Box::new(codec))
            }

            #[cfg(feature = "g711")]
            CodecType::G711Pcma => {
                let codec = g711::G711Codec::new_pcma(config)?;
                Ok(Box::new(codec))
            }

            #[cfg(feature = "gsm")]
            CodecType::Gsm610 => {
                let codec = gsm::Gsm610Codec::new(config)?;
                Ok(Box::new(codec))
            }

            #[allow(unreachable_patterns)]
            codec_type => Err(CodecError::feature_not_enabled(codec_type.name().to_lowercase())),
        }
    }

    /// Create a codec by name, keeping the rest of the configuration
    pub fn create_by_name(name: &str, config: CodecConfig) -> Result<Box<dyn AudioCodec>> {
        let codec_type = CodecType::from_name(name).ok_or_else(|| CodecError::unsupported_codec(name))?;

        let config = CodecConfig {
            codec_type,
            sample_rate: crate::types::SampleRate::from_hz(codec_type.default_sample_rate()),
            ..config
        };

        Self::create(config)
    }

    /// Get all supported codec names
    pub fn supported_codecs() -> Vec<&'static str> {
        vec![
            #[cfg(feature = "vox")]
            "VOX",
            #[cfg(feature = "g711")]
            "PCMU",
            #[cfg(feature = "g711")]
            "PCMA",
            #[cfg(feature = "gsm")]
            "GSM",
        ]
    }

    /// Check if a codec is supported
    pub fn is_supported(name: &str) -> bool {
        CodecType::from_name(name).is_some_and(|codec_type| Self::supported_codecs().contains(&codec_type.name()))
    }
}
