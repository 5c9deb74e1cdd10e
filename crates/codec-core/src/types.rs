//! Core types and traits for the codec library
//!
//! This module defines the frame-level codec API. Every codec in the crate
//! also exposes a per-sample (VOX, G.711) or per-frame (GSM) state machine
//! for callers that drive it from a real-time audio loop.

use crate::error::{CodecError, Result};
use std::fmt;

/// Primary trait for audio codecs
///
/// This trait defines the core operations that all audio codecs must implement:
/// encoding, decoding, and state management.
pub trait AudioCodec: Send + Sync {
    /// Encode audio samples to compressed data
    ///
    /// # Arguments
    ///
    /// * `samples` - Input audio samples as 16-bit PCM
    ///
    /// # Errors
    ///
    /// Returns an error if the input length does not fit the codec framing
    fn encode(&mut self, samples: &[i16]) -> Result<Vec<u8>>;

    /// Decode compressed data to audio samples
    ///
    /// # Arguments
    ///
    /// * `data` - Compressed audio data
    ///
    /// # Errors
    ///
    /// Returns an error if the data length or content is invalid
    fn decode(&mut self, data: &[u8]) -> Result<Vec<i16>>;

    /// Get codec information
    fn info(&self) -> CodecInfo;

    /// Reset codec state
    ///
    /// This clears all predictor and filter memories so that the next call
    /// starts from the codec's power-on state.
    fn reset(&mut self) -> Result<()>;

    /// Get the expected frame size in samples
    fn frame_size(&self) -> usize;

    /// Check if the codec supports variable frame sizes
    fn supports_variable_frame_size(&self) -> bool {
        false
    }
}

/// Audio codec information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecInfo {
    /// Codec name (e.g., "VOX", "PCMU", "GSM")
    pub name: &'static str,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u8,
    /// Bitrate in bits per second
    pub bitrate: u32,
    /// Frame size in samples
    pub frame_size: usize,
    /// Encoded size of one frame in bytes
    pub encoded_frame_size: usize,
}

/// Audio codec types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecType {
    /// Dialogic VOX 4-bit ADPCM
    Vox,
    /// G.711 μ-law (PCMU)
    G711Pcmu,
    /// G.711 A-law (PCMA)
    G711Pcma,
    /// GSM 06.10 full rate
    Gsm610,
}

impl CodecType {
    /// All codec types known to the crate
    pub const ALL: [CodecType; 4] = [Self::Vox, Self::G711Pcmu, Self::G711Pcma, Self::Gsm610];

    /// Get the codec name
    pub fn name(self) -> &'static str {
        match self {
            Self::Vox => "VOX",
            Self::G711Pcmu => "PCMU",
            Self::G711Pcma => "PCMA",
            Self::Gsm610 => "GSM",
        }
    }

    /// Parse a codec name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_uppercase().as_str() {
            "VOX" | "ADPCM" => Some(Self::Vox),
            "PCMU" | "ULAW" | "MULAW" => Some(Self::G711Pcmu),
            "PCMA" | "ALAW" => Some(Self::G711Pcma),
            "GSM" | "GSM610" => Some(Self::Gsm610),
            _ => None,
        }
    }

    /// Get the default sample rate
    pub fn default_sample_rate(self) -> u32 {
        8000
    }

    /// Get the default bitrate
    pub fn default_bitrate(self) -> u32 {
        match self {
            Self::Vox => 32000,
            Self::G711Pcmu | Self::G711Pcma => 64000,
            Self::Gsm610 => 13200,
        }
    }

    /// Get supported sample rates
    pub fn supported_sample_rates(self) -> &'static [u32] {
        match self {
            // Dialogic hardware ran VOX at both rates
            Self::Vox => &[6000, 8000],
            Self::G711Pcmu | Self::G711Pcma | Self::Gsm610 => &[8000],
        }
    }

    /// Get supported channel counts
    pub fn supported_channels(self) -> &'static [u8] {
        &[1]
    }
}

impl fmt::Display for CodecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Sample rate enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleRate {
    /// 6 kHz (Dialogic low rate)
    Rate6000,
    /// 8 kHz (narrowband)
    Rate8000,
    /// 44.1 kHz (CD quality)
    Rate44100,
    /// 48 kHz (professional)
    Rate48000,
    /// Custom sample rate
    Custom(u32),
}

impl SampleRate {
    /// Get the sample rate value in Hz
    pub fn hz(self) -> u32 {
        match self {
            Self::Rate6000 => 6000,
            Self::Rate8000 => 8000,
            Self::Rate44100 => 44100,
            Self::Rate48000 => 48000,
            Self::Custom(rate) => rate,
        }
    }

    /// Create from Hz value
    pub fn from_hz(hz: u32) -> Self {
        match hz {
            6000 => Self::Rate6000,
            8000 => Self::Rate8000,
            44100 => Self::Rate44100,
            48000 => Self::Rate48000,
            rate => Self::Custom(rate),
        }
    }

    /// Check if this is a standard telephony rate
    pub fn is_telephony(self) -> bool {
        matches!(self, Self::Rate6000 | Self::Rate8000)
    }
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Hz", self.hz())
    }
}

/// Codec configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Codec type
    pub codec_type: CodecType,
    /// Sample rate
    pub sample_rate: SampleRate,
    /// Number of channels
    pub channels: u8,
}

impl CodecConfig {
    /// Create a new codec configuration
    pub fn new(codec_type: CodecType) -> Self {
        Self {
            codec_type,
            sample_rate: SampleRate::from_hz(codec_type.default_sample_rate()),
            channels: 1,
        }
    }

    /// Create VOX configuration
    pub fn vox() -> Self {
        Self::new(CodecType::Vox)
    }

    /// Create G.711 PCMU configuration
    pub fn g711_pcmu() -> Self {
        Self::new(CodecType::G711Pcmu)
    }

    /// Create G.711 PCMA configuration
    pub fn g711_pcma() -> Self {
        Self::new(CodecType::G711Pcma)
    }

    /// Create GSM 06.10 configuration
    pub fn gsm() -> Self {
        Self::new(CodecType::Gsm610)
    }

    /// Set sample rate
    pub fn with_sample_rate(mut self, sample_rate: SampleRate) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set channel count
    pub fn with_channels(mut self, channels: u8) -> Self {
        self.channels = channels;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let supported_rates = self.codec_type.supported_sample_rates();
        if !supported_rates.contains(&self.sample_rate.hz()) {
            return Err(CodecError::InvalidSampleRate {
                rate: self.sample_rate.hz(),
                supported: supported_rates.to_vec(),
            });
        }

        let supported_channels = self.codec_type.supported_channels();
        if !supported_channels.contains(&self.channels) {
            return Err(CodecError::InvalidChannelCount {
                channels: self.channels,
                supported: supported_channels.to_vec(),
            });
        }

        Ok(())
    }
}
