//! # Codec-Core: Bit-Exact Legacy Telephony Codecs
//!
//! This library provides fixed-point implementations of the narrowband
//! codecs found on legacy telephone networks and voice-mail systems. Each
//! codec is exposed twice: as a sample- or frame-level state machine that a
//! real-time audio loop can drive without allocating, and through the
//! frame-level [`AudioCodec`] trait for offline use.
//!
//! ## Features
//!
//! - **VOX**: Dialogic 4-bit ADPCM with 12-bit predictor
//! - **G.711 (PCMU/PCMA)**: μ-law and A-law segment companders, table-driven
//!   with arithmetic reference forms
//! - **GSM 06.10**: full-rate RPE-LTP, 160 samples into 33-byte frames
//!
//! ## Usage
//!
//! ```rust
//! use rstelecom_codec_core::{CodecConfig, CodecFactory};
//!
//! // Create a GSM 06.10 codec
//! let config = CodecConfig::gsm();
//! let mut codec = CodecFactory::create(config)?;
//!
//! // Encode audio samples
//! let samples = vec![0i16; 160]; // 20ms at 8kHz
//! let encoded = codec.encode(&samples)?;
//! assert_eq!(encoded.len(), 33);
//!
//! // Decode back to samples
//! let decoded = codec.decode(&encoded)?;
//! assert_eq!(decoded.len(), 160);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `vox`: Dialogic VOX ADPCM (enabled by default)
//! - `g711`: G.711 μ-law/A-law companders (enabled by default)
//! - `gsm`: GSM 06.10 full rate (enabled by default)

#![deny(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod codecs;
pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use codecs::CodecFactory;
pub use error::{CodecError, Result};
pub use types::{AudioCodec, CodecConfig, CodecInfo, CodecType, SampleRate};

/// Version information for the codec library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Supported codec types
pub const SUPPORTED_CODECS: &[&str] = &[
    #[cfg(feature = "vox")]
    "VOX",
    #[cfg(feature = "g711")]
    "PCMU",
    #[cfg(feature = "g711")]
    "PCMA",
    #[cfg(feature = "gsm")]
    "GSM",
];

/// Initialize the codec library
///
/// Installs a `tracing` subscriber if none is set yet and logs the build
/// configuration. It's safe to call multiple times.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps room for codec backends that
/// need runtime setup.
pub fn init() -> Result<()> {
    // Initialize logging if not already done
    let _ = tracing_subscriber::fmt::try_init();

    tracing::info!("Codec-Core v{} initialized", VERSION);
    tracing::info!("Supported codecs: {:?}", SUPPORTED_CODECS);

    Ok(())
}

/// Get library information
pub fn info() -> LibraryInfo {
    LibraryInfo {
        version: VERSION,
        supported_codecs: SUPPORTED_CODECS.to_vec(),
    }
}

/// Library information structure
#[derive(Debug, Clone)]
pub struct LibraryInfo {
    /// Library version
    pub version: &'static str,
    /// List of supported codec names
    pub supported_codecs: Vec<&'static str>,
}
