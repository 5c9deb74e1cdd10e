//! # Audio-Core: Telephony Codec Emulation
//!
//! Real-time float processing around the integer codecs of
//! `rstelecom-codec-core`. A host hands blocks of audio to a [`SlotEngine`],
//! which runs them through up to [`config::MAX_SLOT_COUNT`] codec processors
//! in series. Each processor band-limits the signal for its decimation
//! factor, runs the codec on the held samples and smooths the result back
//! to the host rate.
//!
//! ## Pieces
//!
//! - [`filter`]: Butterworth design, the per-(channel, section) filter
//!   arena and the hold-and-filter [`ResamplingChain`]
//! - [`processors`]: the [`CodecProcessor`] lifecycle and the VOX, μ-law,
//!   A-law and GSM 06.10 processors
//! - [`engine`]: processor registry, slots and the control exchange
//!
//! ## Usage
//!
//! ```rust
//! use rstelecom_audio_core::prelude::*;
//! use rstelecom_audio_core::engine::SELECTOR_GSM;
//!
//! let mut engine = SlotEngine::new(EngineConfig::default())?;
//! engine.prepare(&ProcessSpec::new(48000.0, 1, 480))?;
//!
//! let controls = engine.controls();
//! controls.set_selector(0, SELECTOR_GSM);
//! controls.set_downsampling_factor(6);
//!
//! let mut buffer = AudioBuffer::from_mono(&[0.1; 480]);
//! engine.process_block(&mut buffer);
//! assert!(buffer.is_finite());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `vox`: VOX ADPCM processor (enabled by default)
//! - `g711`: μ-law and A-law processors (enabled by default)
//! - `gsm`: GSM 06.10 processor (enabled by default)

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod processors;
pub mod types;

pub use config::EngineConfig;
pub use engine::{ControlSnapshot, EngineControls, ProcessorRegistry, Slot, SlotEngine};
pub use error::{AudioError, AudioResult, ErrorCategory};
pub use filter::{FilterArena, GainTable, ResamplingChain};
pub use processors::CodecProcessor;
pub use types::{AudioBuffer, CodecParameters, ProcessSpec};

/// Version information for the audio library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commonly used types
pub mod prelude {
    pub use crate::{
        AudioBuffer, AudioError, AudioResult, CodecParameters, CodecProcessor, ControlSnapshot, EngineConfig,
        EngineControls, ProcessSpec, SlotEngine,
    };

    #[cfg(feature = "g711")]
    pub use crate::processors::CompanderProcessor;
    #[cfg(feature = "gsm")]
    pub use crate::processors::GsmProcessor;
    #[cfg(feature = "vox")]
    pub use crate::processors::VoxProcessor;
}
