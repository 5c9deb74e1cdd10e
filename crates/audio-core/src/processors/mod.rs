//! Codec processors
//!
//! Each processor wraps one codec from `rstelecom-codec-core` in the
//! resampling chain and runs it on host audio in place. All of them share
//! the [`CodecProcessor`] lifecycle, so the slot engine can drive any of
//! them through a `Box<dyn CodecProcessor>`.
//!
//! ```
//! use rstelecom_audio_core::prelude::*;
//!
//! let mut processor = CompanderProcessor::mu_law(&EngineConfig::default());
//! processor.prepare(&ProcessSpec::stereo_48k()).unwrap();
//! processor.set_parameters(CodecParameters::new(6, 1));
//!
//! let mut buffer = AudioBuffer::new(2, 512);
//! processor.process_block(&mut buffer);
//! assert!(buffer.is_finite());
//! ```

#[cfg(feature = "g711")]
pub mod compander;
#[cfg(feature = "gsm")]
pub mod gsm;
#[cfg(feature = "vox")]
pub mod vox;

#[cfg(feature = "g711")]
pub use compander::CompanderProcessor;
#[cfg(feature = "gsm")]
pub use gsm::GsmProcessor;
#[cfg(feature = "vox")]
pub use vox::VoxProcessor;

use crate::config::EngineConfig;
use crate::error::AudioResult;
use crate::filter::ResamplingChain;
use crate::types::{AudioBuffer, CodecParameters, ProcessSpec};
use tracing::warn;

/// Lifecycle shared by every codec processor
///
/// `prepare` may allocate and may fail. `process_block` never allocates and
/// never fails: before `prepare` it leaves the buffer untouched, and channels
/// beyond the prepared count pass through unchanged.
pub trait CodecProcessor: Send {
    /// Short display name
    fn name(&self) -> &'static str;

    /// Size internal state for a stream
    fn prepare(&mut self, spec: &ProcessSpec) -> AudioResult<()>;

    /// Process one block in place
    fn process_block(&mut self, buffer: &mut AudioBuffer);

    /// Clear all filter and codec state
    fn reset(&mut self);

    /// Current parameters
    fn parameters(&self) -> CodecParameters;

    /// Install new parameters
    ///
    /// A changed downsampling factor redesigns the resampling filters and
    /// discards their state.
    fn set_parameters(&mut self, params: CodecParameters);
}

/// Build a resampling chain for a prepared stream
pub(crate) fn build_chain(
    config: &EngineConfig,
    spec: &ProcessSpec,
    channels: usize,
    params: CodecParameters,
) -> AudioResult<ResamplingChain> {
    ResamplingChain::new(
        spec.sample_rate,
        channels,
        config.filter_order,
        params.downsampling_factor,
        config.gain_compensation,
    )
}

/// Apply a factor change to a prepared chain
///
/// Returns the parameters actually in effect. A design failure keeps the
/// previous filters running, is logged, and leaves the old factor in the
/// returned parameters.
pub(crate) fn retune_chain(
    name: &str,
    chain: Option<&mut ResamplingChain>,
    params: CodecParameters,
) -> CodecParameters {
    let Some(chain) = chain else {
        return params;
    };

    match chain.set_factor(params.downsampling_factor) {
        Ok(_) => params,
        Err(err) => {
            warn!("{}: keeping factor {} after redesign failed: {}", name, chain.factor(), err);
            CodecParameters {
                downsampling_factor: chain.factor(),
                ..params
            }
        }
    }
}
