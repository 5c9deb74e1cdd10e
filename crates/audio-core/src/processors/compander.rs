//! μ-law and A-law processors
//!
//! The compander is stateless, so the only state here is the resampling
//! chain. Each latched sample is scaled to 16 bits, compressed, expanded and
//! scaled back.

use super::{CodecProcessor, build_chain, retune_chain};
use crate::config::EngineConfig;
use crate::error::AudioResult;
use crate::filter::ResamplingChain;
use crate::types::{AudioBuffer, CodecParameters, ProcessSpec};
use rstelecom_codec_core::codecs::g711::CompandingLaw;
use rstelecom_codec_core::utils::{f32_to_pcm16, pcm16_to_f32};
use tracing::debug;

/// G.711 compander emulation
#[derive(Debug, Clone)]
pub struct CompanderProcessor {
    law: CompandingLaw,
    config: EngineConfig,
    params: CodecParameters,
    chain: Option<ResamplingChain>,
    channels: usize,
}

impl CompanderProcessor {
    /// Create an unprepared processor for a law
    pub fn new(law: CompandingLaw, config: &EngineConfig) -> Self {
        Self {
            law,
            config: config.clone(),
            params: CodecParameters::default(),
            chain: None,
            channels: 0,
        }
    }

    /// μ-law processor
    pub fn mu_law(config: &EngineConfig) -> Self {
        Self::new(CompandingLaw::MuLaw, config)
    }

    /// A-law processor
    pub fn a_law(config: &EngineConfig) -> Self {
        Self::new(CompandingLaw::ALaw, config)
    }

    /// Companding law in use
    pub fn law(&self) -> CompandingLaw {
        self.law
    }
}

impl CodecProcessor for CompanderProcessor {
    fn name(&self) -> &'static str {
        match self.law {
            CompandingLaw::MuLaw => "Mu-Law",
            CompandingLaw::ALaw => "A-Law",
        }
    }

    fn prepare(&mut self, spec: &ProcessSpec) -> AudioResult<()> {
        spec.validate()?;
        self.chain = Some(build_chain(&self.config, spec, spec.channels, self.params)?);
        self.channels = spec.channels;
        debug!(
            "Preparing {} processor: {} Hz, {} channels, factor {}",
            self.name(),
            spec.sample_rate,
            spec.channels,
            self.params.downsampling_factor
        );
        Ok(())
    }

    fn process_block(&mut self, buffer: &mut AudioBuffer) {
        let Some(chain) = self.chain.as_mut() else {
            return;
        };
        let law = self.law;

        for (channel, samples) in buffer.channels_mut().enumerate().take(self.channels) {
            for sample in samples.iter_mut() {
                *sample = chain.process_sample(channel, *sample, |held| {
                    pcm16_to_f32(law.round_trip(f32_to_pcm16(held)))
                });
            }
        }
    }

    fn reset(&mut self) {
        if let Some(chain) = self.chain.as_mut() {
            chain.reset();
        }
    }

    fn parameters(&self) -> CodecParameters {
        self.params
    }

    fn set_parameters(&mut self, params: CodecParameters) {
        let params = params.sanitized();
        self.params = retune_chain(self.name(), self.chain.as_mut(), params);
    }
}
