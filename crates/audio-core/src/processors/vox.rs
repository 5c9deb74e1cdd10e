//! VOX ADPCM processor
//!
//! Per channel: low-cut, pre-filter, and at every latch a VOX encode and
//! decode of the held sample, then post-filter, gain and a second low-cut.
//! The low-cut filters keep DC out of the ADPCM predictor.

use super::{CodecProcessor, build_chain, retune_chain};
use crate::config::EngineConfig;
use crate::error::AudioResult;
use crate::filter::{FilterArena, ResamplingChain};
use crate::types::{AudioBuffer, CodecParameters, ProcessSpec};
use rstelecom_codec_core::codecs::vox::VoxCodec;
use rstelecom_codec_core::utils::{f32_to_pcm16, pcm16_to_f32};
use tracing::debug;

/// Dialogic VOX emulation
#[derive(Debug, Clone)]
pub struct VoxProcessor {
    config: EngineConfig,
    params: CodecParameters,
    chain: Option<ResamplingChain>,
    pre_low_cut: Option<FilterArena>,
    post_low_cut: Option<FilterArena>,
    codecs: Vec<VoxCodec>,
}

impl VoxProcessor {
    /// Create an unprepared processor
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            config: config.clone(),
            params: CodecParameters::default(),
            chain: None,
            pre_low_cut: None,
            post_low_cut: None,
            codecs: Vec::new(),
        }
    }

    /// Codec state of one channel, once prepared
    pub fn channel_codec(&self, channel: usize) -> Option<&VoxCodec> {
        self.codecs.get(channel)
    }
}

impl CodecProcessor for VoxProcessor {
    fn name(&self) -> &'static str {
        "VOX"
    }

    fn prepare(&mut self, spec: &ProcessSpec) -> AudioResult<()> {
        spec.validate()?;
        let chain = build_chain(&self.config, spec, spec.channels, self.params)?;
        let pre_low_cut = FilterArena::low_cut(spec.sample_rate, spec.channels, self.config.low_cut_hz)?;

        debug!(
            "Preparing VOX processor: {} Hz, {} channels, factor {}",
            spec.sample_rate, spec.channels, self.params.downsampling_factor
        );
        self.post_low_cut = Some(pre_low_cut.clone());
        self.pre_low_cut = Some(pre_low_cut);
        self.chain = Some(chain);
        self.codecs = vec![VoxCodec::default(); spec.channels];
        Ok(())
    }

    fn process_block(&mut self, buffer: &mut AudioBuffer) {
        let Self {
            chain: Some(chain),
            pre_low_cut: Some(pre_low_cut),
            post_low_cut: Some(post_low_cut),
            codecs,
            ..
        } = self
        else {
            return;
        };

        for (channel, samples) in buffer.channels_mut().enumerate().take(codecs.len()) {
            let codec = &mut codecs[channel];
            for sample in samples.iter_mut() {
                let input = pre_low_cut.process(channel, *sample);
                let output = chain.process_sample(channel, input, |held| {
                    pcm16_to_f32(codec.round_trip_sample(f32_to_pcm16(held)))
                });
                *sample = post_low_cut.process(channel, output);
            }
        }
    }

    fn reset(&mut self) {
        if let Some(chain) = self.chain.as_mut() {
            chain.reset();
        }
        for filter in [self.pre_low_cut.as_mut(), self.post_low_cut.as_mut()].into_iter().flatten() {
            filter.reset();
        }
        for codec in &mut self.codecs {
            *codec = VoxCodec::default();
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::GainTable;

    fn sine(freq: f32, amplitude: f32, sample_rate: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|n| amplitude * (2.0 * std::f32::consts::PI * freq * n as f32 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn test_unprepared_is_passthrough() {
        let mut processor = VoxProcessor::new(&EngineConfig::default());
        let input = sine(440.0, 0.5, 48000.0, 256);
        let mut buffer = AudioBuffer::from_mono(&input);
        processor.process_block(&mut buffer);
        assert_eq!(buffer.channel(0), input.as_slice());
    }

    #[test]
    fn test_silence_stays_quiet() {
        let mut processor = VoxProcessor::new(&EngineConfig::default());
        processor.prepare(&ProcessSpec::stereo_48k()).unwrap();

        let mut buffer = AudioBuffer::new(2, 512);
        for _ in 0..10 {
            processor.process_block(&mut buffer);
        }
        // The decoder idles on the smallest step, never far from zero
        assert!(buffer.peak() < 0.01, "peak {}", buffer.peak());
    }

    #[test]
    fn test_channels_have_own_predictors() {
        let mut processor = VoxProcessor::new(&EngineConfig::default());
        processor.prepare(&ProcessSpec::stereo_48k()).unwrap();

        let mut buffer = AudioBuffer::from_channels(vec![sine(1000.0, 0.5, 48000.0, 512), vec![0.0; 512]]).unwrap();
        processor.process_block(&mut buffer);

        let left = processor.channel_codec(0).unwrap();
        let right = processor.channel_codec(1).unwrap();
        assert_ne!(left.encoder_state(), right.encoder_state());
        assert_eq!(left.encoder_state(), left.decoder_state());
    }

    #[test]
    fn test_reset_restores_power_on_state() {
        let config = EngineConfig::default().with_gain_compensation(GainTable::unity());
        let spec = ProcessSpec::new(8000.0, 1, 256);
        let input = sine(300.0, 0.4, 8000.0, 256);

        let mut fresh = VoxProcessor::new(&config);
        fresh.prepare(&spec).unwrap();
        let mut expected = AudioBuffer::from_mono(&input);
        fresh.process_block(&mut expected);

        let mut used = VoxProcessor::new(&config);
        used.prepare(&spec).unwrap();
        let mut scratch = AudioBuffer::from_mono(&sine(700.0, 0.9, 8000.0, 256));
        used.process_block(&mut scratch);
        used.reset();

        let mut actual = AudioBuffer::from_mono(&input);
        used.process_block(&mut actual);
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_parameters_are_sanitized() {
        let mut processor = VoxProcessor::new(&EngineConfig::default());
        processor.set_parameters(CodecParameters {
            downsampling_factor: 40,
            bitrate_mode: 0,
        });
        assert_eq!(processor.parameters(), CodecParameters::new(8, 1));

        // The stored factor is used by a later prepare
        processor.prepare(&ProcessSpec::stereo_48k()).unwrap();
        assert_eq!(processor.chain.as_ref().unwrap().factor(), 8);
    }

    #[test]
    fn test_extra_channels_pass_through() {
        let mut processor = VoxProcessor::new(&EngineConfig::default());
        processor.prepare(&ProcessSpec::new(48000.0, 1, 128)).unwrap();

        let right = sine(440.0, 0.3, 48000.0, 128);
        let mut buffer = AudioBuffer::from_channels(vec![vec![0.0; 128], right.clone()]).unwrap();
        processor.process_block(&mut buffer);
        assert_eq!(buffer.channel(1), right.as_slice());
    }
}
