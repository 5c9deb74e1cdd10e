//! GSM 06.10 processor
//!
//! Audio is downmixed to mono, low-cut and pre-filtered, then fed one
//! latched sample at a time into a 160-sample frame bridge. The bridge owns
//! three frame buffers. Input fills one of them; when it is full the input
//! and working buffers swap roles, the working frame is encoded to 33 bytes
//! and decoded back in place, and the working and output buffers swap
//! roles. The output buffer is read at the same position the next input
//! sample is written to, so decoded audio lags the input by 159 samples.

use super::{CodecProcessor, build_chain, retune_chain};
use crate::config::EngineConfig;
use crate::error::AudioResult;
use crate::filter::{FilterArena, ResamplingChain};
use crate::types::{AudioBuffer, CodecParameters, ProcessSpec};
use rstelecom_codec_core::codecs::gsm::{GSM_FRAME_BYTES, GSM_FRAME_SAMPLES, GsmDecoder, GsmEncoder};
use std::mem;
use tracing::{debug, trace, warn};

/// Full scale of the 13-bit GSM signal
const GSM_SCALE: f32 = 4096.0;

/// The codec reads the upper 13 bits of each 16-bit sample
const GSM_SAMPLE_MASK: i16 = !0x7;

type FrameBuffer = Box<[i16; GSM_FRAME_SAMPLES]>;

/// Per-sample to per-frame bridge around the GSM encoder and decoder
#[derive(Debug, Clone)]
pub struct GsmFrameBridge {
    encoder: GsmEncoder,
    decoder: GsmDecoder,
    input: FrameBuffer,
    working: FrameBuffer,
    output: FrameBuffer,
    frame: [u8; GSM_FRAME_BYTES],
    position: usize,
    frames: u64,
}

impl GsmFrameBridge {
    /// Create a bridge with silent buffers and fresh codec state
    pub fn new() -> Self {
        Self {
            encoder: GsmEncoder::new(),
            decoder: GsmDecoder::new(),
            input: Box::new([0; GSM_FRAME_SAMPLES]),
            working: Box::new([0; GSM_FRAME_SAMPLES]),
            output: Box::new([0; GSM_FRAME_SAMPLES]),
            frame: [0; GSM_FRAME_BYTES],
            position: 0,
            frames: 0,
        }
    }

    /// Write one sample and read the decoded sample at the same position
    ///
    /// Input is scaled to 13 bits with saturation and left-aligned in 16.
    #[inline]
    pub fn push(&mut self, sample: f32) -> f32 {
        // NaN converts to 0
        let scaled = (sample * GSM_SCALE).clamp(-GSM_SCALE, GSM_SCALE - 1.0) as i16;
        self.input[self.position] = (scaled << 3) & GSM_SAMPLE_MASK;

        self.position = (self.position + 1) % GSM_FRAME_SAMPLES;
        if self.position == 0 {
            self.run_frame();
        }

        f32::from(self.output[self.position] >> 3) / GSM_SCALE
    }

    fn run_frame(&mut self) {
        mem::swap(&mut self.input, &mut self.working);
        self.encoder.encode_frame(&self.working, &mut self.frame);
        if let Err(err) = self.decoder.decode_frame(&self.frame, &mut self.working) {
            warn!("GSM round trip produced an undecodable frame: {}", err);
            self.working.fill(0);
        }
        mem::swap(&mut self.working, &mut self.output);

        self.frames += 1;
        trace!(frame = self.frames, "GSM frame round trip");
    }

    /// Clear buffers and codec state
    pub fn reset(&mut self) {
        self.encoder.reset();
        self.decoder.reset();
        for buffer in [&mut self.input, &mut self.working, &mut self.output] {
            buffer.fill(0);
        }
        self.frame = [0; GSM_FRAME_BYTES];
        self.position = 0;
        self.frames = 0;
    }

    /// Number of encode/decode cycles run so far
    pub fn frames_processed(&self) -> u64 {
        self.frames
    }

    /// Write position inside the current frame, `0..160`
    pub fn position(&self) -> usize {
        self.position
    }

    /// The most recently encoded 33-byte frame
    pub fn last_frame(&self) -> &[u8; GSM_FRAME_BYTES] {
        &self.frame
    }
}

impl Default for GsmFrameBridge {
    fn default() -> Self {
        Self::new()
    }
}

/// GSM 06.10 full-rate emulation
#[derive(Debug, Clone)]
pub struct GsmProcessor {
    config: EngineConfig,
    params: CodecParameters,
    chain: Option<ResamplingChain>,
    low_cut: Option<FilterArena>,
    bridge: GsmFrameBridge,
}

impl GsmProcessor {
    /// Create an unprepared processor
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            config: config.clone(),
            params: CodecParameters::default(),
            chain: None,
            low_cut: None,
            bridge: GsmFrameBridge::new(),
        }
    }

    /// The frame bridge, for inspection
    pub fn bridge(&self) -> &GsmFrameBridge {
        &self.bridge
    }
}

impl CodecProcessor for GsmProcessor {
    fn name(&self) -> &'static str {
        "GSM 06.10"
    }

    fn prepare(&mut self, spec: &ProcessSpec) -> AudioResult<()> {
        spec.validate()?;
        // Everything after the downmix runs on a single channel
        let chain = build_chain(&self.config, spec, 1, self.params)?;
        let low_cut = FilterArena::low_cut(spec.sample_rate, 1, self.config.low_cut_hz)?;

        debug!(
            "Preparing GSM processor: {} Hz, {} channels downmixed, factor {}",
            spec.sample_rate, spec.channels, self.params.downsampling_factor
        );
        self.chain = Some(chain);
        self.low_cut = Some(low_cut);
        self.bridge.reset();
        Ok(())
    }

    fn process_block(&mut self, buffer: &mut AudioBuffer) {
        let Self {
            chain: Some(chain),
            low_cut: Some(low_cut),
            bridge,
            ..
        } = self
        else {
            return;
        };

        for index in 0..buffer.num_samples() {
            let input = low_cut.process(0, buffer.downmix_sample(index));
            let output = chain.process_sample(0, input, |held| bridge.push(held));
            buffer.fill_sample(index, output);
        }
    }

    fn reset(&mut self) {
        if let Some(chain) = self.chain.as_mut() {
            chain.reset();
        }
        if let Some(low_cut) = self.low_cut.as_mut() {
            low_cut.reset();
        }
        self.bridge.reset();
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

    #[test]
    fn test_bridge_runs_one_frame_per_160_samples() {
        let mut bridge = GsmFrameBridge::new();
        for _ in 0..GSM_FRAME_SAMPLES - 1 {
            assert_eq!(bridge.push(0.25), 0.0);
        }
        assert_eq!(bridge.frames_processed(), 0);

        // The 160th sample completes the frame and reads decoded sample 0
        bridge.push(0.25);
        assert_eq!(bridge.frames_processed(), 1);
        assert_eq!(bridge.position(), 0);

        // The first decoded frame now plays out
        let played: Vec<f32> = (0..GSM_FRAME_SAMPLES).map(|_| bridge.push(0.25)).collect();
        assert!(played.iter().any(|&s| s != 0.0));
        assert_eq!(bridge.frames_processed(), 2);
    }

    #[test]
    fn test_bridge_input_scaling_saturates() {
        let mut bridge = GsmFrameBridge::new();
        bridge.push(2.0);
        bridge.push(-2.0);
        bridge.push(f32::NAN);
        bridge.push(0.5);
        assert_eq!(bridge.input[0], 4095 << 3);
        assert_eq!(bridge.input[1], -4096 << 3);
        assert_eq!(bridge.input[2], 0);
        assert_eq!(bridge.input[3], 2048 << 3);
    }

    #[test]
    fn test_bridge_rotates_buffers_without_copying() {
        let mut bridge = GsmFrameBridge::new();
        let before = [
            bridge.input.as_ptr(),
            bridge.working.as_ptr(),
            bridge.output.as_ptr(),
        ];
        for _ in 0..GSM_FRAME_SAMPLES {
            bridge.push(0.1);
        }
        // input <- working, working <- output, output <- input
        assert_eq!(bridge.input.as_ptr(), before[1]);
        assert_eq!(bridge.working.as_ptr(), before[2]);
        assert_eq!(bridge.output.as_ptr(), before[0]);
    }

    #[test]
    fn test_bridge_reset() {
        let mut bridge = GsmFrameBridge::new();
        for n in 0..400 {
            bridge.push((n as f32 * 0.05).sin() * 0.5);
        }
        bridge.reset();
        assert_eq!(bridge.frames_processed(), 0);
        assert_eq!(bridge.position(), 0);
        assert_eq!(bridge.encoder.state(), GsmEncoder::new().state());
        assert_eq!(bridge.decoder.state(), GsmDecoder::new().state());
    }

    #[test]
    fn test_prepare_clears_bridge() {
        let mut processor = GsmProcessor::new(&EngineConfig::default());
        processor.prepare(&ProcessSpec::mono_8k()).unwrap();
        let mut buffer = AudioBuffer::from_mono(&[0.2; 100]);
        processor.process_block(&mut buffer);
        assert_eq!(processor.bridge().position(), 100);

        processor.prepare(&ProcessSpec::mono_8k()).unwrap();
        assert_eq!(processor.bridge().position(), 0);
    }
}
