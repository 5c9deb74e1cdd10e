//! GSM 06.10 decoder

use super::basic_ops::{add, mult_r};
use super::frame::GsmFrameParams;
use super::long_term::long_term_synthesis;
use super::rpe::rpe_decode;
use super::short_term::{decode_lars, short_term_synthesis};
use super::state::{DecoderState, GSM_FRAME_SAMPLES, SUBFRAME_SAMPLES};
use crate::error::Result;

/// Deemphasis coefficient
const DEEMPHASIS: i16 = 28180;

/// Frame decoder producing 13-bit linear PCM left-aligned in 16 bits
#[derive(Debug, Clone, Default)]
pub struct GsmDecoder {
    state: DecoderState,
}

impl GsmDecoder {
    /// Create a decoder in its power-on state
    pub fn new() -> Self {
        Self::default()
    }

    /// Return to the power-on state
    pub fn reset(&mut self) {
        self.state = DecoderState::new();
    }

    /// Current decoder memory
    pub fn state(&self) -> &DecoderState {
        &self.state
    }

    /// Synthesize one frame from its coded parameters
    pub fn decode_params(&mut self, params: &GsmFrameParams, output: &mut [i16; GSM_FRAME_SAMPLES]) {
        let mut wt = [0i16; GSM_FRAME_SAMPLES];

        for (sub, drp) in params.subframes.iter().zip(wt.chunks_exact_mut(SUBFRAME_SAMPLES)) {
            let erp = rpe_decode(sub.xmaxc, sub.mc, &sub.xmc);
            long_term_synthesis(&mut self.state, sub.nc, sub.bc, &erp, drp);
        }

        let current = decode_lars(&params.larc);
        let previous = std::mem::replace(&mut self.state.previous_larpp, current);
        short_term_synthesis(&mut self.state.v, &previous, &current, &wt, output);

        postprocess(&mut self.state.msr, output);
    }

    /// Decode one 33-byte frame
    ///
    /// # Errors
    ///
    /// Returns an error for a frame of the wrong length or with a bad magic
    /// nibble; the decoder state is left untouched in that case.
    pub fn decode_frame(&mut self, frame: &[u8], output: &mut [i16; GSM_FRAME_SAMPLES]) -> Result<()> {
        let params = GsmFrameParams::unpack(frame)?;
        self.decode_params(&params, output);
        Ok(())
    }
}

/// Deemphasis, upscaling and truncation to 13 bits
fn postprocess(msr: &mut i16, samples: &mut [i16; GSM_FRAME_SAMPLES]) {
    for sample in samples.iter_mut() {
        let temp = mult_r(*msr, DEEMPHASIS);
        *msr = add(*sample, temp);
        *sample = add(*msr, *msr) & !0x7;
    }
}
