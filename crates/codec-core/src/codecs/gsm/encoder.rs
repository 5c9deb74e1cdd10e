//! GSM 06.10 encoder

use super::basic_ops::add;
use super::frame::{GSM_FRAME_BYTES, GsmFrameParams, SubframeParams};
use super::long_term::{long_term_analysis, ltp_parameters};
use super::lpc::lpc_analysis;
use super::preprocess::preprocess;
use super::rpe::{WEIGHTING_PAD, rpe_encode};
use super::short_term::{decode_lars, short_term_analysis};
use super::state::{EncoderState, GSM_FRAME_SAMPLES, LTP_HISTORY, SUBFRAME_SAMPLES};

/// Frame encoder
///
/// Input samples are 13-bit linear PCM left-aligned in 16 bits; the three
/// low bits are ignored.
#[derive(Debug, Clone, Default)]
pub struct GsmEncoder {
    state: EncoderState,
}

impl GsmEncoder {
    /// Create an encoder in its power-on state
    pub fn new() -> Self {
        Self::default()
    }

    /// Return to the power-on state
    pub fn reset(&mut self) {
        self.state = EncoderState::new();
    }

    /// Current encoder memory
    pub fn state(&self) -> &EncoderState {
        &self.state
    }

    /// Analyse one frame into its coded parameters
    pub fn encode_params(&mut self, input: &[i16; GSM_FRAME_SAMPLES]) -> GsmFrameParams {
        let state = &mut self.state;
        let mut so = [0i16; GSM_FRAME_SAMPLES];

        preprocess(state, input, &mut so);
        let larc = lpc_analysis(&mut so);

        let current = decode_lars(&larc);
        let previous = std::mem::replace(&mut state.previous_larpp, current);
        short_term_analysis(&mut state.u, &previous, &current, &mut so);

        let mut params = GsmFrameParams {
            larc,
            ..GsmFrameParams::default()
        };

        for (k, sub) in params.subframes.iter_mut().enumerate() {
            let base = LTP_HISTORY + k * SUBFRAME_SAMPLES;
            let d = &so[k * SUBFRAME_SAMPLES..(k + 1) * SUBFRAME_SAMPLES];
            let past = &state.dp[base - LTP_HISTORY..base];

            let (nc, bc) = ltp_parameters(d, past);

            let mut dpp = [0i16; SUBFRAME_SAMPLES];
            let mut e = [0i16; SUBFRAME_SAMPLES + 2 * WEIGHTING_PAD];
            long_term_analysis(
                bc,
                nc,
                past,
                d,
                &mut dpp,
                &mut e[WEIGHTING_PAD..WEIGHTING_PAD + SUBFRAME_SAMPLES],
            );

            let rpe = rpe_encode(&e);

            // Reconstructed short-term residual, history for the next subframes
            for (i, (&ep, &estimate)) in rpe.ep.iter().zip(&dpp).enumerate() {
                state.dp[base + i] = add(ep, estimate);
            }

            *sub = SubframeParams {
                nc,
                bc,
                mc: rpe.mc,
                xmaxc: rpe.xmaxc,
                xmc: rpe.xmc,
            };
        }

        state.dp.copy_within(GSM_FRAME_SAMPLES.., 0);
        params
    }

    /// Encode one frame into a 33-byte buffer
    pub fn encode_frame(&mut self, input: &[i16; GSM_FRAME_SAMPLES], output: &mut [u8; GSM_FRAME_BYTES]) {
        let params = self.encode_params(input);
        params.pack_into(output);
        tracing::trace!(larc = ?params.larc, "GSM frame encoded");
    }
}
