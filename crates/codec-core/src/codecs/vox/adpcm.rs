//! VOX ADPCM Implementation
//!
//! Per-sample encode and decode steps. Both directions share
//! [`reconstruct`], so an encoder and a decoder fed the same nibbles always
//! hold identical `{predictor, step_index}` pairs.

use super::state::{PREDICTOR_MAX, PREDICTOR_MIN, VoxState};
use super::tables::{ADPCM_INDEX_TABLE, MAGNITUDE_MASK, MAX_STEP_INDEX, SIGN_BIT};

/// Apply one nibble to a state and return the new predictor
///
/// `delta = ((2 * magnitude + 1) * step) >> 3`, negated when the sign bit is
/// set, added to the predictor and clamped to 12 bits. The step index then
/// moves by the index table entry for this nibble.
#[inline]
pub fn reconstruct(state: &mut VoxState, nibble: u8) -> i16 {
    let nibble = nibble & 0x0F;
    let step = i32::from(state.step_size());
    let magnitude = i32::from(nibble & MAGNITUDE_MASK);

    let mut delta = ((2 * magnitude + 1) * step) >> 3;
    if nibble & SIGN_BIT != 0 {
        delta = -delta;
    }

    let predictor = (i32::from(state.predictor) + delta)
        .clamp(i32::from(PREDICTOR_MIN), i32::from(PREDICTOR_MAX));
    state.predictor = predictor as i16;

    let step_index = i32::from(state.step_index) + i32::from(ADPCM_INDEX_TABLE[usize::from(nibble)]);
    state.step_index = step_index.clamp(0, i32::from(MAX_STEP_INDEX)) as u8;

    state.predictor
}

/// Encode one 16-bit sample to a 4-bit nibble
///
/// The sample is reduced to 12 bits, compared with the prediction, and the
/// difference is quantized by cumulative subtraction against `step`,
/// `step / 2` and `step / 4`. The encoder then decodes its own nibble to
/// advance its state.
pub fn encode_sample(state: &mut VoxState, sample: i16) -> u8 {
    let step = i32::from(state.step_size());
    let mut diff = i32::from(sample) / 16 - i32::from(state.predictor);

    let mut nibble = 0u8;
    if diff < 0 {
        nibble |= SIGN_BIT;
        diff = -diff;
    }
    if diff >= step {
        nibble |= 0b0100;
        diff -= step;
    }
    if diff >= step >> 1 {
        nibble |= 0b0010;
        diff -= step >> 1;
    }
    if diff >= step >> 2 {
        nibble |= 0b0001;
    }

    reconstruct(state, nibble);
    nibble
}

/// Decode one 4-bit nibble to a 16-bit sample
pub fn decode_sample(state: &mut VoxState, nibble: u8) -> i16 {
    // 12-bit predictor scaled back up to the 16-bit range
    reconstruct(state, nibble) * 16
}
