//! Encoder preprocessing (section 4.2.1 to 4.2.3)
//!
//! Downscaling to 13 bits, offset compensation by a first-order high-pass
//! with a pole at 32735/32768, then preemphasis with a first-order FIR.

use super::basic_ops::{add, l_add, mult_r};
use super::state::{EncoderState, GSM_FRAME_SAMPLES};

/// Preemphasis coefficient
const PREEMPHASIS: i16 = -28180;

/// Offset compensation pole
const OFFSET_POLE: i16 = 32735;

/// Preprocess one frame of left-aligned 13-bit input
pub fn preprocess(
    state: &mut EncoderState,
    input: &[i16; GSM_FRAME_SAMPLES],
    output: &mut [i16; GSM_FRAME_SAMPLES],
) {
    let mut z1 = state.z1;
    let mut l_z2 = state.l_z2;
    let mut mp = state.mp;

    for (out, &sample) in output.iter_mut().zip(input) {
        // Downscaling
        let so = (sample >> 3) << 2;

        // Offset compensation
        let s1 = so - z1;
        z1 = so;

        let mut l_s2 = i32::from(s1) << 15;
        let msp = (l_z2 >> 15) as i16;
        let lsp = l_z2.wrapping_sub(i32::from(msp) << 15) as i16;
        l_s2 += i32::from(mult_r(lsp, OFFSET_POLE));
        l_z2 = l_add(i32::from(msp) * i32::from(OFFSET_POLE), l_s2);

        let l_temp = l_add(l_z2, 16384);

        // Preemphasis
        let msp = mult_r(mp, PREEMPHASIS);
        mp = (l_temp >> 15) as i16;
        *out = add(mp, msp);
    }

    state.z1 = z1;
    state.l_z2 = l_z2;
    state.mp = mp;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_stays_silent() {
        let mut state = EncoderState::new();
        let mut output = [1i16; GSM_FRAME_SAMPLES];
        preprocess(&mut state, &[0; GSM_FRAME_SAMPLES], &mut output);
        assert!(output.iter().all(|&s| s == 0));
        assert_eq!(state, EncoderState::new());
    }

    #[test]
    fn test_dc_is_removed() {
        let mut state = EncoderState::new();
        let input = [8000i16 & !7; GSM_FRAME_SAMPLES];
        let mut output = [0i16; GSM_FRAME_SAMPLES];

        for _ in 0..20 {
            preprocess(&mut state, &input, &mut output);
        }

        // The offset compensation pole leaks slowly; after 20 frames only a
        // small residue of the step remains
        let first = output[0].abs();
        assert!(first < 400, "residual offset {first}");
    }
}
