//! Short-term analysis and synthesis filtering (section 4.2.8 to 4.2.10, 4.3.2)
//!
//! The coded LARs are decoded and interpolated with the previous frame's
//! LARs over four segments of the frame, converted back to reflection
//! coefficients and applied through an 8-stage lattice.

use super::basic_ops::{add, mult_r, sub, MAX_WORD, MIN_WORD};
use super::state::GSM_FRAME_SAMPLES;
use super::tables::{GSM_B, GSM_INVA, GSM_MIC};

/// Interpolation segments of a frame as `(start, end)` sample ranges
pub const SEGMENTS: [(usize, usize); 4] = [(0, 13), (13, 27), (27, 40), (40, GSM_FRAME_SAMPLES)];

/// Decode coded LARs back to the LAR domain
pub fn decode_lars(larc: &[u8; 8]) -> [i16; 8] {
    std::array::from_fn(|i| {
        let temp = add(i16::from(larc[i]), GSM_MIC[i]) << 10;
        let temp = sub(temp, GSM_B[i] << 1);
        let temp = mult_r(GSM_INVA[i], temp);
        add(temp, temp)
    })
}

/// Interpolate LARs between the previous and current frame for a segment
pub fn interpolate(previous: &[i16; 8], current: &[i16; 8], segment: usize) -> [i16; 8] {
    std::array::from_fn(|i| {
        let (p, c) = (previous[i], current[i]);
        match segment {
            0 => add(add(p >> 2, c >> 2), p >> 1),
            1 => add(p >> 1, c >> 1),
            2 => add(add(p >> 2, c >> 2), c >> 1),
            _ => c,
        }
    })
}

/// Convert interpolated LARs to reflection coefficients
pub fn lars_to_reflection(larp: &[i16; 8]) -> [i16; 8] {
    std::array::from_fn(|i| {
        let lar = larp[i];
        let temp = if lar == MIN_WORD { MAX_WORD } else { lar.abs() };

        let rp = if temp < 11059 {
            temp << 1
        } else if temp < 20070 {
            temp + 11059
        } else {
            add(temp >> 2, 26112)
        };

        if lar < 0 { -rp } else { rp }
    })
}

/// Short-term analysis filter, in place over one frame
pub fn short_term_analysis(
    u: &mut [i16; 8],
    previous: &[i16; 8],
    current: &[i16; 8],
    s: &mut [i16; GSM_FRAME_SAMPLES],
) {
    for (segment, &(start, end)) in SEGMENTS.iter().enumerate() {
        let rp = lars_to_reflection(&interpolate(previous, current, segment));

        for sample in &mut s[start..end] {
            let mut di = *sample;
            let mut sav = di;

            for (ui, &rpi) in u.iter_mut().zip(&rp) {
                let previous_u = *ui;
                *ui = sav;
                sav = add(previous_u, mult_r(rpi, di));
                di = add(di, mult_r(rpi, previous_u));
            }

            *sample = di;
        }
    }
}

/// Short-term synthesis filter from residual `wt` into `sr`
pub fn short_term_synthesis(
    v: &mut [i16; 9],
    previous: &[i16; 8],
    current: &[i16; 8],
    wt: &[i16; GSM_FRAME_SAMPLES],
    sr: &mut [i16; GSM_FRAME_SAMPLES],
) {
    for (segment, &(start, end)) in SEGMENTS.iter().enumerate() {
        let rrp = lars_to_reflection(&interpolate(previous, current, segment));

        for k in start..end {
            let mut sri = wt[k];
            for i in (0..8).rev() {
                sri = sub(sri, mult_r(rrp[i], v[i]));
                v[i + 1] = add(v[i], mult_r(rrp[i], sri));
            }
            v[0] = sri;
            sr[k] = sri;
        }
    }
}
