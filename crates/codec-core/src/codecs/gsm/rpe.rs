//! Regular pulse excitation coding (section 4.2.13 to 4.2.18, 4.3.1)
//!
//! The LTP residual is weighted, decimated by three onto one of four grids,
//! and the 13 grid samples are block-quantized with a 6-bit maximum and
//! 3-bit normalized samples (APCM).

use super::basic_ops::{abs, add, asl, asr, mult, mult_r, sub};
use super::state::SUBFRAME_SAMPLES;
use super::tables::{GSM_FAC, GSM_H, GSM_NRFAC};

/// Pulses per RPE grid
pub const RPE_PULSES: usize = 13;

/// Padding on each side of the residual seen by the weighting filter
pub const WEIGHTING_PAD: usize = 5;

/// Result of RPE coding one subframe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RpeEncoding {
    /// Grid position
    pub mc: u8,
    /// Coded block maximum
    pub xmaxc: u8,
    /// Coded grid samples
    pub xmc: [u8; RPE_PULSES],
    /// Quantized residual placed back on the grid
    pub ep: [i16; SUBFRAME_SAMPLES],
}

/// Weighting filter over the padded residual `e[-5..45]`
pub fn weighting_filter(e: &[i16; SUBFRAME_SAMPLES + 2 * WEIGHTING_PAD]) -> [i16; SUBFRAME_SAMPLES] {
    std::array::from_fn(|k| {
        let l_result = 4096
            + e[k..k + GSM_H.len()]
                .iter()
                .zip(&GSM_H)
                .map(|(&x, &h)| i32::from(x) * i32::from(h))
                .sum::<i32>();

        (l_result >> 13).clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
    })
}

/// Select the grid with the highest energy and decimate onto it
pub fn grid_selection(x: &[i16; SUBFRAME_SAMPLES]) -> (u8, [i16; RPE_PULSES]) {
    let mut em = 0i32;
    let mut mc = 0usize;

    for m in 0..4 {
        let energy: i32 = (0..RPE_PULSES)
            .map(|i| {
                let temp = i32::from(x[m + 3 * i] >> 2);
                (temp * temp) << 1
            })
            .sum();

        if energy > em {
            mc = m;
            em = energy;
        }
    }

    (mc as u8, std::array::from_fn(|i| x[mc + 3 * i]))
}

/// Split a coded block maximum into exponent and mantissa
pub fn xmaxc_to_exp_mant(xmaxc: u8) -> (i16, i16) {
    let xmaxc = i16::from(xmaxc);
    let mut exp = if xmaxc > 15 { (xmaxc >> 3) - 1 } else { 0 };
    let mut mant = xmaxc - (exp << 3);

    if mant == 0 {
        return (-4, 7);
    }

    while mant <= 7 {
        mant = (mant << 1) | 1;
        exp -= 1;
    }

    (exp, mant - 8)
}

/// APCM quantization of the grid samples
///
/// Returns the coded block maximum, the coded samples and the exponent and
/// mantissa the decoder will derive from the maximum.
pub fn apcm_quantize(xm: &[i16; RPE_PULSES]) -> (u8, [u8; RPE_PULSES], i16, i16) {
    let xmax = xm.iter().map(|&x| abs(x)).max().unwrap_or(0);

    // Exponent of xmax
    let mut exp = 0i16;
    let mut temp = xmax >> 9;
    let mut itest = false;
    for _ in 0..=5 {
        itest |= temp <= 0;
        temp >>= 1;
        if !itest {
            exp += 1;
        }
    }

    let xmaxc = add(xmax >> (exp + 5), exp << 3);
    let (exp, mant) = xmaxc_to_exp_mant(xmaxc as u8);

    // Normalize by the exponent, then multiply by the inverse mantissa
    let shift = 6 - exp;
    let inverse_mantissa = GSM_NRFAC[mant as usize];
    let xmc = std::array::from_fn(|i| {
        let temp = (i32::from(xm[i]) << shift) as i16;
        let temp = mult(temp, inverse_mantissa) >> 12;
        ((temp + 4) & 0x7) as u8
    });

    (xmaxc as u8, xmc, exp, mant)
}

/// APCM inverse quantization of the coded grid samples
pub fn apcm_inverse_quantize(xmc: &[u8; RPE_PULSES], mant: i16, exp: i16) -> [i16; RPE_PULSES] {
    let fac = GSM_FAC[(mant & 0x7) as usize];
    let shift = sub(6, exp);
    let rounding = asl(1, sub(shift, 1));

    std::array::from_fn(|i| {
        // Restore the sign of the 3-bit sample, then scale to 16 bits
        let temp = ((i16::from(xmc[i] & 0x7) << 1) - 7) << 12;
        let temp = mult_r(fac, temp);
        let temp = add(temp, rounding);
        asr(temp, shift)
    })
}

/// Place the grid samples back on a subframe, zeros elsewhere
pub fn grid_positioning(mc: u8, xmp: &[i16; RPE_PULSES]) -> [i16; SUBFRAME_SAMPLES] {
    let mut ep = [0i16; SUBFRAME_SAMPLES];
    let mc = usize::from(mc & 0x3);
    for (i, &x) in xmp.iter().enumerate() {
        ep[mc + 3 * i] = x;
    }
    ep
}

/// RPE encode one subframe of LTP residual
///
/// `e` holds the residual at `e[5..45]` with five zero samples either side.
pub fn rpe_encode(e: &[i16; SUBFRAME_SAMPLES + 2 * WEIGHTING_PAD]) -> RpeEncoding {
    let x = weighting_filter(e);
    let (mc, xm) = grid_selection(&x);
    let (xmaxc, xmc, exp, mant) = apcm_quantize(&xm);
    let xmp = apcm_inverse_quantize(&xmc, mant, exp);

    RpeEncoding {
        mc,
        xmaxc,
        xmc,
        ep: grid_positioning(mc, &xmp),
    }
}

/// RPE decode one subframe
pub fn rpe_decode(xmaxc: u8, mc: u8, xmc: &[u8; RPE_PULSES]) -> [i16; SUBFRAME_SAMPLES] {
    let (exp, mant) = xmaxc_to_exp_mant(xmaxc);
    grid_positioning(mc, &apcm_inverse_quantize(xmc, mant, exp))
}
