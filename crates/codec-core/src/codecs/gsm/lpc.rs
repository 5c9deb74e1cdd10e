//! LPC analysis (section 4.2.4 to 4.2.7)
//!
//! Autocorrelation of the preprocessed frame, Schur recursion to eight
//! reflection coefficients, conversion to log-area ratios and quantization.

use super::basic_ops::{abs, add, div, mult, mult_r, norm};
use super::state::GSM_FRAME_SAMPLES;
use super::tables::{GSM_A, GSM_B, GSM_MAC, GSM_MIC};

/// Autocorrelation of `s` for lags 0 to 8
///
/// The frame is scaled down before correlation when its peak would overflow
/// the accumulator, and scaled back afterwards. The rescaled frame is what
/// the short-term analysis filter sees, so the rounding of this round trip is
/// part of the codec output.
pub fn autocorrelation(s: &mut [i16; GSM_FRAME_SAMPLES]) -> [i32; 9] {
    let smax = s.iter().map(|&x| abs(x)).max().unwrap_or(0);
    let scalauto = if smax == 0 {
        0
    } else {
        4 - norm(i32::from(smax) << 16)
    };

    if scalauto > 0 {
        let factor = 16384i16 >> (scalauto - 1);
        for x in s.iter_mut() {
            *x = mult_r(*x, factor);
        }
    }

    let mut l_acf = [0i32; 9];
    for (k, acf) in l_acf.iter_mut().enumerate() {
        let sum: i64 = (k..GSM_FRAME_SAMPLES)
            .map(|i| i64::from(s[i]) * i64::from(s[i - k]))
            .sum();
        *acf = (sum << 1).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    }

    if scalauto > 0 {
        for x in s.iter_mut() {
            *x = (i32::from(*x) << scalauto) as i16;
        }
    }

    l_acf
}

/// Reflection coefficients by Schur recursion
///
/// Coefficients after an unstable step are left at zero.
pub fn reflection_coefficients(l_acf: &[i32; 9]) -> [i16; 8] {
    let mut r = [0i16; 8];
    if l_acf[0] == 0 {
        return r;
    }

    let shift = norm(l_acf[0]);
    let acf: [i16; 9] = std::array::from_fn(|i| ((i64::from(l_acf[i]) << shift) >> 16) as i16);

    let mut p = acf;
    let mut k = [0i16; 9];
    k[1..8].copy_from_slice(&acf[1..8]);

    for n in 1..=8 {
        let temp = abs(p[1]);
        if p[0] < temp {
            return r;
        }

        let mut rn = div(temp, p[0]);
        if p[1] > 0 {
            rn = -rn;
        }
        r[n - 1] = rn;

        if n == 8 {
            break;
        }

        p[0] = add(p[0], mult_r(p[1], rn));
        for m in 1..=8 - n {
            p[m] = add(p[m + 1], mult_r(k[m], rn));
            k[m] = add(k[m], mult_r(p[m + 1], rn));
        }
    }

    r
}

/// Piecewise-linear approximation of the log-area ratio of each coefficient
pub fn to_log_area_ratios(r: &[i16; 8]) -> [i16; 8] {
    std::array::from_fn(|i| {
        let mut temp = abs(r[i]);
        if temp < 22118 {
            temp >>= 1;
        } else if temp < 31130 {
            temp -= 11059;
        } else {
            temp = (temp - 26112) << 2;
        }

        if r[i] < 0 { -temp } else { temp }
    })
}

/// Quantize and code the log-area ratios
pub fn quantize_lars(lar: &[i16; 8]) -> [u8; 8] {
    std::array::from_fn(|i| {
        let temp = mult(GSM_A[i], lar[i]);
        let temp = add(temp, GSM_B[i]);
        let temp = add(temp, 256) >> 9;

        let coded = if temp > GSM_MAC[i] {
            GSM_MAC[i] - GSM_MIC[i]
        } else if temp < GSM_MIC[i] {
            0
        } else {
            temp - GSM_MIC[i]
        };
        coded as u8
    })
}

/// Full LPC analysis of one preprocessed frame
pub fn lpc_analysis(s: &mut [i16; GSM_FRAME_SAMPLES]) -> [u8; 8] {
    let l_acf = autocorrelation(s);
    let r = reflection_coefficients(&l_acf);
    quantize_lars(&to_log_area_ratios(&r))
}
