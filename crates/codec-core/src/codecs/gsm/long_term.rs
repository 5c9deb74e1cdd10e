//! Long-term prediction (section 4.2.11, 4.2.12 and 4.3.2)
//!
//! The encoder searches the last 120 reconstructed residual samples for the
//! lag with the highest cross-correlation against the current subframe and
//! codes a two-bit gain. The decoder rebuilds the residual from the same
//! history.

use super::basic_ops::{abs, add, mult, mult_r, norm, sub};
use super::state::{DecoderState, LTP_HISTORY, MAX_LAG, MIN_LAG, SUBFRAME_SAMPLES};
use super::tables::{GSM_DLB, GSM_QLB};

/// Compute the LTP lag `Nc` and coded gain `bc` for one subframe
///
/// `d` is the short-term residual of the subframe and `past` the 120
/// reconstructed residual samples preceding it.
pub fn ltp_parameters(d: &[i16], past: &[i16]) -> (u8, u8) {
    debug_assert_eq!(d.len(), SUBFRAME_SAMPLES);
    debug_assert_eq!(past.len(), LTP_HISTORY);

    // Optimum scaling of d
    let dmax = d.iter().map(|&x| abs(x)).max().unwrap_or(0);
    let temp = if dmax == 0 {
        0
    } else {
        norm(i32::from(dmax) << 16)
    };
    let scal = if temp > 6 { 0 } else { 6 - temp };

    let mut wt = [0i16; SUBFRAME_SAMPLES];
    for (w, &x) in wt.iter_mut().zip(d) {
        *w = x >> scal;
    }

    // Maximum cross-correlation over all lags
    let mut l_max = 0i64;
    let mut nc = MIN_LAG;
    for lambda in MIN_LAG..=MAX_LAG {
        let offset = LTP_HISTORY - usize::from(lambda);
        let l_result: i64 = wt
            .iter()
            .zip(&past[offset..offset + SUBFRAME_SAMPLES])
            .map(|(&w, &p)| i64::from(w) * i64::from(p))
            .sum();

        if l_result > l_max {
            nc = lambda;
            l_max = l_result;
        }
    }

    l_max <<= 1;
    l_max >>= 6 - scal;

    // Power of the selected history segment
    let offset = LTP_HISTORY - usize::from(nc);
    let l_power: i64 = past[offset..offset + SUBFRAME_SAMPLES]
        .iter()
        .map(|&p| {
            let temp = i64::from(p >> 3);
            temp * temp
        })
        .sum::<i64>()
        << 1;

    let bc = if l_max <= 0 {
        0
    } else if l_max >= l_power {
        3
    } else {
        let temp = norm(l_power as i32);
        let r = ((l_max << temp) >> 16) as i16;
        let s = ((l_power << temp) >> 16) as i16;
        GSM_DLB[..3]
            .iter()
            .position(|&dlb| r <= mult(s, dlb))
            .unwrap_or(3) as u8
    };

    (nc, bc)
}

/// Long-term analysis filter for one subframe
///
/// Writes the LTP estimate to `dpp` and the LTP residual `d - dpp` to `e`.
pub fn long_term_analysis(bc: u8, nc: u8, past: &[i16], d: &[i16], dpp: &mut [i16], e: &mut [i16]) {
    let bp = GSM_QLB[usize::from(bc & 3)];
    let offset = LTP_HISTORY - usize::from(nc);

    for k in 0..SUBFRAME_SAMPLES {
        dpp[k] = mult_r(bp, past[offset + k]);
        e[k] = sub(d[k], dpp[k]);
    }
}

/// Long-term synthesis filter for one subframe
///
/// Lags outside 40..=120 reuse the last valid lag.
pub fn long_term_synthesis(state: &mut DecoderState, ncr: u8, bcr: u8, erp: &[i16; SUBFRAME_SAMPLES], drp: &mut [i16]) {
    let nr = if (MIN_LAG..=MAX_LAG).contains(&ncr) {
        ncr
    } else {
        state.nrp
    };
    state.nrp = nr;

    let brp = GSM_QLB[usize::from(bcr & 3)];
    let history = &mut state.drp;
    let offset = LTP_HISTORY - usize::from(nr);

    for k in 0..SUBFRAME_SAMPLES {
        let drpp = mult_r(brp, history[offset + k]);
        history[LTP_HISTORY + k] = add(erp[k], drpp);
    }

    drp.copy_from_slice(&history[LTP_HISTORY..]);
    history.copy_within(SUBFRAME_SAMPLES.., 0);
}
