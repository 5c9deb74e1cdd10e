//! Filter coefficient design
//!
//! High-order Butterworth lowpass filters are built as cascades of
//! second-order sections. Each section is designed with `biquad` at the
//! shared cutoff and its own Butterworth pole Q, which places the poles of
//! the cascade on the Butterworth circle after the bilinear transform.

use crate::error::{AudioError, AudioResult};
use biquad::{Coefficients, ToHertz, Type};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Fraction of the decimated sample rate used as the resampling cutoff
///
/// 0.4 rather than 0.5 leaves a guard band below the decimated Nyquist
/// frequency.
pub const RESAMPLING_MARGIN: f64 = 0.4;

/// Default resampling filter order (four sections)
pub const DEFAULT_FILTER_ORDER: usize = 8;

/// Highest supported filter order
pub const MAX_FILTER_ORDER: usize = 16;

/// Default low-cut corner frequency in Hz
pub const LOW_CUT_HZ: f64 = 20.0;

/// Second-order section coefficients as applied at runtime
pub type SectionCoefficients = Coefficients<f32>;

/// Check that a filter order can be split into second-order sections
pub fn validate_order(order: usize) -> AudioResult<()> {
    if order < 2 || order > MAX_FILTER_ORDER || order % 2 != 0 {
        return Err(AudioError::invalid_configuration(format!(
            "filter order must be even and within 2..={}, got {}",
            MAX_FILTER_ORDER, order
        )));
    }
    Ok(())
}

/// Q of one section in an even-order Butterworth cascade
///
/// Section `k` takes the conjugate pole pair at angle `(2k + 1)π / 2N` from
/// the negative real axis, giving `Q = 1 / (2 cos θ)`.
pub fn butterworth_q(order: usize, section: usize) -> f64 {
    let theta = (2 * section + 1) as f64 * PI / (2 * order) as f64;
    1.0 / (2.0 * theta.cos())
}

/// Cutoff of the resampling filters for a downsampling factor
pub fn resampling_cutoff(sample_rate: f64, downsampling_factor: u32) -> f64 {
    (sample_rate / f64::from(downsampling_factor.max(1))) * RESAMPLING_MARGIN
}

// `biquad` panics on non-positive frequencies, so they are rejected here
fn check_frequencies(sample_rate: f64, cutoff: f64) -> AudioResult<()> {
    if !(sample_rate > 0.0 && sample_rate.is_finite()) {
        return Err(AudioError::filter_design_failed(format!(
            "sample rate must be positive, got {}",
            sample_rate
        )));
    }
    if !(cutoff > 0.0 && cutoff.is_finite()) {
        return Err(AudioError::filter_design_failed(format!(
            "cutoff must be positive, got {}",
            cutoff
        )));
    }
    Ok(())
}

fn narrow(coefficients: Coefficients<f64>) -> SectionCoefficients {
    Coefficients {
        a1: coefficients.a1 as f32,
        a2: coefficients.a2 as f32,
        b0: coefficients.b0 as f32,
        b1: coefficients.b1 as f32,
        b2: coefficients.b2 as f32,
    }
}

/// Design a Butterworth lowpass of the given order
///
/// Returns `order / 2` sections, lowest Q first.
pub fn design_lowpass(sample_rate: f64, cutoff: f64, order: usize) -> AudioResult<Vec<SectionCoefficients>> {
    validate_order(order)?;
    check_frequencies(sample_rate, cutoff)?;

    (0..order / 2)
        .map(|section| {
            Coefficients::<f64>::from_params(
                Type::LowPass,
                sample_rate.hz(),
                cutoff.hz(),
                butterworth_q(order, section),
            )
            .map(narrow)
            .map_err(AudioError::from)
        })
        .collect()
}

/// Design the pre/post resampling lowpass for a downsampling factor
pub fn design_resampling(
    sample_rate: f64,
    downsampling_factor: u32,
    order: usize,
) -> AudioResult<Vec<SectionCoefficients>> {
    design_lowpass(sample_rate, resampling_cutoff(sample_rate, downsampling_factor), order)
}

/// Design the second-order Butterworth high-pass used as a DC blocker
pub fn design_low_cut(sample_rate: f64, cutoff: f64) -> AudioResult<SectionCoefficients> {
    check_frequencies(sample_rate, cutoff)?;
    Coefficients::<f64>::from_params(
        Type::HighPass,
        sample_rate.hz(),
        cutoff.hz(),
        biquad::Q_BUTTERWORTH_F64,
    )
    .map(narrow)
    .map_err(AudioError::from)
}

/// Magnitude response of a section cascade at one frequency
pub fn magnitude_at(sections: &[SectionCoefficients], sample_rate: f64, frequency: f64) -> f64 {
    let omega = 2.0 * PI * frequency / sample_rate;
    let z1 = Complex64::from_polar(1.0, -omega);
    let z2 = z1 * z1;

    sections
        .iter()
        .map(|c| {
            let num = f64::from(c.b0) + z1 * f64::from(c.b1) + z2 * f64::from(c.b2);
            let den = 1.0 + z1 * f64::from(c.a1) + z2 * f64::from(c.a2);
            (num / den).norm()
        })
        .product()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db(gain: f64) -> f64 {
        20.0 * gain.log10()
    }

    #[test]
    fn test_butterworth_q_values() {
        assert!((butterworth_q(2, 0) - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
        // Fourth order: 0.5412 and 1.3066
        assert!((butterworth_q(4, 0) - 0.541_196).abs() < 1e-5);
        assert!((butterworth_q(4, 1) - 1.306_563).abs() < 1e-5);
        // Q rises section by section
        for k in 1..4 {
            assert!(butterworth_q(8, k) > butterworth_q(8, k - 1));
        }
    }

    #[test]
    fn test_order_validation() {
        assert!(validate_order(8).is_ok());
        assert!(validate_order(2).is_ok());
        assert!(validate_order(16).is_ok());
        assert!(validate_order(0).is_err());
        assert!(validate_order(7).is_err());
        assert!(validate_order(18).is_err());
    }

    #[test]
    fn test_resampling_cutoff_keeps_margin() {
        assert_eq!(resampling_cutoff(48000.0, 1), 19200.0);
        assert_eq!(resampling_cutoff(48000.0, 6), 3200.0);
        assert_eq!(resampling_cutoff(44100.0, 0), 17640.0);
    }

    #[test]
    fn test_lowpass_response() {
        let sample_rate = 48000.0;
        let sections = design_resampling(sample_rate, 4, DEFAULT_FILTER_ORDER).unwrap();
        assert_eq!(sections.len(), 4);

        let cutoff = resampling_cutoff(sample_rate, 4);
        assert!(magnitude_at(&sections, sample_rate, 0.0) > 0.999);
        assert!((db(magnitude_at(&sections, sample_rate, cutoff)) + 3.01).abs() < 0.1);
        // Eighth order rolls off at 48 dB per octave
        assert!(db(magnitude_at(&sections, sample_rate, cutoff * 2.0)) < -45.0);
    }

    #[test]
    fn test_low_cut_response() {
        let section = design_low_cut(48000.0, LOW_CUT_HZ).unwrap();
        let sections = [section];
        assert!(magnitude_at(&sections, 48000.0, 0.0) < 1e-6);
        assert!((db(magnitude_at(&sections, 48000.0, LOW_CUT_HZ)) + 3.01).abs() < 0.1);
        assert!(magnitude_at(&sections, 48000.0, 1000.0) > 0.999);
    }

    #[test]
    fn test_design_errors() {
        assert!(matches!(
            design_lowpass(8000.0, 5000.0, 8),
            Err(AudioError::FilterDesignFailed { .. })
        ));
        assert!(design_lowpass(8000.0, 0.0, 8).is_err());
        assert!(design_lowpass(0.0, 1000.0, 8).is_err());
        assert!(design_low_cut(-1.0, LOW_CUT_HZ).is_err());
        assert!(matches!(
            design_lowpass(8000.0, 1000.0, 5),
            Err(AudioError::InvalidConfiguration { .. })
        ));
    }
}
