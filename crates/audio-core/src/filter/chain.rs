//! Hold-and-filter resampling chain
//!
//! Every input sample runs through the pre-filter. On every
//! `downsampling_factor`-th sample the filtered value is handed to a latch
//! closure (the codec), and whatever it returns is held for the following
//! `downsampling_factor - 1` samples. The held value runs through the
//! post-filter on every sample, so the staircase is smoothed continuously,
//! and the result is scaled by the gain table entry for the factor.

use super::arena::FilterArena;
use super::design::{design_resampling, validate_order};
use super::gain::GainTable;
use crate::error::{AudioError, AudioResult};
use crate::types::{MAX_DOWNSAMPLING_FACTOR, MIN_DOWNSAMPLING_FACTOR};
use tracing::debug;

/// Pre-filter, sample-and-hold decimator and post-filter for N channels
#[derive(Debug, Clone)]
pub struct ResamplingChain {
    sample_rate: f64,
    order: usize,
    factor: u32,
    gains: GainTable,
    pre: FilterArena,
    post: FilterArena,
    counters: Vec<u32>,
    held: Vec<f32>,
}

impl ResamplingChain {
    /// Design and build a chain
    pub fn new(
        sample_rate: f64,
        channels: usize,
        order: usize,
        downsampling_factor: u32,
        gains: GainTable,
    ) -> AudioResult<Self> {
        validate_order(order)?;
        gains.validate()?;
        let factor = checked_factor(downsampling_factor)?;
        let coefficients = design_resampling(sample_rate, factor, order)?;

        Ok(Self {
            sample_rate,
            order,
            factor,
            gains,
            pre: FilterArena::new(channels, coefficients.clone()),
            post: FilterArena::new(channels, coefficients),
            counters: vec![0; channels],
            held: vec![0.0; channels],
        })
    }

    /// Current downsampling factor
    pub fn factor(&self) -> u32 {
        self.factor
    }

    /// Number of channels
    pub fn channels(&self) -> usize {
        self.counters.len()
    }

    /// Filter order of each side
    pub fn order(&self) -> usize {
        self.order
    }

    /// Sample rate the chain was designed for
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Gain currently applied after the post-filter
    pub fn output_gain(&self) -> f32 {
        self.gains.for_factor(self.factor)
    }

    /// Pre-filter cascade
    pub fn pre_filter(&self) -> &FilterArena {
        &self.pre
    }

    /// Replace the gain table
    pub fn set_gain_table(&mut self, gains: GainTable) -> AudioResult<()> {
        gains.validate()?;
        self.gains = gains;
        Ok(())
    }

    /// Change the downsampling factor
    ///
    /// Both filters are redesigned and every delay line, counter and held
    /// value is cleared. Returns `Ok(false)` when the factor is unchanged.
    /// On a design error the chain keeps its previous design.
    pub fn set_factor(&mut self, downsampling_factor: u32) -> AudioResult<bool> {
        let factor = checked_factor(downsampling_factor)?;
        if factor == self.factor {
            return Ok(false);
        }

        let coefficients = design_resampling(self.sample_rate, factor, self.order)?;
        debug!(
            "Redesigning resampling filters: factor {} -> {}, cutoff {:.1} Hz",
            self.factor,
            factor,
            super::design::resampling_cutoff(self.sample_rate, factor)
        );
        self.pre.redesign(coefficients.clone());
        self.post.redesign(coefficients);
        self.factor = factor;
        self.reset_decimator();
        Ok(true)
    }

    /// Clear filter state, counters and held values
    pub fn reset(&mut self) {
        self.pre.reset();
        self.post.reset();
        self.reset_decimator();
    }

    fn reset_decimator(&mut self) {
        self.counters.fill(0);
        self.held.fill(0.0);
    }

    /// Position of a channel's decimation counter, `0..factor`
    pub fn counter(&self, channel: usize) -> u32 {
        self.counters[channel]
    }

    /// Value currently held for a channel
    pub fn held(&self, channel: usize) -> f32 {
        self.held[channel]
    }

    /// Process one sample of one channel
    ///
    /// `latch` sees the pre-filtered sample and is only called when the
    /// channel's counter is at zero. With a factor of 1 it runs on every
    /// sample.
    #[inline]
    pub fn process_sample<F>(&mut self, channel: usize, input: f32, latch: F) -> f32
    where
        F: FnOnce(f32) -> f32,
    {
        let filtered = self.pre.process(channel, input);

        let counter = &mut self.counters[channel];
        if *counter == 0 {
            self.held[channel] = latch(filtered);
        }
        *counter = (*counter + 1) % self.factor;

        self.post.process(channel, self.held[channel]) * self.gains.for_factor(self.factor)
    }
}

fn checked_factor(downsampling_factor: u32) -> AudioResult<u32> {
    if !(MIN_DOWNSAMPLING_FACTOR..=MAX_DOWNSAMPLING_FACTOR).contains(&downsampling_factor) {
        return Err(AudioError::invalid_configuration(format!(
            "downsampling factor must be within {}..={}, got {}",
            MIN_DOWNSAMPLING_FACTOR, MAX_DOWNSAMPLING_FACTOR, downsampling_factor
        )));
    }
    Ok(downsampling_factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::design::DEFAULT_FILTER_ORDER;

    fn chain(factor: u32) -> ResamplingChain {
        ResamplingChain::new(48000.0, 2, DEFAULT_FILTER_ORDER, factor, GainTable::unity()).unwrap()
    }

    fn tone(n: usize) -> f32 {
        (2.0 * std::f32::consts::PI * 440.0 * n as f32 / 48000.0).sin() * 0.5
    }

    #[test]
    fn test_factor_one_equals_plain_filtering() {
        let mut chain = chain(1);
        let coefficients = design_resampling(48000.0, 1, DEFAULT_FILTER_ORDER).unwrap();
        let mut pre = FilterArena::new(1, coefficients.clone());
        let mut post = FilterArena::new(1, coefficients);

        for n in 0..2000 {
            let x = tone(n);
            let expected = post.process(0, pre.process(0, x));
            assert_eq!(chain.process_sample(0, x, |v| v), expected);
            assert_eq!(chain.counter(0), 0);
        }
    }

    #[test]
    fn test_latch_runs_every_factor_samples() {
        let mut chain = chain(3);
        let mut latched = Vec::new();
        for n in 0..12 {
            chain.process_sample(1, tone(n), |v| {
                latched.push(n);
                v
            });
        }
        assert_eq!(latched, vec![0, 3, 6, 9]);
        assert_eq!(chain.counter(0), 0);
        assert_eq!(chain.counter(1), 0);
    }

    #[test]
    fn test_held_value_is_latch_output() {
        let mut chain = chain(4);
        chain.process_sample(0, 0.3, |_| 0.75);
        assert_eq!(chain.held(0), 0.75);
        for _ in 0..3 {
            chain.process_sample(0, 0.3, |_| unreachable!());
            assert_eq!(chain.held(0), 0.75);
        }
    }

    #[test]
    fn test_gain_compensation_applied() {
        let mut plain = chain(2);
        let mut boosted =
            ResamplingChain::new(48000.0, 2, DEFAULT_FILTER_ORDER, 2, GainTable::hold()).unwrap();
        assert_eq!(boosted.output_gain(), 1.22);

        for n in 0..256 {
            let a = plain.process_sample(0, tone(n), |v| v);
            let b = boosted.process_sample(0, tone(n), |v| v);
            assert!((b - a * 1.22).abs() < 1e-6);
        }

        boosted.set_gain_table(GainTable::zero_stuff()).unwrap();
        assert_eq!(boosted.output_gain(), 1.45);
    }

    #[test]
    fn test_factor_change_redesigns_and_clears() {
        let mut chain = chain(1);
        for n in 0..500 {
            chain.process_sample(0, tone(n), |v| v);
        }

        assert!(chain.set_factor(5).unwrap());
        assert!(!chain.set_factor(5).unwrap());
        assert_eq!(chain.factor(), 5);
        assert_eq!(chain.held(0), 0.0);
        assert!(chain.pre_filter().section_state(0, 0).is_silent());

        // Silence in, silence out right after the redesign
        for _ in 0..64 {
            assert_eq!(chain.process_sample(0, 0.0, |v| v), 0.0);
        }
    }

    #[test]
    fn test_factor_change_mid_stream_stays_finite() {
        let mut chain = chain(2);
        for factor in [2u32, 7, 1, 8, 3] {
            chain.set_factor(factor).unwrap();
            for n in 0..1024 {
                let y = chain.process_sample(n % 2, tone(n), |v| v);
                assert!(y.is_finite());
                assert!(y.abs() < 2.0);
            }
        }
    }

    #[test]
    fn test_invalid_factor_rejected() {
        assert!(ResamplingChain::new(48000.0, 1, 8, 0, GainTable::hold()).is_err());
        assert!(ResamplingChain::new(48000.0, 1, 8, 9, GainTable::hold()).is_err());
        assert!(ResamplingChain::new(48000.0, 1, 7, 2, GainTable::hold()).is_err());

        let mut chain = chain(2);
        assert!(chain.set_factor(9).is_err());
        assert_eq!(chain.factor(), 2);
    }
}
