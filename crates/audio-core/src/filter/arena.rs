//! Second-order section state
//!
//! A [`FilterArena`] holds one cascade per channel in a single flat
//! allocation indexed by `(channel, section)`. All channels share the same
//! coefficients, and each section keeps its own transposed direct form II
//! delay line.

use super::design::{SectionCoefficients, design_low_cut};
use crate::error::AudioResult;

/// Values with a magnitude below this are replaced by exact zero
pub const SNAP_THRESHOLD: f32 = 1.0e-8;

#[inline]
fn snap(value: f32) -> f32 {
    if value.abs() < SNAP_THRESHOLD { 0.0 } else { value }
}

/// Delay line of one transposed direct form II section
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SectionState {
    s1: f32,
    s2: f32,
}

impl SectionState {
    /// Run one sample through the section
    ///
    /// The output and both delay elements are snapped to zero below
    /// [`SNAP_THRESHOLD`], so silence decays to exact zero instead of
    /// lingering as denormals.
    #[inline]
    pub fn process(&mut self, c: &SectionCoefficients, input: f32) -> f32 {
        let output = snap(c.b0 * input + self.s1);
        self.s1 = snap(c.b1 * input - c.a1 * output + self.s2);
        self.s2 = snap(c.b2 * input - c.a2 * output);
        output
    }

    /// True when both delay elements hold zero
    pub fn is_silent(&self) -> bool {
        self.s1 == 0.0 && self.s2 == 0.0
    }
}

/// Cascaded sections for every channel
#[derive(Debug, Clone)]
pub struct FilterArena {
    channels: usize,
    coefficients: Vec<SectionCoefficients>,
    state: Vec<SectionState>,
}

impl FilterArena {
    /// Create an arena with cleared state
    pub fn new(channels: usize, coefficients: Vec<SectionCoefficients>) -> Self {
        let state = vec![SectionState::default(); channels * coefficients.len()];
        Self {
            channels,
            coefficients,
            state,
        }
    }

    /// Single-section high-pass per channel, used to block DC
    pub fn low_cut(sample_rate: f64, channels: usize, cutoff: f64) -> AudioResult<Self> {
        Ok(Self::new(channels, vec![design_low_cut(sample_rate, cutoff)?]))
    }

    /// Number of channels
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of sections per channel
    pub fn sections(&self) -> usize {
        self.coefficients.len()
    }

    /// Coefficients shared by every channel
    pub fn coefficients(&self) -> &[SectionCoefficients] {
        &self.coefficients
    }

    /// Install a new design and clear every delay line
    ///
    /// The state is only reallocated when the section count changes.
    pub fn redesign(&mut self, coefficients: Vec<SectionCoefficients>) {
        if coefficients.len() != self.coefficients.len() {
            self.state = vec![SectionState::default(); self.channels * coefficients.len()];
        }
        self.coefficients = coefficients;
        self.reset();
    }

    /// Clear every delay line
    pub fn reset(&mut self) {
        self.state.fill(SectionState::default());
    }

    /// Run one sample of one channel through the whole cascade
    #[inline]
    pub fn process(&mut self, channel: usize, input: f32) -> f32 {
        let sections = self.coefficients.len();
        let start = channel * sections;
        self.state[start..start + sections]
            .iter_mut()
            .zip(&self.coefficients)
            .fold(input, |sample, (state, c)| state.process(c, sample))
    }

    /// Run a whole channel slice through the cascade in place
    pub fn process_slice(&mut self, channel: usize, samples: &mut [f32]) {
        for sample in samples {
            *sample = self.process(channel, *sample);
        }
    }

    /// Delay line of one section, for inspection
    pub fn section_state(&self, channel: usize, section: usize) -> SectionState {
        self.state[channel * self.coefficients.len() + section]
    }
}
