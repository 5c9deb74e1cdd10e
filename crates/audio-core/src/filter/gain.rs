//! Decimation gain compensation

use crate::error::{AudioError, AudioResult};
use crate::types::MAX_DOWNSAMPLING_FACTOR;
use serde::{Deserialize, Serialize};

/// Compensation used with hold-and-filter decimation, factors 1..=8
pub const HOLD_GAIN_COMPENSATION: [f32; 8] = [1.0, 1.22, 1.675, 2.25, 2.675, 3.25, 3.675, 4.0];

/// Compensation used with zero-stuffing decimation, factors 1..=8
pub const ZERO_STUFF_GAIN_COMPENSATION: [f32; 8] = [1.0, 1.45, 2.35, 3.5, 4.35, 5.5, 6.25, 7.0];

/// Output gain per downsampling factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GainTable(pub [f32; MAX_DOWNSAMPLING_FACTOR as usize]);

impl GainTable {
    /// The hold-and-filter table
    pub const fn hold() -> Self {
        Self(HOLD_GAIN_COMPENSATION)
    }

    /// The zero-stuffing table
    pub const fn zero_stuff() -> Self {
        Self(ZERO_STUFF_GAIN_COMPENSATION)
    }

    /// No compensation at any factor
    pub const fn unity() -> Self {
        Self([1.0; MAX_DOWNSAMPLING_FACTOR as usize])
    }

    /// Gain for a downsampling factor, clamped into the table
    #[inline]
    pub fn for_factor(&self, downsampling_factor: u32) -> f32 {
        let index = downsampling_factor.clamp(1, MAX_DOWNSAMPLING_FACTOR) as usize - 1;
        self.0[index]
    }

    /// Every entry must be finite and positive
    pub fn validate(&self) -> AudioResult<()> {
        if let Some((index, gain)) = self
            .0
            .iter()
            .enumerate()
            .find(|(_, gain)| !(gain.is_finite() && **gain > 0.0))
        {
            return Err(AudioError::invalid_configuration(format!(
                "gain for factor {} must be finite and positive, got {}",
                index + 1,
                gain
            )));
        }
        Ok(())
    }
}

impl Default for GainTable {
    fn default() -> Self {
        Self::hold()
    }
}
