//! Engine configuration

use crate::error::{AudioError, AudioResult};
use crate::filter::{DEFAULT_FILTER_ORDER, GainTable, LOW_CUT_HZ, design::validate_order};
use serde::{Deserialize, Serialize};

/// Default number of serially chained slots
pub const DEFAULT_SLOT_COUNT: usize = 2;

/// Upper bound on the slot count, sizes the control snapshot
pub const MAX_SLOT_COUNT: usize = 8;

/// Settings shared by the slot engine and every processor it builds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of slots processed in series
    pub slot_count: usize,
    /// Order of each resampling lowpass (two per processor)
    pub filter_order: usize,
    /// Corner of the DC-blocking high-pass in Hz
    pub low_cut_hz: f64,
    /// Output gain per downsampling factor
    pub gain_compensation: GainTable,
}

impl EngineConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the slot count
    pub fn with_slot_count(mut self, slot_count: usize) -> Self {
        self.slot_count = slot_count;
        self
    }

    /// Set the resampling filter order
    pub fn with_filter_order(mut self, filter_order: usize) -> Self {
        self.filter_order = filter_order;
        self
    }

    /// Set the low-cut corner frequency
    pub fn with_low_cut(mut self, low_cut_hz: f64) -> Self {
        self.low_cut_hz = low_cut_hz;
        self
    }

    /// Set the gain compensation table
    pub fn with_gain_compensation(mut self, gains: GainTable) -> Self {
        self.gain_compensation = gains;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> AudioResult<()> {
        if self.slot_count == 0 || self.slot_count > MAX_SLOT_COUNT {
            return Err(AudioError::invalid_configuration(format!(
                "slot count must be in 1..={}, got {}",
                MAX_SLOT_COUNT, self.slot_count
            )));
        }
        validate_order(self.filter_order)?;
        if !(self.low_cut_hz.is_finite() && self.low_cut_hz > 0.0) {
            return Err(AudioError::invalid_configuration(format!(
                "low-cut frequency must be finite and positive, got {}",
                self.low_cut_hz
            )));
        }
        self.gain_compensation.validate()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            slot_count: DEFAULT_SLOT_COUNT,
            filter_order: DEFAULT_FILTER_ORDER,
            low_cut_hz: LOW_CUT_HZ,
            gain_compensation: GainTable::default(),
        }
    }
}
