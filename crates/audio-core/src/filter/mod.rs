//! Resampling filter chain
//!
//! - [`design`]: Butterworth lowpass and low-cut coefficient design
//! - [`arena`]: per-(channel, section) biquad state
//! - [`chain`]: hold-and-filter decimation around a codec
//! - [`gain`]: per-factor output gain compensation

pub mod arena;
pub mod chain;
pub mod design;
pub mod gain;

pub use arena::{FilterArena, SNAP_THRESHOLD, SectionState};
pub use chain::ResamplingChain;
pub use design::{
    DEFAULT_FILTER_ORDER, LOW_CUT_HZ, MAX_FILTER_ORDER, RESAMPLING_MARGIN, SectionCoefficients,
    butterworth_q, design_low_cut, design_lowpass, design_resampling, magnitude_at, resampling_cutoff,
};
pub use gain::{GainTable, HOLD_GAIN_COMPENSATION, ZERO_STUFF_GAIN_COMPENSATION};
