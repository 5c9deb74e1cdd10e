//! VOX State Management
//!
//! One `VoxState` exists per direction and per channel. The encoder keeps its
//! own copy of the decoder state so that both sides follow the same
//! trajectory for the same nibble stream.

use super::tables::{MAX_STEP_INDEX, VOX_STEP_TABLE};

/// Lowest predictor value (signed 12-bit)
pub const PREDICTOR_MIN: i16 = -2048;

/// Highest predictor value (signed 12-bit)
pub const PREDICTOR_MAX: i16 = 2047;

/// Adaptive predictor state for one coding direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoxState {
    /// Last reconstructed sample in the 12-bit domain
    pub predictor: i16,
    /// Index into [`VOX_STEP_TABLE`]
    pub step_index: u8,
}

impl VoxState {
    /// Create a state at rest
    pub fn new() -> Self {
        Self::default()
    }

    /// Return to the power-on state
    pub fn reset(&mut self) {
        self.predictor = 0;
        self.step_index = 0;
    }

    /// Quantizer step size for the current step index
    #[inline]
    pub fn step_size(&self) -> i16 {
        VOX_STEP_TABLE[usize::from(self.step_index.min(MAX_STEP_INDEX))]
    }
}
