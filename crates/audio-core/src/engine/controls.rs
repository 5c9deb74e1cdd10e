//! Control-thread to audio-thread parameter exchange
//!
//! A host writes parameter values from its control thread at any time. The
//! audio thread takes one [`ControlSnapshot`] per block, so every slot in a
//! block sees the same values. Each field is an independent relaxed atomic:
//! two values written together may land in different blocks.

use crate::config::MAX_SLOT_COUNT;
use crate::types::CodecParameters;
use std::sync::atomic::{AtomicU32, Ordering};

/// Host-facing parameter values shared with the audio thread
#[derive(Debug)]
pub struct EngineControls {
    downsampling_factor: AtomicU32,
    bitrate_mode: AtomicU32,
    selectors: [AtomicU32; MAX_SLOT_COUNT],
    slot_count: usize,
}

impl EngineControls {
    /// Controls for a number of slots, all set to no codec
    ///
    /// The slot count is capped at [`MAX_SLOT_COUNT`].
    pub fn new(slot_count: usize) -> Self {
        let defaults = CodecParameters::default();
        Self {
            downsampling_factor: AtomicU32::new(defaults.downsampling_factor),
            bitrate_mode: AtomicU32::new(defaults.bitrate_mode),
            selectors: std::array::from_fn(|_| AtomicU32::new(0)),
            slot_count: slot_count.min(MAX_SLOT_COUNT),
        }
    }

    /// Number of slot selectors
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Set the downsampling factor, stored as given and sanitized on read
    pub fn set_downsampling_factor(&self, factor: u32) {
        self.downsampling_factor.store(factor, Ordering::Relaxed);
    }

    /// Set the bitrate mode
    pub fn set_bitrate_mode(&self, mode: u32) {
        self.bitrate_mode.store(mode, Ordering::Relaxed);
    }

    /// Select the codec for a slot
    ///
    /// Returns `false` when the slot does not exist.
    pub fn set_selector(&self, slot: usize, id: u32) -> bool {
        if slot >= self.slot_count {
            return false;
        }
        self.selectors[slot].store(id, Ordering::Relaxed);
        true
    }

    /// Current selector of a slot, 0 for a slot that does not exist
    pub fn selector(&self, slot: usize) -> u32 {
        if slot >= self.slot_count {
            return 0;
        }
        self.selectors[slot].load(Ordering::Relaxed)
    }

    /// Read every value once
    pub fn snapshot(&self) -> ControlSnapshot {
        let mut selectors = [0; MAX_SLOT_COUNT];
        for (value, atomic) in selectors.iter_mut().zip(&self.selectors[..self.slot_count]) {
            *value = atomic.load(Ordering::Relaxed);
        }
        ControlSnapshot {
            params: CodecParameters {
                downsampling_factor: self.downsampling_factor.load(Ordering::Relaxed),
                bitrate_mode: self.bitrate_mode.load(Ordering::Relaxed),
            }
            .sanitized(),
            selectors,
        }
    }
}

impl Default for EngineControls {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SLOT_COUNT)
    }
}

/// Parameter values for one block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSnapshot {
    /// Transport-wide codec parameters, sanitized
    pub params: CodecParameters,
    selectors: [u32; MAX_SLOT_COUNT],
}

impl ControlSnapshot {
    /// Build a snapshot directly, without shared controls
    ///
    /// Selectors beyond [`MAX_SLOT_COUNT`] are ignored.
    pub fn new(params: CodecParameters, slot_selectors: &[u32]) -> Self {
        let mut selectors = [0; MAX_SLOT_COUNT];
        for (value, id) in selectors.iter_mut().zip(slot_selectors) {
            *value = *id;
        }
        Self {
            params: params.sanitized(),
            selectors,
        }
    }

    /// Selector for a slot, 0 when out of range
    pub fn selector(&self, slot: usize) -> u32 {
        self.selectors.get(slot).copied().unwrap_or(0)
    }
}

impl Default for ControlSnapshot {
    fn default() -> Self {
        Self::new(CodecParameters::default(), &[])
    }
}
