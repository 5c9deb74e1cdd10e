//! Slot engine
//!
//! The engine owns an ordered list of [`Slot`]s and streams each block
//! through them in series. Once per block it takes a [`ControlSnapshot`],
//! swaps any slot whose selector changed, pushes the transport-wide
//! parameters into every active processor and runs it.
//!
//! ```
//! use rstelecom_audio_core::prelude::*;
//! use rstelecom_audio_core::engine::{SELECTOR_MU_LAW, SELECTOR_VOX};
//!
//! let mut engine = SlotEngine::new(EngineConfig::default()).unwrap();
//! engine.prepare(&ProcessSpec::stereo_48k()).unwrap();
//!
//! let controls = engine.controls();
//! controls.set_selector(0, SELECTOR_VOX);
//! controls.set_selector(1, SELECTOR_MU_LAW);
//! controls.set_downsampling_factor(6);
//!
//! let mut buffer = AudioBuffer::new(2, 512);
//! engine.process_block(&mut buffer);
//! assert_eq!(engine.active_processors(), vec!["VOX", "Mu-Law"]);
//! ```

pub mod controls;
pub mod registry;
pub mod slot;

pub use controls::{ControlSnapshot, EngineControls};
pub use registry::{
    ProcessorEntry, ProcessorFactory, ProcessorRegistry, SELECTOR_A_LAW, SELECTOR_GSM, SELECTOR_ILBC,
    SELECTOR_MU_LAW, SELECTOR_NONE, SELECTOR_VOX,
};
pub use slot::Slot;

use crate::config::EngineConfig;
use crate::error::{AudioError, AudioResult};
use crate::types::{AudioBuffer, ProcessSpec};
use std::sync::Arc;
use tracing::{debug, info};

/// Serial chain of codec slots
#[derive(Debug)]
pub struct SlotEngine {
    config: EngineConfig,
    registry: ProcessorRegistry,
    controls: Arc<EngineControls>,
    slots: Vec<Slot>,
    spec: Option<ProcessSpec>,
}

impl SlotEngine {
    /// Create an engine with every built-in processor registered
    pub fn new(config: EngineConfig) -> AudioResult<Self> {
        Self::with_registry(config, ProcessorRegistry::with_defaults())
    }

    /// Create an engine with a custom registry
    pub fn with_registry(config: EngineConfig, registry: ProcessorRegistry) -> AudioResult<Self> {
        config.validate()?;
        info!(
            "Creating slot engine with {} slots, filter order {}, {} processors",
            config.slot_count,
            config.filter_order,
            registry.len()
        );
        Ok(Self {
            controls: Arc::new(EngineControls::new(config.slot_count)),
            slots: (0..config.slot_count).map(|_| Slot::new()).collect(),
            registry,
            config,
            spec: None,
        })
    }

    /// Prepare every active slot for a stream
    ///
    /// Must be called before audio is processed and again whenever the
    /// sample rate or channel count changes. Until then blocks pass through.
    pub fn prepare(&mut self, spec: &ProcessSpec) -> AudioResult<()> {
        spec.validate()?;
        debug!(
            "Preparing slot engine: {} Hz, {} channels, blocks up to {}",
            spec.sample_rate, spec.channels, spec.max_block_size
        );
        for slot in &mut self.slots {
            slot.prepare(spec)?;
        }
        self.spec = Some(*spec);
        Ok(())
    }

    /// Process one block in place with the current control values
    pub fn process_block(&mut self, buffer: &mut AudioBuffer) {
        let snapshot = self.controls.snapshot();
        self.process_block_with(buffer, &snapshot);
    }

    /// Process one block in place with explicit control values
    pub fn process_block_with(&mut self, buffer: &mut AudioBuffer, snapshot: &ControlSnapshot) {
        let Some(spec) = self.spec else {
            return;
        };

        for (index, slot) in self.slots.iter_mut().enumerate() {
            slot.select(snapshot.selector(index), &self.registry, &self.config, &spec, snapshot.params);
            slot.process(buffer, snapshot.params);
        }
    }

    /// Like [`SlotEngine::process_block`], but rejects a buffer whose
    /// channel count differs from the prepared one
    pub fn try_process_block(&mut self, buffer: &mut AudioBuffer) -> AudioResult<()> {
        let Some(spec) = self.spec else {
            return Err(AudioError::invalid_process_spec("engine has not been prepared"));
        };
        if buffer.num_channels() != spec.channels {
            return Err(AudioError::ChannelMismatch {
                prepared: spec.channels,
                actual: buffer.num_channels(),
            });
        }
        self.process_block(buffer);
        Ok(())
    }

    /// Clear the state of every active processor
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.reset();
        }
    }

    /// Handle for writing control values from another thread
    pub fn controls(&self) -> Arc<EngineControls> {
        Arc::clone(&self.controls)
    }

    /// Slots in processing order
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Names of the active processors in processing order
    pub fn active_processors(&self) -> Vec<&'static str> {
        self.slots
            .iter()
            .filter_map(|slot| slot.processor().map(|p| p.name()))
            .collect()
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Processor registry
    pub fn registry(&self) -> &ProcessorRegistry {
        &self.registry
    }

    /// Stream the engine is prepared for
    pub fn spec(&self) -> Option<&ProcessSpec> {
        self.spec.as_ref()
    }
}
