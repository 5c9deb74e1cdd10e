//! A single processing slot

use super::registry::{ProcessorRegistry, SELECTOR_NONE};
use crate::config::EngineConfig;
use crate::error::AudioResult;
use crate::processors::CodecProcessor;
use crate::types::{AudioBuffer, CodecParameters, ProcessSpec};
use tracing::{debug, warn};

/// Holds at most one processor, owned exclusively
///
/// An empty slot passes audio through.
pub struct Slot {
    selector: u32,
    processor: Option<Box<dyn CodecProcessor>>,
}

impl Slot {
    /// An empty slot
    pub fn new() -> Self {
        Self {
            selector: SELECTOR_NONE,
            processor: None,
        }
    }

    /// Selector id the current processor was built for
    pub fn selector(&self) -> u32 {
        self.selector
    }

    /// The active processor
    pub fn processor(&self) -> Option<&dyn CodecProcessor> {
        self.processor.as_deref()
    }

    /// Whether a processor is installed
    pub fn is_active(&self) -> bool {
        self.processor.is_some()
    }

    /// Switch to another selector
    ///
    /// Does nothing when `id` is already selected, so the running processor
    /// keeps its state. Otherwise the old processor is dropped and a new one
    /// is built, given `params` and prepared for `spec`. A processor that
    /// fails to prepare is dropped and the slot passes audio through.
    /// Returns whether the slot changed.
    pub fn select(
        &mut self,
        id: u32,
        registry: &ProcessorRegistry,
        config: &EngineConfig,
        spec: &ProcessSpec,
        params: CodecParameters,
    ) -> bool {
        if id == self.selector {
            return false;
        }

        let previous = self.processor.take();
        let mut processor = registry.create(id, config);
        if let Some(new) = processor.as_mut() {
            new.set_parameters(params);
            if let Err(err) = new.prepare(spec) {
                warn!("Failed to prepare '{}' for selector {}: {}", new.name(), id, err);
                processor = None;
            }
        }

        debug!(
            "Slot switched from {} to {}",
            previous.as_ref().map_or("None", |p| p.name()),
            processor.as_ref().map_or("None", |p| p.name())
        );
        self.selector = id;
        self.processor = processor;
        true
    }

    /// Prepare the current processor for a new stream
    pub fn prepare(&mut self, spec: &ProcessSpec) -> AudioResult<()> {
        match self.processor.as_mut() {
            Some(processor) => processor.prepare(spec),
            None => Ok(()),
        }
    }

    /// Install transport-wide parameters, then process one block
    ///
    /// The processor's own parameters are read, the transport fields are
    /// overwritten and the result is written back, so anything else a
    /// processor keeps in its parameters survives.
    pub fn process(&mut self, buffer: &mut AudioBuffer, transport: CodecParameters) {
        let Some(processor) = self.processor.as_mut() else {
            return;
        };

        let mut params = processor.parameters();
        params.downsampling_factor = transport.downsampling_factor;
        params.bitrate_mode = transport.bitrate_mode;
        processor.set_parameters(params);

        processor.process_block(buffer);
    }

    /// Reset the current processor
    pub fn reset(&mut self) {
        if let Some(processor) = self.processor.as_mut() {
            processor.reset();
        }
    }
}

impl Default for Slot {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot")
            .field("selector", &self.selector)
            .field("processor", &self.processor.as_ref().map(|p| p.name()))
            .finish()
    }
}
