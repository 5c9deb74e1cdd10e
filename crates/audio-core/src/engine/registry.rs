//! Processor registry
//!
//! Maps codec selector ids to factories. The ids follow the codec menu a
//! host presents: 0 is no codec, 2 is held for iLBC and has no processor.

use crate::config::EngineConfig;
use crate::processors::CodecProcessor;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Builds a fresh, unprepared processor
pub type ProcessorFactory = fn(&EngineConfig) -> Box<dyn CodecProcessor>;

/// No codec, the slot passes audio through
pub const SELECTOR_NONE: u32 = 0;
/// GSM 06.10 full rate
pub const SELECTOR_GSM: u32 = 1;
/// iLBC, reserved
pub const SELECTOR_ILBC: u32 = 2;
/// G.711 μ-law
pub const SELECTOR_MU_LAW: u32 = 3;
/// G.711 A-law
pub const SELECTOR_A_LAW: u32 = 4;
/// Dialogic VOX ADPCM
pub const SELECTOR_VOX: u32 = 5;

/// Registry entry
#[derive(Debug, Clone, Copy)]
pub struct ProcessorEntry {
    /// Selector id
    pub id: u32,
    /// Display name
    pub name: &'static str,
    /// Factory
    pub factory: ProcessorFactory,
}

/// Selector id to processor factory table
#[derive(Debug, Clone)]
pub struct ProcessorRegistry {
    entries: HashMap<u32, ProcessorEntry>,
}

impl ProcessorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Create a registry holding every processor compiled into this build
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_builtin();
        registry
    }

    fn register_builtin(&mut self) {
        #[cfg(feature = "gsm")]
        self.register(SELECTOR_GSM, "GSM 06.10", |config| {
            Box::new(crate::processors::GsmProcessor::new(config))
        });

        #[cfg(feature = "g711")]
        {
            self.register(SELECTOR_MU_LAW, "Mu-Law", |config| {
                Box::new(crate::processors::CompanderProcessor::mu_law(config))
            });
            self.register(SELECTOR_A_LAW, "A-Law", |config| {
                Box::new(crate::processors::CompanderProcessor::a_law(config))
            });
        }

        #[cfg(feature = "vox")]
        self.register(SELECTOR_VOX, "VOX", |config| {
            Box::new(crate::processors::VoxProcessor::new(config))
        });
    }

    /// Register a factory, returning the entry it replaces
    ///
    /// Id 0 always means no codec and cannot be registered.
    pub fn register(&mut self, id: u32, name: &'static str, factory: ProcessorFactory) -> Option<ProcessorEntry> {
        if id == SELECTOR_NONE {
            warn!("Ignoring registration of '{}' under the reserved 'none' selector", name);
            return None;
        }
        debug!("Registering processor '{}' as selector {}", name, id);
        self.entries.insert(id, ProcessorEntry { id, name, factory })
    }

    /// Remove a factory
    pub fn unregister(&mut self, id: u32) -> Option<ProcessorEntry> {
        self.entries.remove(&id)
    }

    /// Build a processor for a selector
    ///
    /// Returns `None` for the 'none' selector, for reserved ids and for ids
    /// nothing is registered under. The slot then passes audio through.
    pub fn create(&self, id: u32, config: &EngineConfig) -> Option<Box<dyn CodecProcessor>> {
        match self.entries.get(&id) {
            Some(entry) => Some((entry.factory)(config)),
            None => {
                match id {
                    SELECTOR_NONE => {}
                    SELECTOR_ILBC => debug!("Selector {} (iLBC) is reserved, passing audio through", id),
                    _ => warn!("Unknown codec selector {}, passing audio through", id),
                }
                None
            }
        }
    }

    /// Whether a selector builds a processor
    pub fn contains(&self, id: u32) -> bool {
        self.entries.contains_key(&id)
    }

    /// Display name of a selector
    pub fn name(&self, id: u32) -> Option<&'static str> {
        match id {
            SELECTOR_NONE => Some("None"),
            _ => self.entries.get(&id).map(|entry| entry.name),
        }
    }

    /// Registered selector ids in ascending order
    pub fn ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered processors
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ProcessorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
