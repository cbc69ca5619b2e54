//! Concurrent store of named theme definitions.

use super::types::{PropMap, ThemeDefinition};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Registry of theme definitions keyed by caller-supplied name.
///
/// Unlike [`ElementRegistry`](super::ElementRegistry), keys are stable:
/// re-registering a name is an explicit last-write-wins update, not an
/// append.
#[derive(Debug, Default)]
pub struct ThemeRegistry {
    entries: RwLock<HashMap<String, ThemeDefinition>>,
}

impl ThemeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts the definitions stored under `name`.
    pub fn register_theme(&self, name: &str, definitions: PropMap) {
        let definition = ThemeDefinition {
            name: name.to_string(),
            definitions,
        };
        self.entries.write().insert(name.to_string(), definition);
    }

    /// Returns the definition registered under `name`, if any.
    pub fn get_theme(&self, name: &str) -> Option<ThemeDefinition> {
        self.entries.read().get(name).cloned()
    }

    /// Returns a snapshot copy of all registered themes.
    pub fn get_themes(&self) -> HashMap<String, ThemeDefinition> {
        self.entries.read().clone()
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Current entry count, read at call time.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if no themes are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
