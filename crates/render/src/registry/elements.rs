//! Concurrent store of UI-element registrations.

use super::types::{ElementRegistration, PropMap};
use crate::renderer::observer::{ElementObserver, ObserverError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Write-heavy, read-rarely registry of elements observed during rendering.
///
/// Registration keys combine the tag, a high-resolution timestamp, and a
/// per-registry sequence number, so repeated registrations of the same tag
/// never collide. The store is unbounded: nothing evicts entries except an
/// explicit [`clear`](ElementRegistry::clear), which the owning render
/// session is expected to call between logical render cycles.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    entries: RwLock<HashMap<String, ElementRegistration>>,
    seq: AtomicU64,
}

impl ElementRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one element observation under a freshly generated key.
    ///
    /// Never fails and never overwrites an existing entry; the registry
    /// grows by exactly one per call.
    pub fn register_element(&self, tag: &str, props: PropMap) {
        let key = self.next_key(tag);
        let registration = ElementRegistration {
            tag: tag.to_string(),
            props,
        };
        self.entries.write().insert(key, registration);
    }

    /// Returns a snapshot copy of all registrations completed before the
    /// call returns. The copy never aliases live registry storage.
    pub fn get_elements(&self) -> HashMap<String, ElementRegistration> {
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

    /// Returns true if no registrations are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Generates a unique key: tag, unix-epoch nanoseconds, and a sequence
    /// number that disambiguates registrations landing in the same tick.
    fn next_key(&self, tag: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}-{}", tag, nanos, seq)
    }
}

impl ElementObserver for ElementRegistry {
    fn element_created(&self, tag: &str, props: &PropMap) -> Result<(), ObserverError> {
        self.register_element(tag, props.clone());
        Ok(())
    }
}
