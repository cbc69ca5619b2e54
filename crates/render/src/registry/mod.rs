//! The styling bridge: concurrent registries of rendered elements and theme
//! definitions, snapshotted on demand for an external styling engine.

/// Element registration store.
pub mod elements;
/// Theme definition store.
pub mod themes;
/// Value records exchanged with the styling engine.
pub mod types;

pub use elements::ElementRegistry;
pub use themes::ThemeRegistry;
pub use types::{ElementRegistration, PropMap, StyleSnapshot, ThemeDefinition};

use crate::renderer::observer::{ElementObserver, ObserverError};

/// Composes one element registry and one theme registry and produces
/// [`StyleSnapshot`]s of their combined state.
///
/// Registries are owned, created once per rendering session, and live until
/// cleared or the session is discarded.
#[derive(Debug, Default)]
pub struct StylingRegistry {
    elements: ElementRegistry,
    themes: ThemeRegistry,
}

impl StylingRegistry {
    /// Creates a registry pair with empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The element half, for producers that only record elements.
    pub fn elements(&self) -> &ElementRegistry {
        &self.elements
    }

    /// The theme half, for producers that only record themes.
    pub fn themes(&self) -> &ThemeRegistry {
        &self.themes
    }

    /// Builds a snapshot by reading the element half, then the theme half.
    ///
    /// No lock spans the two reads: a write landing between them is visible
    /// in at most one half of the result.
    pub fn get_snapshot(&self) -> StyleSnapshot {
        StyleSnapshot {
            registered_elements: self.elements.get_elements(),
            themes: self.themes.get_themes(),
        }
    }

    /// Clears both owned registries.
    pub fn clear(&self) {
        self.elements.clear();
        self.themes.clear();
    }
}

impl ElementObserver for StylingRegistry {
    fn element_created(&self, tag: &str, props: &PropMap) -> Result<(), ObserverError> {
        self.elements.element_created(tag, props)
    }
}
