//! Value records exchanged with the external styling engine.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Property mapping attached to elements and themes (string keys, any value).
pub type PropMap = serde_json::Map<String, Value>;

/// One recorded observation of a rendered element.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ElementRegistration {
    /// The element's tag name (e.g. "div", "a").
    pub tag: String,
    /// The props the element was created with.
    pub props: PropMap,
}

/// A named theme's style definitions.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDefinition {
    /// Theme name, the registry key.
    pub name: String,
    /// Style definitions keyed by property name.
    pub definitions: PropMap,
}

/// An immutable point-in-time view of both registry halves.
///
/// The element and theme halves are copied independently: under concurrent
/// writers the two may reflect slightly different instants. Strict
/// cross-registry atomicity is a documented non-goal.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StyleSnapshot {
    /// Registered elements keyed by generated registration id.
    pub registered_elements: HashMap<String, ElementRegistration>,
    /// Registered themes keyed by name.
    pub themes: HashMap<String, ThemeDefinition>,
}
