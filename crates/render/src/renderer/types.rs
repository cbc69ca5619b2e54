//! Type definitions for the element renderer.

use crate::registry::PropMap;
use serde::Serialize;

/// One node in the rendered element tree.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ElementNode {
    /// A materialized element.
    Element(Element),
    /// A text node.
    Text {
        /// The text content.
        value: String,
    },
}

impl ElementNode {
    /// Creates a text node.
    pub fn text(value: impl Into<String>) -> Self {
        ElementNode::Text {
            value: value.into(),
        }
    }
}

/// A materialized UI element: tag, props, and child nodes.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Tag name ("div", "a") or component reference ("Callout").
    pub tag: String,
    /// Props the element was created with.
    pub props: PropMap,
    /// Child nodes in document order.
    pub children: Vec<ElementNode>,
}

impl Element {
    /// Creates an element with no children.
    pub fn new(tag: impl Into<String>, props: PropMap) -> Self {
        Self {
            tag: tag.into(),
            props,
            children: Vec::new(),
        }
    }
}

/// Counters surfaced alongside the rendered tree.
///
/// Observer failures are swallowed so a buggy styling observer can never
/// abort rendering; these counters keep the swallowed failures diagnosable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderStats {
    /// Number of observer callbacks that returned an error.
    pub observer_errors: usize,
    /// Message of the most recent observer error, if any.
    pub last_observer_error: Option<String>,
    /// Number of denylisted elements that were suppressed.
    pub suppressed_elements: usize,
}

/// Output of one render pass: the container element tree plus counters.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedContent {
    /// The content container; always a `div` carrying the content class
    /// marker, with the rendered document as its children.
    pub root: Element,
    /// Diagnostics accumulated during the pass.
    pub stats: RenderStats,
}
