//! Element-creation observation hooks.

use crate::registry::PropMap;
use thiserror::Error;

/// Error returned by a misbehaving element observer.
///
/// Observer errors are swallowed at the call site: they are counted and
/// logged, and rendering proceeds unaffected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ObserverError(pub String);

impl ObserverError {
    /// Creates an observer error from any message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Receives `(tag, props)` for every element materialized during rendering,
/// before the element is attached to the tree.
///
/// Implementations must be fast and non-blocking: they run synchronously on
/// the rendering thread.
pub trait ElementObserver {
    /// Called once per materialized element.
    fn element_created(&self, tag: &str, props: &PropMap) -> Result<(), ObserverError>;
}

impl<F> ElementObserver for F
where
    F: Fn(&str, &PropMap) -> Result<(), ObserverError>,
{
    fn element_created(&self, tag: &str, props: &PropMap) -> Result<(), ObserverError> {
        (self)(tag, props)
    }
}
