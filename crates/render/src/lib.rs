#![deny(missing_docs)]
//! styledown render engine: the styling bridge (element/theme registries and
//! snapshots) and the markdown-to-element content rendering pipeline.

/// Styling bridge: element and theme registries plus snapshots.
pub mod registry;
/// Content rendering pipeline (markdown to element tree).
pub mod renderer;

pub use registry::{
    ElementRegistration, ElementRegistry, PropMap, StyleSnapshot, StylingRegistry,
    ThemeDefinition, ThemeRegistry,
};
pub use renderer::{
    CONTENT_CLASS, ClickOutcome, ContentRenderPipeline, Element, ElementNode, ElementObserver,
    LinkInterceptor, ObserverError, RenderOptions, RenderStats, RenderedContent, TagOverride,
};
