//! Content rendering pipeline: markdown text to a UI element tree.
//!
//! The pipeline normalizes raw markup so the embedded parser tolerates it,
//! reports every materialized element to a registration observer, suppresses
//! denylisted tags, and intercepts in-document anchor navigation.
//!
//! # Module Structure
//!
//! - `types` - Element tree and render output types
//! - `observer` - Element-creation observation hooks
//! - `context` - Tree-building context (denylist, overrides, observation)
//! - `render` - AST traversal and raw HTML fragment reading
//! - `nav` - Anchor click interception

pub mod context;
pub mod nav;
pub mod observer;
pub mod render;
pub mod types;

pub use context::TagOverride;
pub use nav::{ClickOutcome, LinkInterceptor, Navigator};
pub use observer::{ElementObserver, ObserverError};
pub use types::{Element, ElementNode, RenderStats, RenderedContent};

use crate::registry::PropMap;
use context::Context;
use render::render_node;
use serde_json::json;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;
use styledown_core::{ParseOptions, ParserPipeline, RenderError, collapse_tag_whitespace};

/// Class marker carried by the container element announced on every render
/// pass, content notwithstanding.
pub const CONTENT_CLASS: &str = "styledown-content";

/// Options for the content rendering pipeline.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Virtual location of the document being rendered; relative anchor
    /// hrefs resolve against its directory.
    pub location: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            location: "/".to_string(),
        }
    }
}

fn normalize_transform(input: &str) -> Cow<'_, str> {
    Cow::Owned(collapse_tag_whitespace(input))
}

/// Renders markdown content into an element tree, reporting each created
/// element to the configured observer and intercepting anchor navigation.
///
/// One pipeline serves one document location; construct a fresh pipeline per
/// render session.
pub struct ContentRenderPipeline {
    observer: Option<Arc<dyn ElementObserver>>,
    overrides: HashMap<String, TagOverride>,
    interceptor: LinkInterceptor,
}

impl ContentRenderPipeline {
    /// Creates a pipeline with no observer, no overrides, and no navigator.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            observer: None,
            overrides: HashMap::new(),
            interceptor: LinkInterceptor::new(options.location),
        }
    }

    /// Installs the element registration observer (typically a
    /// [`StylingRegistry`](crate::registry::StylingRegistry)).
    pub fn with_observer(mut self, observer: Arc<dyn ElementObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Installs the host navigation callback for intercepted anchor clicks.
    pub fn with_navigator<F>(mut self, navigate: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.interceptor.set_navigator(Box::new(navigate));
        self
    }

    /// Registers a renderer override for a tag. Denylisted tags stay
    /// suppressed regardless of overrides.
    pub fn with_override<F>(mut self, tag: &str, rewrite: F) -> Self
    where
        F: Fn(&str, &PropMap) -> (String, PropMap) + Send + Sync + 'static,
    {
        self.overrides.insert(tag.to_string(), Box::new(rewrite));
        self
    }

    /// Renders `content` into an element tree.
    ///
    /// The container element (`div` with the [`CONTENT_CLASS`] marker) is
    /// announced to the observer exactly once per call, before any
    /// content-driven element.
    pub fn render(&self, content: &str) -> Result<RenderedContent, RenderError> {
        let mut parser = ParserPipeline::new(ParseOptions::markdown().to_markdown());
        parser.add_text_transform(normalize_transform);
        let tree = parser.parse(content)?;

        let mut props = PropMap::new();
        props.insert("class".to_string(), json!(CONTENT_CLASS));
        let container = Element::new("div", props);

        let mut ctx = Context::new(self.observer.as_deref(), &self.overrides, container);
        render_node(&tree, &mut ctx);
        let (root, stats) = ctx.finish();

        Ok(RenderedContent { root, stats })
    }

    /// Handles a click on a rendered anchor, given its raw `href`.
    pub fn handle_link_click(&self, href: &str) -> ClickOutcome {
        self.interceptor.handle_click(href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StylingRegistry;
    use std::sync::Mutex;

    fn pipeline_at(location: &str) -> ContentRenderPipeline {
        ContentRenderPipeline::new(RenderOptions {
            location: location.to_string(),
        })
    }

    fn find_tags(node: &Element, tag: &str, hits: &mut usize) {
        if node.tag == tag {
            *hits += 1;
        }
        for child in &node.children {
            if let ElementNode::Element(el) = child {
                find_tags(el, tag, hits);
            }
        }
    }

    fn count_tags(root: &Element, tag: &str) -> usize {
        let mut hits = 0;
        find_tags(root, tag, &mut hits);
        hits
    }

    #[test]
    fn test_container_announced_even_for_empty_content() {
        let registry = Arc::new(StylingRegistry::new());
        let pipeline =
            pipeline_at("/").with_observer(Arc::clone(&registry) as Arc<dyn ElementObserver>);

        let rendered = pipeline.render("").unwrap();
        assert_eq!(rendered.root.tag, "div");
        assert_eq!(rendered.root.props["class"], json!(CONTENT_CLASS));

        let elements = registry.elements().get_elements();
        assert_eq!(elements.len(), 1, "exactly the container registration");
        let registration = elements.values().next().unwrap();
        assert_eq!(registration.tag, "div");
        assert_eq!(registration.props["class"], json!(CONTENT_CLASS));
    }

    #[test]
    fn test_every_materialized_element_is_registered() {
        let registry = Arc::new(StylingRegistry::new());
        let pipeline =
            pipeline_at("/").with_observer(Arc::clone(&registry) as Arc<dyn ElementObserver>);

        let rendered = pipeline
            .render("# Title\n\nSome *emphasis* here.\n")
            .unwrap();
        assert_eq!(count_tags(&rendered.root, "h1"), 1);
        assert_eq!(count_tags(&rendered.root, "em"), 1);

        let tags: Vec<String> = registry
            .elements()
            .get_elements()
            .values()
            .map(|r| r.tag.clone())
            .collect();
        assert!(tags.contains(&"div".to_string()));
        assert!(tags.contains(&"h1".to_string()));
        assert!(tags.contains(&"p".to_string()));
        assert!(tags.contains(&"em".to_string()));
    }

    #[test]
    fn test_multiline_inline_html_renders_as_elements() {
        let pipeline = pipeline_at("/");
        let rendered = pipeline
            .render("intro\n\n<div class=\"panel\">\n  boxed\n</div>\n")
            .unwrap();
        assert_eq!(
            count_tags(&rendered.root, "div"),
            2,
            "container plus the normalized inline <div>"
        );
    }

    #[test]
    fn test_script_and_iframe_never_render_nor_report() {
        let registry = Arc::new(StylingRegistry::new());
        let pipeline = pipeline_at("/")
            .with_observer(Arc::clone(&registry) as Arc<dyn ElementObserver>)
            .with_override("em", |_, props| ("strong".to_string(), props.clone()));

        let content = "safe\n\n<script>alert(1)</script>\n\n<iframe src=\"http://x\"></iframe>\n";
        let rendered = pipeline.render(content).unwrap();

        assert_eq!(count_tags(&rendered.root, "script"), 0);
        assert_eq!(count_tags(&rendered.root, "iframe"), 0);
        assert_eq!(rendered.stats.suppressed_elements, 2);

        let tags: Vec<String> = registry
            .elements()
            .get_elements()
            .values()
            .map(|r| r.tag.clone())
            .collect();
        assert!(!tags.contains(&"script".to_string()));
        assert!(!tags.contains(&"iframe".to_string()));
    }

    #[test]
    fn test_script_body_angle_bracket_does_not_eat_following_content() {
        let pipeline = pipeline_at("/");
        let content =
            "before\n\n<script>for (var i = 0; i<n; i++) beep()</script>\n\nafter paragraph\n";
        let rendered = pipeline.render(content).unwrap();

        assert_eq!(
            count_tags(&rendered.root, "p"),
            2,
            "paragraphs after the script must still render"
        );
        assert_eq!(count_tags(&rendered.root, "script"), 0);
        assert_eq!(rendered.stats.suppressed_elements, 1);
    }

    #[test]
    fn test_observer_failure_does_not_abort_render() {
        let calls = Arc::new(Mutex::new(0usize));
        let counter = Arc::clone(&calls);
        let failing = move |_: &str, _: &PropMap| -> Result<(), ObserverError> {
            *counter.lock().unwrap() += 1;
            Err(ObserverError::new("styling observer offline"))
        };
        let pipeline = pipeline_at("/").with_observer(Arc::new(failing));

        let rendered = pipeline.render("plain paragraph\n").unwrap();
        assert_eq!(count_tags(&rendered.root, "p"), 1);
        assert!(rendered.stats.observer_errors >= 2, "container + p");
        assert_eq!(
            rendered.stats.last_observer_error.as_deref(),
            Some("styling observer offline")
        );
        assert_eq!(*calls.lock().unwrap(), rendered.stats.observer_errors);
    }

    #[test]
    fn test_override_applies_to_markdown_elements() {
        let pipeline = pipeline_at("/").with_override("pre", |_, props| {
            let mut props = props.clone();
            props.insert("data-frame".to_string(), json!(true));
            ("code-frame".to_string(), props)
        });

        let rendered = pipeline.render("```rust\nfn main() {}\n```\n").unwrap();
        assert_eq!(count_tags(&rendered.root, "pre"), 0);
        assert_eq!(count_tags(&rendered.root, "code-frame"), 1);
    }

    #[test]
    fn test_anchor_click_resolution_end_to_end() {
        let visited = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&visited);
        let pipeline = pipeline_at("/docs/guide/intro").with_navigator(move |path: &str| {
            sink.lock().unwrap().push(path.to_string());
        });

        let rendered = pipeline.render("[setup](../setup)\n").unwrap();
        assert_eq!(count_tags(&rendered.root, "a"), 1);

        assert_eq!(
            pipeline.handle_link_click("../setup"),
            ClickOutcome::Intercepted("/docs/setup".to_string())
        );
        assert_eq!(
            pipeline.handle_link_click("http://example.com"),
            ClickOutcome::Default
        );
        assert_eq!(visited.lock().unwrap().as_slice(), ["/docs/setup"]);
    }
}
