//! Rendering context for the element renderer.

use super::observer::ElementObserver;
use super::types::{Element, ElementNode, RenderStats};
use crate::registry::PropMap;
use std::collections::HashMap;

/// Tags that never render, regardless of source content or caller overrides.
const DENYLISTED_TAGS: &[&str] = &["script", "iframe"];

/// A caller-supplied override rewriting `(tag, props)` before an element is
/// materialized. Children render beneath the replacement unchanged.
pub type TagOverride = Box<dyn Fn(&str, &PropMap) -> (String, PropMap) + Send + Sync>;

/// Returns true if `tag` is force-denylisted.
pub(super) fn is_denylisted(tag: &str) -> bool {
    DENYLISTED_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

/// Plain tag names start lowercase; capitalized names are component
/// references and are materialized without being reported.
fn is_plain_tag(tag: &str) -> bool {
    tag.chars().next().is_some_and(|c| c.is_ascii_lowercase())
}

/// Manages the element tree under construction during one render pass.
///
/// Elements open onto a stack and attach to their parent when closed.
/// Denylisted tags switch the context into suppression: the whole subtree is
/// dropped, tracked by depth so nested opens and closes stay balanced.
pub struct Context<'a> {
    root: Element,
    stack: Vec<Element>,
    observer: Option<&'a dyn ElementObserver>,
    overrides: &'a HashMap<String, TagOverride>,
    suppressed_depth: usize,
    stats: RenderStats,
}

impl<'a> Context<'a> {
    /// Creates a context over the given container element and announces the
    /// container to the observer. The announcement happens once per render
    /// pass, before any content-driven element is materialized.
    pub fn new(
        observer: Option<&'a dyn ElementObserver>,
        overrides: &'a HashMap<String, TagOverride>,
        container: Element,
    ) -> Self {
        let mut ctx = Self {
            root: container,
            stack: Vec::new(),
            observer,
            overrides,
            suppressed_depth: 0,
            stats: RenderStats::default(),
        };
        let (tag, props) = (ctx.root.tag.clone(), ctx.root.props.clone());
        ctx.notify(&tag, &props);
        ctx
    }

    /// Reports a materialized element to the observer, swallowing failures.
    ///
    /// A misbehaving observer must never abort rendering: errors are
    /// counted, remembered, and logged, then discarded.
    fn notify(&mut self, tag: &str, props: &PropMap) {
        let Some(observer) = self.observer else {
            return;
        };
        if let Err(err) = observer.element_created(tag, props) {
            log::warn!("element observer failed for <{}>: {}", tag, err);
            self.stats.observer_errors += 1;
            self.stats.last_observer_error = Some(err.to_string());
        }
    }

    /// Opens an element; it stays on the stack until closed.
    pub fn open_element(&mut self, tag: &str, props: PropMap) {
        if self.suppressed_depth > 0 {
            self.suppressed_depth += 1;
            return;
        }
        let Some((tag, props)) = self.materialize(tag, props) else {
            self.suppressed_depth = 1;
            return;
        };
        self.stack.push(Element::new(tag, props));
    }

    /// Closes the innermost open element and attaches it to its parent.
    pub fn close_element(&mut self) {
        if self.suppressed_depth > 0 {
            self.suppressed_depth -= 1;
            return;
        }
        if let Some(element) = self.stack.pop() {
            self.attach(ElementNode::Element(element));
        }
    }

    /// Closes by tag name, for raw HTML fragments. Closers that match no
    /// open element are ignored.
    pub fn close_named(&mut self, tag: &str) {
        if self.suppressed_depth > 0 {
            self.suppressed_depth -= 1;
            return;
        }
        let matches = self
            .stack
            .last()
            .is_some_and(|e| e.tag.eq_ignore_ascii_case(tag));
        if matches {
            self.close_element();
        }
    }

    /// Materializes a childless element in place.
    pub fn void_element(&mut self, tag: &str, props: PropMap) {
        if self.suppressed_depth > 0 {
            return;
        }
        if let Some((tag, props)) = self.materialize(tag, props) {
            self.attach(ElementNode::Element(Element::new(tag, props)));
        }
    }

    /// Appends text to the innermost open element, merging with an adjacent
    /// text node.
    pub fn text(&mut self, value: &str) {
        if self.suppressed_depth > 0 || value.is_empty() {
            return;
        }
        let children = self.current_children();
        if let Some(ElementNode::Text { value: prev }) = children.last_mut() {
            prev.push_str(value);
        } else {
            children.push(ElementNode::text(value));
        }
    }

    /// Applies the denylist and overrides, reporting the element that will
    /// actually materialize. Returns `None` when the element is suppressed.
    fn materialize(&mut self, tag: &str, props: PropMap) -> Option<(String, PropMap)> {
        if is_denylisted(tag) {
            self.suppress(tag);
            return None;
        }
        let (tag, props) = match self.overrides.get(tag) {
            Some(rewrite) => rewrite(tag, &props),
            None => (tag.to_string(), props),
        };
        // Overrides cannot resurrect denylisted tags.
        if is_denylisted(&tag) {
            self.suppress(&tag);
            return None;
        }
        if is_plain_tag(&tag) {
            self.notify(&tag, &props);
        }
        Some((tag, props))
    }

    fn suppress(&mut self, tag: &str) {
        log::debug!("suppressing denylisted element <{}>", tag);
        self.stats.suppressed_elements += 1;
    }

    fn current_children(&mut self) -> &mut Vec<ElementNode> {
        match self.stack.last_mut() {
            Some(element) => &mut element.children,
            None => &mut self.root.children,
        }
    }

    fn attach(&mut self, node: ElementNode) {
        self.current_children().push(node);
    }

    /// Consumes the context, attaching any unclosed elements, and returns
    /// the container plus accumulated stats.
    pub fn finish(mut self) -> (Element, RenderStats) {
        while let Some(element) = self.stack.pop() {
            self.attach(ElementNode::Element(element));
        }
        (self.root, self.stats)
    }
}
