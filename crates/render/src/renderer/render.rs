//! Rendering functions: mdast traversal and raw HTML fragment reading.

use super::context::{Context, is_denylisted};
use crate::registry::PropMap;
use markdown::mdast::{AlignKind, Node};
use serde_json::json;

/// HTML tags that never take children.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

fn props_with(entries: &[(&str, serde_json::Value)]) -> PropMap {
    let mut props = PropMap::new();
    for (key, value) in entries {
        props.insert((*key).to_string(), value.clone());
    }
    props
}

/// Renders children inside a simple wrapper tag.
fn render_wrapped(tag: &str, children: &[Node], ctx: &mut Context) {
    ctx.open_element(tag, PropMap::new());
    for child in children {
        render_node(child, ctx);
    }
    ctx.close_element();
}

/// Renders a link node as `<a>` with `href`/`title` props. Click handling
/// happens outside the tree, via the pipeline's link interception.
fn render_link(link: &markdown::mdast::Link, ctx: &mut Context) {
    let mut props = props_with(&[("href", json!(link.url))]);
    if let Some(title) = &link.title {
        props.insert("title".to_string(), json!(title));
    }
    ctx.open_element("a", props);
    for child in &link.children {
        render_node(child, ctx);
    }
    ctx.close_element();
}

/// Renders an image node as a childless `<img>`.
fn render_image(img: &markdown::mdast::Image, ctx: &mut Context) {
    let mut props = props_with(&[("src", json!(img.url)), ("alt", json!(img.alt))]);
    if let Some(title) = &img.title {
        props.insert("title".to_string(), json!(title));
    }
    ctx.void_element("img", props);
}

/// Renders a list node as `<ul>` or `<ol>`, carrying a nonstandard start.
fn render_list(list: &markdown::mdast::List, ctx: &mut Context) {
    let tag = if list.ordered { "ol" } else { "ul" };
    let mut props = PropMap::new();
    if list.ordered
        && let Some(start) = list.start
        && start != 1
    {
        props.insert("start".to_string(), json!(start));
    }
    ctx.open_element(tag, props);
    for child in &list.children {
        render_node(child, ctx);
    }
    ctx.close_element();
}

/// Renders a list item, prefixing a disabled checkbox for task items.
fn render_list_item(item: &markdown::mdast::ListItem, ctx: &mut Context) {
    let mut props = PropMap::new();
    if item.checked.is_some() {
        props.insert("class".to_string(), json!("task-list-item"));
    }
    ctx.open_element("li", props);

    if let Some(checked) = item.checked {
        let mut input = props_with(&[("type", json!("checkbox")), ("disabled", json!(true))]);
        if checked {
            input.insert("checked".to_string(), json!(true));
        }
        ctx.void_element("input", input);
    }

    for child in &item.children {
        render_node(child, ctx);
    }
    ctx.close_element();
}

/// Renders a fenced code block as `<pre><code class="language-*">`.
fn render_code(code: &markdown::mdast::Code, ctx: &mut Context) {
    ctx.open_element("pre", PropMap::new());
    let mut props = PropMap::new();
    if let Some(lang) = &code.lang {
        props.insert("class".to_string(), json!(format!("language-{}", lang)));
    }
    ctx.open_element("code", props);
    ctx.text(&code.value);
    ctx.close_element();
    ctx.close_element();
}

fn align_value(align: &AlignKind) -> Option<&'static str> {
    match align {
        AlignKind::Left => Some("left"),
        AlignKind::Right => Some("right"),
        AlignKind::Center => Some("center"),
        AlignKind::None => None,
    }
}

/// Renders a table row, assigning column alignment props to cells.
fn render_table_row(
    row: &markdown::mdast::TableRow,
    ctx: &mut Context,
    is_header: bool,
    aligns: &[AlignKind],
) {
    ctx.open_element("tr", PropMap::new());
    for (i, cell) in row.children.iter().enumerate() {
        if let Node::TableCell(cell) = cell {
            let tag = if is_header { "th" } else { "td" };
            let mut props = PropMap::new();
            if let Some(align) = aligns.get(i).and_then(align_value) {
                props.insert("align".to_string(), json!(align));
            }
            ctx.open_element(tag, props);
            for child in &cell.children {
                render_node(child, ctx);
            }
            ctx.close_element();
        }
    }
    ctx.close_element();
}

/// Renders a GFM table as `<table>` with `<thead>` and optional `<tbody>`.
fn render_table(table: &markdown::mdast::Table, ctx: &mut Context) {
    ctx.open_element("table", PropMap::new());

    ctx.open_element("thead", PropMap::new());
    if let Some(Node::TableRow(row)) = table.children.first() {
        render_table_row(row, ctx, true, &table.align);
    }
    ctx.close_element();

    if table.children.len() > 1 {
        ctx.open_element("tbody", PropMap::new());
        for row in table.children.iter().skip(1) {
            if let Node::TableRow(row) = row {
                render_table_row(row, ctx, false, &table.align);
            }
        }
        ctx.close_element();
    }

    ctx.close_element();
}

/// Recursively renders an AST node into the element tree.
pub fn render_node(node: &Node, ctx: &mut Context) {
    match node {
        Node::Root(root) => {
            for child in &root.children {
                render_node(child, ctx);
            }
        }
        Node::Text(text) => ctx.text(&text.value),
        Node::Paragraph(para) => render_wrapped("p", &para.children, ctx),
        Node::Heading(heading) => {
            render_wrapped(&format!("h{}", heading.depth), &heading.children, ctx)
        }
        Node::Strong(strong) => render_wrapped("strong", &strong.children, ctx),
        Node::Emphasis(em) => render_wrapped("em", &em.children, ctx),
        Node::Delete(del) => render_wrapped("del", &del.children, ctx),
        Node::Blockquote(quote) => render_wrapped("blockquote", &quote.children, ctx),
        Node::InlineCode(code) => {
            ctx.open_element("code", PropMap::new());
            ctx.text(&code.value);
            ctx.close_element();
        }
        Node::Link(link) => render_link(link, ctx),
        Node::Image(img) => render_image(img, ctx),
        Node::List(list) => render_list(list, ctx),
        Node::ListItem(item) => render_list_item(item, ctx),
        Node::Code(code) => render_code(code, ctx),
        Node::ThematicBreak(_) => ctx.void_element("hr", PropMap::new()),
        Node::Table(table) => render_table(table, ctx),
        Node::TableRow(_) | Node::TableCell(_) => {}
        Node::Html(html) => render_html_fragment(&html.value, ctx),
        _ => {
            log::warn!("Unhandled markdown node type: {:?}", node);
        }
    }
}

/// Feeds a raw HTML fragment through the context as open/close/text events.
///
/// The fragment has already been whitespace-normalized, so tags arrive on a
/// single line. Comments and doctype-ish `<!` constructs are skipped; text
/// between tags becomes text nodes. This is the path on which the element
/// denylist actually bites: `<script>` in markdown arrives here.
pub fn render_html_fragment(html: &str, ctx: &mut Context) {
    let mut rest = html;

    while let Some(lt) = find_tag_start(rest) {
        let text = &rest[..lt];
        if !text.trim().is_empty() {
            ctx.text(text);
        }
        rest = &rest[lt..];

        if let Some(stripped) = rest.strip_prefix("<!--") {
            rest = match stripped.find("-->") {
                Some(end) => &stripped[end + 3..],
                None => "",
            };
            continue;
        }
        if rest.starts_with("<!") {
            rest = match rest.find('>') {
                Some(end) => &rest[end + 1..],
                None => "",
            };
            continue;
        }

        let Some(gt) = rest.find('>') else {
            // Unterminated tag: emit what is left as text and stop.
            ctx.text(rest);
            return;
        };
        let tag_body = &rest[1..gt];
        rest = &rest[gt + 1..];

        if let Some(name) = tag_body.strip_prefix('/') {
            ctx.close_named(name.trim());
            continue;
        }

        let (name, attrs) = split_tag_body(tag_body);
        if name.is_empty() {
            continue;
        }
        let self_closing = tag_body.trim_end().ends_with('/');
        let props = parse_attributes(attrs.trim_end_matches('/'));

        if self_closing || is_void_tag(name) {
            ctx.void_element(name, props);
        } else if is_denylisted(name) {
            // Raw-text elements: a script body may contain `<` sequences
            // that are not markup, so the body is never tokenized.
            rest = skip_raw_text_body(rest, name);
            ctx.void_element(name, props);
        } else {
            ctx.open_element(name, props);
        }
    }

    if !rest.trim().is_empty() {
        ctx.text(rest);
    }
}

/// Skips the raw-text body of `tag`, returning the remainder after the
/// matching case-insensitive closer. Returns `""` when no closer exists in
/// the fragment.
fn skip_raw_text_body<'a>(rest: &'a str, tag: &str) -> &'a str {
    let bytes = rest.as_bytes();
    for i in 0..rest.len() {
        if bytes[i] != b'<' || bytes.get(i + 1) != Some(&b'/') {
            continue;
        }
        let name_start = i + 2;
        if let Some(name) = rest.get(name_start..name_start + tag.len())
            && name.eq_ignore_ascii_case(tag)
        {
            let after = rest[name_start + tag.len()..].trim_start();
            if let Some(tail) = after.strip_prefix('>') {
                return tail;
            }
        }
    }
    ""
}

/// Finds the next `<` that plausibly starts a tag (letter, `/`, or `!`).
fn find_tag_start(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    s.char_indices().find_map(|(i, c)| {
        if c != '<' {
            return None;
        }
        match bytes.get(i + 1) {
            Some(b) if b.is_ascii_alphabetic() || *b == b'/' || *b == b'!' => Some(i),
            _ => None,
        }
    })
}

/// Splits a tag body into the tag name and the attribute remainder.
fn split_tag_body(body: &str) -> (&str, &str) {
    let name_end = body
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(body.len());
    (&body[..name_end], &body[name_end..])
}

/// Parses HTML attributes into props: `key="v"`, `key='v'`, `key=v`, and
/// bare boolean attributes.
fn parse_attributes(input: &str) -> PropMap {
    let mut props = PropMap::new();
    let mut rest = input.trim_start();

    while !rest.is_empty() {
        let name_end = rest
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(rest.len());
        let name = &rest[..name_end];
        if name.is_empty() {
            break;
        }
        rest = rest[name_end..].trim_start();

        if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            let (value, remainder) = match after_eq.chars().next() {
                Some(quote @ ('"' | '\'')) => {
                    let inner = &after_eq[1..];
                    match inner.find(quote) {
                        Some(end) => (&inner[..end], &inner[end + 1..]),
                        None => (inner, ""),
                    }
                }
                _ => {
                    let end = after_eq
                        .find(|c: char| c.is_whitespace())
                        .unwrap_or(after_eq.len());
                    (&after_eq[..end], &after_eq[end..])
                }
            };
            props.insert(name.to_string(), json!(value));
            rest = remainder.trim_start();
        } else {
            props.insert(name.to_string(), json!(true));
        }
    }

    props
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::context::TagOverride;
    use crate::renderer::types::{Element, ElementNode};
    use std::collections::HashMap;

    fn render_fragment(html: &str) -> Element {
        let overrides: HashMap<String, TagOverride> = HashMap::new();
        let mut ctx = Context::new(None, &overrides, Element::new("div", PropMap::new()));
        render_html_fragment(html, &mut ctx);
        ctx.finish().0
    }

    fn child_element(root: &Element, index: usize) -> &Element {
        match &root.children[index] {
            ElementNode::Element(el) => el,
            other => panic!("expected element at {}, got {:?}", index, other),
        }
    }

    #[test]
    fn test_fragment_open_text_close() {
        let root = render_fragment("<span class=\"hint\">hello</span>");
        let span = child_element(&root, 0);
        assert_eq!(span.tag, "span");
        assert_eq!(span.props["class"], json!("hint"));
        assert_eq!(span.children, vec![ElementNode::text("hello")]);
    }

    #[test]
    fn test_fragment_self_closing_and_void_tags() {
        let root = render_fragment("<br/><img src=\"x.png\">");
        assert_eq!(root.children.len(), 2);
        assert_eq!(child_element(&root, 0).tag, "br");
        let img = child_element(&root, 1);
        assert_eq!(img.tag, "img");
        assert_eq!(img.props["src"], json!("x.png"));
    }

    #[test]
    fn test_fragment_attribute_flavors() {
        let root = render_fragment("<input type=text disabled value='7'>");
        let input = child_element(&root, 0);
        assert_eq!(input.props["type"], json!("text"));
        assert_eq!(input.props["disabled"], json!(true));
        assert_eq!(input.props["value"], json!("7"));
    }

    #[test]
    fn test_fragment_comments_skipped() {
        let root = render_fragment("<!-- note --><b>x</b>");
        assert_eq!(root.children.len(), 1);
        assert_eq!(child_element(&root, 0).tag, "b");
    }

    #[test]
    fn test_fragment_script_suppressed() {
        let root = render_fragment("<p>ok</p><script>alert(1)</script><em>fine</em>");
        assert_eq!(root.children.len(), 2);
        assert_eq!(child_element(&root, 0).tag, "p");
        assert_eq!(child_element(&root, 1).tag, "em");
    }

    #[test]
    fn test_fragment_script_body_with_angle_bracket() {
        let root =
            render_fragment("<script>for (var i = 0; i<n; i++) beep()</script><p>after</p>");
        assert_eq!(root.children.len(), 1, "script body must not leak opens");
        assert_eq!(child_element(&root, 0).tag, "p");
    }

    #[test]
    fn test_fragment_raw_text_closer_case_insensitive() {
        let root = render_fragment("<IFRAME src=\"x\">body < text</iframe><b>kept</b>");
        assert_eq!(root.children.len(), 1);
        assert_eq!(child_element(&root, 0).tag, "b");
    }

    #[test]
    fn test_fragment_loose_angle_is_text() {
        let root = render_fragment("a < b");
        assert_eq!(root.children, vec![ElementNode::text("a < b")]);
    }
}
