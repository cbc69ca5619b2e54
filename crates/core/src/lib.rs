#![deny(missing_docs)]
//! styledown core: markdown parsing, markup normalization, link resolution,
//! and the transpiler collaborator bridge.

/// Core error types.
pub mod error;
/// Href classification and relative-path resolution.
pub mod link;
/// Pre-parse markup normalization.
pub mod normalize;
/// Markdown parsing utilities and extension hooks.
pub mod parse;
/// Transpiler collaborator bridge.
pub mod transpiler;

pub use error::{RenderError, SourceLocation};
pub use link::{is_external, resolve_href};
pub use normalize::collapse_tag_whitespace;
pub use parse::{
    ParseOptions, ParserPipeline, TextTransform, parse_mdast, parse_mdast_with_options,
};
pub use transpiler::{
    BackendError, MdxTranspiler, TranspileError, Transpiler, TranspilerBridge,
};
