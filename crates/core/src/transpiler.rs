//! Transpiler collaborator bridge.
//!
//! The rendering host may hand JSX/TSX snippets to an external transpiler.
//! The transpiler is a collaborator consumed through a narrow interface: it
//! is injected at construction time, and "no transpiler present" is an
//! ordinary, constructible state rather than a lookup failure at call time.

use mdxjs::{JsxRuntime, MdxParseOptions, Options, compile};
use std::sync::Arc;
use thiserror::Error;

/// Boxed error type returned by transpiler backends.
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

/// A transpiler backend turning JSX/TSX source into plain JavaScript.
pub trait Transpiler: Send + Sync {
    /// Transpile `source` (from the file named `filename`); `typescript`
    /// signals TSX input.
    fn transpile(
        &self,
        source: &str,
        filename: &str,
        typescript: bool,
    ) -> Result<String, BackendError>;

    /// Human-readable backend version, for diagnostics.
    fn version(&self) -> String;
}

/// Error type for bridge invocations.
///
/// Both variants carry the original source text so the caller can fall back
/// to displaying or re-routing the untranspiled snippet.
#[derive(Debug, Error)]
pub enum TranspileError {
    /// No backend was injected into the bridge.
    #[error("transpiler backend unavailable")]
    Unavailable {
        /// The source text that could not be transpiled.
        source_text: String,
    },
    /// The backend was present but failed during invocation.
    #[error("transpiling {filename} failed: {cause}")]
    Execution {
        /// The source text that could not be transpiled.
        source_text: String,
        /// The file name handed to the backend.
        filename: String,
        /// The underlying backend failure, stringified.
        cause: String,
    },
}

/// Bridge between the rendering host and an optional transpiler backend.
#[derive(Clone)]
pub struct TranspilerBridge {
    backend: Option<Arc<dyn Transpiler>>,
}

impl TranspilerBridge {
    /// Create a bridge over an injected backend.
    pub fn new(backend: Arc<dyn Transpiler>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Create a bridge with no backend. Every `transpile` call yields
    /// `TranspileError::Unavailable`.
    pub fn unavailable() -> Self {
        Self { backend: None }
    }

    /// Returns whether a backend is present.
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Returns the backend version, if a backend is present.
    pub fn version(&self) -> Option<String> {
        self.backend.as_ref().map(|b| b.version())
    }

    /// Transpile `source`, surfacing backend absence and backend failures as
    /// typed errors that carry the original source text.
    pub fn transpile(
        &self,
        source: &str,
        filename: &str,
        typescript: bool,
    ) -> Result<String, TranspileError> {
        let backend = self
            .backend
            .as_ref()
            .ok_or_else(|| TranspileError::Unavailable {
                source_text: source.to_string(),
            })?;

        backend
            .transpile(source, filename, typescript)
            .map_err(|err| TranspileError::Execution {
                source_text: source.to_string(),
                filename: filename.to_string(),
                cause: err.to_string(),
            })
    }
}

/// Default backend over mdxjs-rs.
///
/// Compiles JSX-bearing markdown/MDX source to JavaScript with the automatic
/// JSX runtime. The `typescript` flag is accepted for interface parity; the
/// mdxjs pipeline handles type-annotation-free sources either way.
#[derive(Debug, Default, Clone, Copy)]
pub struct MdxTranspiler;

impl Transpiler for MdxTranspiler {
    fn transpile(
        &self,
        source: &str,
        filename: &str,
        _typescript: bool,
    ) -> Result<String, BackendError> {
        let options = Options {
            filepath: Some(filename.to_string()),
            jsx_runtime: Some(JsxRuntime::Automatic),
            parse: MdxParseOptions::gfm(),
            ..Default::default()
        };

        compile(source, &options).map_err(|err| err.to_string().into())
    }

    fn version(&self) -> String {
        "mdxjs-rs".to_string()
    }
}
