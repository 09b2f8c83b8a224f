//! Content transformation chain.
//!
//! The emitter never interprets file content itself: everything flows
//! through an ordered list of [`TransformStep`]s together with a
//! [`ProcessContext`], mirroring a postcss-style processing host. The
//! built-in [`LightningCss`] step covers stylesheet reprinting and
//! minification; callers can supply their own steps for anything else.

mod css;
mod sourcemap;

pub use css::LightningCss;
pub use sourcemap::SourceMap;

use thiserror::Error;

/// Error raised by a single processing step.
#[derive(Debug, Error)]
#[error("{step}: {message}")]
pub struct TransformError {
    /// Name of the step that failed.
    pub step: &'static str,
    /// Step-specific failure description.
    pub message: String,
}

impl TransformError {
    pub fn new(step: &'static str, message: impl Into<String>) -> Self {
        Self {
            step,
            message: message.into(),
        }
    }
}

/// Configuration bag forwarded unchanged into every chain invocation.
///
/// `from` carries the source identifier during the per-file pass and the
/// literal source path for end-of-build targets; `to` is only set for
/// targets.
#[derive(Debug, Clone, Default)]
pub struct ProcessContext {
    /// Source identifier (path-like string).
    pub from: Option<String>,
    /// Destination path (end-of-build targets only).
    pub to: Option<String>,
    /// Production build: steps may minify.
    pub production: bool,
    /// Inline source maps were requested (suppresses the sidecar file).
    pub map_inline: bool,
}

impl ProcessContext {
    /// Whether `from` names a stylesheet.
    pub fn is_stylesheet(&self) -> bool {
        self.from
            .as_deref()
            .and_then(|f| f.rsplit_once('.'))
            .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("css"))
    }
}

/// Output of a step or of a full chain invocation.
#[derive(Debug, Clone)]
pub struct Processed {
    /// Transformed content.
    pub code: String,
    /// Source map, when one was produced.
    pub map: Option<SourceMap>,
}

/// A single processing step.
pub trait TransformStep: Send + Sync {
    /// Step name, used in error messages.
    fn name(&self) -> &'static str;

    /// Transform `code`, optionally producing a source map.
    fn apply(&self, code: &str, ctx: &ProcessContext) -> Result<Processed, TransformError>;
}

/// Identity step: content passes through unchanged.
///
/// Still yields an (empty) source map for stylesheets unless inline maps
/// were requested, like a processing host running an empty plugin list.
pub struct Passthrough;

impl TransformStep for Passthrough {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn apply(&self, code: &str, ctx: &ProcessContext) -> Result<Processed, TransformError> {
        let map = (ctx.is_stylesheet() && !ctx.map_inline)
            .then(|| SourceMap::for_source(ctx.from.as_deref()));
        Ok(Processed {
            code: code.to_string(),
            map,
        })
    }
}

/// Ordered list of processing steps, applied left to right.
///
/// The last step to produce a source map wins.
pub struct TransformChain {
    steps: Vec<Box<dyn TransformStep>>,
}

impl TransformChain {
    pub fn new(steps: Vec<Box<dyn TransformStep>>) -> Self {
        Self { steps }
    }

    /// Run `code` through every step with the given context.
    pub fn process(&self, code: &str, ctx: &ProcessContext) -> Result<Processed, TransformError> {
        let mut out = Processed {
            code: code.to_string(),
            map: None,
        };
        for step in &self.steps {
            let next = step.apply(&out.code, ctx)?;
            out.code = next.code;
            if next.map.is_some() {
                out.map = next.map;
            }
        }
        Ok(out)
    }
}
