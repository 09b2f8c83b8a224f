//! Asset emission: transform matched sources and write them under the
//! output root.
//!
//! Two operations, each a single linear sequence:
//! - [`emit_file`] runs once per source file during the main pass
//! - [`emit_target`] runs once per configured (from, to) pair at the end
//!   of the pass
//!
//! Nothing is read back or cached between calls; every pass recomputes
//! from scratch. The output root is threaded as a parameter rather than
//! held in shared state, and directory creation is idempotent, so
//! overlapping calls from a parallel driver need no coordination.

mod error;
mod name;

pub use error::EmitError;
pub use name::DerivedName;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::matcher::MatchRule;
use crate::transform::{ProcessContext, TransformChain};

/// End-of-build transform target: a literal (from, to) copy through the
/// chain, independent of the match rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Target {
    /// Source file to read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<PathBuf>,
    /// Destination file to write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<PathBuf>,
}

/// Result of the per-file operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitOutcome {
    /// Identifier did not satisfy the match rule; nothing was written.
    Skipped,
    /// Content was emitted.
    Emitted(EmitReport),
}

/// Paths written by one per-file operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitReport {
    /// The emitted artifact.
    pub output: PathBuf,
    /// The source map sidecar, when one was written.
    pub map: Option<PathBuf>,
}

/// Per-file operation: transform a matched source and write it under
/// `out_root`.
///
/// Identifiers the match rule rejects are skipped without side effects.
/// For matched sources the output name derives from the identifier
/// alone; a sidecar map is written only when the chain produced one,
/// inline maps were not requested, and the source is a stylesheet.
pub fn emit_file(
    id: &str,
    content: &str,
    rule: &MatchRule,
    chain: &TransformChain,
    ctx: &ProcessContext,
    out_root: &Path,
) -> Result<EmitOutcome, EmitError> {
    if !rule.matches(id) {
        return Ok(EmitOutcome::Skipped);
    }

    let name = DerivedName::from_id(id);
    let ctx = ProcessContext {
        from: Some(id.to_string()),
        ..ctx.clone()
    };

    let processed = chain
        .process(content, &ctx)
        .map_err(|e| EmitError::Transform(id.to_string(), e))?;

    ensure_dir(out_root)?;

    let output = out_root.join(name.file_name());
    fs::write(&output, &processed.code).map_err(|e| EmitError::Write(output.clone(), e))?;

    let mut map_path = None;
    if let Some(map) = &processed.map
        && !ctx.map_inline
        && name.is_stylesheet()
    {
        let path = out_root.join(name.map_name());
        fs::write(&path, map.to_json()).map_err(|e| EmitError::Write(path.clone(), e))?;
        map_path = Some(path);
    }

    Ok(EmitOutcome::Emitted(EmitReport {
        output,
        map: map_path,
    }))
}

/// End-of-build operation: run one (from, to) pair through the chain and
/// write the result verbatim to `to`.
///
/// Returns `Ok(None)` when either field of the pair is missing. The
/// context carries the literal from/to paths instead of a module
/// identifier. Maps are never written for targets.
pub fn emit_target(
    target: &Target,
    chain: &TransformChain,
    ctx: &ProcessContext,
    out_root: &Path,
) -> Result<Option<PathBuf>, EmitError> {
    let (Some(from), Some(to)) = (&target.from, &target.to) else {
        return Ok(None);
    };

    let content = fs::read_to_string(from).map_err(|e| EmitError::Read(from.clone(), e))?;

    let ctx = ProcessContext {
        from: Some(from.display().to_string()),
        to: Some(to.display().to_string()),
        ..ctx.clone()
    };
    let processed = chain
        .process(&content, &ctx)
        .map_err(|e| EmitError::Transform(from.display().to_string(), e))?;

    ensure_dir(out_root)?;
    if let Some(parent) = to.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_dir(parent)?;
    }

    fs::write(to, &processed.code).map_err(|e| EmitError::Write(to.clone(), e))?;
    Ok(Some(to.clone()))
}

/// Idempotent output-directory creation: an existing directory is
/// success, not a distinguishable branch.
fn ensure_dir(dir: &Path) -> Result<(), EmitError> {
    fs::create_dir_all(dir).map_err(|e| EmitError::CreateDir(dir.to_path_buf(), e))
}
