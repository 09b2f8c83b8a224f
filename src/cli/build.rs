//! Build pass orchestration.
//!
//! Phases: clean (optional) → scan → per-file emission (parallel) →
//! end-of-build targets → summary. Failures are logged as they occur
//! and the pass keeps going; only the summary fails, once every
//! operation has had its turn.

use anyhow::{Result, bail};
use jwalk::WalkDir;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::EmitConfig;
use crate::emit::{self, EmitError, EmitOutcome};
use crate::utils::count_noun;
use crate::{debug, log};

/// Files the scan never considers, whatever the match rule says.
const SCAN_IGNORE: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Run one emission pass.
pub fn run_build(config: &EmitConfig) -> Result<()> {
    if config.clean && config.emit.to.exists() {
        fs::remove_dir_all(&config.emit.to)?;
        debug!("build"; "cleaned {}", config.emit.to.display());
    }

    let rule = config.match_rule()?;
    let chain = config.chain();
    let ctx = config.process_context();

    let files = collect_source_files(&config.emit.from);
    debug!(
        "build";
        "{} under {}",
        count_noun(files.len(), "source file"),
        config.emit.from.display()
    );

    // Per-file pass. Parallel is safe: directory creation is idempotent
    // and each identifier maps to its own output name.
    let results: Vec<_> = files
        .par_iter()
        .map(|path| {
            let id = path.display().to_string();
            // Rejected identifiers are never read: the source root may
            // hold binary assets (images, fonts) no chain should see
            if !rule.matches(&id) {
                return (id, Ok(EmitOutcome::Skipped));
            }
            let result = match fs::read_to_string(path) {
                Ok(content) => {
                    emit::emit_file(&id, &content, &rule, &chain, &ctx, &config.emit.to)
                }
                Err(e) => Err(EmitError::Read(path.clone(), e)),
            };
            (id, result)
        })
        .collect();

    let mut emitted = 0usize;
    let mut failed = 0usize;
    for (id, result) in results {
        match result {
            Ok(EmitOutcome::Emitted(report)) => {
                emitted += 1;
                debug!("emit"; "{} -> {}", id, report.output.display());
            }
            Ok(EmitOutcome::Skipped) => {}
            Err(e) => {
                failed += 1;
                log!("error"; "{:#}", anyhow::Error::new(e));
            }
        }
    }

    // End-of-build targets, independent of the match rule
    let mut copied = 0usize;
    for target in &config.targets {
        match emit::emit_target(target, &chain, &ctx, &config.emit.to) {
            Ok(Some(to)) => {
                copied += 1;
                debug!("emit"; "target -> {}", to.display());
            }
            Ok(None) => {}
            Err(e) => {
                failed += 1;
                log!("error"; "{:#}", anyhow::Error::new(e));
            }
        }
    }

    log!(
        "build";
        "{} emitted, {} copied -> {}",
        count_noun(emitted, "asset"),
        count_noun(copied, "target"),
        config.emit.to.display()
    );

    if failed > 0 {
        bail!("{} failed", count_noun(failed, "operation"));
    }
    Ok(())
}

/// Collect candidate files under the source root.
///
/// Eligibility is the match rule's call; the scan only drops noise
/// files. A missing source root yields an empty pass, not an error.
fn collect_source_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).into_iter().flatten() {
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name();
        if SCAN_IGNORE.iter().any(|skip| name == std::ffi::OsStr::new(skip)) {
            continue;
        }
        files.push(entry.path());
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::Target;
    use tempfile::TempDir;

    fn site(dir: &TempDir) -> EmitConfig {
        let mut config = EmitConfig::default();
        config.emit.from = dir.path().join("src");
        config.emit.to = dir.path().join("public");
        config
    }

    #[test]
    fn test_pass_emits_matched_files_only() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("app.css"), "a { color: red; }").unwrap();
        fs::write(src.join("index.html"), "<p>hi</p>").unwrap();
        fs::write(src.join("main.js"), "let x = 1;").unwrap();

        let config = site(&dir);
        run_build(&config).unwrap();

        let out = &config.emit.to;
        assert!(out.join("app.css").exists());
        assert!(out.join("app.css.map").exists());
        assert!(out.join("index.html").exists());
        assert!(!out.join("main.js").exists());
    }

    #[test]
    fn test_binary_files_outside_the_rule_are_skipped() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("app.css"), "a { color: red; }").unwrap();
        fs::write(src.join("logo.png"), [0x89, 0x50, 0x4e, 0x47, 0xff, 0xfe]).unwrap();

        let config = site(&dir);
        run_build(&config).unwrap();

        assert!(config.emit.to.join("app.css").exists());
        assert!(!config.emit.to.join("logo.png").exists());
    }

    #[test]
    fn test_pass_processes_targets() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("index.html"), "<h1>home</h1>").unwrap();

        let mut config = site(&dir);
        config.emit.include = vec!["**/*.css".to_string()];
        config.targets = vec![Target {
            from: Some(src.join("index.html")),
            to: Some(config.emit.to.join("index.html")),
        }];

        run_build(&config).unwrap();
        assert_eq!(
            fs::read_to_string(config.emit.to.join("index.html")).unwrap(),
            "<h1>home</h1>"
        );
    }

    #[test]
    fn test_failed_target_does_not_stop_the_rest() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("index.html"), "<h1>home</h1>").unwrap();

        let mut config = site(&dir);
        config.targets = vec![
            Target {
                from: Some(src.join("missing.css")),
                to: Some(config.emit.to.join("missing.css")),
            },
            Target {
                from: Some(src.join("index.html")),
                to: Some(config.emit.to.join("copy.html")),
            },
        ];

        let result = run_build(&config);
        assert!(result.is_err());
        // The pass kept going past the failed pair
        assert!(config.emit.to.join("copy.html").exists());
    }

    #[test]
    fn test_clean_removes_stale_output() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("app.css"), "a{}").unwrap();

        let mut config = site(&dir);
        fs::create_dir_all(&config.emit.to).unwrap();
        fs::write(config.emit.to.join("stale.css"), "old").unwrap();
        config.clean = true;

        run_build(&config).unwrap();
        assert!(!config.emit.to.join("stale.css").exists());
        assert!(config.emit.to.join("app.css").exists());
    }

    #[test]
    fn test_missing_source_root_is_an_empty_pass() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);
        run_build(&config).unwrap();
        assert!(!config.emit.to.exists());
    }

    #[test]
    fn test_minify_in_production() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("app.css"), "a { color: red; }").unwrap();

        let mut config = site(&dir);
        config.production = true;

        run_build(&config).unwrap();
        assert_eq!(
            fs::read_to_string(config.emit.to.join("app.css")).unwrap(),
            "a{color:red}"
        );
    }
}
