//! Configuration management for `cascara.toml`.
//!
//! The file is optional: without one, the defaults cover the common
//! `src` → `public` layout. Paths in the file resolve relative to the
//! file's own directory; CLI overrides resolve relative to the working
//! directory.
//!
//! # Example
//!
//! ```toml
//! [emit]
//! from = "src"
//! to = "public"
//! include = ["**/*.{html,css}"]
//! exclude = ["**/vendor/**"]
//!
//! [emit.map]
//! inline = false
//!
//! [chain]
//! minify = true
//!
//! [[target]]
//! from = "src/index.html"
//! to = "public/index.html"
//! ```

mod error;

pub use error::{ConfigDiagnostics, ConfigError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::emit::Target;
use crate::matcher::MatchRule;
use crate::transform::{LightningCss, ProcessContext, TransformChain, TransformStep};
use crate::utils::path::resolve_in;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
    pub emit: EmitSection,
    pub chain: ChainSection,

    /// End-of-build transform targets.
    #[serde(rename = "target")]
    pub targets: Vec<Target>,

    /// Production build (CLI only, never read from the file).
    #[serde(skip)]
    pub production: bool,

    /// Clean the output root before building (CLI only).
    #[serde(skip)]
    pub clean: bool,
}

/// `[emit]` section: source root, output root, match rule, maps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitSection {
    /// Source root scanned during a build pass.
    pub from: PathBuf,
    /// Output root: every emitted artifact lands under this directory.
    pub to: PathBuf,
    /// Include globs (standard `*`, `**`, brace-list semantics).
    /// Empty means all HTML and stylesheet files.
    pub include: Vec<String>,
    /// Exclude globs; exclude wins over include.
    pub exclude: Vec<String>,
    /// Source map options.
    pub map: MapSection,
}

impl Default for EmitSection {
    fn default() -> Self {
        Self {
            from: PathBuf::from("src"),
            to: PathBuf::from("public"),
            include: Vec::new(),
            exclude: Vec::new(),
            map: MapSection::default(),
        }
    }
}

/// `[emit.map]` section.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSection {
    /// Inline source maps into the emitted content instead of writing a
    /// sidecar file.
    pub inline: bool,
}

/// `[chain]` section: options for the built-in transformation chain.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainSection {
    /// Minify emitted CSS (defaults to the production flag).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minify: Option<bool>,
}

impl EmitConfig {
    /// Load configuration and apply CLI overrides.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = if cli.config.exists() {
            let raw = std::fs::read_to_string(&cli.config)
                .map_err(|e| ConfigError::Io(cli.config.clone(), e))?;
            let mut config = Self::from_toml(&raw)?;
            if let Some(root) = cli.config.parent().filter(|p| !p.as_os_str().is_empty()) {
                config.resolve_paths(root);
            }
            config
        } else {
            Self::default()
        };

        if let Some(output) = &cli.output {
            config.emit.to = output.clone();
        }
        if let Some(args) = cli.build_args() {
            config.production = args.production;
            config.clean = args.clean;
            if args.minify.is_some() {
                config.chain.minify = args.minify;
            }
        }

        Ok(config)
    }

    /// Parse from a TOML string (no CLI overrides, no path resolution).
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve all configured paths relative to `root`.
    fn resolve_paths(&mut self, root: &Path) {
        self.emit.from = resolve_in(root, &self.emit.from);
        self.emit.to = resolve_in(root, &self.emit.to);
        for target in &mut self.targets {
            if let Some(from) = &target.from {
                target.from = Some(resolve_in(root, from));
            }
            if let Some(to) = &target.to {
                target.to = Some(resolve_in(root, to));
            }
        }
    }

    /// Validate globs and target pairs, collecting diagnostics.
    fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        let globs: [(&'static str, &[String]); 2] = [
            ("emit.include", &self.emit.include),
            ("emit.exclude", &self.emit.exclude),
        ];
        for (field, patterns) in globs {
            for pattern in patterns {
                if let Err(e) = globset::Glob::new(pattern) {
                    diag.error(field, format!("invalid glob `{pattern}`: {e}"));
                }
            }
        }

        // Half-specified pairs are skipped at emission time, not fatal
        for (i, target) in self.targets.iter().enumerate() {
            if target.from.is_some() != target.to.is_some() {
                diag.hint(
                    "target",
                    format!("[{i}] ignored: a target needs both `from` and `to`"),
                );
            }
        }

        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    /// Build the match rule from the configured globs.
    pub fn match_rule(&self) -> Result<MatchRule, ConfigError> {
        MatchRule::new(&self.emit.include, &self.emit.exclude)
            .map_err(|e| ConfigError::Validation(e.to_string()))
    }

    /// Assemble the built-in transformation chain.
    pub fn chain(&self) -> TransformChain {
        let minify = self.chain.minify.unwrap_or(self.production);
        let steps: Vec<Box<dyn TransformStep>> = vec![Box::new(LightningCss::new(minify))];
        TransformChain::new(steps)
    }

    /// The processing context forwarded into every chain invocation.
    pub fn process_context(&self) -> ProcessContext {
        ProcessContext {
            from: None,
            to: None,
            production: self.production,
            map_inline: self.emit.map.inline,
        }
    }
}
