//! Match rule: glob include/exclude filter for source identifiers.

use globset::{Glob, GlobSet, GlobSetBuilder};

/// Default include pattern: all HTML and stylesheet files.
pub const DEFAULT_INCLUDE: &str = "**/*.{html,css}";

/// Include/exclude glob pair determining which source identifiers are
/// eligible for emission.
///
/// Standard glob semantics (`*`, `**`, brace lists). Exclude wins over
/// include. An empty include list falls back to [`DEFAULT_INCLUDE`].
#[derive(Debug)]
pub struct MatchRule {
    include: GlobSet,
    exclude: GlobSet,
}

impl MatchRule {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, globset::Error> {
        let include = if include.is_empty() {
            build_set(&[DEFAULT_INCLUDE.to_string()])?
        } else {
            build_set(include)?
        };
        Ok(Self {
            include,
            exclude: build_set(exclude)?,
        })
    }

    /// Check whether a source identifier satisfies the rule.
    ///
    /// Matching tolerates both path separators: identifiers come from
    /// whatever produced them (a Windows build pass hands over
    /// backslashed paths), so `\` is always read as a separator. The
    /// tradeoff is that a Unix filename literally containing `\` is
    /// matched as if it were nested.
    pub fn matches(&self, id: &str) -> bool {
        let id = id.replace('\\', "/");
        self.include.is_match(id.as_str()) && !self.exclude.is_match(id.as_str())
    }
}

fn build_set(patterns: &[String]) -> Result<GlobSet, globset::Error> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    builder.build()
}
