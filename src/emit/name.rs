//! Output name derivation from source identifiers.

/// Base name and extension derived from a source identifier.
///
/// Derivation is purely textual and deterministic: the emitted artifact
/// name never depends on filesystem state. `src/styles/app.css` yields
/// base `app` and ext `css`; distinct sources with the same final
/// segment therefore map to the same output name and overwrite each
/// other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedName {
    /// Final path segment with its extension removed.
    pub base: String,
    /// Final dot-segment ('' when the segment has no extension).
    pub ext: String,
}

impl DerivedName {
    /// Derive from a path-like identifier. Both separators accepted.
    pub fn from_id(id: &str) -> Self {
        let segment = id.rsplit(['/', '\\']).next().unwrap_or(id);
        match segment.rsplit_once('.') {
            Some((base, ext)) if !base.is_empty() => Self {
                base: base.to_string(),
                ext: ext.to_string(),
            },
            _ => Self {
                base: segment.to_string(),
                ext: String::new(),
            },
        }
    }

    /// Emitted file name: `<base>.<ext>`, or the bare base without one.
    pub fn file_name(&self) -> String {
        if self.ext.is_empty() {
            self.base.clone()
        } else {
            format!("{}.{}", self.base, self.ext)
        }
    }

    /// Sidecar map file name: `<file_name>.map`.
    pub fn map_name(&self) -> String {
        format!("{}.map", self.file_name())
    }

    /// Whether the extension names a stylesheet.
    pub fn is_stylesheet(&self) -> bool {
        self.ext.eq_ignore_ascii_case("css")
    }
}
