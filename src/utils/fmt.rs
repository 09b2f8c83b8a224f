//! Small formatting helpers for log output.

/// Format a count with its noun, pluralizing with a plain "s".
///
/// `count_noun(1, "asset")` -> `"1 asset"`, `count_noun(3, "asset")`
/// -> `"3 assets"`. Nouns with irregular plurals are not this tool's
/// problem.
pub fn count_noun(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
