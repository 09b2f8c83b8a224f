//! Path resolution helpers.

use std::path::{Path, PathBuf};

/// Resolve `path` against `root` unless it is already absolute.
///
/// Used to anchor config-file paths to the file's own directory.
#[inline]
pub fn resolve_in(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_joins_root() {
        assert_eq!(
            resolve_in(Path::new("/site"), Path::new("src")),
            PathBuf::from("/site/src")
        );
    }

    #[test]
    fn test_absolute_is_kept() {
        assert_eq!(
            resolve_in(Path::new("/site"), Path::new("/elsewhere/src")),
            PathBuf::from("/elsewhere/src")
        );
    }
}
