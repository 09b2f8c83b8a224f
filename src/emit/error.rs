//! Emission error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::transform::TransformError;

/// Typed failure from a single emission operation.
///
/// Each variant carries the path involved so a driver can aggregate and
/// report failures instead of only printing them.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to create output directory `{0}`")]
    CreateDir(PathBuf, #[source] std::io::Error),

    #[error("failed to read `{0}`")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("failed to write `{0}`")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("transform failed for `{0}`")]
    Transform(String, #[source] TransformError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_display_names_the_path() {
        let err = EmitError::Write(
            PathBuf::from("public/app.css"),
            Error::new(ErrorKind::PermissionDenied, "permission denied"),
        );
        assert!(format!("{err}").contains("public/app.css"));
    }
}
