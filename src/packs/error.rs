//! Pack loading errors.
//!
//! Every per-file error carries the path of the offending file so load
//! diagnostics can name it.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while discovering, reading, or parsing packs.
#[derive(Debug, Error)]
pub enum PackError {
    /// Reading a pack file or the content root failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A pack file is not a valid pack document.
    #[error("failed to parse pack at {path}: {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The content root can't be turned into a search pattern.
    #[error("pack directory {path} is not valid UTF-8")]
    NonUtf8Root { path: PathBuf },

    /// A pack document without file context is invalid.
    #[error("invalid pack document: {0}")]
    Json(#[from] serde_json::Error),

    /// The discovery pattern built from the content root is invalid.
    #[error("invalid pack search pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A directory entry could not be inspected during discovery.
    #[error("failed to walk {}: {}", .0.path().display(), .0.error())]
    Walk(#[from] glob::GlobError),
}

impl PackError {
    /// The file this error is about, if known.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            PackError::Io { path, .. }
            | PackError::JsonParse { path, .. }
            | PackError::NonUtf8Root { path } => Some(path),
            PackError::Walk(e) => Some(e.path()),
            PackError::Json(_) | PackError::Pattern(_) => None,
        }
    }
}

/// Result type alias for pack operations.
pub type PackResult<T> = Result<T, PackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_file() {
        let err = PackError::Io {
            path: PathBuf::from("packs/base.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied"),
        };
        let msg = format!("{err}");
        assert!(msg.contains("packs/base.json"));
        assert!(msg.contains("access denied"));
        assert_eq!(err.path(), Some(std::path::Path::new("packs/base.json")));
    }

    #[test]
    fn test_json_parse_names_file() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = PackError::JsonParse {
            path: PathBuf::from("packs/broken.json"),
            source,
        };
        assert!(format!("{err}").contains("packs/broken.json"));
    }

    #[test]
    fn test_json_from_conversion_has_no_path() {
        let source = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let err = PackError::from(source);
        assert!(err.path().is_none());
        assert!(format!("{err}").starts_with("invalid pack document"));
    }

    #[test]
    fn test_non_utf8_root_names_path() {
        let err = PackError::NonUtf8Root {
            path: PathBuf::from("packs"),
        };
        assert!(format!("{err}").contains("not valid UTF-8"));
        assert_eq!(err.path(), Some(std::path::Path::new("packs")));
    }

    #[test]
    fn test_pattern_error_from_conversion() {
        let source = glob::Pattern::new("[").unwrap_err();
        let err = PackError::from(source);
        assert!(format!("{err}").contains("pattern"));
    }
}
