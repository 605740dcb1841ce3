use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("directory '{}' not found", .0.display())]
    NotFound(PathBuf),
    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("no files found in '{}' ({skipped} skipped)", root.display())]
    EmptyProject { root: PathBuf, skipped: usize },
    #[error("'{}' is outside the project root '{}'", path.display(), root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("walk error at '{path}': {message}")]
    Walk { path: String, message: String },
    #[error("invalid exclude pattern: {0}")]
    InvalidPattern(String),
    #[error("encoding cancelled")]
    Cancelled,
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
impl EncodeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EncodeError::Io {
            path: path.into(),
            source,
        }
    }
    pub(crate) fn file_read(path: impl Into<String>, source: std::io::Error) -> Self {
        EncodeError::FileRead {
            path: path.into(),
            source,
        }
    }
    /// Errors caused by what the caller asked for rather than by an I/O fault.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            EncodeError::NotFound(_)
                | EncodeError::NotADirectory(_)
                | EncodeError::EmptyProject { .. }
                | EncodeError::InvalidPattern(_)
        )
    }
}
