use std::path::PathBuf;

use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Root path does not exist or is not a directory.
    #[error("Invalid root directory: {0}")]
    InvalidRoot(PathBuf),

    /// A directory operation was attempted on a non-directory entry.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}
