//! Library error type.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported file type: {}", path.display())]
    UnsupportedFileType { path: PathBuf },

    #[error("unknown format: {0}. Use json, markdown, or tool")]
    UnknownFormat(String),

    #[error("failed to serialize output: {0}")]
    Render(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
