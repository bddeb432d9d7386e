use std::io;

use thiserror::Error;

/// Errors raised by the storage-facing parts of the core.
#[derive(Debug, Error)]
pub enum Error {
    #[error("storage error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported backup format version {0}")]
    UnsupportedBackup(u32),
}

pub type Result<T> = std::result::Result<T, Error>;
