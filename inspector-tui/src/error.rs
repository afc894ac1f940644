//! Errors that end the program.

use std::io;
use std::path::PathBuf;

use inspector_lib::error::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to read {path}: {source}")]
    ReadSnapshot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
