//! Error types shared across the core crate

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to read or write a deck
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("deck file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("deck file {path} is not valid CSV: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("no deck named {0:?}")]
    UnknownDeck(String),
}
