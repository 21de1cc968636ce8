// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a control file
///
/// Parsing itself never fails: unknown lines are skipped and missing fields
/// default to empty strings. Only getting the bytes off disk can go wrong.
#[derive(Error, Debug)]
pub enum Error {
    /// The control file could not be opened
    #[error("Control file unavailable at {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure while reading the control file
    #[error("Failed to read control file: {0}")]
    ScanRead(#[from] std::io::Error),

    /// Compressed input whose stream could not be decoded
    #[error("Failed to decompress {format} control file: {source}")]
    Decompress {
        format: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using the catalog's Error type
pub type Result<T> = std::result::Result<T, Error>;
