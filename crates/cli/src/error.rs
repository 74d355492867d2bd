// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use crate::ingest::IngestError;

/// Sonoview error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found or invalid
    #[error("config error: {0}")]
    Config(String),

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required artifact could not be loaded.
    #[error(transparent)]
    Ingest(#[from] IngestError),
}

/// Result type using sonoview Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    /// An artifact could not be read, or the output could not be written
    ArtifactError = 1,
    /// Configuration or argument error
    ConfigError = 2,
    /// Internal error (bug)
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config(_) | Error::Argument(_) => ExitCode::ConfigError,
            Error::Ingest(_) | Error::Io { .. } => ExitCode::ArtifactError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
