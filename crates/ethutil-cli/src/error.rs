//! CLI error types

use std::path::PathBuf;

use ethutil_abi::AbiError;
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid hex string
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Codec error
    #[error(transparent)]
    Abi(#[from] AbiError),

    /// File could not be read
    #[error("Cannot read {}: {source}", .path.display())]
    ReadFile {
        /// Path as given
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config error
    #[error("Config error: {0}")]
    Config(String),
}
