//! Sink error types
//!
//! Failures while opening an output. Failures while writing surface as
//! `RoutingError::SinkFailed` through the receiver contract.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for sink setup
pub type Result<T> = std::result::Result<T, SinkError>;

/// Errors raised while opening a sink
#[derive(Debug, Error)]
pub enum SinkError {
    /// Output directory could not be created
    #[error("failed to create directory '{}': {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Temporary output file could not be created
    #[error("failed to create '{}': {source}", path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
