//! Source error types

use std::io;

use ipmap_protocol::ProtocolError;
use thiserror::Error;

/// Result type for source operations
pub type Result<T> = std::result::Result<T, SourceError>;

/// Errors raised while loading blocks from a producer
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to read the producer's input
    #[error("failed to read '{path}' for source '{origin}': {source}")]
    Io {
        /// Source name
        origin: String,
        /// Input path
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// A line contained an unparseable address or prefix
    #[error("source '{origin}' line {line}: {source}")]
    Malformed {
        /// Source name
        origin: String,
        /// 1-based line number
        line: usize,
        /// Parse failure
        #[source]
        source: ProtocolError,
    },

    /// A source handed out blocks out of the block ordering
    #[error("source '{origin}' is not sorted: {current} after {previous}")]
    Unsorted {
        /// Source name
        origin: String,
        /// Block handed out before
        previous: String,
        /// Offending block
        current: String,
    },

    /// A producer failed for its own reasons
    #[error("source '{origin}' failed to load: {message}")]
    Load {
        /// Source name
        origin: String,
        /// Failure description
        message: String,
    },
}

impl SourceError {
    /// Create an Io error
    pub fn io(origin: impl Into<String>, path: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            origin: origin.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a Malformed error
    pub fn malformed(origin: impl Into<String>, line: usize, source: ProtocolError) -> Self {
        Self::Malformed {
            origin: origin.into(),
            line,
            source,
        }
    }

    /// Create an Unsorted error
    pub fn unsorted(origin: impl Into<String>, previous: impl ToString, current: impl ToString) -> Self {
        Self::Unsorted {
            origin: origin.into(),
            previous: previous.to_string(),
            current: current.to_string(),
        }
    }

    /// Create a Load error
    pub fn load(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Load {
            origin: origin.into(),
            message: message.into(),
        }
    }
}
