//! Pipeline error types
//!
//! Everything that can fail a pipeline run. Source and delivery failures
//! are wrapped unchanged; assembly mistakes get their own variants.

use ipmap_protocol::ProducerId;
use ipmap_routing::RoutingError;
use ipmap_sources::SourceError;
use thiserror::Error;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A source failed to load or was malformed
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A receiver failed or the stream broke its contract
    #[error(transparent)]
    Routing(#[from] RoutingError),

    /// Pipeline has nothing to merge
    #[error("pipeline '{0}' has no sources")]
    NoSources(String),

    /// Two sources registered under the same producer id
    #[error("pipeline '{pipeline}': duplicate source '{source_id}'")]
    DuplicateSource {
        /// Pipeline name
        pipeline: String,
        /// Repeated id
        source_id: ProducerId,
    },

    /// Taps need per-source origins, which only push mode has
    #[error("pipeline '{0}': taps require push merge")]
    TapInPullMode(String),

    /// Tap registered for a source the pipeline does not have
    #[error("pipeline '{pipeline}': tap for unknown source '{source_id}'")]
    UnknownTapSource {
        /// Pipeline name
        pipeline: String,
        /// Requested source id
        source_id: ProducerId,
    },
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
