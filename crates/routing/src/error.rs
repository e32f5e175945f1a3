//! Routing error types
//!
//! Failures raised while delivering block events to receivers. Any of
//! these returned from a receiver halts the emitting producer.

use std::io;

use ipmap_protocol::{ProducerId, ProtocolError};
use thiserror::Error;

/// Result type for delivery operations
pub type Result<T> = std::result::Result<T, RoutingError>;

/// Errors that can occur while delivering blocks
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Blocks arrived out of the declared sort order
    #[error("{stage}: block {current} from '{producer}' arrived after {previous}")]
    OrderingViolation {
        /// Stage that detected the violation
        stage: String,
        /// Producer that sent the block
        producer: ProducerId,
        /// Previously accepted block
        previous: String,
        /// Offending block
        current: String,
    },

    /// Event from a producer that never subscribed
    #[error("{stage}: unknown producer '{producer}'")]
    UnknownProducer {
        /// Stage that received the event
        stage: String,
        /// The unknown producer
        producer: ProducerId,
    },

    /// Event from a producer that already signalled done
    #[error("{stage}: producer '{producer}' already finished")]
    ProducerFinished {
        /// Stage that received the event
        stage: String,
        /// The finished producer
        producer: ProducerId,
    },

    /// A sink failed to persist output
    #[error("sink '{sink}' failed: {source}")]
    SinkFailed {
        /// Name of the sink
        sink: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Range algebra failed while re-emitting blocks
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl RoutingError {
    /// Create an OrderingViolation error
    pub fn ordering_violation(
        stage: impl Into<String>,
        producer: &ProducerId,
        previous: impl ToString,
        current: impl ToString,
    ) -> Self {
        Self::OrderingViolation {
            stage: stage.into(),
            producer: producer.clone(),
            previous: previous.to_string(),
            current: current.to_string(),
        }
    }

    /// Create an UnknownProducer error
    #[inline]
    pub fn unknown_producer(stage: impl Into<String>, producer: &ProducerId) -> Self {
        Self::UnknownProducer {
            stage: stage.into(),
            producer: producer.clone(),
        }
    }

    /// Create a ProducerFinished error
    #[inline]
    pub fn producer_finished(stage: impl Into<String>, producer: &ProducerId) -> Self {
        Self::ProducerFinished {
            stage: stage.into(),
            producer: producer.clone(),
        }
    }

    /// Create a SinkFailed error
    #[inline]
    pub fn sink_failed(sink: impl Into<String>, source: io::Error) -> Self {
        Self::SinkFailed {
            sink: sink.into(),
            source,
        }
    }
}
