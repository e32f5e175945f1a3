//! ipmap Transform - In-flight reshaping of sorted block streams
//!
//! # Overview
//!
//! Stages here sit between a merge and a sink. They consume one globally
//! sorted stream and re-emit an equivalent, smaller one.
//!
//! # Architecture
//!
//! ```text
//! [Merge] → [CombiningProcessor] → [Sink]
//! ```
//!
//! # Design Principles
//!
//! - **Streaming**: at most one open span is held in memory
//! - **Fail loud**: out-of-order input is an error, never silently re-sorted
//! - **Lossless**: the set of (address, label) pairs covered is preserved

pub mod reduce;

pub use reduce::{CombiningProcessor, ReduceMetrics, Span};
