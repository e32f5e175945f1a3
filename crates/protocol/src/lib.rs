//! ipmap Protocol - Core values for address-range pipelines
//!
//! This crate provides the foundational types that flow through the pipeline:
//! - `Block` - an immutable (CIDR prefix, label) pair with a total ordering
//! - `Label` - shared, cheaply cloneable label text
//! - `ProducerId` - identifies the origin of a block stream
//! - `range` - big-endian address arithmetic and minimal CIDR decomposition
//!
//! # Design Principles
//!
//! - **Two widths**: IPv4 and IPv6 are handled by the same algorithms over
//!   their native byte widths; the families only meet in the block ordering
//! - **Immutable values**: blocks are handed between stages, never mutated
//! - **Cheap fan-out**: cloning a block copies a prefix and bumps a refcount

mod block;
mod error;
mod label;
mod producer;
pub mod range;

pub use block::Block;
pub use error::ProtocolError;
pub use label::Label;
pub use producer::ProducerId;

// Re-export the prefix type for convenience
pub use ipnetwork::IpNetwork;

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

// Test modules - only compiled during testing
#[cfg(test)]
mod block_test;
