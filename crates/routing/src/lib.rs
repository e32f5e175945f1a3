//! ipmap Routing - Fan-out delivery of block streams
//!
//! A producer owns an [`Emitter`]; everything downstream of it implements
//! [`Receiver`]. The emitter forwards each event to its receivers in
//! registration order and stops at the first failure.
//!
//! # Design
//!
//! - **Three-phase contract**: `subscribed` → `receive`* → `done`, per producer
//! - **Sequential delivery**: no internal parallelism, no queues in between
//! - **Shared receivers**: a receiver may be registered with many emitters
//!   (a merge stage subscribes to every origin feeding it)
//!
//! # Example
//!
//! ```ignore
//! use ipmap_routing::{Emitter, shared};
//!
//! let mut emitter = Emitter::new("aws");
//! emitter.add_receiver(shared(sink));
//! emitter.emit(block)?;
//! emitter.done()?;
//! ```

mod emitter;
mod error;
mod receiver;

pub use emitter::Emitter;
pub use error::{Result, RoutingError};
pub use receiver::{Receiver, SharedReceiver, shared};

// Re-export core types for convenience
pub use ipmap_protocol::{Block, ProducerId};
