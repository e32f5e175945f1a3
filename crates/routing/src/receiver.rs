//! Receiver - the consumer side of a block stream
//!
//! Per producer, a receiver sees events in strict order:
//!
//! ```text
//! subscribed(p) → receive(p, block)* → done(p)
//! ```
//!
//! `subscribed` is called once at registration, `receive` zero or more
//! times in the producer's emission order, and `done` exactly once after
//! the last block.

use std::sync::Arc;

use ipmap_protocol::{Block, ProducerId};
use parking_lot::Mutex;

use crate::Result;

/// Consumer of one or more block streams
///
/// Implementors must be `Send` so a pipeline can run on a worker thread.
/// Delivery within one pipeline is sequential: a receiver is never called
/// concurrently.
pub trait Receiver: Send {
    /// Called once when registered with a producer's emitter
    fn subscribed(&mut self, producer: &ProducerId);

    /// Take ownership of the next block from `producer`
    ///
    /// Returning an error halts the producer.
    fn receive(&mut self, producer: &ProducerId, block: Block) -> Result<()>;

    /// `producer` has emitted its last block
    fn done(&mut self, producer: &ProducerId) -> Result<()>;

    /// Name of this receiver for logging
    fn name(&self) -> &str;
}

/// A receiver registered with one or more emitters
///
/// Sharing lets a single merge stage subscribe to several origins, and one
/// origin fan out to several maps.
pub type SharedReceiver = Arc<Mutex<dyn Receiver>>;

/// Wrap a receiver for registration with emitters
pub fn shared<R: Receiver + 'static>(receiver: R) -> SharedReceiver {
    Arc::new(Mutex::new(receiver))
}
