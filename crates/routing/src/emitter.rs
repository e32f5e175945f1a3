//! Emitter - fan-out of one producer's events to N receivers
//!
//! Every event is forwarded to all registered receivers in registration
//! order. The first failure aborts delivery of that event to the remaining
//! receivers and is returned to the producer, which must stop producing.

use ipmap_protocol::{Block, ProducerId};

use crate::{Receiver, Result, SharedReceiver};

#[cfg(test)]
#[path = "emitter_test.rs"]
mod tests;

/// Ordered registry of receivers for a single producer
///
/// # Example
///
/// ```ignore
/// let mut emitter = Emitter::new("aws");
/// emitter.add_receiver(shared(MapFileSink::create("out/ip_to_aws")?));
/// emitter.add_receiver(merge.clone());
///
/// for block in blocks {
///     emitter.emit(block)?;
/// }
/// emitter.done()?;
/// ```
pub struct Emitter {
    /// Identity announced to receivers
    id: ProducerId,

    /// Receivers in registration order
    receivers: Vec<SharedReceiver>,

    /// Blocks emitted so far
    emitted: u64,
}

impl Emitter {
    /// Create an emitter with no receivers
    pub fn new(id: impl Into<ProducerId>) -> Self {
        Self {
            id: id.into(),
            receivers: Vec::new(),
            emitted: 0,
        }
    }

    /// Producer identity
    #[inline]
    pub fn id(&self) -> &ProducerId {
        &self.id
    }

    /// Register a receiver and announce this producer to it
    pub fn add_receiver(&mut self, receiver: SharedReceiver) {
        receiver.lock().subscribed(&self.id);
        self.receivers.push(receiver);
    }

    /// Number of registered receivers
    #[inline]
    pub fn receiver_count(&self) -> usize {
        self.receivers.len()
    }

    /// Number of blocks emitted
    #[inline]
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Deliver a block to every receiver
    ///
    /// Receivers before the last get a clone; the last one takes the block.
    pub fn emit(&mut self, block: Block) -> Result<()> {
        self.emitted += 1;

        let Some((last, rest)) = self.receivers.split_last() else {
            return Ok(());
        };

        for receiver in rest {
            Self::deliver(&self.id, receiver, |r, id| r.receive(id, block.clone()))?;
        }
        Self::deliver(&self.id, last, |r, id| r.receive(id, block))
    }

    /// Signal every receiver that this producer is finished
    pub fn done(&mut self) -> Result<()> {
        for receiver in &self.receivers {
            Self::deliver(&self.id, receiver, |r, id| r.done(id))?;
        }
        Ok(())
    }

    fn deliver<F>(id: &ProducerId, receiver: &SharedReceiver, event: F) -> Result<()>
    where
        F: FnOnce(&mut (dyn Receiver + 'static), &ProducerId) -> Result<()>,
    {
        let mut guard = receiver.lock();
        event(&mut *guard, id).inspect_err(|e| {
            tracing::warn!(
                producer = %id,
                receiver = guard.name(),
                error = %e,
                "receiver failed, halting delivery"
            );
        })
    }
}
