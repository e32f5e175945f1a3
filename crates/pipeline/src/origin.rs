//! Origin - drives a pull-based source into a push-based emitter
//!
//! An origin is how a producer takes part in push mode: it drains its
//! source block by block into its emitter, then signals done. One origin
//! can feed its own per-source output and a shared merge at once.

use ipmap_protocol::ProducerId;
use ipmap_routing::{Emitter, SharedReceiver};
use ipmap_sources::Source;

use crate::Result;

#[cfg(test)]
#[path = "origin_test.rs"]
mod tests;

/// Producer that pushes a source's blocks to its receivers
pub struct Origin<S> {
    source: S,
    emitter: Emitter,
}

impl<S: Source> Origin<S> {
    /// Create an origin emitting `source` under `id`
    pub fn new(id: impl Into<ProducerId>, source: S) -> Self {
        Self {
            source,
            emitter: Emitter::new(id),
        }
    }

    #[inline]
    pub fn id(&self) -> &ProducerId {
        self.emitter.id()
    }

    /// Register a receiver; it is announced this origin immediately
    pub fn add_receiver(&mut self, receiver: SharedReceiver) {
        self.emitter.add_receiver(receiver);
    }

    /// Emit every block of the source, then done
    ///
    /// Returns the number of blocks emitted. A failing source or receiver
    /// stops the origin without signalling done.
    pub fn run(&mut self) -> Result<u64> {
        while let Some(block) = self.source.next()? {
            self.emitter.emit(block)?;
        }
        self.emitter.done()?;

        tracing::debug!(
            origin = %self.emitter.id(),
            source = self.source.name(),
            blocks = self.emitter.emitted(),
            "origin finished"
        );
        Ok(self.emitter.emitted())
    }
}
