//! MergingProcessor - push-based k-way merge
//!
//! Subscribes to N upstream producers and re-emits their blocks as one
//! globally sorted stream. Each producer gets its own FIFO queue and a
//! finished flag; after every event the merge drains:
//!
//! ```text
//! loop {
//!     any unfinished producer with an empty queue → pause
//!     all queues empty, all producers finished    → done downstream
//!     otherwise                                   → pop + emit least head
//! }
//! ```
//!
//! A fast producer may buffer arbitrarily far ahead of a slow one; the
//! merge applies no back-pressure. Equal heads go to the producer that
//! subscribed first.

use std::collections::VecDeque;

use ipmap_protocol::{Block, ProducerId};
use ipmap_routing::{Emitter, Receiver, Result, RoutingError, SharedReceiver};

#[cfg(test)]
#[path = "merge_test.rs"]
mod tests;

/// Per-producer buffer
struct Queue {
    producer: ProducerId,
    blocks: VecDeque<Block>,
    /// Last block accepted from this producer, for the ordering check
    last: Option<Block>,
    finished: bool,
}

/// Push-mode k-way merge
pub struct MergingProcessor {
    /// Queues in subscription order
    queues: Vec<Queue>,
    emitter: Emitter,
    /// Done has been sent downstream
    finished: bool,
}

impl MergingProcessor {
    /// Create a merge emitting under `id`
    pub fn new(id: impl Into<ProducerId>) -> Self {
        Self {
            queues: Vec::new(),
            emitter: Emitter::new(id),
            finished: false,
        }
    }

    /// Register a downstream receiver
    pub fn add_receiver(&mut self, receiver: SharedReceiver) {
        self.emitter.add_receiver(receiver);
    }

    /// Number of subscribed producers
    #[inline]
    pub fn producer_count(&self) -> usize {
        self.queues.len()
    }

    /// Blocks currently buffered across all queues
    pub fn buffered(&self) -> usize {
        self.queues.iter().map(|q| q.blocks.len()).sum()
    }

    /// Blocks emitted downstream
    #[inline]
    pub fn emitted(&self) -> u64 {
        self.emitter.emitted()
    }

    fn queue_mut(&mut self, producer: &ProducerId) -> Result<&mut Queue> {
        let stage = self.emitter.id().as_str();
        match self.queues.iter_mut().find(|q| &q.producer == producer) {
            Some(queue) if queue.finished => Err(RoutingError::producer_finished(stage, producer)),
            Some(queue) => Ok(queue),
            None => Err(RoutingError::unknown_producer(stage, producer)),
        }
    }

    /// Index of the queue holding the least head, or `None` to pause
    fn next_queue(&self) -> Option<usize> {
        let mut least: Option<(usize, &Block)> = None;
        for (index, queue) in self.queues.iter().enumerate() {
            match queue.blocks.front() {
                None if queue.finished => continue,
                // Cannot know what this producer sends next
                None => return None,
                Some(head) => match least {
                    Some((_, current)) if head >= current => {}
                    _ => least = Some((index, head)),
                },
            }
        }
        least.map(|(index, _)| index)
    }

    fn drain(&mut self) -> Result<()> {
        while let Some(index) = self.next_queue() {
            let Some(block) = self.queues[index].blocks.pop_front() else {
                break;
            };
            self.emitter.emit(block)?;
        }

        let complete = self.queues.iter().all(|q| q.finished && q.blocks.is_empty());
        if complete && !self.finished {
            self.finished = true;
            tracing::debug!(
                merge = %self.emitter.id(),
                producers = self.queues.len(),
                blocks = self.emitter.emitted(),
                "merge complete"
            );
            self.emitter.done()?;
        }
        Ok(())
    }
}

impl Receiver for MergingProcessor {
    fn subscribed(&mut self, producer: &ProducerId) {
        if self.queues.iter().any(|q| &q.producer == producer) {
            tracing::warn!(merge = %self.emitter.id(), producer = %producer, "producer subscribed twice");
            return;
        }
        self.queues.push(Queue {
            producer: producer.clone(),
            blocks: VecDeque::new(),
            last: None,
            finished: false,
        });
    }

    fn receive(&mut self, producer: &ProducerId, block: Block) -> Result<()> {
        let stage = self.emitter.id().as_str().to_owned();
        let queue = self.queue_mut(producer)?;
        if let Some(last) = &queue.last
            && block < *last
        {
            return Err(RoutingError::ordering_violation(stage, producer, last, &block));
        }

        queue.last = Some(block.clone());
        queue.blocks.push_back(block);
        self.drain()
    }

    fn done(&mut self, producer: &ProducerId) -> Result<()> {
        self.queue_mut(producer)?.finished = true;
        self.drain()
    }

    fn name(&self) -> &str {
        self.emitter.id().as_str()
    }
}
