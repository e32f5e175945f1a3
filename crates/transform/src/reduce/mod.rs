//! Reduce - Coalesce contiguous same-label blocks into minimal prefixes
//!
//! Consumes one globally sorted block stream and re-emits, for every
//! maximal contiguous run sharing a label, the smallest set of CIDR
//! prefixes covering exactly that run.
//!
//! # State machine
//!
//! ```text
//!            first block                 same label, contiguous
//!   Idle ──────────────────→ Accumulating ───────────────┐
//!                                 ↑  │                   │ extend span
//!                                 │  └───────────────────┘
//!                                 │
//!        label change / gap: flush span, open a new one from the block
//!        upstream done:      flush span, forward done
//! ```
//!
//! Must run after the merge: a single unsorted input is rejected, never
//! re-sorted.
//!
//! # Example
//!
//! ```ignore
//! let mut reducer = CombiningProcessor::new("reduce:ip_to_asn");
//! reducer.add_receiver(shared(sink));
//!
//! merge.add_receiver(shared(reducer));
//! ```

mod span;

pub use span::Span;

use ipmap_protocol::{Block, ProducerId};
use ipmap_routing::{Emitter, Receiver, Result, RoutingError, SharedReceiver};

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

/// Counters for the reducer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReduceMetrics {
    /// Blocks received from upstream
    pub blocks_received: u64,
    /// Spans closed and decomposed
    pub spans_flushed: u64,
    /// Blocks emitted downstream
    pub blocks_emitted: u64,
}

impl ReduceMetrics {
    /// Get reduction ratio (0.0 - 1.0)
    pub fn reduction_ratio(&self) -> f64 {
        if self.blocks_received == 0 {
            0.0
        } else {
            1.0 - (self.blocks_emitted as f64 / self.blocks_received as f64)
        }
    }
}

#[derive(Debug)]
enum State {
    Idle,
    Accumulating(Span),
}

/// Range-coalescing reducer
pub struct CombiningProcessor {
    state: State,

    /// Last block received, for the ordering check
    previous: Option<Block>,

    /// Whether upstream has signalled done
    finished: bool,

    emitter: Emitter,
    metrics: ReduceMetrics,
}

impl CombiningProcessor {
    /// Create a reducer emitting under `id`
    pub fn new(id: impl Into<ProducerId>) -> Self {
        Self {
            state: State::Idle,
            previous: None,
            finished: false,
            emitter: Emitter::new(id),
            metrics: ReduceMetrics::default(),
        }
    }

    /// Register a downstream receiver
    pub fn add_receiver(&mut self, receiver: SharedReceiver) {
        self.emitter.add_receiver(receiver);
    }

    #[inline]
    pub fn metrics(&self) -> ReduceMetrics {
        self.metrics
    }

    /// Whether a span is open
    #[inline]
    pub fn is_accumulating(&self) -> bool {
        matches!(self.state, State::Accumulating(_))
    }

    /// Close the open span, emitting its prefixes in ascending order
    fn flush(&mut self) -> Result<()> {
        let State::Accumulating(span) = std::mem::replace(&mut self.state, State::Idle) else {
            return Ok(());
        };

        let prefixes = span.decompose()?;
        tracing::trace!(
            first = %span.first(),
            last = %span.last(),
            label = %span.label(),
            prefixes = prefixes.len(),
            "span flushed"
        );

        self.metrics.spans_flushed += 1;
        for prefix in prefixes {
            self.emitter.emit(Block::new(prefix, span.label().clone()))?;
            self.metrics.blocks_emitted += 1;
        }
        Ok(())
    }
}

impl Receiver for CombiningProcessor {
    fn subscribed(&mut self, producer: &ProducerId) {
        tracing::debug!(reducer = %self.emitter.id(), upstream = %producer, "subscribed");
    }

    fn receive(&mut self, producer: &ProducerId, block: Block) -> Result<()> {
        if self.finished {
            return Err(RoutingError::producer_finished(self.emitter.id().as_str(), producer));
        }
        if let Some(previous) = &self.previous
            && block < *previous
        {
            return Err(RoutingError::ordering_violation(
                self.emitter.id().as_str(),
                producer,
                previous,
                &block,
            ));
        }
        self.metrics.blocks_received += 1;

        let absorbed = match &mut self.state {
            State::Accumulating(span) if span.absorbs(&block) => {
                span.extend(&block);
                true
            }
            _ => false,
        };
        if !absorbed {
            self.flush()?;
            self.state = State::Accumulating(Span::open(&block));
        }

        self.previous = Some(block);
        Ok(())
    }

    fn done(&mut self, producer: &ProducerId) -> Result<()> {
        if self.finished {
            return Err(RoutingError::producer_finished(self.emitter.id().as_str(), producer));
        }
        self.flush()?;
        self.finished = true;

        tracing::debug!(
            reducer = %self.emitter.id(),
            received = self.metrics.blocks_received,
            emitted = self.metrics.blocks_emitted,
            spans = self.metrics.spans_flushed,
            "reduce complete"
        );
        self.emitter.done()
    }

    fn name(&self) -> &str {
        self.emitter.id().as_str()
    }
}
