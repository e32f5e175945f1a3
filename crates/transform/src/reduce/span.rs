//! Span - the open run of a coalescing reducer
//!
//! Accumulates one contiguous, same-label address run until it can be
//! re-decomposed into minimal prefixes.

use std::net::IpAddr;

use ipmap_protocol::range::{decompose_range, successor_checked};
use ipmap_protocol::{Block, IpNetwork, Label, Result};

#[cfg(test)]
#[path = "span_test.rs"]
mod tests;

/// Inclusive `[first, last]` range carrying one label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    first: IpAddr,
    last: IpAddr,
    label: Label,
}

impl Span {
    /// Open a span covering exactly `block`
    pub fn open(block: &Block) -> Self {
        Self {
            first: block.first(),
            last: block.last(),
            label: block.label().clone(),
        }
    }

    /// Whether `block` continues this span
    ///
    /// The label must match and the block must start inside the span or at
    /// the address right after it. Nothing continues a span that already
    /// reaches the top of its address space.
    pub fn absorbs(&self, block: &Block) -> bool {
        if block.label() != &self.label {
            return false;
        }

        let start = block.first();
        if start >= self.first && start <= self.last {
            return true;
        }
        successor_checked(self.last) == Some(start)
    }

    /// Grow the span to cover `block`
    pub fn extend(&mut self, block: &Block) {
        let end = block.last();
        if end > self.last {
            self.last = end;
        }
    }

    /// Minimal ascending prefixes covering the span
    pub fn decompose(&self) -> Result<Vec<IpNetwork>> {
        decompose_range(self.first, self.last)
    }

    #[inline]
    pub fn first(&self) -> IpAddr {
        self.first
    }

    #[inline]
    pub fn last(&self) -> IpAddr {
        self.last
    }

    #[inline]
    pub fn label(&self) -> &Label {
        &self.label
    }
}
