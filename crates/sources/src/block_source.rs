//! BlockSource - lazily sorted, pull-based view over a `Loadable`
//!
//! The first pull loads the producer exactly once and sorts the result with
//! the block ordering; later pulls hand out one block at a time. A load
//! failure is reported once and leaves the source permanently exhausted.
//! Re-fetching requires a new `BlockSource`.

use std::vec;

use ipmap_protocol::Block;

use crate::{Loadable, Result};

#[cfg(test)]
#[path = "block_source_test.rs"]
mod tests;

/// Pull-based producer of blocks in ascending block order
pub trait Source: Send {
    /// Next block, or `None` once exhausted
    fn next(&mut self) -> Result<Option<Block>>;

    /// Name of this source for logging
    fn name(&self) -> &str;
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn next(&mut self) -> Result<Option<Block>> {
        (**self).next()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

enum State {
    /// Not loaded yet
    Pending,
    /// Serving sorted blocks
    Loaded(vec::IntoIter<Block>),
    /// Drained, or the load failed
    Exhausted,
}

/// Adapter turning an unordered `Loadable` into a sorted `Source`
pub struct BlockSource<L> {
    loadable: L,
    ipv4_only: bool,
    state: State,
}

impl<L: Loadable> BlockSource<L> {
    /// Wrap `loadable`; nothing is loaded until the first pull
    pub fn new(loadable: L, ipv4_only: bool) -> Self {
        Self {
            loadable,
            ipv4_only,
            state: State::Pending,
        }
    }

    /// Whether the producer has been loaded (successfully or not)
    #[inline]
    pub fn is_loaded(&self) -> bool {
        !matches!(self.state, State::Pending)
    }

    #[inline]
    pub fn ipv4_only(&self) -> bool {
        self.ipv4_only
    }

    fn load(&mut self) -> Result<()> {
        // Marked exhausted first so a failed load is never retried.
        self.state = State::Exhausted;

        let mut blocks = self.loadable.load(self.ipv4_only)?;
        blocks.sort();

        tracing::debug!(
            source = self.loadable.name(),
            blocks = blocks.len(),
            ipv4_only = self.ipv4_only,
            "source loaded"
        );

        self.state = State::Loaded(blocks.into_iter());
        Ok(())
    }
}

impl<L: Loadable> Source for BlockSource<L> {
    fn next(&mut self) -> Result<Option<Block>> {
        if matches!(self.state, State::Pending) {
            self.load()?;
        }

        match &mut self.state {
            State::Loaded(blocks) => match blocks.next() {
                Some(block) => Ok(Some(block)),
                None => {
                    self.state = State::Exhausted;
                    Ok(None)
                }
            },
            State::Pending | State::Exhausted => Ok(None),
        }
    }

    fn name(&self) -> &str {
        self.loadable.name()
    }
}
