//! Loadable - the producer capability every origin satisfies
//!
//! An origin (cloud vendor list, geo database, block list, ...) only has to
//! hand back an unordered collection of blocks. Sorting and sequential
//! delivery are the `BlockSource` adapter's job.

use ipmap_protocol::Block;

use crate::Result;

/// Producer of an unordered collection of blocks
pub trait Loadable: Send {
    /// Fetch/parse every block
    ///
    /// With `ipv4_only` set, IPv6 blocks must be left out.
    fn load(&mut self, ipv4_only: bool) -> Result<Vec<Block>>;

    /// Name of this producer for logging
    fn name(&self) -> &str;
}

impl<L: Loadable + ?Sized> Loadable for Box<L> {
    fn load(&mut self, ipv4_only: bool) -> Result<Vec<Block>> {
        (**self).load(ipv4_only)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Blocks held in memory
#[derive(Debug, Clone)]
pub struct StaticLoadable {
    name: String,
    blocks: Vec<Block>,
}

impl StaticLoadable {
    /// Create a loadable over `blocks`
    pub fn new(name: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            name: name.into(),
            blocks,
        }
    }
}

impl Loadable for StaticLoadable {
    fn load(&mut self, ipv4_only: bool) -> Result<Vec<Block>> {
        let mut blocks = std::mem::take(&mut self.blocks);
        if ipv4_only {
            blocks.retain(Block::is_ipv4);
        }
        Ok(blocks)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
