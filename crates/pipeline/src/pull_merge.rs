//! PullMerge - k-way merge over pull-based sources
//!
//! Holds one pending head block per input and hands out the least of them
//! on every pull, so memory stays at one block per input and nothing runs
//! ahead of the slowest source.
//!
//! ```text
//! [Source 0] ─┐
//! [Source 1] ─┼──→ min(head) ──→ next()
//! [Source 2] ─┘
//! ```
//!
//! Inputs must already be sorted; a head that compares below the block
//! its source handed out before fails the merge. Equal heads are taken in
//! input order.

use ipmap_protocol::Block;
use ipmap_sources::{Result, Source, SourceError};

#[cfg(test)]
#[path = "pull_merge_test.rs"]
mod tests;

struct Input {
    source: Box<dyn Source>,
    head: Option<Block>,
}

impl Input {
    /// Replace the head with the source's next block, checking order
    fn advance(&mut self, taken: &Block) -> Result<()> {
        self.head = self.source.next()?;
        if let Some(head) = &self.head
            && head < taken
        {
            return Err(SourceError::unsorted(self.source.name(), taken, head));
        }
        Ok(())
    }
}

/// Sorted source merging several sorted sources
pub struct PullMerge {
    name: String,
    inputs: Vec<Input>,
    primed: bool,
}

impl PullMerge {
    /// Create an empty merge
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: Vec::new(),
            primed: false,
        }
    }

    /// Append an input; ties go to inputs added earlier
    pub fn add_source(&mut self, source: impl Source + 'static) {
        self.inputs.push(Input {
            source: Box::new(source),
            head: None,
        });
    }

    /// Number of inputs
    #[inline]
    pub fn source_count(&self) -> usize {
        self.inputs.len()
    }

    /// Pull the first block of every input
    fn prime(&mut self) -> Result<()> {
        self.primed = true;
        for input in &mut self.inputs {
            input.head = input.source.next()?;
        }
        Ok(())
    }

    /// Index of the input holding the least head
    fn least(&self) -> Option<usize> {
        let mut least: Option<(usize, &Block)> = None;
        for (index, input) in self.inputs.iter().enumerate() {
            let Some(head) = &input.head else {
                continue;
            };
            match least {
                Some((_, current)) if head >= current => {}
                _ => least = Some((index, head)),
            }
        }
        least.map(|(index, _)| index)
    }
}

impl Source for PullMerge {
    fn next(&mut self) -> Result<Option<Block>> {
        if !self.primed {
            self.prime()?;
        }

        let Some(index) = self.least() else {
            return Ok(None);
        };
        let input = &mut self.inputs[index];
        let Some(block) = input.head.take() else {
            return Ok(None);
        };
        input.advance(&block)?;
        Ok(Some(block))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
