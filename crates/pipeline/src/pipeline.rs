//! Pipeline - assembly and execution of one map build
//!
//! A pipeline owns its sources and wires them, on `run`, into one of two
//! shapes:
//!
//! ```text
//! Pull:  [Source]* ──→ PullMerge ──→ Origin ──→ [Reduce] ──→ Sink
//!
//! Push:  [Source] ──→ Origin ──┬──→ MergingProcessor ──→ [Reduce] ──→ Sink
//!                              └──→ Tap (per-source output)
//! ```
//!
//! Stages run sequentially on the calling thread. Separate pipelines share
//! nothing and can run concurrently.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use ipmap_protocol::ProducerId;
use ipmap_routing::SharedReceiver;
use ipmap_sources::Source;
use ipmap_transform::CombiningProcessor;
use parking_lot::Mutex;

use crate::{MergingProcessor, Origin, PipelineError, PullMerge, Result};

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;

/// How a pipeline merges its sources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeMode {
    /// Pull-based k-way merge, self-throttling
    #[default]
    Pull,
    /// Push-based merge over one origin per source; supports taps
    Push,
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pull => write!(f, "pull"),
            Self::Push => write!(f, "push"),
        }
    }
}

/// Counts from a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    pub name: String,
    /// Blocks produced by all sources
    pub blocks_in: u64,
    /// Blocks delivered to the sink
    pub blocks_out: u64,
}

struct Input {
    id: ProducerId,
    source: Box<dyn Source>,
    taps: Vec<SharedReceiver>,
}

/// One merge (+ optional reduce) from many sources into one sink
pub struct Pipeline {
    name: String,
    mode: MergeMode,
    reduce: bool,
    inputs: Vec<Input>,
}

impl Pipeline {
    /// Create an empty pipeline; reduce is on by default
    pub fn new(name: impl Into<String>, mode: MergeMode) -> Self {
        Self {
            name: name.into(),
            mode,
            reduce: true,
            inputs: Vec::new(),
        }
    }

    /// Enable or disable the reduce stage
    pub fn with_reduce(mut self, reduce: bool) -> Self {
        self.reduce = reduce;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn mode(&self) -> MergeMode {
        self.mode
    }

    #[inline]
    pub fn source_count(&self) -> usize {
        self.inputs.len()
    }

    /// Add a source; merge ties go to sources added earlier
    pub fn add_source(
        &mut self,
        id: impl Into<ProducerId>,
        source: impl Source + 'static,
    ) -> Result<()> {
        let id = id.into();
        if self.inputs.iter().any(|input| input.id == id) {
            return Err(PipelineError::DuplicateSource {
                pipeline: self.name.clone(),
                source_id: id,
            });
        }
        self.inputs.push(Input {
            id,
            source: Box::new(source),
            taps: Vec::new(),
        });
        Ok(())
    }

    /// Also deliver one source's own stream to `receiver` (push mode only)
    pub fn add_tap(&mut self, source: impl Into<ProducerId>, receiver: SharedReceiver) -> Result<()> {
        if self.mode != MergeMode::Push {
            return Err(PipelineError::TapInPullMode(self.name.clone()));
        }

        let source = source.into();
        match self.inputs.iter_mut().find(|input| input.id == source) {
            Some(input) => {
                input.taps.push(receiver);
                Ok(())
            }
            None => Err(PipelineError::UnknownTapSource {
                pipeline: self.name.clone(),
                source_id: source,
            }),
        }
    }

    /// Run every source to completion into `sink`
    ///
    /// On failure the sink never sees done.
    pub fn run(self, sink: SharedReceiver) -> Result<PipelineSummary> {
        let Self {
            name,
            mode,
            reduce,
            inputs,
        } = self;
        if inputs.is_empty() {
            return Err(PipelineError::NoSources(name));
        }

        let started = Instant::now();
        let sources = inputs.len();

        let (head, reducer) = if reduce {
            let reducer = Arc::new(Mutex::new(CombiningProcessor::new(format!("{name}:reduce"))));
            reducer.lock().add_receiver(sink);
            let head: SharedReceiver = reducer.clone();
            (head, Some(reducer))
        } else {
            (sink, None)
        };

        let blocks_in = match mode {
            MergeMode::Pull => run_pull(&name, inputs, head)?,
            MergeMode::Push => run_push(&name, inputs, head)?,
        };
        let blocks_out = match reducer {
            Some(reducer) => reducer.lock().metrics().blocks_emitted,
            None => blocks_in,
        };

        tracing::info!(
            pipeline = %name,
            mode = %mode,
            sources,
            blocks_in,
            blocks_out,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "pipeline complete"
        );

        Ok(PipelineSummary {
            name,
            blocks_in,
            blocks_out,
        })
    }
}

/// Merge by pulling, then push the single merged stream downstream
fn run_pull(name: &str, inputs: Vec<Input>, head: SharedReceiver) -> Result<u64> {
    let mut merge = PullMerge::new(format!("{name}:merge"));
    for input in inputs {
        merge.add_source(input.source);
    }

    let mut origin = Origin::new(name, merge);
    origin.add_receiver(head);
    origin.run()
}

/// One origin per source, all feeding a push merge
///
/// Every origin subscribes before any of them runs, so the merge knows
/// all its producers before the first block arrives.
fn run_push(name: &str, inputs: Vec<Input>, head: SharedReceiver) -> Result<u64> {
    let merge = Arc::new(Mutex::new(MergingProcessor::new(format!("{name}:merge"))));
    merge.lock().add_receiver(head);

    let mut origins = Vec::with_capacity(inputs.len());
    for input in inputs {
        let mut origin = Origin::new(input.id, input.source);
        for tap in input.taps {
            origin.add_receiver(tap);
        }
        origin.add_receiver(merge.clone());
        origins.push(origin);
    }

    let mut blocks_in = 0;
    for origin in &mut origins {
        blocks_in += origin.run()?;
    }
    Ok(blocks_in)
}
