//! ipmap Pipeline - Merging many sorted block streams into one map
//!
//! # Architecture
//!
//! ```text
//! [Loadable] → BlockSource ─┐
//! [Loadable] → BlockSource ─┼─→ k-way merge ─→ CombiningProcessor ─→ Sink
//! [Loadable] → BlockSource ─┘   (pull | push)       (optional)
//! ```
//!
//! # Key Design
//!
//! - **Two merges**: [`PullMerge`] pulls the least head across N sources;
//!   [`MergingProcessor`] is a receiver buffering one FIFO per producer
//! - **O(producers) state**: the pull merge holds one block per input
//! - **Fail loud**: out-of-order input fails the pipeline, it is never
//!   re-sorted
//! - **No shared state**: every [`Pipeline`] owns its sources and sink
//!
//! # Example
//!
//! ```ignore
//! use ipmap_pipeline::{MergeMode, Pipeline};
//! use ipmap_sources::{BlockSource, MapFileLoadable};
//!
//! let mut pipeline = Pipeline::new("ip_to_provider", MergeMode::Push);
//! pipeline.add_source("aws", BlockSource::new(MapFileLoadable::new("aws", "maps/aws"), false))?;
//! pipeline.add_source("gcp", BlockSource::new(MapFileLoadable::new("gcp", "maps/gcp"), false))?;
//!
//! let summary = pipeline.run(shared(sink))?;
//! ```

mod error;
mod merge;
mod origin;
mod pipeline;
mod pull_merge;

pub use error::{PipelineError, Result};
pub use merge::MergingProcessor;
pub use origin::Origin;
pub use pipeline::{MergeMode, Pipeline, PipelineSummary};
pub use pull_merge::PullMerge;

// Re-export key types from dependencies for convenience
pub use ipmap_protocol::{Block, ProducerId};
pub use ipmap_routing::{Receiver, SharedReceiver, shared};
pub use ipmap_sources::Source;
