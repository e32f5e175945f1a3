//! Reduce command - Merge map files to stdout
//!
//! Reads any number of `<cidr> <label>` files, merges them with the pull
//! merge and writes the (by default reduced) result to stdout.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use ipmap_pipeline::{MergeMode, Pipeline};
use ipmap_routing::shared;
use ipmap_sinks::LineSink;
use ipmap_sources::{BlockSource, MapFileLoadable};

/// Reduce command arguments
#[derive(Args, Debug)]
pub struct ReduceArgs {
    /// Map files to merge
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Leave IPv6 prefixes out
    #[arg(long)]
    pub ipv4_only: bool,

    /// Only merge, keep blocks as they are
    #[arg(long)]
    pub no_reduce: bool,
}

/// Run the reduce command
pub async fn run(args: ReduceArgs) -> Result<()> {
    tokio::task::spawn_blocking(move || reduce(args))
        .await
        .context("reduce task aborted")?
}

fn reduce(args: ReduceArgs) -> Result<()> {
    let mut pipeline = Pipeline::new("reduce", MergeMode::Pull).with_reduce(!args.no_reduce);
    for path in &args.files {
        let name = path.display().to_string();
        let loadable = MapFileLoadable::new(name.as_str(), path);
        pipeline
            .add_source(name.as_str(), BlockSource::new(loadable, args.ipv4_only))
            .with_context(|| format!("cannot merge {name}"))?;
    }

    let summary = pipeline.run(shared(LineSink::new("stdout", io::stdout())))?;
    tracing::info!(
        files = args.files.len(),
        blocks_in = summary.blocks_in,
        blocks_out = summary.blocks_out,
        "reduce complete"
    );
    Ok(())
}
