//! Build command - Build every enabled map
//!
//! Each map is an independent pipeline run on the blocking pool. All maps
//! run to completion; the command fails if any of them failed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tokio::task::JoinSet;
use tracing::{error, info};

use ipmap_config::{Config, MapConfig, MergeStrategy, SourceConfig, SourceType};
use ipmap_pipeline::{MergeMode, Pipeline, PipelineSummary, Source};
use ipmap_routing::shared;
use ipmap_sinks::MapFileSink;
use ipmap_sources::{BlockSource, ListFileLoadable, MapFileLoadable};

#[cfg(test)]
#[path = "build_test.rs"]
mod tests;

/// Build command arguments
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Output directory (overrides global.outdir)
    #[arg(short, long)]
    pub outdir: Option<PathBuf>,

    /// Leave IPv6 prefixes out of every map
    #[arg(long)]
    pub ipv4_only: bool,

    /// Only build the named maps (repeatable)
    #[arg(short, long = "map", value_name = "NAME")]
    pub maps: Vec<String>,
}

/// Run the build command
pub async fn run(args: BuildArgs, config: Config) -> Result<()> {
    let outdir = args.outdir.unwrap_or_else(|| config.global.outdir.clone());
    let ipv4_only = args.ipv4_only || config.global.ipv4_only();
    let maps = select_maps(&config, &args.maps)?;

    info!(
        maps = maps.len(),
        outdir = %outdir.display(),
        ipv4_only,
        "building maps"
    );

    let mut tasks = JoinSet::new();
    for map in maps {
        let outdir = outdir.clone();
        tasks.spawn_blocking(move || {
            build_map(&map, &outdir, ipv4_only).with_context(|| format!("map '{}' failed", map.name))
        });
    }

    let total = tasks.len();
    let mut failed = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(summary)) => info!(
                map = %summary.name,
                blocks_in = summary.blocks_in,
                blocks_out = summary.blocks_out,
                "map built"
            ),
            Ok(Err(e)) => {
                failed += 1;
                error!(error = %format!("{e:#}"), "map build failed");
            }
            Err(e) => {
                failed += 1;
                error!(error = %e, "map build task aborted");
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {total} maps failed");
    }
    Ok(())
}

/// Enabled maps, narrowed to `only` when given
fn select_maps(config: &Config, only: &[String]) -> Result<Vec<MapConfig>> {
    if let Some(unknown) = only
        .iter()
        .find(|name| !config.enabled_maps().any(|m| &m.name == *name))
    {
        anyhow::bail!("no enabled map named '{unknown}'");
    }

    Ok(config
        .enabled_maps()
        .filter(|map| only.is_empty() || only.contains(&map.name))
        .cloned()
        .collect())
}

/// Build one map into `<outdir>/<name>`
pub fn build_map(map: &MapConfig, outdir: &Path, ipv4_only: bool) -> Result<PipelineSummary> {
    let mode = match map.merge {
        MergeStrategy::Pull => MergeMode::Pull,
        MergeStrategy::Push => MergeMode::Push,
    };

    let mut pipeline = Pipeline::new(&map.name, mode).with_reduce(map.reduce);
    for source in &map.sources {
        pipeline.add_source(source.name.as_str(), open_source(source, ipv4_only))?;

        if let Some(output) = &source.output {
            let tap = MapFileSink::create(outdir.join(output))?;
            pipeline.add_tap(source.name.as_str(), shared(tap))?;
        }
    }

    let mut sink = MapFileSink::create(outdir.join(&map.name))?;
    if let Some(header) = &map.header {
        sink = sink.with_header(header);
    }

    Ok(pipeline.run(shared(sink))?)
}

fn open_source(source: &SourceConfig, ipv4_only: bool) -> Box<dyn Source> {
    match source.source_type {
        SourceType::Map => Box::new(BlockSource::new(
            MapFileLoadable::new(&source.name, &source.path),
            ipv4_only,
        )),
        SourceType::List => Box::new(BlockSource::new(
            ListFileLoadable::new(
                &source.name,
                &source.path,
                source.label.as_deref().unwrap_or_default(),
            ),
            ipv4_only,
        )),
    }
}
