//! Map configuration
//!
//! A map is one output file built by merging (and usually reducing) a set
//! of sources.
//!
//! # Example
//!
//! ```toml
//! [[maps]]
//! name = "ip_to_provider"
//! merge = "push"
//! header = """
//! IP to provider mapping
//! cidr provider
//! """
//!
//! [[maps.sources]]
//! name = "aws"
//! type = "map"
//! path = "data/aws.map"
//! output = "ip_to_aws"
//!
//! [[maps.sources]]
//! name = "droplist"
//! type = "list"
//! path = "data/drop.txt"
//! label = "DROP"
//! ```

use std::path::PathBuf;

use serde::Deserialize;

/// How a map merges its sources
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    /// Pull-based merge (default)
    #[default]
    Pull,
    /// Push-based merge; allows per-source outputs
    Push,
}

/// Input file format of a source
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// `<cidr> <label>` lines (default)
    #[default]
    Map,
    /// One CIDR per line, labelled with `label`
    List,
}

/// One output map
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Output file name under `global.outdir`
    pub name: String,

    /// Whether this map is built
    /// Default: true
    pub enabled: bool,

    /// Merge strategy
    /// Default: pull
    pub merge: MergeStrategy,

    /// Coalesce adjacent same-label blocks
    /// Default: true
    pub reduce: bool,

    /// Comment preamble written at the top of the map
    pub header: Option<String>,

    /// Inputs, merged in declaration order
    pub sources: Vec<SourceConfig>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            enabled: true,
            merge: MergeStrategy::Pull,
            reduce: true,
            header: None,
            sources: Vec::new(),
        }
    }
}

/// One input of a map
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Producer name, unique within the map
    pub name: String,

    /// File format
    #[serde(rename = "type")]
    pub source_type: SourceType,

    /// Input file
    pub path: PathBuf,

    /// Label for every entry of a `list` source
    pub label: Option<String>,

    /// Also write this source's own blocks to this map name (push only)
    pub output: Option<String>,
}
