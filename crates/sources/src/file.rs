//! File-backed loadables
//!
//! Two generic line formats, neither tied to a vendor:
//!
//! - **map**: `<cidr> <label>` per line, the format ipmap itself writes, so
//!   previously produced maps can be merged again
//! - **list**: one CIDR per line, every block carrying the same label
//!   (block-list style, comments after `#` or `;`)

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use ipmap_protocol::{Block, Label};

use crate::{Loadable, Result, SourceError};

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;

/// Loads a `<cidr> <label>` map file
#[derive(Debug, Clone)]
pub struct MapFileLoadable {
    name: String,
    path: PathBuf,
}

impl MapFileLoadable {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Loadable for MapFileLoadable {
    fn load(&mut self, ipv4_only: bool) -> Result<Vec<Block>> {
        read_blocks(&self.name, &self.path, ipv4_only, |line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let (cidr, label) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
            Some((cidr, Label::new(label.trim())))
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Loads a one-CIDR-per-line list with a fixed label
#[derive(Debug, Clone)]
pub struct ListFileLoadable {
    name: String,
    path: PathBuf,
    label: Label,
}

impl ListFileLoadable {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, label: impl Into<Label>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            label: label.into(),
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Loadable for ListFileLoadable {
    fn load(&mut self, ipv4_only: bool) -> Result<Vec<Block>> {
        let label = &self.label;
        read_blocks(&self.name, &self.path, ipv4_only, |line| {
            let content = line.split(['#', ';']).next().unwrap_or_default();
            let cidr = content.split_whitespace().next()?;
            Some((cidr, label.clone()))
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Parse every line with `extract`, which returns `None` for lines to skip
fn read_blocks<F>(name: &str, path: &Path, ipv4_only: bool, mut extract: F) -> Result<Vec<Block>>
where
    F: FnMut(&str) -> Option<(&str, Label)>,
{
    let io_err = |e| SourceError::io(name, path.display().to_string(), e);
    let reader = BufReader::new(File::open(path).map_err(io_err)?);

    let mut blocks = Vec::new();
    let mut skipped_v6 = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(io_err)?;
        let Some((cidr, label)) = extract(&line) else {
            continue;
        };

        let block = Block::parse(cidr, label)
            .map_err(|e| SourceError::malformed(name, index + 1, e))?;

        if ipv4_only && !block.is_ipv4() {
            skipped_v6 += 1;
            continue;
        }
        blocks.push(block);
    }

    tracing::debug!(
        source = name,
        path = %path.display(),
        blocks = blocks.len(),
        skipped_v6,
        "file read"
    );

    Ok(blocks)
}
