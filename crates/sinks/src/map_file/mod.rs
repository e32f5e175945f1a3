//! Map File Sink - atomic replace-on-success map output
//!
//! Lines go to `<path>.tmp`; on done the temp file is flushed, synced and
//! renamed over `<path>`. A pipeline that fails never sees done, so the
//! temp file is removed on drop and the previous map stays in place.
//!
//! ```text
//! create ──→ ip_to_asn.tmp ──receive*──→ done ──rename──→ ip_to_asn
//!                  │
//!                  └── dropped before done: removed
//! ```

use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ipmap_protocol::{Block, ProducerId};
use ipmap_routing::{Receiver, Result, RoutingError};

use crate::{LineSink, SinkError, SinkMetrics};

#[cfg(test)]
#[path = "map_file_test.rs"]
mod tests;

/// Receiver persisting a map file atomically
#[derive(Debug)]
pub struct MapFileSink {
    name: String,
    path: PathBuf,
    temp_path: PathBuf,
    /// `None` once done has been handled
    lines: Option<LineSink<File>>,
    committed: bool,
    metrics: Arc<SinkMetrics>,
}

impl MapFileSink {
    /// Open `<path>.tmp` for writing, creating parent directories
    pub fn create(path: impl Into<PathBuf>) -> crate::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| SinkError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let temp_path = temp_path(&path);
        let file = File::create(&temp_path).map_err(|source| SinkError::CreateFile {
            path: temp_path.clone(),
            source,
        })?;

        let name = path.display().to_string();
        let lines = LineSink::new(name.clone(), file);
        let metrics = lines.metrics();

        Ok(Self {
            name,
            path,
            temp_path,
            lines: Some(lines),
            committed: false,
            metrics,
        })
    }

    /// Set the comment preamble written at the top of the map
    pub fn with_header(mut self, header: &str) -> Self {
        self.lines = self.lines.take().map(|lines| lines.with_header(header));
        self
    }

    /// Final path of the map
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Temporary path written until done
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Whether the map has been renamed into place
    #[inline]
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Shared handle to this sink's counters
    pub fn metrics(&self) -> Arc<SinkMetrics> {
        Arc::clone(&self.metrics)
    }

    fn commit(&self, lines: LineSink<File>) -> io::Result<()> {
        let file = lines.into_inner()?;
        file.sync_all()?;
        drop(file);
        fs::rename(&self.temp_path, &self.path)
    }
}

impl Receiver for MapFileSink {
    fn subscribed(&mut self, producer: &ProducerId) {
        if let Some(lines) = &mut self.lines {
            lines.subscribed(producer);
        }
    }

    fn receive(&mut self, producer: &ProducerId, block: Block) -> Result<()> {
        match &mut self.lines {
            Some(lines) => lines.receive(producer, block),
            None => Err(RoutingError::producer_finished(&self.name, producer)),
        }
    }

    fn done(&mut self, producer: &ProducerId) -> Result<()> {
        let Some(mut lines) = self.lines.take() else {
            return Err(RoutingError::producer_finished(&self.name, producer));
        };
        // Temp file stays behind for drop to clean up on failure
        if let Err(e) = lines.done(producer) {
            self.lines = Some(lines);
            return Err(e);
        }
        if let Err(e) = self.commit(lines) {
            return Err(RoutingError::sink_failed(&self.name, e));
        }
        self.committed = true;

        tracing::info!(
            map = %self.path.display(),
            blocks = self.metrics.blocks_written(),
            "map written"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for MapFileSink {
    fn drop(&mut self) {
        // Close the file before removing it
        drop(self.lines.take());
        if self.committed {
            return;
        }
        match fs::remove_file(&self.temp_path) {
            Ok(()) => tracing::debug!(path = %self.temp_path.display(), "discarded incomplete map"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %self.temp_path.display(),
                error = %e,
                "failed to remove incomplete map"
            ),
        }
    }
}

/// `<path>.tmp`, keeping any existing extension
fn temp_path(path: &Path) -> PathBuf {
    let mut temp = OsString::from(path.as_os_str());
    temp.push(".tmp");
    PathBuf::from(temp)
}
