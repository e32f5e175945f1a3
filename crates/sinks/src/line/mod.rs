//! Line Sink - `<cidr> <label>` text output
//!
//! Writes one line per delivered block, in delivery order:
//!
//! ```text
//! # IP to provider mapping
//! 10.0.0.0/23 AWS
//! 10.0.2.0/24 GCP
//! 2001:db8::/32 AWS
//! ```
//!
//! Blocks with an empty label are dropped and counted. Optional header
//! lines are written as `#` comments before the first block, or on done
//! when no block ever arrives.

use std::io::{self, BufWriter, Write};
use std::sync::Arc;

use ipmap_protocol::{Block, ProducerId};
use ipmap_routing::{Receiver, Result, RoutingError};

use crate::SinkMetrics;

#[cfg(test)]
#[path = "line_test.rs"]
mod tests;

/// Receiver writing the map line format to any writer
#[derive(Debug)]
pub struct LineSink<W: Write> {
    name: String,
    writer: BufWriter<W>,
    header: Vec<String>,
    header_written: bool,
    finished: bool,
    metrics: Arc<SinkMetrics>,
}

impl<W: Write> LineSink<W> {
    /// Create a sink writing to `writer`
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        Self {
            name: name.into(),
            writer: BufWriter::new(writer),
            header: Vec::new(),
            header_written: false,
            finished: false,
            metrics: Arc::new(SinkMetrics::new()),
        }
    }

    /// Set the comment preamble
    ///
    /// Blank lines are skipped; lines not already starting with `#` get a
    /// `# ` prefix.
    pub fn with_header(mut self, header: &str) -> Self {
        self.header = header
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                if line.starts_with('#') {
                    line.to_owned()
                } else {
                    format!("# {line}")
                }
            })
            .collect();
        self
    }

    /// Shared handle to this sink's counters
    pub fn metrics(&self) -> Arc<SinkMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Whether done has been received
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Underlying writer; buffered output may not have reached it yet
    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }

    /// Flush and return the underlying writer
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }

    fn write_header(&mut self) -> io::Result<()> {
        if self.header_written {
            return Ok(());
        }
        self.header_written = true;
        for line in &self.header {
            self.writer.write_all(line.as_bytes())?;
            self.writer.write_all(b"\n")?;
        }
        Ok(())
    }

    fn write_block(&mut self, block: &Block) -> io::Result<()> {
        self.write_header()?;
        let line = format!("{} {}\n", block.network(), block.label());
        self.writer.write_all(line.as_bytes())?;
        self.metrics.record_written(line.len() as u64);
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.write_header()?;
        self.writer.flush()
    }
}

impl<W: Write + Send> Receiver for LineSink<W> {
    fn subscribed(&mut self, producer: &ProducerId) {
        tracing::debug!(sink = %self.name, producer = %producer, "sink subscribed");
    }

    fn receive(&mut self, producer: &ProducerId, block: Block) -> Result<()> {
        if self.finished {
            return Err(RoutingError::producer_finished(&self.name, producer));
        }
        if block.label().is_empty() {
            self.metrics.record_dropped();
            tracing::trace!(sink = %self.name, network = %block.network(), "dropped unlabeled block");
            return Ok(());
        }
        self.write_block(&block)
            .map_err(|e| RoutingError::sink_failed(&self.name, e))
    }

    fn done(&mut self, producer: &ProducerId) -> Result<()> {
        if self.finished {
            return Err(RoutingError::producer_finished(&self.name, producer));
        }
        self.finish()
            .map_err(|e| RoutingError::sink_failed(&self.name, e))?;
        self.finished = true;

        let dropped = self.metrics.blocks_dropped();
        if dropped > 0 {
            tracing::warn!(sink = %self.name, dropped, "dropped blocks with empty labels");
        }
        tracing::debug!(
            sink = %self.name,
            written = self.metrics.blocks_written(),
            "sink finished"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
