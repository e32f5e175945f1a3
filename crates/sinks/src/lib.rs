//! ipmap - Sinks
//!
//! Output stages at the end of a pipeline. Every sink is a
//! [`Receiver`](ipmap_routing::Receiver) writing the map line format:
//!
//! ```text
//! <cidr> <label>\n
//! ```
//!
//! # Available Sinks
//!
//! | Sink | Destination | Atomic |
//! |------|-------------|--------|
//! | `LineSink<W>` | any `Write` (stdout, buffers) | No |
//! | `MapFileSink` | map file, renamed into place on done | Yes |
//!
//! # Example
//!
//! ```ignore
//! use ipmap_sinks::MapFileSink;
//! use ipmap_routing::shared;
//!
//! let sink = MapFileSink::create("out/ip_to_asn")?.with_header("IP to ASN mapping");
//! pipeline.run(shared(sink))?;
//! ```

mod error;
mod metrics;

/// Line sink - map lines to any writer
pub mod line;

/// Map file sink - atomic replace-on-success
pub mod map_file;

pub use error::{Result, SinkError};
pub use line::LineSink;
pub use map_file::MapFileSink;
pub use metrics::{MetricsSnapshot, SinkMetrics};
