//! ipmap Sources - Block producers for the merge pipeline
//!
//! Origins only implement [`Loadable`]: hand back every block, in any
//! order, once. [`BlockSource`] turns a loadable into a sorted, pull-based
//! [`Source`] that the merge stages consume.
//!
//! # Available Loadables
//!
//! - **Static** - blocks already in memory
//! - **Map file** - `<cidr> <label>` lines, the format ipmap writes
//! - **List file** - one CIDR per line with a fixed label
//!
//! Vendor-specific fetchers (cloud JSON, geo databases) plug in by
//! implementing `Loadable`.
//!
//! # Example
//!
//! ```ignore
//! use ipmap_sources::{BlockSource, MapFileLoadable, Source};
//!
//! let mut source = BlockSource::new(MapFileLoadable::new("aws", "maps/ip_to_aws"), false);
//! while let Some(block) = source.next()? {
//!     println!("{block}");
//! }
//! ```

mod block_source;
mod error;
mod file;
mod loadable;

pub use block_source::{BlockSource, Source};
pub use error::{Result, SourceError};
pub use file::{ListFileLoadable, MapFileLoadable};
pub use loadable::{Loadable, StaticLoadable};
