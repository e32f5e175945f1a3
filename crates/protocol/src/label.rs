//! Block labels
//!
//! A label is the opaque value a map associates with an address range
//! (`AWS/EC2/us-east-1`, `AS13335`, `US`, ...). Labels are shared between
//! every stage that holds a copy of a block, so cloning is a refcount bump.

use std::fmt;
use std::sync::Arc;

/// Immutable, cheaply cloneable label text
///
/// Ordering is byte-wise lexicographic, which is the tie-break used by
/// the block ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label(Arc<str>);

impl Label {
    /// Create a new label
    #[inline]
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(Arc::from(label.as_ref()))
    }

    /// Get the label as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Empty labels are never written to a map
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl From<&String> for Label {
    fn from(s: &String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
