//! Producer identification
//!
//! `ProducerId` names the origin of a block stream. Receivers use it to keep
//! per-producer state (queues, finished flags) apart.

use std::fmt;

/// Identifier of a block producer
///
/// # Example
///
/// ```
/// use ipmap_protocol::ProducerId;
///
/// let producer = ProducerId::new("aws");
/// assert_eq!(producer.as_str(), "aws");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProducerId(String);

impl ProducerId {
    /// Create a new producer ID
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the producer ID as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProducerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProducerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ProducerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for ProducerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
