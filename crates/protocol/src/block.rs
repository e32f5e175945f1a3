//! Block - a labelled CIDR prefix
//!
//! Blocks are immutable after construction. Every pipeline stage takes
//! ownership of the blocks it is handed; fan-out clones share the label.

use std::cmp::Ordering;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use ipnetwork::IpNetwork;

use crate::range::{last_address, prefix};
use crate::{Label, ProtocolError, Result};

/// A CIDR prefix carrying a label
///
/// The base address is always normalized to the network address, so
/// `10.0.0.7/24` is stored as `10.0.0.0/24`.
///
/// # Ordering
///
/// All IPv4 blocks sort before all IPv6 blocks. Within a family blocks sort
/// by base address, then by label, then by prefix length (wider first).
///
/// ```
/// use ipmap_protocol::Block;
///
/// let a = Block::parse("10.0.0.0/24", "X").unwrap();
/// let b = Block::parse("10.0.0.0/25", "Y").unwrap();
/// let c = Block::parse("::/0", "A").unwrap();
/// assert!(a < b);
/// assert!(b < c);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Block {
    network: IpNetwork,
    label: Label,
}

impl Block {
    /// Create a block, normalizing the base address
    pub fn new(network: IpNetwork, label: impl Into<Label>) -> Self {
        let network = prefix(network.network(), network.prefix()).unwrap_or(network);
        Self {
            network,
            label: label.into(),
        }
    }

    /// Parse CIDR text (`10.0.0.0/8`, `2001:db8::/32`, or a bare address)
    ///
    /// # Errors
    ///
    /// Returns `MalformedRange` if the text is not a valid address or prefix.
    pub fn parse(cidr: &str, label: impl Into<Label>) -> Result<Self> {
        let network = IpNetwork::from_str(cidr.trim())
            .map_err(|e| ProtocolError::malformed(cidr, e))?;
        Ok(Self::new(network, label))
    }

    /// The normalized prefix
    #[inline]
    pub fn network(&self) -> IpNetwork {
        self.network
    }

    /// First address covered (the base address)
    #[inline]
    pub fn first(&self) -> IpAddr {
        self.network.ip()
    }

    /// Last address covered
    #[inline]
    pub fn last(&self) -> IpAddr {
        last_address(&self.network)
    }

    /// Prefix length
    #[inline]
    pub fn prefix_len(&self) -> u8 {
        self.network.prefix()
    }

    /// The block's label
    #[inline]
    pub fn label(&self) -> &Label {
        &self.label
    }

    #[inline]
    pub fn is_ipv4(&self) -> bool {
        self.network.is_ipv4()
    }
}

impl Ord for Block {
    fn cmp(&self, other: &Self) -> Ordering {
        // IpAddr orders V4 before V6, then numerically within a family.
        self.first()
            .cmp(&other.first())
            .then_with(|| self.label.cmp(&other.label))
            .then_with(|| self.prefix_len().cmp(&other.prefix_len()))
    }
}

impl PartialOrd for Block {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Map line format: `<cidr> <label>`
impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.network, self.label)
    }
}
