//! Protocol error types
//!
//! Errors raised while parsing prefixes or applying the range algebra.

use std::net::IpAddr;

use thiserror::Error;

/// Errors that can occur during protocol operations
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Address or prefix text could not be parsed
    #[error("malformed range '{input}': {reason}")]
    MalformedRange { input: String, reason: String },

    /// Prefix length exceeds the width of the address family
    #[error("invalid prefix length /{prefix} for {address} (max /{max})")]
    InvalidPrefixLength { address: IpAddr, prefix: u8, max: u8 },

    /// Range endpoints belong to different address families
    #[error("address family mismatch: {first} and {last}")]
    FamilyMismatch { first: IpAddr, last: IpAddr },

    /// Range start lies after range end
    #[error("inverted range: {first} is after {last}")]
    InvertedRange { first: IpAddr, last: IpAddr },
}

impl ProtocolError {
    /// Create a malformed range error
    #[inline]
    pub fn malformed(input: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedRange {
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid prefix length error
    #[inline]
    pub fn invalid_prefix_length(address: IpAddr, prefix: u8) -> Self {
        Self::InvalidPrefixLength {
            address,
            prefix,
            max: crate::range::max_prefix_len(address),
        }
    }

    /// Create a family mismatch error
    #[inline]
    pub fn family_mismatch(first: IpAddr, last: IpAddr) -> Self {
        Self::FamilyMismatch { first, last }
    }

    /// Create an inverted range error
    #[inline]
    pub fn inverted(first: IpAddr, last: IpAddr) -> Self {
        Self::InvertedRange { first, last }
    }
}
