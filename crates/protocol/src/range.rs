//! Address & range primitives
//!
//! Big-endian arithmetic over IPv4 (4 byte) and IPv6 (16 byte) addresses.
//! Ranges are either CIDR prefixes (`IpNetwork`) or inclusive
//! `[first, last]` address pairs; `last_address` and `decompose_range`
//! convert between the two.
//!
//! # Example
//!
//! ```
//! use ipmap_protocol::range::decompose_range;
//!
//! let first = "1.0.255.255".parse().unwrap();
//! let last = "1.1.255.255".parse().unwrap();
//! let prefixes = decompose_range(first, last).unwrap();
//!
//! let text: Vec<String> = prefixes.iter().map(|p| p.to_string()).collect();
//! assert_eq!(text, ["1.0.255.255/32", "1.1.0.0/16"]);
//! ```

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use ipnetwork::IpNetwork;

use crate::{ProtocolError, Result};

/// Prefix length of a single host for the address's family (32 or 128)
#[inline]
pub fn max_prefix_len(address: IpAddr) -> u8 {
    match address {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

/// Build the prefix `address/len` without normalizing the base address
pub fn prefix(address: IpAddr, len: u8) -> Result<IpNetwork> {
    IpNetwork::new(address, len).map_err(|_| ProtocolError::invalid_prefix_length(address, len))
}

/// Next address in big-endian order, wrapping to all-zeros on overflow
///
/// The wrap is well defined: `255.255.255.255` is followed by `0.0.0.0`.
/// Use [`successor_checked`] where crossing the top of the address space
/// must not look like contiguity.
#[inline]
pub fn successor(address: IpAddr) -> IpAddr {
    step(address).0
}

/// Next address, or `None` when `address` is the last one of its family
#[inline]
pub fn successor_checked(address: IpAddr) -> Option<IpAddr> {
    let (next, wrapped) = step(address);
    (!wrapped).then_some(next)
}

/// Last address covered by `network`
///
/// Each byte of the base address is OR-ed with the inverse of the
/// corresponding mask byte.
pub fn last_address(network: &IpNetwork) -> IpAddr {
    match network {
        IpNetwork::V4(net) => {
            let mut octets = net.ip().octets();
            or_inverse(&mut octets, &net.mask().octets());
            IpAddr::V4(Ipv4Addr::from(octets))
        }
        IpNetwork::V6(net) => {
            let mut octets = net.ip().octets();
            or_inverse(&mut octets, &net.mask().octets());
            IpAddr::V6(Ipv6Addr::from(octets))
        }
    }
}

/// Minimal ascending CIDR cover of the inclusive range `[first, last]`
///
/// At every step the widest prefix that is anchored at the current start
/// (its base address equals the start) and ends at or before `last` is
/// emitted, then the start moves past it. The result is non-overlapping,
/// gap-free and covers exactly `[first, last]`.
///
/// # Errors
///
/// `FamilyMismatch` when the endpoints differ in family, `InvertedRange`
/// when `first > last`.
pub fn decompose_range(first: IpAddr, last: IpAddr) -> Result<Vec<IpNetwork>> {
    if first.is_ipv4() != last.is_ipv4() {
        return Err(ProtocolError::family_mismatch(first, last));
    }
    if first > last {
        return Err(ProtocolError::inverted(first, last));
    }

    let host_len = max_prefix_len(first);
    let mut prefixes = Vec::new();
    let mut current = first;

    loop {
        let mut widest = prefix(current, host_len)?;

        // Alignment and fit are both monotone in the prefix length, so the
        // first failing candidate ends the scan.
        for len in (0..host_len).rev() {
            let candidate = prefix(current, len)?;
            if candidate.network() != current || last_address(&candidate) > last {
                break;
            }
            widest = candidate;
        }

        let end = last_address(&widest);
        prefixes.push(widest);

        if end >= last {
            break;
        }
        match successor_checked(end) {
            Some(next) => current = next,
            None => break,
        }
    }

    Ok(prefixes)
}

/// Add one with carry from the least significant byte.
///
/// Returns the new address and whether the carry fell off the top.
fn step(address: IpAddr) -> (IpAddr, bool) {
    match address {
        IpAddr::V4(addr) => {
            let mut octets = addr.octets();
            let wrapped = increment(&mut octets);
            (IpAddr::V4(Ipv4Addr::from(octets)), wrapped)
        }
        IpAddr::V6(addr) => {
            let mut octets = addr.octets();
            let wrapped = increment(&mut octets);
            (IpAddr::V6(Ipv6Addr::from(octets)), wrapped)
        }
    }
}

fn increment(bytes: &mut [u8]) -> bool {
    for byte in bytes.iter_mut().rev() {
        let (value, carry) = byte.overflowing_add(1);
        *byte = value;
        if !carry {
            return false;
        }
    }
    true
}

#[inline]
fn or_inverse(bytes: &mut [u8], mask: &[u8]) {
    for (byte, mask) in bytes.iter_mut().zip(mask) {
        *byte |= !mask;
    }
}
