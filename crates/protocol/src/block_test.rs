//! Tests for Block construction and ordering

use crate::{Block, Label, ProtocolError};

fn block(cidr: &str, label: &str) -> Block {
    Block::parse(cidr, label).unwrap()
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_parse_ipv4() {
    let b = block("10.0.0.0/8", "private");
    assert_eq!(b.first().to_string(), "10.0.0.0");
    assert_eq!(b.last().to_string(), "10.255.255.255");
    assert_eq!(b.prefix_len(), 8);
    assert_eq!(b.label().as_str(), "private");
    assert!(b.is_ipv4());
}

#[test]
fn test_parse_ipv6() {
    let b = block("2001:db8::/32", "doc");
    assert_eq!(b.prefix_len(), 32);
    assert!(!b.is_ipv4());
    assert_eq!(b.last().to_string(), "2001:db8:ffff:ffff:ffff:ffff:ffff:ffff");
}

#[test]
fn test_parse_normalizes_base_address() {
    let b = block("10.1.2.3/16", "X");
    assert_eq!(b.first().to_string(), "10.1.0.0");
    assert_eq!(b.network().to_string(), "10.1.0.0/16");
    assert_eq!(b, block("10.1.0.0/16", "X"));
}

#[test]
fn test_parse_trims_whitespace() {
    let b = block("  192.0.2.0/24\t", "X");
    assert_eq!(b.network().to_string(), "192.0.2.0/24");
}

#[test]
fn test_parse_malformed() {
    for input in ["", "10.0.0.0/33", "::/129", "not-an-ip/8", "10.0.0.0/x"] {
        let err = Block::parse(input, "X").unwrap_err();
        assert!(
            matches!(err, ProtocolError::MalformedRange { .. }),
            "{input} should be malformed"
        );
    }
}

#[test]
fn test_display_is_map_line() {
    assert_eq!(block("10.0.0.0/24", "AWS/EC2/us-east-1").to_string(), "10.0.0.0/24 AWS/EC2/us-east-1");
    assert_eq!(block("2001:db8::/48", "Y").to_string(), "2001:db8::/48 Y");
}

#[test]
fn test_label_shared_between_clones() {
    let label = Label::new("shared");
    let a = Block::parse("10.0.0.0/24", label.clone()).unwrap();
    let b = a.clone();
    assert_eq!(a.label(), b.label());
    assert_eq!(b.label(), &label);
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn test_ipv4_sorts_before_ipv6() {
    assert!(block("255.255.255.255/32", "Z") < block("::/0", "A"));
    assert!(block("0.0.0.0/0", "Z") < block("::/128", "A"));
}

#[test]
fn test_orders_by_address_numerically() {
    assert!(block("9.0.0.0/8", "X") < block("10.0.0.0/8", "X"));
    assert!(block("10.0.0.0/24", "X") < block("10.0.1.0/24", "X"));
    assert!(block("2001:db8::/32", "X") < block("2001:db9::/32", "X"));
}

#[test]
fn test_ties_broken_by_label() {
    assert!(block("10.0.0.0/24", "X") < block("10.0.0.0/25", "Y"));
    assert!(block("10.0.0.0/25", "A") < block("10.0.0.0/24", "B"));
}

#[test]
fn test_final_tie_break_is_wider_first() {
    assert!(block("10.0.0.0/23", "X") < block("10.0.0.0/24", "X"));
}

#[test]
fn test_sort_mixed() {
    let mut blocks = vec![
        block("2001:db8::/32", "v6"),
        block("10.0.1.0/24", "X"),
        block("10.0.0.0/24", "Y"),
        block("10.0.0.0/24", "X"),
        block("1.0.0.0/8", "Z"),
    ];
    blocks.sort();
    let lines: Vec<String> = blocks.iter().map(|b| b.to_string()).collect();
    assert_eq!(
        lines,
        [
            "1.0.0.0/8 Z",
            "10.0.0.0/24 X",
            "10.0.0.0/24 Y",
            "10.0.1.0/24 X",
            "2001:db8::/32 v6",
        ]
    );
}

#[test]
fn test_ord_consistent_with_eq() {
    let a = block("10.0.0.0/24", "X");
    let b = block("10.0.0.0/24", "X");
    assert_eq!(a.cmp(&b), std::cmp::Ordering::Equal);
    assert_eq!(a, b);
}
