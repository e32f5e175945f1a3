//! Tests for the file-backed loadables

use std::io::Write;

use tempfile::NamedTempFile;

use super::{ListFileLoadable, MapFileLoadable};
use crate::{Loadable, SourceError};

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn lines(blocks: Vec<ipmap_protocol::Block>) -> Vec<String> {
    blocks.iter().map(|b| b.to_string()).collect()
}

// ============================================================================
// Map files
// ============================================================================

#[test]
fn test_map_file_reads_blocks() {
    let file = write_temp(
        "# ip to provider\n\
         10.0.0.0/24 AWS/EC2/us-east-1\n\
         \n\
         2001:db8::/32 GCP\n",
    );
    let mut loadable = MapFileLoadable::new("provider", file.path());

    let blocks = loadable.load(false).unwrap();
    assert_eq!(lines(blocks), ["10.0.0.0/24 AWS/EC2/us-east-1", "2001:db8::/32 GCP"]);
}

#[test]
fn test_map_file_label_keeps_inner_spaces() {
    let file = write_temp("192.0.2.0/24   New York  \n");
    let mut loadable = MapFileLoadable::new("city", file.path());

    let blocks = loadable.load(false).unwrap();
    assert_eq!(blocks[0].label().as_str(), "New York");
}

#[test]
fn test_map_file_missing_label_is_empty() {
    let file = write_temp("192.0.2.0/24\n");
    let blocks = MapFileLoadable::new("m", file.path()).load(false).unwrap();
    assert!(blocks[0].label().is_empty());
}

#[test]
fn test_map_file_ipv4_only() {
    let file = write_temp("2001:db8::/32 A\n10.0.0.0/8 B\n");
    let blocks = MapFileLoadable::new("m", file.path()).load(true).unwrap();
    assert_eq!(lines(blocks), ["10.0.0.0/8 B"]);
}

#[test]
fn test_map_file_malformed_line() {
    let file = write_temp("10.0.0.0/8 A\n10.0.0.0/99 B\n");
    let err = MapFileLoadable::new("m", file.path()).load(false).unwrap_err();

    match err {
        SourceError::Malformed { origin, line, .. } => {
            assert_eq!(origin, "m");
            assert_eq!(line, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_map_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let mut loadable = MapFileLoadable::new("m", dir.path().join("absent"));
    assert!(loadable.path().ends_with("absent"));

    let err = loadable.load(false).unwrap_err();
    assert!(matches!(err, SourceError::Io { .. }));
}

// ============================================================================
// List files
// ============================================================================

#[test]
fn test_list_file_applies_label() {
    let file = write_temp(
        "; Spamhaus-style list\n\
         1.10.16.0/20 ; SBL256894\n\
         # comment\n\
         2.56.192.0/22\n",
    );
    let mut loadable = ListFileLoadable::new("drop", file.path(), "blocked");

    let blocks = loadable.load(false).unwrap();
    assert_eq!(lines(blocks), ["1.10.16.0/20 blocked", "2.56.192.0/22 blocked"]);
    assert_eq!(loadable.name(), "drop");
}

#[test]
fn test_list_file_ipv4_only() {
    let file = write_temp("2a06:e480::/29\n1.10.16.0/20\n");
    let blocks = ListFileLoadable::new("drop", file.path(), "blocked")
        .load(true)
        .unwrap();
    assert_eq!(lines(blocks), ["1.10.16.0/20 blocked"]);
}

#[test]
fn test_list_file_malformed() {
    let file = write_temp("1.10.16.0/20\nbogus\n");
    let err = ListFileLoadable::new("drop", file.path(), "blocked")
        .load(false)
        .unwrap_err();
    assert!(matches!(err, SourceError::Malformed { line: 2, .. }));
}
