//! Tests for the lazy-sorting source adapter

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ipmap_protocol::Block;

use super::{BlockSource, Source};
use crate::{Loadable, Result, SourceError, StaticLoadable};

fn block(cidr: &str, label: &str) -> Block {
    Block::parse(cidr, label).unwrap()
}

/// Counts loads and optionally fails
struct CountingLoadable {
    loads: Arc<AtomicUsize>,
    blocks: Vec<Block>,
    fail: bool,
}

impl CountingLoadable {
    fn new(blocks: Vec<Block>) -> (Self, Arc<AtomicUsize>) {
        let loads = Arc::new(AtomicUsize::new(0));
        let loadable = Self {
            loads: Arc::clone(&loads),
            blocks,
            fail: false,
        };
        (loadable, loads)
    }

    fn failing() -> (Self, Arc<AtomicUsize>) {
        let (mut loadable, loads) = Self::new(Vec::new());
        loadable.fail = true;
        (loadable, loads)
    }
}

impl Loadable for CountingLoadable {
    fn load(&mut self, _ipv4_only: bool) -> Result<Vec<Block>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SourceError::load("counting", "fetch failed"));
        }
        Ok(self.blocks.clone())
    }

    fn name(&self) -> &str {
        "counting"
    }
}

fn drain(source: &mut impl Source) -> Vec<String> {
    let mut out = Vec::new();
    while let Some(block) = source.next().unwrap() {
        out.push(block.to_string());
    }
    out
}

// ============================================================================
// Lazy loading
// ============================================================================

#[test]
fn test_nothing_loaded_before_first_pull() {
    let (loadable, loads) = CountingLoadable::new(vec![block("10.0.0.0/8", "X")]);
    let source = BlockSource::new(loadable, false);

    assert!(!source.is_loaded());
    assert_eq!(loads.load(Ordering::SeqCst), 0);
}

#[test]
fn test_load_called_once() {
    let (loadable, loads) = CountingLoadable::new(vec![
        block("10.0.0.0/8", "X"),
        block("11.0.0.0/8", "X"),
    ]);
    let mut source = BlockSource::new(loadable, false);

    assert_eq!(drain(&mut source).len(), 2);
    assert!(source.next().unwrap().is_none());
    assert!(source.next().unwrap().is_none());
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[test]
fn test_blocks_served_sorted() {
    let loadable = StaticLoadable::new(
        "static",
        vec![
            block("2001:db8::/32", "v6"),
            block("10.0.1.0/24", "X"),
            block("10.0.0.0/24", "Y"),
            block("10.0.0.0/24", "X"),
        ],
    );
    let mut source = BlockSource::new(loadable, false);

    assert_eq!(
        drain(&mut source),
        [
            "10.0.0.0/24 X",
            "10.0.0.0/24 Y",
            "10.0.1.0/24 X",
            "2001:db8::/32 v6",
        ]
    );
}

#[test]
fn test_empty_loadable_is_exhausted() {
    let mut source = BlockSource::new(StaticLoadable::new("empty", Vec::new()), false);
    assert!(source.next().unwrap().is_none());
    assert!(source.is_loaded());
}

#[test]
fn test_ipv4_only_passed_to_loadable() {
    let loadable = StaticLoadable::new(
        "static",
        vec![block("2001:db8::/32", "v6"), block("10.0.0.0/8", "v4")],
    );
    let mut source = BlockSource::new(loadable, true);

    assert!(source.ipv4_only());
    assert_eq!(drain(&mut source), ["10.0.0.0/8 v4"]);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_load_failure_reported_once() {
    let (loadable, loads) = CountingLoadable::failing();
    let mut source = BlockSource::new(loadable, false);

    let err = source.next().unwrap_err();
    assert!(matches!(err, SourceError::Load { .. }));

    // Permanently exhausted, never reloaded
    assert!(source.next().unwrap().is_none());
    assert!(source.next().unwrap().is_none());
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[test]
fn test_boxed_source_delegates() {
    let mut source: Box<dyn Source> = Box::new(BlockSource::new(
        StaticLoadable::new("boxed", vec![block("10.0.0.0/8", "X")]),
        false,
    ));
    assert_eq!(source.name(), "boxed");
    assert_eq!(drain(&mut source), ["10.0.0.0/8 X"]);
}
