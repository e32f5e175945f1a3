//! Tests for the origin driver

use std::sync::Arc;

use ipmap_protocol::{Block, ProducerId};
use ipmap_routing::{Receiver, RoutingError, shared};
use ipmap_sources::{BlockSource, Source, SourceError, StaticLoadable};
use parking_lot::Mutex;

use super::Origin;
use crate::PipelineError;

type Log = Arc<Mutex<Vec<String>>>;

struct Recorder {
    log: Log,
    fail_on: Option<usize>,
}

impl Receiver for Recorder {
    fn subscribed(&mut self, producer: &ProducerId) {
        self.log.lock().push(format!("subscribed {producer}"));
    }

    fn receive(&mut self, producer: &ProducerId, block: Block) -> ipmap_routing::Result<()> {
        let mut log = self.log.lock();
        if self.fail_on == Some(log.len()) {
            return Err(RoutingError::producer_finished("recorder", producer));
        }
        log.push(format!("receive {producer} {block}"));
        Ok(())
    }

    fn done(&mut self, producer: &ProducerId) -> ipmap_routing::Result<()> {
        self.log.lock().push(format!("done {producer}"));
        Ok(())
    }

    fn name(&self) -> &str {
        "recorder"
    }
}

/// Source that yields one block then fails
struct Broken(bool);

impl Source for Broken {
    fn next(&mut self) -> ipmap_sources::Result<Option<Block>> {
        if self.0 {
            return Err(SourceError::load("broken", "connection reset"));
        }
        self.0 = true;
        Ok(Some(Block::parse("10.0.0.0/8", "X").unwrap()))
    }

    fn name(&self) -> &str {
        "broken"
    }
}

fn blocks(cidrs: &[&str]) -> Vec<Block> {
    cidrs.iter().map(|c| Block::parse(c, "X").unwrap()).collect()
}

#[test]
fn test_run_emits_sorted_blocks_then_done() {
    let log = Log::default();
    let source = BlockSource::new(
        StaticLoadable::new("aws", blocks(&["10.0.1.0/24", "10.0.0.0/24"])),
        false,
    );
    let mut origin = Origin::new("aws", source);
    origin.add_receiver(shared(Recorder { log: Arc::clone(&log), fail_on: None }));

    assert_eq!(origin.run().unwrap(), 2);
    assert_eq!(
        *log.lock(),
        vec![
            "subscribed aws",
            "receive aws 10.0.0.0/24 X",
            "receive aws 10.0.1.0/24 X",
            "done aws",
        ]
    );
}

#[test]
fn test_empty_source_still_signals_done() {
    let log = Log::default();
    let source = BlockSource::new(StaticLoadable::new("none", Vec::new()), false);
    let mut origin = Origin::new("none", source);
    origin.add_receiver(shared(Recorder { log: Arc::clone(&log), fail_on: None }));

    assert_eq!(origin.run().unwrap(), 0);
    assert_eq!(*log.lock(), vec!["subscribed none", "done none"]);
}

#[test]
fn test_source_failure_skips_done() {
    let log = Log::default();
    let mut origin = Origin::new("broken", Broken(false));
    origin.add_receiver(shared(Recorder { log: Arc::clone(&log), fail_on: None }));

    let err = origin.run().unwrap_err();
    assert!(matches!(err, PipelineError::Source(SourceError::Load { .. })));
    assert!(!log.lock().iter().any(|line| line.starts_with("done")));
}

#[test]
fn test_receiver_failure_stops_origin() {
    let log = Log::default();
    let source = BlockSource::new(
        StaticLoadable::new("aws", blocks(&["10.0.0.0/24", "10.0.1.0/24", "10.0.2.0/24"])),
        false,
    );
    let mut origin = Origin::new("aws", source);
    // index 2 is the second receive, after "subscribed" and one block
    origin.add_receiver(shared(Recorder { log: Arc::clone(&log), fail_on: Some(2) }));

    let err = origin.run().unwrap_err();
    assert!(matches!(err, PipelineError::Routing(RoutingError::ProducerFinished { .. })));
    assert_eq!(log.lock().len(), 2);
}
