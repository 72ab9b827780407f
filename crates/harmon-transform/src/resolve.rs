//! Conflict/gap resolution: duplicate keys and unanchored records.
//!
//! The resolver is the only stateful stage in the pipeline. It owns the
//! append-only seen-id map; when sources run as parallel tasks the map is
//! the one shared resource, so a synchronized variant is provided and the
//! insert-and-check happens under a single lock acquisition.
//!
//! Under the keep-last policy the output sink is append-only, so a later
//! row cannot rewrite an earlier emission. Keep-last therefore defers every
//! record: the resolver buffers the latest record per id and the pipeline
//! drains the buffer once the input is exhausted. That trades the
//! constant-memory guarantee for one buffered record per unique id.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::warn;

use harmon_model::{CanonicalRecord, Quality, RecordId};

/// What to do with a second row carrying an already-seen record id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// First write wins; both occurrences are logged. The default.
    #[default]
    RejectAndLog,
    /// First write wins silently.
    KeepFirst,
    /// The latest row per id wins. Records are buffered and emitted when
    /// the resolver is drained, so each id appears in the output once.
    KeepLast,
}

/// Outcome of resolving one candidate record.
#[derive(Debug)]
pub enum Resolution {
    /// Emit the record. Quality is `Incomplete` when the record has neither
    /// a timestamp nor an amount; such records are kept, not dropped.
    Accept(CanonicalRecord),
    /// Duplicate rejected under the active policy. Carries the source line
    /// of the occurrence that was kept as well as the rejected one.
    Duplicate {
        id: RecordId,
        first_line: u64,
        line: u64,
    },
    /// Buffered under keep-last; emitted when [`Resolver::take_deferred`]
    /// drains the buffer. `superseded` is set when this row replaced an
    /// earlier buffered record with the same id.
    Deferred { superseded: bool },
}

enum SeenIds {
    Local(HashMap<RecordId, u64>),
    Shared(SharedSeenIds),
}

/// Seen-id map (id to first source line) shared between concurrently
/// running per-source pipelines.
pub type SharedSeenIds = Arc<Mutex<HashMap<RecordId, u64>>>;

pub fn shared_seen_ids() -> SharedSeenIds {
    Arc::new(Mutex::new(HashMap::new()))
}

pub struct Resolver {
    seen: SeenIds,
    policy: DuplicatePolicy,
    /// Latest record per id under keep-last, in first-seen order.
    deferred: Vec<CanonicalRecord>,
    deferred_index: HashMap<RecordId, usize>,
}

impl Resolver {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            seen: SeenIds::Local(HashMap::new()),
            policy,
            deferred: Vec::new(),
            deferred_index: HashMap::new(),
        }
    }

    /// A resolver whose seen-id map is shared with other resolvers, for
    /// callers running the three sources concurrently.
    pub fn with_shared(policy: DuplicatePolicy, seen: SharedSeenIds) -> Self {
        Self {
            seen: SeenIds::Shared(seen),
            policy,
            deferred: Vec::new(),
            deferred_index: HashMap::new(),
        }
    }

    /// Record the first source line for an id. Returns the previously
    /// recorded line when the id was already seen.
    fn first_seen_line(&mut self, id: RecordId, line: u64) -> Option<u64> {
        match &mut self.seen {
            SeenIds::Local(map) => check_and_insert(map, id, line),
            SeenIds::Shared(map) => {
                check_and_insert(&mut map.lock().expect("seen-id lock poisoned"), id, line)
            }
        }
    }

    pub fn resolve(&mut self, mut candidate: CanonicalRecord, line: u64) -> Resolution {
        if !candidate.is_anchored() {
            candidate.quality = Quality::Incomplete;
        }
        if self.policy == DuplicatePolicy::KeepLast {
            return match self.deferred_index.get(&candidate.record_id) {
                Some(&index) => {
                    self.deferred[index] = candidate;
                    Resolution::Deferred { superseded: true }
                }
                None => {
                    self.deferred_index
                        .insert(candidate.record_id, self.deferred.len());
                    self.deferred.push(candidate);
                    Resolution::Deferred { superseded: false }
                }
            };
        }
        match self.first_seen_line(candidate.record_id, line) {
            None => Resolution::Accept(candidate),
            Some(first_line) => {
                if self.policy == DuplicatePolicy::RejectAndLog {
                    warn!(
                        record_id = %candidate.record_id,
                        source = %candidate.source_name,
                        kept_line = first_line,
                        rejected_line = line,
                        "duplicate record id; keeping first occurrence"
                    );
                }
                Resolution::Duplicate {
                    id: candidate.record_id,
                    first_line,
                    line,
                }
            }
        }
    }

    /// Drain the keep-last buffer, yielding the surviving record per id in
    /// first-seen order. Empty under the other policies.
    pub fn take_deferred(&mut self) -> Vec<CanonicalRecord> {
        self.deferred_index.clear();
        std::mem::take(&mut self.deferred)
    }
}

fn check_and_insert(map: &mut HashMap<RecordId, u64>, id: RecordId, line: u64) -> Option<u64> {
    match map.get(&id) {
        Some(&first_line) => Some(first_line),
        None => {
            map.insert(id, line);
            None
        }
    }
}
