//! # Event Deduplication
//!
//! Overlapping input datasets can carry the same collision event more than
//! once. Each event is identified by the composite (run, luminosity section,
//! event number) triple; the first occurrence in ingestion order is kept and
//! every later occurrence is dropped and counted.
//!
//! The seen-set lives in memory for the duration of one pass and grows with
//! the number of unique events. Nothing is persisted.

use std::collections::HashSet;
use std::fmt;


/// Composite identifier of one collision event.
///
/// Two rows are duplicates exactly when all three components are equal.
/// The components keep their full 64-bit unsigned precision; the triple is
/// hashed as a value, so `(1, 11, 100)` and `(11, 1, 100)` are distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventId {
    /// Run number
    pub run: u64,
    /// Luminosity section within the run
    pub lumi_sect: u64,
    /// Event number within the luminosity section
    pub event: u64,
}

impl EventId {
    /// Creates an identifier from its three components.
    pub fn new(run: u64, lumi_sect: u64, event: u64) -> Self {
        Self {
            run,
            lumi_sect,
            event,
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.run, self.lumi_sect, self.event)
    }
}

/// First-seen-wins duplicate filter over [`EventId`]s.
///
/// The filter never reorders rows; callers feed identifiers in ingestion
/// order and drop the rows for which [`is_duplicate`](Self::is_duplicate)
/// returns true.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<EventId>,
    duplicates: u64,
}

impl Deduplicator {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty filter pre-sized for an expected number of unique
    /// events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: HashSet::with_capacity(capacity),
            duplicates: 0,
        }
    }

    /// Tests one identifier against the seen-set, inserting it when absent.
    ///
    /// Returns true when the identifier was already present; the caller
    /// should then drop the row. The duplicate tally advances on every true
    /// result.
    pub fn is_duplicate(&mut self, id: EventId) -> bool {
        if self.seen.insert(id) {
            false
        } else {
            self.duplicates += 1;
            true
        }
    }

    /// Records an identifier without testing it or counting a duplicate.
    ///
    /// Used when resuming a partially scanned stream: rows before the resume
    /// point are skipped, but their identifiers must still be known so the
    /// remainder of the stream dedups against them.
    pub fn register(&mut self, id: EventId) {
        self.seen.insert(id);
    }

    /// Number of duplicate occurrences dropped so far.
    pub fn duplicates(&self) -> u64 {
        self.duplicates
    }

    /// Number of unique identifiers seen so far.
    pub fn unique_seen(&self) -> usize {
        self.seen.len()
    }
}
