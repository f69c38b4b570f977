//! Step trace model.
//!
//! A [`Trace`] is the ordered list of [`StepRecord`]s produced by one
//! simulation run. Every record carries a full post-step snapshot of the
//! slot table, so any step can be inspected on its own.
//!
//! # Components
//! - [`StepRecord`] - Outcome of a single reference
//! - [`Summary`] - Hit/fault totals
//! - [`StepDelta`] - Compact per-step change, see [`reconstruct_snapshots`]

mod step;
mod summary;

pub use step::{Eviction, NextUse, Outcome, PolicyState, StepDelta, StepRecord};
pub use summary::Summary;

use serde::Serialize;

use crate::common::{Capacity, EntryId};

/// Complete, immutable result of a run.
///
/// Iterating a trace never consumes it; it can be replayed any number
/// of times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trace {
    capacity: Capacity,
    steps: Vec<StepRecord>,
}

impl Trace {
    pub(crate) fn new(capacity: Capacity, steps: Vec<StepRecord>) -> Self {
        Self { capacity, steps }
    }

    /// Capacity of the table the trace was produced against.
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn get(&self, index: usize) -> Option<&StepRecord> {
        self.steps.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StepRecord> {
        self.steps.iter()
    }

    /// Steps that displaced a resident entry.
    pub fn evictions(&self) -> impl Iterator<Item = &StepRecord> {
        self.steps.iter().filter(|s| s.eviction().is_some())
    }

    /// Table contents after the last reference.
    pub fn final_snapshot(&self) -> Option<&[Option<EntryId>]> {
        self.steps.last().map(StepRecord::slots)
    }

    /// Recount hits and faults from the recorded steps.
    pub fn summary(&self) -> Summary {
        Summary::from_steps(&self.steps)
    }

    /// Per-step deltas, in reference order.
    pub fn deltas(&self) -> Vec<StepDelta> {
        self.steps.iter().map(StepRecord::delta).collect()
    }

    /// CRC32 over a canonical encoding of every step.
    ///
    /// Covers index, entry, outcome, snapshot and eviction. Rationale
    /// text and policy state are excluded, so the digest only changes
    /// when a decision changes.
    pub fn checksum(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&(self.capacity.get() as u64).to_le_bytes());

        for step in &self.steps {
            hasher.update(&(step.index() as u64).to_le_bytes());
            hasher.update(&step.entry().0.to_le_bytes());
            hasher.update(&[u8::from(step.is_hit())]);

            for slot in step.slots() {
                match slot {
                    Some(entry) => {
                        hasher.update(&[1]);
                        hasher.update(&entry.0.to_le_bytes());
                    }
                    None => hasher.update(&[0]),
                }
            }

            match step.eviction() {
                Some(eviction) => {
                    hasher.update(&[1]);
                    hasher.update(&eviction.entry.0.to_le_bytes());
                    hasher.update(&(eviction.slot.0 as u64).to_le_bytes());
                }
                None => hasher.update(&[0]),
            }
        }

        hasher.finalize()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a StepRecord;
    type IntoIter = std::slice::Iter<'a, StepRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Rebuild every post-step snapshot from a delta sequence.
///
/// Starts from an empty table of `capacity` slots and applies each
/// delta in order. The result matches the eager snapshots of the trace
/// the deltas came from. Deltas naming a slot past `capacity` are
/// ignored.
pub fn reconstruct_snapshots(capacity: Capacity, deltas: &[StepDelta]) -> Vec<Vec<Option<EntryId>>> {
    let mut table: Vec<Option<EntryId>> = vec![None; capacity.get()];
    let mut snapshots = Vec::with_capacity(deltas.len());

    for delta in deltas {
        if let Some(slot) = delta.slot {
            if let Some(cell) = table.get_mut(slot.0) {
                *cell = Some(delta.entry);
            }
        }
        snapshots.push(table.clone());
    }

    snapshots
}
