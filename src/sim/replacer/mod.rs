//! Eviction policy implementations (replacers).
//!
//! - [`FifoReplacer`] - evict in load order
//! - [`LruReplacer`] - evict the least recently referenced
//! - [`OptReplacer`] - evict the entry needed farthest in the future
//! - [`ClockReplacer`] - second chance with one reference bit per slot
//!
//! [`Replacer`] wraps exactly one of them. Each variant owns only the
//! state its algorithm needs, and a fresh one is built for every run.

mod clock;
mod fifo;
mod lru;
mod opt;

pub use clock::ClockReplacer;
pub use fifo::FifoReplacer;
pub use lru::LruReplacer;
pub use opt::{next_use, OptReplacer};

use crate::common::{Capacity, EntryId, Result, SlotId};
use crate::sim::{PolicyKind, SlotTable};
use crate::trace::PolicyState;

/// A replacer's choice of slot on a full-table fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Victim {
    pub slot: SlotId,
    /// Why this slot was chosen, phrased for the step rationale.
    pub reason: String,
}

/// Per-run policy bookkeeping, tagged by policy.
#[derive(Debug, Clone)]
pub enum Replacer {
    Fifo(FifoReplacer),
    Lru(LruReplacer),
    Opt(OptReplacer),
    Clock(ClockReplacer),
}

impl Replacer {
    /// Fresh bookkeeping for `kind` over `capacity` slots.
    pub fn new(kind: PolicyKind, capacity: Capacity) -> Self {
        match kind {
            PolicyKind::Fifo => Replacer::Fifo(FifoReplacer::new(capacity)),
            PolicyKind::Lru => Replacer::Lru(LruReplacer::new()),
            PolicyKind::Opt => Replacer::Opt(OptReplacer::new()),
            PolicyKind::Clock => Replacer::Clock(ClockReplacer::new(capacity)),
        }
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            Replacer::Fifo(_) => PolicyKind::Fifo,
            Replacer::Lru(_) => PolicyKind::Lru,
            Replacer::Opt(_) => PolicyKind::Opt,
            Replacer::Clock(_) => PolicyKind::Clock,
        }
    }

    /// `entry` was found resident in `slot` at position `index`.
    pub fn record_hit(&mut self, slot: SlotId, entry: EntryId, index: usize) {
        match self {
            Replacer::Fifo(_) => {}
            Replacer::Lru(lru) => lru.record_access(entry, index),
            Replacer::Opt(opt) => opt.clear(),
            Replacer::Clock(clock) => clock.record_access(slot),
        }
    }

    /// `entry` was loaded into the empty `slot` at position `index`.
    pub fn record_insert(&mut self, slot: SlotId, entry: EntryId, index: usize) {
        match self {
            Replacer::Fifo(_) => {}
            Replacer::Lru(lru) => lru.record_access(entry, index),
            Replacer::Opt(opt) => opt.clear(),
            Replacer::Clock(clock) => clock.record_access(slot),
        }
    }

    /// Choose the slot to evict for the fault at `index`.
    ///
    /// Only called when `table` is full. `references` is the whole input
    /// sequence; only OPT looks past `index`.
    ///
    /// # Errors
    /// - `Error::InternalInvariantViolation` if the policy cannot name a
    ///   victim, which only happens on a logic defect
    pub fn select_victim(
        &mut self,
        table: &SlotTable,
        references: &[EntryId],
        index: usize,
    ) -> Result<Victim> {
        match self {
            Replacer::Fifo(fifo) => Ok(fifo.select_victim()),
            Replacer::Lru(lru) => lru.select_victim(table),
            Replacer::Opt(opt) => opt.select_victim(table, references, index),
            Replacer::Clock(clock) => clock.select_victim(),
        }
    }

    /// `evicted` left `slot` and `entry` took its place at position `index`.
    pub fn record_replace(&mut self, slot: SlotId, evicted: EntryId, entry: EntryId, index: usize) {
        match self {
            Replacer::Fifo(fifo) => fifo.record_replace(slot),
            Replacer::Lru(lru) => lru.record_replace(evicted, entry, index),
            Replacer::Opt(_) => {}
            Replacer::Clock(clock) => clock.record_replace(slot),
        }
    }

    /// Bookkeeping after the current step, for the step record.
    pub fn state(&self, table: &SlotTable) -> Option<PolicyState> {
        match self {
            Replacer::Fifo(fifo) => Some(fifo.state()),
            Replacer::Lru(lru) => Some(lru.state(table)),
            Replacer::Opt(opt) => opt.state(),
            Replacer::Clock(clock) => Some(clock.state()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replacer_kind_round_trip() {
        let capacity = Capacity::new(3).unwrap();
        for kind in PolicyKind::ALL {
            assert_eq!(Replacer::new(kind, capacity).kind(), kind);
        }
    }

    #[test]
    fn test_opt_has_no_state_without_eviction() {
        let capacity = Capacity::new(2).unwrap();
        let table = SlotTable::new(capacity);
        let mut replacer = Replacer::new(PolicyKind::Opt, capacity);
        replacer.record_insert(SlotId(0), EntryId(1), 0);
        assert!(replacer.state(&table).is_none());
    }

    #[test]
    fn test_fifo_ignores_hits() {
        let capacity = Capacity::new(2).unwrap();
        let table = SlotTable::new(capacity);
        let mut replacer = Replacer::new(PolicyKind::Fifo, capacity);

        replacer.record_hit(SlotId(1), EntryId(5), 3);

        let victim = replacer.select_victim(&table, &[], 4).unwrap();
        assert_eq!(victim.slot, SlotId(0));
    }
}
