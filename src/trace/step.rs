//! Step records - one immutable entry per processed reference.

use serde::Serialize;

use crate::common::{EntryId, SlotId};

/// Whether a reference found its entry resident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The entry was already resident.
    Hit,
    /// The entry had to be loaded.
    Fault,
}

impl Outcome {
    #[inline]
    pub fn is_hit(self) -> bool {
        self == Outcome::Hit
    }

    #[inline]
    pub fn is_fault(self) -> bool {
        self == Outcome::Fault
    }
}

/// The resident entry displaced by a fault on a full table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Eviction {
    /// Entry that was removed.
    pub entry: EntryId,
    /// Slot it was removed from (the new entry now lives here).
    pub slot: SlotId,
}

/// Distance to an entry's next use, as seen by the OPT engine.
///
/// Variant order matters: every `At` sorts before `Never`, so a plain
/// `>` comparison finds the farthest next use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NextUse {
    /// Referenced again at this position of the sequence.
    At(usize),
    /// Never referenced again.
    Never,
}

/// Policy bookkeeping captured after a step.
///
/// Each variant holds only what its engine tracks. Vectors are
/// parallel to the slot table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum PolicyState {
    /// Slot the FIFO pointer will evict next.
    Fifo { next_victim: SlotId },

    /// Last-referenced position of each slot's occupant.
    Lru { last_used: Vec<Option<usize>> },

    /// Next use of each slot's occupant, as evaluated for an eviction.
    ///
    /// Only recorded on steps that evicted.
    Opt { next_use: Vec<NextUse> },

    /// Reference bits, hand position, and how many slots the hand
    /// examined during this step (0 when no sweep ran).
    Clock {
        ref_bits: Vec<bool>,
        hand: SlotId,
        swept: usize,
    },
}

/// Outcome of one reference.
///
/// Records are produced by the engine and never modified afterwards;
/// every field is exposed through a read-only accessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    index: usize,
    entry: EntryId,
    outcome: Outcome,
    slot: SlotId,
    slots: Vec<Option<EntryId>>,
    eviction: Option<Eviction>,
    rationale: String,
    policy_state: Option<PolicyState>,
}

impl StepRecord {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        index: usize,
        entry: EntryId,
        outcome: Outcome,
        slot: SlotId,
        slots: Vec<Option<EntryId>>,
        eviction: Option<Eviction>,
        rationale: String,
        policy_state: Option<PolicyState>,
    ) -> Self {
        Self {
            index,
            entry,
            outcome,
            slot,
            slots,
            eviction,
            rationale,
            policy_state,
        }
    }

    /// Position of this reference in the input sequence.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The requested entry.
    #[inline]
    pub fn entry(&self) -> EntryId {
        self.entry
    }

    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.outcome.is_hit()
    }

    #[inline]
    pub fn is_fault(&self) -> bool {
        self.outcome.is_fault()
    }

    /// Slot holding the requested entry after this step.
    #[inline]
    pub fn slot(&self) -> SlotId {
        self.slot
    }

    /// Table contents after this step, one element per slot.
    #[inline]
    pub fn slots(&self) -> &[Option<EntryId>] {
        &self.slots
    }

    #[inline]
    pub fn eviction(&self) -> Option<Eviction> {
        self.eviction
    }

    #[inline]
    pub fn evicted_entry(&self) -> Option<EntryId> {
        self.eviction.map(|e| e.entry)
    }

    #[inline]
    pub fn evicted_slot(&self) -> Option<SlotId> {
        self.eviction.map(|e| e.slot)
    }

    /// Human-readable explanation of the decision. Informational only.
    #[inline]
    pub fn rationale(&self) -> &str {
        &self.rationale
    }

    #[inline]
    pub fn policy_state(&self) -> Option<&PolicyState> {
        self.policy_state.as_ref()
    }

    /// Reduce this record to what changed.
    pub fn delta(&self) -> StepDelta {
        StepDelta {
            index: self.index,
            entry: self.entry,
            slot: self.is_fault().then_some(self.slot),
            evicted: self.evicted_entry(),
        }
    }
}

/// Compact form of a step: only the slot written, if any.
///
/// A sequence of deltas is enough to rebuild every snapshot; see
/// [`reconstruct_snapshots`](crate::trace::reconstruct_snapshots).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepDelta {
    pub index: usize,
    pub entry: EntryId,
    /// Slot written on a fault; `None` on a hit.
    pub slot: Option<SlotId>,
    pub evicted: Option<EntryId>,
}
