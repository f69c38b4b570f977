//! Slot table - the fixed set of resident slots.
//!
//! A [`SlotTable`] is the simulated equivalent of a buffer pool's frames:
//! `capacity` positions, each empty or holding one entry.

use std::collections::HashMap;

use crate::common::{Capacity, EntryId, Error, Result, SlotId};

/// Fixed-capacity ordered table of slots.
///
/// # Invariants
/// - The number of slots never changes after construction.
/// - An entry occupies at most one slot.
/// - `index` maps exactly the occupied slots.
///
/// ```text
/// ┌────────────────────────────────────────────┐
/// │ index: EntryId → SlotId                    │
/// │   {7 → 0, 3 → 1}                           │
/// ├────────────────────────────────────────────┤
/// │ slots: [Some(7)] [Some(3)] [None] [None]   │
/// └────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone)]
pub struct SlotTable {
    /// One element per slot; `None` means empty.
    slots: Vec<Option<EntryId>>,

    /// Reverse map for O(1) residency checks.
    index: HashMap<EntryId, SlotId>,
}

impl SlotTable {
    /// Create a table with every slot empty.
    pub fn new(capacity: Capacity) -> Self {
        Self {
            slots: vec![None; capacity.get()],
            index: HashMap::with_capacity(capacity.get()),
        }
    }

    /// Number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.index.len() == self.slots.len()
    }

    /// Occupant of `slot`, if any.
    #[inline]
    pub fn get(&self, slot: SlotId) -> Option<EntryId> {
        self.slots.get(slot.0).copied().flatten()
    }

    /// Slot holding `entry`, if resident.
    #[inline]
    pub fn find(&self, entry: EntryId) -> Option<SlotId> {
        self.index.get(&entry).copied()
    }

    /// Lowest-indexed empty slot.
    pub fn first_empty(&self) -> Option<SlotId> {
        self.slots.iter().position(Option::is_none).map(SlotId)
    }

    /// Occupied slots in ascending slot order.
    pub fn occupied(&self) -> impl Iterator<Item = (SlotId, EntryId)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|entry| (SlotId(i), entry)))
    }

    /// Put `entry` into `slot`, returning the previous occupant.
    ///
    /// # Errors
    /// - `Error::InternalInvariantViolation` if `slot` is out of range or
    ///   `entry` is already resident elsewhere
    pub fn place(&mut self, slot: SlotId, entry: EntryId) -> Result<Option<EntryId>> {
        if slot.0 >= self.slots.len() {
            return Err(Error::InternalInvariantViolation(format!(
                "{} out of range for {} slots",
                slot,
                self.slots.len()
            )));
        }
        if let Some(existing) = self.find(entry) {
            if existing != slot {
                return Err(Error::InternalInvariantViolation(format!(
                    "entry {} already resident in {}",
                    entry, existing
                )));
            }
        }

        let previous = self.slots[slot.0].replace(entry);
        if let Some(old) = previous {
            self.index.remove(&old);
        }
        self.index.insert(entry, slot);

        Ok(previous)
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> Vec<Option<EntryId>> {
        self.slots.clone()
    }
}
