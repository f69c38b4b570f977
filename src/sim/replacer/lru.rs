//! LRU (Least Recently Used) replacement policy.

use std::collections::HashMap;

use crate::common::{EntryId, Error, Result, SlotId};
use crate::sim::replacer::Victim;
use crate::sim::SlotTable;
use crate::trace::PolicyState;

/// Evicts the resident entry whose last reference is oldest.
///
/// Bookkeeping is a map from resident entry to the position of its most
/// recent reference; loading an entry counts as referencing it.
#[derive(Debug, Clone, Default)]
pub struct LruReplacer {
    last_used: HashMap<EntryId, usize>,
}

impl LruReplacer {
    /// Create a new LRU replacer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp `entry` as referenced at `index`.
    pub fn record_access(&mut self, entry: EntryId, index: usize) {
        self.last_used.insert(entry, index);
    }

    /// Slot whose occupant has the smallest timestamp.
    ///
    /// Slots are scanned in ascending order and only a strictly smaller
    /// timestamp replaces the current best, so ties go to the lowest slot.
    ///
    /// # Errors
    /// - `Error::InternalInvariantViolation` if a resident entry has no
    ///   timestamp or the table is empty
    pub fn select_victim(&self, table: &SlotTable) -> Result<Victim> {
        let mut best: Option<(SlotId, usize)> = None;

        for (slot, entry) in table.occupied() {
            let last = self.last_used.get(&entry).copied().ok_or_else(|| {
                Error::InternalInvariantViolation(format!(
                    "LRU has no timestamp for resident entry {}",
                    entry
                ))
            })?;

            match best {
                Some((_, best_last)) if last >= best_last => {}
                _ => best = Some((slot, last)),
            }
        }

        let (slot, last) = best.ok_or_else(|| {
            Error::InternalInvariantViolation("LRU victim requested on empty table".to_string())
        })?;

        Ok(Victim {
            slot,
            reason: format!("least recently used, last referenced at {}", last),
        })
    }

    /// Drop the evicted entry's stamp, then stamp the newcomer.
    pub fn record_replace(&mut self, evicted: EntryId, entry: EntryId, index: usize) {
        self.last_used.remove(&evicted);
        self.last_used.insert(entry, index);
    }

    /// Timestamps laid out by slot.
    pub fn state(&self, table: &SlotTable) -> PolicyState {
        let last_used = (0..table.capacity())
            .map(|i| {
                table
                    .get(SlotId(i))
                    .and_then(|entry| self.last_used.get(&entry).copied())
            })
            .collect();
        PolicyState::Lru { last_used }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Capacity;

    fn filled(entries: &[(u64, usize)]) -> (SlotTable, LruReplacer) {
        let mut table = SlotTable::new(Capacity::new(entries.len()).unwrap());
        let mut lru = LruReplacer::new();
        for (slot, &(entry, at)) in entries.iter().enumerate() {
            table.place(SlotId(slot), EntryId(entry)).unwrap();
            lru.record_access(EntryId(entry), at);
        }
        (table, lru)
    }

    #[test]
    fn test_lru_picks_oldest() {
        let (table, lru) = filled(&[(1, 4), (2, 1), (3, 7)]);
        assert_eq!(lru.select_victim(&table).unwrap().slot, SlotId(1));
    }

    #[test]
    fn test_lru_hit_refreshes() {
        let (table, mut lru) = filled(&[(1, 0), (2, 1)]);
        lru.record_access(EntryId(1), 2);
        assert_eq!(lru.select_victim(&table).unwrap().slot, SlotId(1));
    }

    #[test]
    fn test_lru_tie_goes_to_lowest_slot() {
        let (table, lru) = filled(&[(1, 5), (2, 3), (3, 3)]);
        assert_eq!(lru.select_victim(&table).unwrap().slot, SlotId(1));
    }

    #[test]
    fn test_lru_replace_drops_evicted() {
        let (_, mut lru) = filled(&[(1, 0), (2, 1)]);
        lru.record_replace(EntryId(1), EntryId(3), 2);
        assert_eq!(lru.last_used.len(), 2);
        assert!(!lru.last_used.contains_key(&EntryId(1)));
        assert_eq!(lru.last_used.get(&EntryId(3)), Some(&2));
    }

    #[test]
    fn test_lru_missing_stamp_is_invariant_error() {
        let mut table = SlotTable::new(Capacity::new(1).unwrap());
        table.place(SlotId(0), EntryId(1)).unwrap();
        let lru = LruReplacer::new();

        let err = lru.select_victim(&table).unwrap_err();
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_lru_state_by_slot() {
        let (table, lru) = filled(&[(8, 2), (9, 0)]);
        assert_eq!(
            lru.state(&table),
            PolicyState::Lru {
                last_used: vec![Some(2), Some(0)]
            }
        );
    }
}
