//! OPT (Belady's optimal) replacement policy.

use crate::common::{EntryId, Error, Result, SlotId};
use crate::sim::replacer::Victim;
use crate::sim::SlotTable;
use crate::trace::{NextUse, PolicyState};

/// Evicts the resident entry whose next reference is farthest away.
///
/// OPT needs the whole future, so it keeps no bookkeeping between
/// faults: every full-table fault rescans the rest of the reference
/// sequence for each resident entry. That is O(capacity × remaining)
/// per fault and stays that way; it models the optimal decision, not a
/// fast one.
///
/// The only field is scratch space holding the next-use distances of
/// the most recent eviction, so the step that evicted can report them.
#[derive(Debug, Clone, Default)]
pub struct OptReplacer {
    last_evaluation: Option<Vec<NextUse>>,
}

/// First position after `index` where `entry` is referenced again.
pub fn next_use(references: &[EntryId], index: usize, entry: EntryId) -> NextUse {
    let start = index + 1;
    references
        .get(start..)
        .and_then(|future| future.iter().position(|&r| r == entry))
        .map_or(NextUse::Never, |offset| NextUse::At(start + offset))
}

impl OptReplacer {
    /// Create a new OPT replacer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous step's evaluation.
    pub fn clear(&mut self) {
        self.last_evaluation = None;
    }

    /// Slot whose occupant is needed last (or never) after `index`.
    ///
    /// Slots are scanned in ascending order and a candidate only wins
    /// with a strictly farther next use, so ties go to the lowest slot.
    ///
    /// # Errors
    /// - `Error::InternalInvariantViolation` if the table is empty
    pub fn select_victim(
        &mut self,
        table: &SlotTable,
        references: &[EntryId],
        index: usize,
    ) -> Result<Victim> {
        let mut evaluation = Vec::with_capacity(table.capacity());
        let mut best: Option<(SlotId, NextUse)> = None;

        for (slot, entry) in table.occupied() {
            let next = next_use(references, index, entry);
            evaluation.push(next);

            match best {
                Some((_, farthest)) if next <= farthest => {}
                _ => best = Some((slot, next)),
            }
        }

        let (slot, next) = best.ok_or_else(|| {
            Error::InternalInvariantViolation("OPT victim requested on empty table".to_string())
        })?;
        self.last_evaluation = Some(evaluation);

        let reason = match next {
            NextUse::Never => "never referenced again".to_string(),
            NextUse::At(at) => format!("next referenced at {}, farthest in the future", at),
        };
        Ok(Victim { slot, reason })
    }

    /// Next-use distances behind the latest eviction, if this step evicted.
    pub fn state(&self) -> Option<PolicyState> {
        self.last_evaluation
            .as_ref()
            .map(|next_use| PolicyState::Opt {
                next_use: next_use.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Capacity;

    fn full_table(entries: &[u64]) -> SlotTable {
        let mut table = SlotTable::new(Capacity::new(entries.len()).unwrap());
        for (slot, &entry) in entries.iter().enumerate() {
            table.place(SlotId(slot), EntryId(entry)).unwrap();
        }
        table
    }

    #[test]
    fn test_next_use() {
        let refs = EntryId::sequence(&[1, 2, 1, 3, 2]);
        assert_eq!(next_use(&refs, 3, EntryId(2)), NextUse::At(4));
        assert_eq!(next_use(&refs, 3, EntryId(1)), NextUse::Never);
        assert_eq!(next_use(&refs, 0, EntryId(1)), NextUse::At(2));
        assert_eq!(next_use(&refs, 4, EntryId(2)), NextUse::Never);
    }

    #[test]
    fn test_opt_prefers_never_used() {
        let refs = EntryId::sequence(&[1, 2, 1, 3, 2]);
        let table = full_table(&[1, 2]);
        let mut opt = OptReplacer::new();

        let victim = opt.select_victim(&table, &refs, 3).unwrap();
        assert_eq!(victim.slot, SlotId(0));
    }

    #[test]
    fn test_opt_picks_farthest() {
        let refs = EntryId::sequence(&[1, 2, 3, 4, 3, 1, 2]);
        let table = full_table(&[1, 2, 3]);
        let mut opt = OptReplacer::new();

        let victim = opt.select_victim(&table, &refs, 3).unwrap();
        assert_eq!(victim.slot, SlotId(1));
        assert_eq!(
            opt.state(),
            Some(PolicyState::Opt {
                next_use: vec![NextUse::At(5), NextUse::At(6), NextUse::At(4)]
            })
        );
    }

    #[test]
    fn test_opt_tie_goes_to_lowest_slot() {
        let refs = EntryId::sequence(&[1, 2, 3, 4]);
        let table = full_table(&[1, 2, 3]);
        let mut opt = OptReplacer::new();

        let victim = opt.select_victim(&table, &refs, 3).unwrap();
        assert_eq!(victim.slot, SlotId(0));
    }

    #[test]
    fn test_opt_clear_forgets_evaluation() {
        let refs = EntryId::sequence(&[1, 2]);
        let table = full_table(&[1]);
        let mut opt = OptReplacer::new();
        opt.select_victim(&table, &refs, 1).unwrap();
        assert!(opt.state().is_some());

        opt.clear();
        assert!(opt.state().is_none());
    }
}
