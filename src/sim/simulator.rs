//! Simulator - runs one policy over one reference sequence.
//!
//! [`simulate`] is the entry point: it validates the inputs, builds a
//! fresh [`SlotTable`] and [`Replacer`], and drives them through every
//! reference in order.

use serde::Serialize;
use tracing::{debug, error, trace, warn};

use crate::common::{Capacity, EntryId, Error, Result, SlotId};
use crate::sim::replacer::Replacer;
use crate::sim::{PolicyKind, SlotTable};
use crate::trace::{Eviction, Outcome, StepRecord, Summary, Trace};

/// The result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Simulation {
    policy: PolicyKind,
    trace: Trace,
    summary: Summary,
}

impl Simulation {
    pub fn policy(&self) -> PolicyKind {
        self.policy
    }

    pub fn capacity(&self) -> Capacity {
        self.trace.capacity()
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Split into the trace and its summary.
    pub fn into_parts(self) -> (Trace, Summary) {
        (self.trace, self.summary)
    }
}

/// Run the policy named `policy_name` over `references`.
///
/// `capacity` may be any integer type, or an `f64` with no fractional
/// part. All inputs are checked before the first reference is processed.
///
/// # Errors
/// - `Error::InvalidCapacity` if capacity is not an integer in [1, 50]
/// - `Error::EmptyReferenceSequence` if `references` is empty
/// - `Error::UnknownPolicy` if `policy_name` is not FIFO, LRU, OPT or CLOCK
/// - `Error::InternalInvariantViolation` if an engine breaks its own
///   guarantees (a bug); no trace is returned
///
/// # Example
/// ```
/// use evictsim::{simulate, EntryId};
///
/// let refs = EntryId::sequence(&[1, 2, 1, 3, 2]);
/// let run = simulate("OPT", 2, &refs).unwrap();
///
/// assert_eq!(run.summary().faults, 3);
/// assert_eq!(run.trace().get(3).unwrap().evicted_entry(), Some(EntryId(1)));
/// ```
pub fn simulate<C>(policy_name: &str, capacity: C, references: &[EntryId]) -> Result<Simulation>
where
    C: TryInto<Capacity>,
    Error: From<C::Error>,
{
    let capacity = capacity.try_into().map_err(|e| {
        let err = Error::from(e);
        warn!(error = %err, "rejected simulation input");
        err
    })?;
    if references.is_empty() {
        warn!("rejected simulation input: empty reference sequence");
        return Err(Error::EmptyReferenceSequence);
    }
    let policy = policy_name.parse::<PolicyKind>().map_err(|err| {
        warn!(error = %err, "rejected simulation input");
        err
    })?;

    simulate_policy(policy, capacity, references)
}

/// Run `policy` over `references` with an already validated capacity.
///
/// # Errors
/// - `Error::EmptyReferenceSequence` if `references` is empty
/// - `Error::InternalInvariantViolation` on an engine defect
pub fn simulate_policy(
    policy: PolicyKind,
    capacity: Capacity,
    references: &[EntryId],
) -> Result<Simulation> {
    if references.is_empty() {
        return Err(Error::EmptyReferenceSequence);
    }

    let _span = tracing::debug_span!(
        "simulate",
        policy = %policy,
        capacity = capacity.get(),
        references = references.len()
    )
    .entered();

    Simulator::new(policy, capacity, references).finish()
}

/// Owns everything one run mutates. Dropped when the run ends.
struct Simulator<'a> {
    policy: PolicyKind,
    references: &'a [EntryId],
    capacity: Capacity,
    table: SlotTable,
    replacer: Replacer,
    steps: Vec<StepRecord>,
}

impl<'a> Simulator<'a> {
    fn new(policy: PolicyKind, capacity: Capacity, references: &'a [EntryId]) -> Self {
        Self {
            policy,
            references,
            capacity,
            table: SlotTable::new(capacity),
            replacer: Replacer::new(policy, capacity),
            steps: Vec::with_capacity(references.len()),
        }
    }

    /// Run to completion. An engine failure yields the error alone; the
    /// steps recorded before it are discarded.
    fn finish(self) -> Result<Simulation> {
        let policy = self.policy;
        let trace = self.run().map_err(|err| {
            if err.is_input_error() {
                warn!(error = %err, "rejected simulation input");
            } else {
                error!(error = %err, "simulation aborted");
            }
            err
        })?;
        let summary = trace.summary();

        debug!(
            hits = summary.hits,
            faults = summary.faults,
            evictions = summary.evictions,
            "simulation complete"
        );

        Ok(Simulation {
            policy,
            trace,
            summary,
        })
    }

    fn run(mut self) -> Result<Trace> {
        for (index, &entry) in self.references.iter().enumerate() {
            let step = self.access(index, entry)?;
            self.steps.push(step);
        }
        Ok(Trace::new(self.capacity, self.steps))
    }

    // ========================================================================
    // Per-reference decision
    // ========================================================================

    fn access(&mut self, index: usize, entry: EntryId) -> Result<StepRecord> {
        match self.table.find(entry) {
            Some(slot) => Ok(self.handle_hit(index, entry, slot)),
            None => self.handle_fault(index, entry),
        }
    }

    fn handle_hit(&mut self, index: usize, entry: EntryId, slot: SlotId) -> StepRecord {
        self.replacer.record_hit(slot, entry, index);

        self.record(
            index,
            entry,
            Outcome::Hit,
            slot,
            None,
            format!("{} already resident in {}", entry, slot),
        )
    }

    fn handle_fault(&mut self, index: usize, entry: EntryId) -> Result<StepRecord> {
        // First fill: lowest empty slot, nothing displaced
        if let Some(slot) = self.table.first_empty() {
            self.table.place(slot, entry)?;
            self.replacer.record_insert(slot, entry, index);

            return Ok(self.record(
                index,
                entry,
                Outcome::Fault,
                slot,
                None,
                format!("{} loaded into empty {}", entry, slot),
            ));
        }

        let victim = self
            .replacer
            .select_victim(&self.table, self.references, index)?;
        let evicted = self.table.place(victim.slot, entry)?.ok_or_else(|| {
            Error::InternalInvariantViolation(format!(
                "{} policy chose empty {} as victim",
                self.replacer.kind(),
                victim.slot
            ))
        })?;
        self.replacer
            .record_replace(victim.slot, evicted, entry, index);

        trace!(
            index,
            entry = entry.0,
            evicted = evicted.0,
            slot = victim.slot.0,
            reason = %victim.reason,
            "evicted"
        );

        Ok(self.record(
            index,
            entry,
            Outcome::Fault,
            victim.slot,
            Some(Eviction {
                entry: evicted,
                slot: victim.slot,
            }),
            format!(
                "{} replaced {} in {}: {}",
                entry, evicted, victim.slot, victim.reason
            ),
        ))
    }

    fn record(
        &self,
        index: usize,
        entry: EntryId,
        outcome: Outcome,
        slot: SlotId,
        eviction: Option<Eviction>,
        rationale: String,
    ) -> StepRecord {
        StepRecord::new(
            index,
            entry,
            outcome,
            slot,
            self.table.snapshot(),
            eviction,
            rationale,
            self.replacer.state(&self.table),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorKind;
    use crate::trace::PolicyState;

    fn refs(raw: &[u64]) -> Vec<EntryId> {
        EntryId::sequence(raw)
    }

    fn snapshot(raw: &[Option<u64>]) -> Vec<Option<EntryId>> {
        raw.iter().map(|s| s.map(EntryId)).collect()
    }

    #[test]
    fn test_first_fill_uses_lowest_slot() {
        let run = simulate("FIFO", 3, &refs(&[4, 5])).unwrap();
        let trace = run.trace();

        assert_eq!(trace.get(0).unwrap().slots(), &snapshot(&[Some(4), None, None])[..]);
        assert_eq!(trace.get(1).unwrap().slots(), &snapshot(&[Some(4), Some(5), None])[..]);
        assert!(trace.iter().all(|s| s.eviction().is_none()));
    }

    #[test]
    fn test_hit_leaves_table_unchanged() {
        let run = simulate("LRU", 2, &refs(&[1, 1])).unwrap();
        let hit = run.trace().get(1).unwrap();

        assert!(hit.is_hit());
        assert_eq!(hit.slot(), SlotId(0));
        assert_eq!(hit.slots(), &snapshot(&[Some(1), None])[..]);
    }

    #[test]
    fn test_fifo_evicts_in_load_order() {
        let run = simulate("FIFO", 2, &refs(&[1, 2, 1, 3, 4])).unwrap();
        let evicted: Vec<u64> = run
            .trace()
            .evictions()
            .filter_map(|s| s.evicted_entry())
            .map(|e| e.0)
            .collect();

        assert_eq!(evicted, vec![1, 2]);
    }

    #[test]
    fn test_clock_state_recorded_each_step() {
        let run = simulate("CLOCK", 2, &refs(&[1, 2, 1, 3, 2])).unwrap();
        let step = run.trace().get(3).unwrap();

        assert_eq!(
            step.policy_state(),
            Some(&PolicyState::Clock {
                ref_bits: vec![true, false],
                hand: SlotId(1),
                swept: 3,
            })
        );
        assert_eq!(step.evicted_entry(), Some(EntryId(1)));
    }

    #[test]
    fn test_capacity_one() {
        let run = simulate("CLOCK", 1, &refs(&[1, 2, 2, 1])).unwrap();
        assert_eq!(run.summary().hits, 1);
        assert_eq!(run.summary().faults, 3);
        assert_eq!(run.summary().evictions, 2);
    }

    #[test]
    fn test_validation_before_policy() {
        let err = simulate("BOGUS", 0, &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCapacity);

        let err = simulate("BOGUS", 2, &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyReferenceSequence);

        let err = simulate("BOGUS", 2, &refs(&[1])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownPolicy);
    }

    #[test]
    fn test_simulate_policy_rejects_empty() {
        let capacity = Capacity::new(2).unwrap();
        let err = simulate_policy(PolicyKind::Lru, capacity, &[]).unwrap_err();
        assert_eq!(err, Error::EmptyReferenceSequence);
    }

    #[test]
    fn test_accepts_validated_capacity() {
        let capacity = Capacity::new(3).unwrap();
        let run = simulate("OPT", capacity, &refs(&[1, 2, 3, 4])).unwrap();
        assert_eq!(run.capacity(), capacity);
        assert_eq!(run.policy(), PolicyKind::Opt);
    }

    #[test]
    fn test_engine_failure_returns_no_trace() {
        let references = refs(&[1, 2, 3]);
        let mut simulator =
            Simulator::new(PolicyKind::Lru, Capacity::new(2).unwrap(), &references);
        // Resident entries the replacer never saw: the first victim
        // selection has no timestamp to compare
        simulator.table.place(SlotId(0), EntryId(90)).unwrap();
        simulator.table.place(SlotId(1), EntryId(91)).unwrap();

        let err = simulator.finish().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InternalInvariantViolation);
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_engine_failure_after_progress() {
        let references = refs(&[1, 2, 3]);
        let mut simulator =
            Simulator::new(PolicyKind::Lru, Capacity::new(2).unwrap(), &references);
        simulator.table.place(SlotId(1), EntryId(91)).unwrap();

        // Step 0 fills slot 0; step 1 then needs a victim and fails
        let result = simulator.finish();
        assert!(matches!(
            result,
            Err(Error::InternalInvariantViolation(_))
        ));
    }

    #[test]
    fn test_into_parts() {
        let run = simulate("LRU", 2, &refs(&[1, 2, 3])).unwrap();
        let (trace, summary) = run.into_parts();
        assert_eq!(trace.len(), 3);
        assert_eq!(summary, trace.summary());
    }
}
