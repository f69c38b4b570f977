//! Cross-policy comparison and capacity sweeps.
//!
//! Everything here is aggregation over independent runs of
//! [`simulate`](crate::sim::simulate); no run shares state with another.

use serde::Serialize;
use tracing::{debug, warn};

use crate::common::{Capacity, EntryId, Error, Result};
use crate::sim::{simulate_policy, PolicyKind};
use crate::trace::Summary;

/// One policy's totals in a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub policy: PolicyKind,
    pub hits: u64,
    pub faults: u64,
    pub hit_ratio: f64,
    pub fault_ratio: f64,
}

impl ComparisonRow {
    fn new(policy: PolicyKind, summary: Summary) -> Self {
        Self {
            policy,
            hits: summary.hits,
            faults: summary.faults,
            hit_ratio: summary.hit_ratio(),
            fault_ratio: summary.fault_ratio(),
        }
    }
}

/// Run FIFO, LRU, OPT and CLOCK over the same input and rank them.
///
/// Rows are ordered by ascending faults, then descending hits. Ties keep
/// the fixed policy order (FIFO, LRU, OPT, CLOCK).
///
/// # Errors
/// Same as [`simulate`](crate::sim::simulate); inputs are validated once before any run.
///
/// # Example
/// ```
/// use evictsim::{compare_all, EntryId, PolicyKind};
///
/// let refs = EntryId::sequence(&[1, 2, 1, 3, 2]);
/// let rows = compare_all(2, &refs).unwrap();
///
/// assert_eq!(rows[0].faults, 3);
/// assert_eq!(rows[3].policy, PolicyKind::Lru);
/// ```
pub fn compare_all<C>(capacity: C, references: &[EntryId]) -> Result<Vec<ComparisonRow>>
where
    C: TryInto<Capacity>,
    Error: From<C::Error>,
{
    let capacity: Capacity = capacity.try_into().map_err(|e| {
        let err = Error::from(e);
        warn!(error = %err, "rejected comparison input");
        err
    })?;
    if references.is_empty() {
        warn!("rejected comparison input: empty reference sequence");
        return Err(Error::EmptyReferenceSequence);
    }

    let mut rows = PolicyKind::ALL
        .into_iter()
        .map(|kind| {
            let run = simulate_policy(kind, capacity, references)?;
            Ok(ComparisonRow::new(kind, run.summary()))
        })
        .collect::<Result<Vec<_>>>()?;

    // sort_by is stable, so equal rows keep PolicyKind::ALL order
    rows.sort_by(|a, b| a.faults.cmp(&b.faults).then(b.hits.cmp(&a.hits)));

    debug!(
        capacity = capacity.get(),
        best = %rows[0].policy,
        best_faults = rows[0].faults,
        "comparison ranked"
    );

    Ok(rows)
}

/// Run one policy at each of `capacities`, in the order given.
///
/// # Errors
/// - `Error::InvalidCapacity` for the first capacity out of range
/// - `Error::EmptyReferenceSequence` if `references` is empty
pub fn capacity_sweep<I>(
    policy: PolicyKind,
    references: &[EntryId],
    capacities: I,
) -> Result<Vec<(Capacity, Summary)>>
where
    I: IntoIterator<Item = usize>,
{
    let capacities = capacities
        .into_iter()
        .map(Capacity::new)
        .collect::<Result<Vec<_>>>()?;

    capacities
        .into_iter()
        .map(|capacity| {
            let run = simulate_policy(policy, capacity, references)?;
            Ok((capacity, run.summary()))
        })
        .collect()
}

/// A capacity increase that produced more faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Anomaly {
    pub smaller: Capacity,
    pub smaller_faults: u64,
    pub larger: Capacity,
    pub larger_faults: u64,
}

/// Adjacent sweep points where faults rose while capacity grew
/// (Belady's anomaly).
///
/// Stack algorithms such as LRU and OPT never report any.
///
/// # Errors
/// Same as [`capacity_sweep`].
pub fn find_belady_anomalies<I>(
    policy: PolicyKind,
    references: &[EntryId],
    capacities: I,
) -> Result<Vec<Anomaly>>
where
    I: IntoIterator<Item = usize>,
{
    let sweep = capacity_sweep(policy, references, capacities)?;

    Ok(sweep
        .windows(2)
        .filter_map(|pair| {
            let (smaller, low) = pair[0];
            let (larger, high) = pair[1];
            (larger > smaller && high.faults > low.faults).then_some(Anomaly {
                smaller,
                smaller_faults: low.faults,
                larger,
                larger_faults: high.faults,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorKind;

    fn belady() -> Vec<EntryId> {
        EntryId::sequence(&[1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5])
    }

    #[test]
    fn test_compare_ranks_by_faults() {
        let rows = compare_all(2, &EntryId::sequence(&[1, 2, 1, 3, 2])).unwrap();
        let order: Vec<PolicyKind> = rows.iter().map(|r| r.policy).collect();

        // FIFO, OPT and CLOCK tie on 3 faults; LRU has 4
        assert_eq!(
            order,
            vec![
                PolicyKind::Fifo,
                PolicyKind::Opt,
                PolicyKind::Clock,
                PolicyKind::Lru
            ]
        );
        assert_eq!(rows[3].faults, 4);
        assert_eq!(rows[3].fault_ratio, 0.8);
    }

    #[test]
    fn test_compare_accepts_validated_capacity() {
        let refs = EntryId::sequence(&[1, 2, 1, 3, 2]);
        let from_capacity = compare_all(Capacity::new(2).unwrap(), &refs).unwrap();
        let from_int = compare_all(2, &refs).unwrap();
        assert_eq!(from_capacity, from_int);
        assert_eq!(from_capacity[0].policy, PolicyKind::Fifo);
    }

    #[test]
    fn test_compare_integral_float_matches_int() {
        let from_float = compare_all(2.0, &belady()).unwrap();
        let from_int = compare_all(2, &belady()).unwrap();
        assert_eq!(from_float, from_int);

        assert_eq!(
            compare_all(2.5, &belady()).unwrap_err().kind(),
            ErrorKind::InvalidCapacity
        );
    }

    #[test]
    fn test_compare_matches_single_runs() {
        let refs = belady();
        for row in compare_all(3, &refs).unwrap() {
            let run = crate::sim::simulate(row.policy.name(), 3, &refs).unwrap();
            assert_eq!(row.faults, run.summary().faults);
            assert_eq!(row.hits, run.summary().hits);
        }
    }

    #[test]
    fn test_compare_ratios_sum_to_one() {
        let rows = compare_all(3, &belady()).unwrap();
        assert_eq!(rows.len(), 4);
        for row in rows {
            assert!((row.hit_ratio + row.fault_ratio - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_compare_validates_once() {
        assert_eq!(
            compare_all(0, &belady()).unwrap_err().kind(),
            ErrorKind::InvalidCapacity
        );
        assert_eq!(
            compare_all(3, &[]).unwrap_err().kind(),
            ErrorKind::EmptyReferenceSequence
        );
    }

    #[test]
    fn test_sweep_fifo() {
        let sweep = capacity_sweep(PolicyKind::Fifo, &belady(), 1..=5).unwrap();
        let faults: Vec<u64> = sweep.iter().map(|(_, s)| s.faults).collect();
        assert_eq!(faults, vec![12, 12, 9, 10, 5]);
    }

    #[test]
    fn test_sweep_rejects_bad_capacity() {
        let err = capacity_sweep(PolicyKind::Lru, &belady(), [2, 0, 3]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCapacity);
    }

    #[test]
    fn test_fifo_belady_anomaly_found() {
        let anomalies = find_belady_anomalies(PolicyKind::Fifo, &belady(), 1..=5).unwrap();
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].smaller.get(), 3);
        assert_eq!(anomalies[0].smaller_faults, 9);
        assert_eq!(anomalies[0].larger.get(), 4);
        assert_eq!(anomalies[0].larger_faults, 10);
    }

    #[test]
    fn test_stack_algorithms_have_no_anomaly() {
        for policy in [PolicyKind::Lru, PolicyKind::Opt] {
            let anomalies = find_belady_anomalies(policy, &belady(), 1..=7).unwrap();
            assert!(anomalies.is_empty(), "{} reported {:?}", policy, anomalies);
        }
    }
}
