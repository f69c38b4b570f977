//! Aggregate hit/fault counts for a run.

use std::fmt;

use serde::Serialize;

use crate::trace::StepRecord;

/// Totals over a complete trace.
///
/// `hits + faults` always equals the number of references simulated.
///
/// # Example
/// ```
/// use evictsim::simulate;
///
/// let refs = evictsim::EntryId::sequence(&[1, 2, 1]);
/// let run = simulate("LRU", 2, &refs).unwrap();
/// let summary = run.summary();
///
/// assert_eq!(summary.hits, 1);
/// assert_eq!(summary.faults, 2);
/// println!("{}", summary);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// References that found their entry resident.
    pub hits: u64,

    /// References that had to load their entry.
    pub faults: u64,

    /// Faults that displaced a resident entry.
    pub evictions: u64,
}

impl Summary {
    /// Tally a sequence of step records.
    pub fn from_steps<'a>(steps: impl IntoIterator<Item = &'a StepRecord>) -> Self {
        steps.into_iter().fold(Summary::default(), |mut acc, step| {
            if step.is_hit() {
                acc.hits += 1;
            } else {
                acc.faults += 1;
            }
            if step.eviction().is_some() {
                acc.evictions += 1;
            }
            acc
        })
    }

    /// Number of references simulated.
    pub fn total(&self) -> u64 {
        self.hits + self.faults
    }

    /// Hit ratio (0.0 to 1.0).
    pub fn hit_ratio(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Fault ratio (0.0 to 1.0).
    pub fn fault_ratio(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.faults as f64 / total as f64
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Summary {{ hits: {}, faults: {}, evictions: {}, hit_ratio: {:.2}% }}",
            self.hits,
            self.faults,
            self.evictions,
            self.hit_ratio() * 100.0
        )
    }
}
