//! Configuration constants for evictsim.

/// Smallest number of slots a simulated table may have.
pub const MIN_CAPACITY: usize = 1;

/// Largest number of slots a simulated table may have.
///
/// Every step stores a full snapshot of the table, so the bound keeps
/// a trace at `references × 50` slot values in the worst case.
pub const MAX_CAPACITY: usize = 50;

/// Multiplier on capacity bounding one CLOCK eviction sweep.
///
/// One revolution can clear every reference bit; the second is then
/// guaranteed to find a zero. Any sweep longer than
/// `CLOCK_SCAN_BOUND_FACTOR × capacity` is a logic defect.
pub const CLOCK_SCAN_BOUND_FACTOR: usize = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_bounds() {
        assert!(MIN_CAPACITY >= 1);
        assert!(MIN_CAPACITY <= MAX_CAPACITY);
        assert_eq!(MAX_CAPACITY, 50);
    }

    #[test]
    fn test_clock_bound_covers_two_revolutions() {
        assert_eq!(CLOCK_SCAN_BOUND_FACTOR * MAX_CAPACITY, 100);
    }
}
