//! CLOCK (second-chance) replacement policy.
//!
//! ```text
//!   [0]     [1]     [2]     [3]
//!  ┌───┐   ┌───┐   ┌───┐   ┌───┐
//!  │ A │   │ B │   │ C │   │ D │
//!  │ 1 │   │ 0 │   │ 1 │   │ 1 │   ← reference bits
//!  └───┘   └───┘   └───┘   └───┘
//!    ▲
//!   hand
//!
//! sweep: bit 1 → clear, advance, keep going
//!        bit 0 → evict here, new entry gets bit 1, advance, stop
//! ```
//!
//! Every bit the hand passes is cleared, so after one revolution all
//! bits are zero and the next slot examined is a victim. A sweep longer
//! than [`CLOCK_SCAN_BOUND_FACTOR`] × capacity therefore means the code
//! is wrong, and is reported as an internal invariant violation.

use crate::common::config::CLOCK_SCAN_BOUND_FACTOR;
use crate::common::{Capacity, Error, Result, SlotId};
use crate::sim::replacer::Victim;
use crate::trace::PolicyState;

/// Reference bit per slot plus a circular hand.
#[derive(Debug, Clone)]
pub struct ClockReplacer {
    ref_bits: Vec<bool>,
    hand: SlotId,

    /// Slots examined by the sweep of the current step.
    swept: usize,
}

impl ClockReplacer {
    /// Create a new CLOCK replacer with all bits clear and the hand at slot 0.
    pub fn new(capacity: Capacity) -> Self {
        Self {
            ref_bits: vec![false; capacity.get()],
            hand: SlotId(0),
            swept: 0,
        }
    }

    /// Set the bit of `slot`. Used for hits and first fills; the hand
    /// does not move.
    pub fn record_access(&mut self, slot: SlotId) {
        self.swept = 0;
        if let Some(bit) = self.ref_bits.get_mut(slot.0) {
            *bit = true;
        }
    }

    /// Sweep from the hand until a slot with a clear bit comes up.
    ///
    /// # Errors
    /// - `Error::InternalInvariantViolation` if no victim is found within
    ///   two revolutions
    pub fn select_victim(&mut self) -> Result<Victim> {
        let bound = CLOCK_SCAN_BOUND_FACTOR * self.ref_bits.len();
        self.sweep(bound)
    }

    fn sweep(&mut self, bound: usize) -> Result<Victim> {
        let capacity = self.ref_bits.len();
        let mut swept = 0;

        while swept < bound {
            let slot = self.hand;
            swept += 1;

            if self.ref_bits[slot.0] {
                self.ref_bits[slot.0] = false;
                self.hand = slot.next(capacity);
            } else {
                self.swept = swept;
                return Ok(Victim {
                    slot,
                    reason: format!("reference bit clear after sweeping {} slot(s)", swept),
                });
            }
        }

        self.swept = swept;
        Err(Error::InternalInvariantViolation(format!(
            "CLOCK sweep exceeded {} steps over {} slots without finding a victim",
            bound, capacity
        )))
    }

    /// The victim at `slot` was replaced: give the newcomer a set bit and
    /// move the hand past it.
    pub fn record_replace(&mut self, slot: SlotId) {
        if let Some(bit) = self.ref_bits.get_mut(slot.0) {
            *bit = true;
        }
        self.hand = slot.next(self.ref_bits.len());
    }

    pub fn state(&self) -> PolicyState {
        PolicyState::Clock {
            ref_bits: self.ref_bits.clone(),
            hand: self.hand,
            swept: self.swept,
        }
    }
}
