//! FIFO (First-In-First-Out) replacement policy.

use crate::common::{Capacity, SlotId};
use crate::sim::replacer::Victim;
use crate::trace::PolicyState;

/// Evicts entries in the order they were loaded.
///
/// Because empty slots are always filled lowest-first, slot order is
/// load order once the table is full. A single circular pointer is then
/// enough: it names the oldest slot, and moves on by one after each
/// eviction. Hits never move it.
#[derive(Debug, Clone)]
pub struct FifoReplacer {
    capacity: usize,

    /// Slot to evict on the next full-table fault.
    next_victim: SlotId,
}

impl FifoReplacer {
    /// Create a new FIFO replacer.
    pub fn new(capacity: Capacity) -> Self {
        Self {
            capacity: capacity.get(),
            next_victim: SlotId(0),
        }
    }

    /// The slot under the pointer. Does not move it.
    pub fn select_victim(&self) -> Victim {
        Victim {
            slot: self.next_victim,
            reason: "oldest resident in load order".to_string(),
        }
    }

    /// An eviction happened at `slot`; advance past it.
    pub fn record_replace(&mut self, slot: SlotId) {
        self.next_victim = slot.next(self.capacity);
    }

    pub fn state(&self) -> PolicyState {
        PolicyState::Fifo {
            next_victim: self.next_victim,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replacer(capacity: usize) -> FifoReplacer {
        FifoReplacer::new(Capacity::new(capacity).unwrap())
    }

    #[test]
    fn test_fifo_starts_at_slot_zero() {
        let r = replacer(3);
        assert_eq!(r.select_victim().slot, SlotId(0));
    }

    #[test]
    fn test_fifo_select_does_not_advance() {
        let r = replacer(3);
        assert_eq!(r.select_victim().slot, SlotId(0));
        assert_eq!(r.select_victim().slot, SlotId(0));
    }

    #[test]
    fn test_fifo_pointer_wraps() {
        let mut r = replacer(3);
        let mut order = vec![];
        for _ in 0..4 {
            let victim = r.select_victim();
            order.push(victim.slot.0);
            r.record_replace(victim.slot);
        }
        assert_eq!(order, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_fifo_state() {
        let mut r = replacer(2);
        r.record_replace(SlotId(0));
        assert_eq!(
            r.state(),
            PolicyState::Fifo {
                next_victim: SlotId(1)
            }
        );
    }
}
