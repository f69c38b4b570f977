//! Slot identifier type.

use std::fmt;

use serde::Serialize;

/// Identifies a slot (frame) in the simulated table.
///
/// Using `usize` because slots are stored in a `Vec` and indexed
/// directly: `slots[slot_id.0]`.
///
/// # Example
/// ```
/// use evictsim::SlotId;
///
/// let slot = SlotId::new(2);
/// assert_eq!(slot.next(3), SlotId::new(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SlotId(pub usize);

impl SlotId {
    /// Create a new SlotId.
    #[inline]
    pub fn new(id: usize) -> Self {
        SlotId(id)
    }

    /// The following slot on a ring of `capacity` slots.
    #[inline]
    pub fn next(self, capacity: usize) -> Self {
        SlotId((self.0 + 1) % capacity)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}", self.0)
    }
}
