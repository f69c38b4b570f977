//! Entry identifier type.

use std::fmt;

use serde::Serialize;

/// Identifies a requested entry (a page, block, or any cached resource).
///
/// The engines only compare identifiers for equality, so the numeric
/// value carries no meaning beyond identity.
///
/// # Example
/// ```
/// use evictsim::EntryId;
///
/// let entry = EntryId::new(7);
/// assert_eq!(entry.0, 7);
/// assert_eq!(entry, EntryId::from(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl EntryId {
    /// Create a new EntryId.
    #[inline]
    pub fn new(id: u64) -> Self {
        EntryId(id)
    }

    /// Convert a slice of raw integers into a reference sequence.
    pub fn sequence(raw: &[u64]) -> Vec<EntryId> {
        raw.iter().copied().map(EntryId).collect()
    }
}

impl From<u64> for EntryId {
    fn from(id: u64) -> Self {
        EntryId(id)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
