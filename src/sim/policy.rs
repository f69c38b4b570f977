//! Policy selection by name.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::common::Error;

/// The four simulated replacement policies.
///
/// Parsing ignores ASCII case and surrounding whitespace, so `"lru"`,
/// `" LRU "` and `"Lru"` all select [`PolicyKind::Lru`].
///
/// # Example
/// ```
/// use evictsim::PolicyKind;
///
/// let kind: PolicyKind = "clock".parse().unwrap();
/// assert_eq!(kind, PolicyKind::Clock);
/// assert_eq!(kind.to_string(), "CLOCK");
///
/// assert!("MRU".parse::<PolicyKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PolicyKind {
    Fifo,
    Lru,
    Opt,
    Clock,
}

impl PolicyKind {
    /// Every policy, in the fixed comparison order.
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::Fifo,
        PolicyKind::Lru,
        PolicyKind::Opt,
        PolicyKind::Clock,
    ];

    /// Canonical upper-case name.
    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Fifo => "FIFO",
            PolicyKind::Lru => "LRU",
            PolicyKind::Opt => "OPT",
            PolicyKind::Clock => "CLOCK",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PolicyKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::UnknownPolicy(s.to_string()))
    }
}
