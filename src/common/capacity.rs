//! Validated slot-table capacity.

use std::fmt;

use serde::Serialize;

use crate::common::config::{MAX_CAPACITY, MIN_CAPACITY};
use crate::common::{Error, Result};

/// Number of slots in a simulated table, guaranteed to lie in
/// [`MIN_CAPACITY`]..=[`MAX_CAPACITY`].
///
/// Construct one with [`Capacity::new`] or any of the `TryFrom`
/// conversions. Float inputs are accepted only when they are integral.
///
/// # Example
/// ```
/// use evictsim::Capacity;
///
/// let cap = Capacity::try_from(4.0).unwrap();
/// assert_eq!(cap.get(), 4);
///
/// assert!(Capacity::try_from(2.5).is_err());
/// assert!(Capacity::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Capacity(usize);

impl Capacity {
    /// Validate an integer capacity.
    ///
    /// # Errors
    /// - `Error::InvalidCapacity` if `slots` is outside the allowed range
    pub fn new(slots: usize) -> Result<Self> {
        if (MIN_CAPACITY..=MAX_CAPACITY).contains(&slots) {
            Ok(Capacity(slots))
        } else {
            Err(Error::invalid_capacity(slots))
        }
    }

    /// Number of slots.
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for Capacity {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Capacity::new(value)
    }
}

impl TryFrom<u32> for Capacity {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        let slots = usize::try_from(value).map_err(|_| Error::invalid_capacity(value))?;
        Capacity::new(slots)
    }
}

impl TryFrom<i64> for Capacity {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        let slots = usize::try_from(value).map_err(|_| Error::invalid_capacity(value))?;
        Capacity::new(slots)
    }
}

impl TryFrom<i32> for Capacity {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        Capacity::try_from(i64::from(value))
    }
}

impl TryFrom<f64> for Capacity {
    type Error = Error;

    /// Accept a float only when it is finite and has no fractional part.
    fn try_from(value: f64) -> Result<Self> {
        if !value.is_finite() || value.fract() != 0.0 || value < 0.0 {
            return Err(Error::invalid_capacity(value));
        }
        if value > MAX_CAPACITY as f64 {
            return Err(Error::invalid_capacity(value));
        }
        Capacity::new(value as usize)
    }
}
