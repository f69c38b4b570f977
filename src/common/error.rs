//! Error types for evictsim.

use crate::common::config::{MAX_CAPACITY, MIN_CAPACITY};

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in evictsim.
///
/// The first three variants are input rejections and are always raised
/// before any reference is processed. `InternalInvariantViolation` means
/// an engine broke one of its own guarantees and the run was abandoned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Capacity was not an integer, or fell outside the allowed range.
    ///
    /// Carries the rejected input rendered as text, since it may have
    /// arrived as a float.
    #[error(
        "invalid capacity {value}: must be an integer in [{}, {}]",
        MIN_CAPACITY,
        MAX_CAPACITY
    )]
    InvalidCapacity { value: String },

    /// The reference sequence had no entries.
    #[error("reference sequence is empty")]
    EmptyReferenceSequence,

    /// The policy name did not match FIFO, LRU, OPT or CLOCK.
    #[error("unknown policy {0:?}: expected one of FIFO, LRU, OPT, CLOCK")]
    UnknownPolicy(String),

    /// An engine exceeded a bound that correct code can never exceed.
    ///
    /// This indicates a bug, never bad input.
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}

/// Fieldless discriminant of [`Error`].
///
/// Lets callers match on the kind of failure without caring about
/// the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidCapacity,
    EmptyReferenceSequence,
    UnknownPolicy,
    InternalInvariantViolation,
}

impl Error {
    /// Build an `InvalidCapacity` from any displayable input.
    pub fn invalid_capacity(value: impl std::fmt::Display) -> Self {
        Error::InvalidCapacity {
            value: value.to_string(),
        }
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidCapacity { .. } => ErrorKind::InvalidCapacity,
            Error::EmptyReferenceSequence => ErrorKind::EmptyReferenceSequence,
            Error::UnknownPolicy(_) => ErrorKind::UnknownPolicy,
            Error::InternalInvariantViolation(_) => ErrorKind::InternalInvariantViolation,
        }
    }

    /// True for errors caused by caller input rather than an engine defect.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Error::InternalInvariantViolation(_))
    }
}

impl From<std::convert::Infallible> for Error {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}
