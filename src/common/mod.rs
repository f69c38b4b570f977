//! Common types and utilities shared across evictsim.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants
//! - Error types
//! - Identifiers (EntryId, SlotId) and the validated Capacity

mod capacity;
pub mod config;
mod entry_id;
pub mod error;
mod slot_id;

pub use capacity::Capacity;
pub use entry_id::EntryId;
pub use error::{Error, ErrorKind, Result};
pub use slot_id::SlotId;
