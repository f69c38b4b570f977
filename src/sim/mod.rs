//! Simulation engine.
//!
//! # Components
//! - [`simulate`] / [`simulate_policy`] - Validate inputs and run one policy
//! - [`SlotTable`] - The fixed set of resident slots
//! - [`PolicyKind`] - Policy selection by name
//! - [`replacer`] - Per-policy eviction bookkeeping

mod policy;
pub mod replacer;
mod simulator;
mod slot_table;

pub use policy::PolicyKind;
pub use simulator::{simulate, simulate_policy, Simulation};
pub use slot_table::SlotTable;
