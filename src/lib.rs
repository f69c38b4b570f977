//! evictsim - deterministic simulation of page-replacement policies.
//!
//! Given a slot capacity and a sequence of entry references, evictsim
//! replays the sequence under FIFO, LRU, OPT (Belady's optimal) or CLOCK
//! (second chance) and records, for every reference, whether it hit or
//! faulted, what the table looked like afterwards, and which entry was
//! evicted and why.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           evictsim                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Comparator (compare)                        │   │
//! │  │   compare_all · capacity_sweep · find_belady_anomalies   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓ ×4                               │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Dispatcher (sim::simulate)                  │   │
//! │  │      validate capacity, references, policy name          │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │       Engine: SlotTable + Replacer (fresh per run)       │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │       Replacer: FIFO | LRU | OPT | CLOCK         │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           Trace (trace/)                                 │   │
//! │  │      StepRecord per reference + Summary                  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (EntryId, SlotId, Capacity, Error, config)
//! - [`sim`] - Slot table, replacers and the simulation driver
//! - [`trace`] - Step records, summaries, checksums and deltas
//! - [`compare`] - Cross-policy ranking and capacity sweeps
//!
//! # Quick Start
//! ```
//! use evictsim::{simulate, EntryId};
//!
//! let refs = EntryId::sequence(&[1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5]);
//!
//! let run = simulate("FIFO", 3, &refs).unwrap();
//! assert_eq!(run.summary().faults, 9);
//!
//! for step in run.trace() {
//!     println!("{:>2}: {}", step.index(), step.rationale());
//! }
//! ```
//!
//! # Logging
//! Runs emit `tracing` events (a debug span per run, a trace event per
//! eviction). Install a subscriber in the host application to see them.

pub mod common;
pub mod compare;
pub mod sim;
pub mod trace;

// Re-export commonly used items at crate root for convenience
pub use common::config::{MAX_CAPACITY, MIN_CAPACITY};
pub use common::{Capacity, EntryId, Error, ErrorKind, Result, SlotId};

pub use compare::{capacity_sweep, compare_all, find_belady_anomalies, Anomaly, ComparisonRow};
pub use sim::{simulate, simulate_policy, PolicyKind, Simulation, SlotTable};
pub use trace::{
    reconstruct_snapshots, Eviction, NextUse, Outcome, PolicyState, StepDelta, StepRecord,
    Summary, Trace,
};
