//! Register rename and speculative recovery for out-of-order pipeline simulation.
//!
//! This crate implements the rename unit of an out-of-order core model:
//! 1. **Register State:** Physical register values and ready bits, plus the
//!    speculative and architectural logical-to-physical maps.
//! 2. **Free List:** Allocation and recycling of physical registers.
//! 3. **Active List:** The in-order ledger of dispatched instructions.
//! 4. **Checkpoints:** Per-branch snapshots for misprediction rollback, and full squash.
//!
//! Fetch, decode, scheduling, execution, and branch prediction live outside this
//! crate; they drive a single `Renamer` through its stall queries and operations.
//!
//! ```
//! use rvsim_rename::{Renamer, RenamerConfig};
//! use rvsim_rename::common::LogReg;
//! use rvsim_rename::core::active_list::{Destination, InstClass};
//!
//! let mut rn = Renamer::new(&RenamerConfig::new(4, 8, 2, 4)).unwrap();
//! assert!(!rn.stall_reg(1) && !rn.stall_dispatch(1));
//!
//! let phys = rn.rename_destination(LogReg(2));
//! let slot = rn.dispatch(Some(Destination { log: LogReg(2), phys }), InstClass::default(), 0x8000_0000);
//! rn.set_complete(slot);
//! rn.commit();
//! assert_eq!(rn.architectural_map().get(LogReg(2)), phys);
//! ```

/// Register identifiers and error types.
pub mod common;
/// Rename unit sizing (defaults, JSON deserialization, validation).
pub mod config;
/// Rename unit components (ring, register state, free list, active list, checkpoints).
pub mod core;
/// Rename event counters.
pub mod stats;

/// Rename unit sizing; use `RenamerConfig::default()` or deserialize from JSON.
pub use crate::config::RenamerConfig;
/// The rename unit; construct with `Renamer::new`.
pub use crate::core::Renamer;
/// Event counters returned by `Renamer::stats`.
pub use crate::stats::RenameStats;
