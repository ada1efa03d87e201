//! Rename unit components.
//!
//! This module contains the structures behind `Renamer`:
//! 1. **Ring:** The bounded circular buffer shared by the free list and active list.
//! 2. **Register State:** Physical register file and rename maps.
//! 3. **Free List:** Spare physical register allocator.
//! 4. **Active List:** In-order ledger of in-flight instructions.
//! 5. **Checkpoints:** Branch mask allocator and per-branch snapshots.
//! 6. **Renamer:** The owning aggregate exposing every operation.

/// Active list (reorder buffer).
pub mod active_list;

/// Branch checkpoints and the global branch mask.
pub mod checkpoint;

/// Free physical register list.
pub mod free_list;

/// Physical register file and rename maps.
pub mod regfile;

/// The rename unit aggregate.
pub mod renamer;

/// Bounded circular buffer.
pub mod ring;

pub use renamer::Renamer;
