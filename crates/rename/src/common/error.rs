//! Error definitions.
//!
//! Two kinds of failure are reported through `Result`:
//! 1. **Configuration errors:** Rejected construction parameters. A renamer is never
//!    partially built; the caller gets a `ConfigError` instead.
//! 2. **Invariant violations:** Reported by `Renamer::check_invariants` when the
//!    free list, architectural map, and in-flight destinations stop partitioning
//!    the physical register file.
//!
//! Caller-contract violations (allocating without checking the matching stall
//! query, committing an unfinished instruction) are not errors here. They abort.
//! Simulated hardware faults are plain data on active-list entries.

use thiserror::Error;

use super::reg::PhysReg;

/// Invalid construction parameters.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The architectural register count must be non-zero.
    #[error("logical register count must be greater than zero")]
    NoLogicalRegisters,

    /// There must be at least one spare physical register to rename into.
    #[error("physical register count {physical} must exceed logical register count {logical}")]
    TooFewPhysicalRegisters {
        /// Requested logical register count.
        logical: usize,
        /// Requested physical register count.
        physical: usize,
    },

    /// The checkpoint pool must fit in the branch mask.
    #[error("branch checkpoint count {requested} must be between 1 and {max}")]
    BranchSlots {
        /// Requested checkpoint count.
        requested: usize,
        /// Width of the branch mask.
        max: usize,
    },

    /// The active list needs room for at least one instruction.
    #[error("active list size must be greater than zero")]
    EmptyActiveList,

    /// The JSON configuration could not be parsed.
    #[error("failed to parse renamer configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A broken partition of the physical register file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A physical register is owned by more than one structure at once.
    #[error("physical register {reg} is held by both {first} and {second}")]
    Duplicate {
        /// The doubly-owned register.
        reg: PhysReg,
        /// First owner found.
        first: &'static str,
        /// Second owner found.
        second: &'static str,
    },

    /// A physical register is owned by nothing.
    #[error("physical register {0} is not owned by the free list, the architectural map, or any in-flight instruction")]
    Leaked(PhysReg),

    /// An identifier outside the register file showed up in a table.
    #[error("physical register {reg} is out of range (register file has {size} entries)")]
    OutOfRange {
        /// Offending identifier.
        reg: PhysReg,
        /// Register file size.
        size: usize,
    },
}
