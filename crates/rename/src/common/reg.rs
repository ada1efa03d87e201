//! Register and branch identifiers.
//!
//! Architectural (logical) registers, physical registers, and branch
//! checkpoint tags are all small integers. Wrapping each in its own newtype
//! keeps a logical register number from being handed to an operation that
//! expects a physical one.

use std::fmt;

/// Architectural register name as seen by the instruction set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LogReg(pub usize);

/// Physical register slot in the unified register file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PhysReg(pub usize);

/// Branch checkpoint tag: the bit position this branch owns in the global branch mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BranchId(pub u32);

impl LogReg {
    /// Returns the register number as a table index.
    #[inline]
    pub const fn idx(self) -> usize {
        self.0
    }
}

impl PhysReg {
    /// Returns the register number as a table index.
    #[inline]
    pub const fn idx(self) -> usize {
        self.0
    }
}

impl BranchId {
    /// Returns the single-bit mask selecting this branch.
    #[inline]
    pub const fn bit(self) -> u64 {
        1 << self.0
    }

    /// Returns the checkpoint slot index owned by this branch.
    #[inline]
    pub const fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LogReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

impl fmt::Display for PhysReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "br{}", self.0)
    }
}
