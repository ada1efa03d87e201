//! Physical register file and logical-to-physical rename maps.
//!
//! This module implements the register state of the rename unit:
//! 1. **Storage:** One 64-bit value and one ready bit per physical register.
//! 2. **Mapping:** `RenameMap`, used for both the speculative map (RMT) and the
//!    architectural map (AMT), and copied by value into branch checkpoints.

use crate::common::reg::{LogReg, PhysReg};

/// Physical register values and readiness.
///
/// Values are opaque payloads; readiness is consulted by the issue logic to
/// decide whether an operand is available.
#[derive(Clone, Debug)]
pub struct PhysRegFile {
    values: Vec<u64>,
    ready: Vec<bool>,
}

impl PhysRegFile {
    /// Creates a register file of `size` registers, all zero and ready.
    pub fn new(size: usize) -> Self {
        Self {
            values: vec![0; size],
            ready: vec![true; size],
        }
    }

    /// Returns the number of physical registers.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the register file has no registers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reads a physical register value.
    #[inline]
    pub fn read(&self, reg: PhysReg) -> u64 {
        self.values[reg.idx()]
    }

    /// Writes a physical register value.
    #[inline]
    pub fn write(&mut self, reg: PhysReg, value: u64) {
        self.values[reg.idx()] = value;
    }

    /// Returns true if the register's value has been produced.
    #[inline]
    pub fn is_ready(&self, reg: PhysReg) -> bool {
        self.ready[reg.idx()]
    }

    /// Marks the register as awaiting its producer.
    #[inline]
    pub fn clear_ready(&mut self, reg: PhysReg) {
        self.ready[reg.idx()] = false;
    }

    /// Marks the register's value as available.
    #[inline]
    pub fn set_ready(&mut self, reg: PhysReg) {
        self.ready[reg.idx()] = true;
    }

    /// Marks every register ready.
    pub fn set_all_ready(&mut self) {
        self.ready.fill(true);
    }
}

/// Logical-to-physical register mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenameMap(Box<[PhysReg]>);

impl RenameMap {
    /// Creates the reset mapping: logical register `i` maps to physical register `i`.
    pub fn identity(log_regs: usize) -> Self {
        Self((0..log_regs).map(PhysReg).collect())
    }

    /// Returns the number of logical registers covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the map covers no registers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the physical register currently mapped to `reg`.
    #[inline]
    pub fn get(&self, reg: LogReg) -> PhysReg {
        self.0[reg.idx()]
    }

    /// Maps `reg` to `phys` and returns the previous mapping.
    #[inline]
    pub fn set(&mut self, reg: LogReg, phys: PhysReg) -> PhysReg {
        std::mem::replace(&mut self.0[reg.idx()], phys)
    }

    /// Overwrites this map with `other` without reallocating.
    pub fn copy_from(&mut self, other: &Self) {
        self.0.copy_from_slice(&other.0);
    }

    /// Iterates mapped physical registers in logical-register order.
    pub fn iter(&self) -> impl Iterator<Item = PhysReg> + '_ {
        self.0.iter().copied()
    }
}
