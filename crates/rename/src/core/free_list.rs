//! Free physical register list.
//!
//! A FIFO of physical register identifiers not owned by the architectural map
//! or by any in-flight instruction. Its capacity is the number of spare
//! registers (`phys_regs - log_regs`), and at reset it holds exactly those
//! spare registers in ascending order.
//!
//! Allocation pops from the head; commit pushes the register an instruction
//! overwrote onto the tail. A misprediction rewinds the head to a checkpointed
//! cursor, returning every wrong-path allocation in one step.

use crate::common::reg::PhysReg;
use crate::core::ring::{Cursor, Ring};

/// Physical register allocator.
#[derive(Clone, Debug)]
pub struct FreeList {
    ring: Ring<PhysReg>,
}

impl FreeList {
    /// Creates a full free list holding `log_regs .. phys_regs`.
    pub fn new(log_regs: usize, phys_regs: usize) -> Self {
        Self {
            ring: Ring::full_of((log_regs..phys_regs).map(PhysReg).collect()),
        }
    }

    /// Returns the free list capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Returns the number of registers available for allocation.
    #[inline]
    pub const fn available(&self) -> usize {
        self.ring.len()
    }

    /// Returns true if fewer than `bundle_dst` registers are free.
    #[inline]
    pub const fn stall(&self, bundle_dst: usize) -> bool {
        bundle_dst > self.available()
    }

    /// Pops the next free register, or `None` if the list is empty.
    pub fn allocate(&mut self) -> Option<PhysReg> {
        self.ring.pop_front()
    }

    /// Returns a register to the free list.
    pub fn release(&mut self, reg: PhysReg) {
        let _slot = self.ring.push_back(reg);
    }

    /// Returns the head cursor for a branch checkpoint.
    #[inline]
    pub const fn head(&self) -> Cursor {
        self.ring.head()
    }

    /// Restores the head to a checkpointed cursor, freeing everything allocated since.
    pub fn restore_head(&mut self, cursor: Cursor) {
        self.ring.rewind_head(cursor);
    }

    /// Refills the list with every register not held by the architectural map.
    pub fn reclaim_all(&mut self) {
        self.ring.reclaim_all();
    }

    /// Iterates free registers, next-to-allocate first.
    pub fn iter(&self) -> impl Iterator<Item = PhysReg> + '_ {
        self.ring.iter().map(|(_, reg)| *reg)
    }
}
