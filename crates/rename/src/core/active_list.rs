//! Active list (reorder buffer) for in-order commit.
//!
//! The active list is a circular buffer of in-flight instructions in program
//! order. It provides:
//! 1. **Dispatch:** Appends an instruction at the tail and returns its slot index.
//! 2. **Completion:** Flag setters addressed by slot, called by execute and memory stages.
//! 3. **Precommit:** A view of the oldest entry so retirement can decide whether to commit.
//! 4. **Retire:** Removes the oldest entry once the renamer has committed its mapping.
//! 5. **Flush:** Partial rollback to a branch, or full squash.
//!
//! Slot indices stay valid for the lifetime of the instruction: entries never move.

use crate::common::reg::{LogReg, PhysReg};
use crate::core::ring::Ring;

/// Destination register written by an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Destination {
    /// Architectural register named by the instruction.
    pub log: LogReg,
    /// Physical register allocated for it at rename.
    pub phys: PhysReg,
}

/// Instruction class flags, set at dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct InstClass {
    /// Memory load.
    pub load: bool,
    /// Memory store.
    pub store: bool,
    /// Conditional branch or indirect jump (owns a checkpoint).
    pub branch: bool,
    /// Atomic memory operation.
    pub amo: bool,
    /// Control/status register access.
    pub csr: bool,
}

/// Execution outcome flags, all clear at dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Outcome {
    /// Execution finished.
    pub completed: bool,
    /// Instruction raised an exception.
    pub exception: bool,
    /// Load executed ahead of an aliasing older store.
    pub load_violation: bool,
    /// Branch resolved against its prediction.
    pub branch_misprediction: bool,
    /// Value prediction for the destination was wrong.
    pub value_misprediction: bool,
}

impl Outcome {
    /// Returns true if the instruction may be committed.
    #[inline]
    pub const fn committable(&self) -> bool {
        self.completed && !self.exception && !self.load_violation
    }
}

/// A single in-flight instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ActiveEntry {
    /// Destination mapping, if the instruction writes a register.
    pub dest: Option<Destination>,
    /// Instruction class.
    pub class: InstClass,
    /// Program counter.
    pub pc: u64,
    /// Flags reported by later stages.
    pub outcome: Outcome,
}

impl ActiveEntry {
    /// Creates a freshly dispatched entry with clear outcome flags.
    pub const fn new(dest: Option<Destination>, class: InstClass, pc: u64) -> Self {
        Self {
            dest,
            class,
            pc,
            outcome: Outcome {
                completed: false,
                exception: false,
                load_violation: false,
                branch_misprediction: false,
                value_misprediction: false,
            },
        }
    }
}

/// In-order ledger of dispatched, uncommitted instructions.
#[derive(Clone, Debug)]
pub struct ActiveList {
    ring: Ring<ActiveEntry>,
}

impl ActiveList {
    /// Creates an empty active list with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            ring: Ring::new(capacity),
        }
    }

    /// Returns the active list capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Returns the number of in-flight instructions.
    #[inline]
    pub const fn len(&self) -> usize {
        self.ring.len()
    }

    /// Returns true if nothing is in flight.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Returns the number of free slots.
    #[inline]
    pub fn free_slots(&self) -> usize {
        self.ring.free()
    }

    /// Returns true if fewer than `bundle_inst` slots are free.
    #[inline]
    pub fn stall(&self, bundle_inst: usize) -> bool {
        bundle_inst > self.free_slots()
    }

    /// Appends an instruction and returns its slot index.
    ///
    /// Outcome flags are cleared regardless of what `entry` carries.
    pub fn dispatch(&mut self, entry: ActiveEntry) -> usize {
        assert!(!self.ring.is_full(), "dispatch into a full active list");
        self.ring.push_back(ActiveEntry {
            outcome: Outcome::default(),
            ..entry
        })
    }

    /// Returns the in-flight entry at `slot`, if occupied.
    pub fn get(&self, slot: usize) -> Option<&ActiveEntry> {
        self.ring.get(slot)
    }

    fn outcome_mut(&mut self, slot: usize) -> &mut Outcome {
        match self.ring.get_mut(slot) {
            Some(entry) => &mut entry.outcome,
            None => panic!("active list slot {slot} is not in flight"),
        }
    }

    /// Marks the instruction at `slot` as completed.
    pub fn set_complete(&mut self, slot: usize) {
        self.outcome_mut(slot).completed = true;
    }

    /// Flags the instruction at `slot` as having raised an exception.
    pub fn set_exception(&mut self, slot: usize) {
        self.outcome_mut(slot).exception = true;
    }

    /// Flags a load ordering violation on the instruction at `slot`.
    pub fn set_load_violation(&mut self, slot: usize) {
        self.outcome_mut(slot).load_violation = true;
    }

    /// Flags a branch misprediction on the instruction at `slot`.
    pub fn set_branch_misprediction(&mut self, slot: usize) {
        self.outcome_mut(slot).branch_misprediction = true;
    }

    /// Flags a value misprediction on the instruction at `slot`.
    pub fn set_value_misprediction(&mut self, slot: usize) {
        self.outcome_mut(slot).value_misprediction = true;
    }

    /// Returns the exception flag of the instruction at `slot`.
    pub fn get_exception(&self, slot: usize) -> bool {
        self.get(slot)
            .is_some_and(|entry| entry.outcome.exception)
    }

    /// Returns the oldest in-flight entry without removing it.
    pub fn peek_oldest(&self) -> Option<&ActiveEntry> {
        self.ring.front().map(|(_, entry)| entry)
    }

    /// Returns the slot index of the oldest in-flight entry.
    pub fn oldest_slot(&self) -> Option<usize> {
        self.ring.front().map(|(slot, _)| slot)
    }

    /// Removes and returns the oldest entry, which must be committable.
    pub fn retire_oldest(&mut self) -> ActiveEntry {
        let entry = match self.ring.front() {
            Some((_, entry)) => *entry,
            None => panic!("commit from an empty active list"),
        };
        assert!(entry.outcome.completed, "commit of an incomplete instruction at pc {:#x}", entry.pc);
        assert!(!entry.outcome.exception, "commit of an excepting instruction at pc {:#x}", entry.pc);
        assert!(
            !entry.outcome.load_violation,
            "commit of a load-violating instruction at pc {:#x}",
            entry.pc
        );
        let _slot = self.ring.advance_head();
        entry
    }

    /// Discards every entry younger than `slot`; `slot` becomes the youngest.
    ///
    /// Returns the number of entries discarded.
    pub fn rollback_to(&mut self, slot: usize) -> usize {
        let before = self.ring.len();
        self.ring.truncate_after(slot);
        before - self.ring.len()
    }

    /// Discards every in-flight entry. Returns the number discarded.
    pub fn squash_all(&mut self) -> usize {
        let discarded = self.ring.len();
        self.ring.clear();
        discarded
    }

    /// Iterates in-flight entries oldest first as `(slot, entry)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ActiveEntry)> + '_ {
        self.ring.iter()
    }
}
