//! Register rename unit.
//!
//! `Renamer` owns every piece of rename state and is the only type pipeline
//! stages talk to. It provides:
//! 1. **Register State:** Physical register values, ready bits, and the
//!    speculative (RMT) and architectural (AMT) maps.
//! 2. **Allocation:** Destination renaming from the free list, dispatch into
//!    the active list, and the matching stall queries.
//! 3. **Retirement:** Precommit inspection and in-order commit, which makes a
//!    mapping architectural and recycles the register it replaced.
//! 4. **Recovery:** Branch checkpoints, misprediction rollback, correct-branch
//!    pruning, and full squash.
//!
//! Stall queries are advisory. Calling an allocating operation after its stall
//! query would have returned true is a contract violation and panics.

use tracing::{debug, trace};

use crate::common::error::{ConfigError, InvariantViolation};
use crate::common::reg::{BranchId, LogReg, PhysReg};
use crate::config::RenamerConfig;
use crate::core::active_list::{ActiveEntry, ActiveList, Destination, InstClass};
use crate::core::checkpoint::{BranchMask, CheckpointPool};
use crate::core::free_list::FreeList;
use crate::core::regfile::{PhysRegFile, RenameMap};
use crate::stats::RenameStats;

/// The rename and speculative-recovery unit.
#[derive(Clone, Debug)]
pub struct Renamer {
    config: RenamerConfig,
    prf: PhysRegFile,
    rmt: RenameMap,
    amt: RenameMap,
    free_list: FreeList,
    active_list: ActiveList,
    checkpoints: CheckpointPool,
    stats: RenameStats,
}

impl Renamer {
    /// Builds a renamer in its reset state.
    ///
    /// Both maps are the identity, the free list holds every spare register in
    /// ascending order, the active list is empty, and every register is ready.
    ///
    /// # Errors
    ///
    /// Returns the `ConfigError` for the first violated sizing constraint.
    pub fn new(config: &RenamerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            log_regs = config.log_regs,
            phys_regs = config.phys_regs,
            branches = config.branches,
            active_list_size = config.active_list_size,
            "renamer reset"
        );
        Ok(Self {
            config: config.clone(),
            prf: PhysRegFile::new(config.phys_regs),
            rmt: RenameMap::identity(config.log_regs),
            amt: RenameMap::identity(config.log_regs),
            free_list: FreeList::new(config.log_regs, config.phys_regs),
            active_list: ActiveList::new(config.active_list_size),
            checkpoints: CheckpointPool::new(config.branches, config.log_regs),
            stats: RenameStats::default(),
        })
    }

    /// Returns the sizing this renamer was built with.
    pub const fn config(&self) -> &RenamerConfig {
        &self.config
    }

    /// Returns the event counters.
    pub const fn stats(&self) -> &RenameStats {
        &self.stats
    }

    /// Returns the event counters mutably (e.g. to reset after warm-up).
    pub const fn stats_mut(&mut self) -> &mut RenameStats {
        &mut self.stats
    }

    // ── Stall queries ─────────────────────────────────────────

    /// Returns true if the free list holds fewer than `bundle_dst` registers.
    pub const fn stall_reg(&self, bundle_dst: usize) -> bool {
        self.free_list.stall(bundle_dst)
    }

    /// Returns true if fewer than `bundle_branch` checkpoint slots are idle.
    pub fn stall_branch(&self, bundle_branch: usize) -> bool {
        self.checkpoints.stall(bundle_branch)
    }

    /// Returns true if the active list has fewer than `bundle_inst` free slots.
    pub fn stall_dispatch(&self, bundle_inst: usize) -> bool {
        self.active_list.stall(bundle_inst)
    }

    /// Returns the global branch mask: the checkpoint slots of all unresolved branches.
    pub const fn get_branch_mask(&self) -> BranchMask {
        self.checkpoints.mask()
    }

    // ── Rename ────────────────────────────────────────────────

    /// Returns the physical register currently holding `log`'s newest value.
    pub fn rename_source(&self, log: LogReg) -> PhysReg {
        self.rmt.get(log)
    }

    /// Allocates a fresh physical register for `log` and installs it in the
    /// speculative map.
    pub fn rename_destination(&mut self, log: LogReg) -> PhysReg {
        let phys = self.free_list.allocate();
        assert!(phys.is_some(), "rename of {log} with an empty free list");
        let phys = phys.unwrap_or_default();
        let _prev = self.rmt.set(log, phys);
        self.stats.dest_renames += 1;
        trace!(%log, %phys, free = self.free_list.available(), "rename dst");
        phys
    }

    /// Snapshots speculative state for a branch and returns its checkpoint tag.
    ///
    /// The lowest idle slot is used; its number is the branch's bit in the mask.
    pub fn checkpoint(&mut self) -> BranchId {
        let branch = self.checkpoints.take(&self.rmt, self.free_list.head());
        self.stats.checkpoints += 1;
        debug!(%branch, gbm = %self.checkpoints.mask(), "checkpoint");
        branch
    }

    // ── Dispatch ──────────────────────────────────────────────

    /// Appends an instruction to the active list and returns its slot index.
    ///
    /// `dest` is the destination mapping returned by `rename_destination`, if any.
    pub fn dispatch(&mut self, dest: Option<Destination>, class: InstClass, pc: u64) -> usize {
        let slot = self.active_list.dispatch(ActiveEntry::new(dest, class, pc));
        self.stats.dispatched += 1;
        trace!(slot, pc, ?dest, "dispatch");
        slot
    }

    // ── Register file ─────────────────────────────────────────

    /// Returns true if `phys` holds its final value.
    pub fn is_ready(&self, phys: PhysReg) -> bool {
        self.prf.is_ready(phys)
    }

    /// Marks `phys` as waiting for its producer.
    pub fn clear_ready(&mut self, phys: PhysReg) {
        self.prf.clear_ready(phys);
    }

    /// Marks `phys` as holding its final value.
    pub fn set_ready(&mut self, phys: PhysReg) {
        self.prf.set_ready(phys);
    }

    /// Reads `phys`.
    pub fn read(&self, phys: PhysReg) -> u64 {
        self.prf.read(phys)
    }

    /// Writes `phys`.
    pub fn write(&mut self, phys: PhysReg, value: u64) {
        self.prf.write(phys, value);
    }

    // ── Execution outcome ─────────────────────────────────────

    /// Marks the instruction at `al_index` completed.
    pub fn set_complete(&mut self, al_index: usize) {
        self.active_list.set_complete(al_index);
    }

    /// Flags an exception on the instruction at `al_index`.
    pub fn set_exception(&mut self, al_index: usize) {
        self.active_list.set_exception(al_index);
    }

    /// Flags a load ordering violation on the instruction at `al_index`.
    pub fn set_load_violation(&mut self, al_index: usize) {
        self.active_list.set_load_violation(al_index);
    }

    /// Flags a branch misprediction on the instruction at `al_index`.
    pub fn set_branch_misprediction(&mut self, al_index: usize) {
        self.active_list.set_branch_misprediction(al_index);
    }

    /// Flags a value misprediction on the instruction at `al_index`.
    pub fn set_value_misprediction(&mut self, al_index: usize) {
        self.active_list.set_value_misprediction(al_index);
    }

    /// Returns the exception flag of the instruction at `al_index`.
    pub fn get_exception(&self, al_index: usize) -> bool {
        self.active_list.get_exception(al_index)
    }

    // ── Branch resolution ─────────────────────────────────────

    /// Resolves the branch at active list slot `al_index` holding checkpoint `branch`.
    ///
    /// On a misprediction the speculative map, free list head, and branch mask
    /// return to their checkpointed values and every instruction younger than
    /// the branch leaves the active list. The branch itself stays as the
    /// youngest entry. On a correct prediction the checkpoint is released and
    /// pruned from every other checkpoint's recover mask.
    pub fn resolve(&mut self, al_index: usize, branch: BranchId, correct: bool) {
        if correct {
            self.checkpoints.prune(branch);
            self.stats.branches_correct += 1;
            debug!(%branch, gbm = %self.checkpoints.mask(), "branch correct");
            return;
        }

        let checkpoint = self.checkpoints.restore(branch);
        self.rmt.copy_from(&checkpoint.rmt);
        self.free_list.restore_head(checkpoint.free_head);
        let discarded = self.active_list.rollback_to(al_index);

        self.stats.branches_mispredicted += 1;
        self.stats.rollback_discarded += discarded as u64;
        debug!(
            %branch,
            al_index,
            discarded,
            free = self.free_list.available(),
            gbm = %self.checkpoints.mask(),
            "branch mispredicted"
        );
    }

    // ── Retirement ────────────────────────────────────────────

    /// Returns the oldest in-flight instruction without removing it.
    pub fn precommit(&self) -> Option<&ActiveEntry> {
        self.active_list.peek_oldest()
    }

    /// Commits the oldest instruction.
    ///
    /// It must be completed and free of exception and load violation. If it
    /// writes a register, the architectural map adopts its physical register
    /// and the register previously mapped there returns to the free list.
    pub fn commit(&mut self) {
        let entry = self.active_list.retire_oldest();
        if let Some(dest) = entry.dest {
            let old = self.amt.set(dest.log, dest.phys);
            self.free_list.release(old);
            self.stats.regs_released += 1;
            trace!(log = %dest.log, phys = %dest.phys, freed = %old, "commit");
        } else {
            trace!(pc = entry.pc, "commit");
        }
        self.stats.committed += 1;
    }

    /// Discards all in-flight state after an exception.
    ///
    /// The active list empties, every register not held by the architectural
    /// map returns to the free list, the speculative map becomes a copy of the
    /// architectural map, all checkpoints are released, and every register is
    /// marked ready.
    pub fn squash(&mut self) {
        let discarded = self.active_list.squash_all();
        self.free_list.reclaim_all();
        self.rmt.copy_from(&self.amt);
        self.checkpoints.clear();
        self.prf.set_all_ready();

        self.stats.squashes += 1;
        self.stats.squash_discarded += discarded as u64;
        debug!(discarded, "squash");
    }

    // ── Inspection ────────────────────────────────────────────

    /// Returns the number of free physical registers.
    pub const fn free_count(&self) -> usize {
        self.free_list.available()
    }

    /// Returns the number of in-flight instructions.
    pub const fn active_len(&self) -> usize {
        self.active_list.len()
    }

    /// Returns the active list slot of the oldest in-flight instruction.
    pub fn oldest_slot(&self) -> Option<usize> {
        self.active_list.oldest_slot()
    }

    /// Iterates in-flight instructions oldest first as `(al_index, entry)`.
    pub fn in_flight(&self) -> impl Iterator<Item = (usize, &ActiveEntry)> + '_ {
        self.active_list.iter()
    }

    /// Returns the in-flight instruction at `al_index`, if occupied.
    pub fn active_entry(&self, al_index: usize) -> Option<&ActiveEntry> {
        self.active_list.get(al_index)
    }

    /// Returns the speculative map.
    pub const fn speculative_map(&self) -> &RenameMap {
        &self.rmt
    }

    /// Returns the architectural map.
    pub const fn architectural_map(&self) -> &RenameMap {
        &self.amt
    }

    /// Iterates the free list, next-to-allocate first.
    pub fn free_registers(&self) -> impl Iterator<Item = PhysReg> + '_ {
        self.free_list.iter()
    }

    /// Checks that the free list, the architectural map, and in-flight
    /// destinations partition the physical register file.
    ///
    /// Only meaningful between operations, when every renamed destination has
    /// been dispatched.
    ///
    /// # Errors
    ///
    /// Returns the first duplicated, leaked, or out-of-range register found.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let size = self.prf.len();
        let mut owner: Vec<Option<&'static str>> = vec![None; size];

        let free = self.free_list.iter().map(|reg| (reg, "free list"));
        let amt = self.amt.iter().map(|reg| (reg, "architectural map"));
        let active = self
            .active_list
            .iter()
            .filter_map(|(_, entry)| entry.dest)
            .map(|dest| (dest.phys, "active list"));

        for (reg, who) in free.chain(amt).chain(active) {
            let Some(slot) = owner.get_mut(reg.idx()) else {
                return Err(InvariantViolation::OutOfRange { reg, size });
            };
            if let Some(first) = *slot {
                return Err(InvariantViolation::Duplicate {
                    reg,
                    first,
                    second: who,
                });
            }
            *slot = Some(who);
        }

        match owner.iter().position(Option::is_none) {
            Some(idx) => Err(InvariantViolation::Leaked(PhysReg(idx))),
            None => Ok(()),
        }
    }
}
