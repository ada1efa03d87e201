//! Branch checkpoints and the global branch mask.
//!
//! Every unresolved branch owns one checkpoint slot, identified by its bit in
//! the global branch mask (GBM). A slot records what is needed to undo the
//! wrong path:
//! 1. **Rename map:** A private copy of the speculative map at the branch.
//! 2. **Free list head:** Restoring it returns every register allocated since.
//! 3. **Recover mask:** The GBM at the branch, i.e. the older branches still
//!    unresolved. Restoring it frees the slots of younger, squashed branches.
//!
//! When a branch resolves correctly its bit is cleared from the live mask and
//! from every saved recover mask, so a later misprediction of an older branch
//! can never bring it back.

use std::fmt;

use crate::common::reg::BranchId;
use crate::core::regfile::RenameMap;
use crate::core::ring::Cursor;

/// Fixed-width set of branch checkpoint slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct BranchMask(pub u64);

impl BranchMask {
    /// The empty mask.
    pub const EMPTY: Self = Self(0);

    /// Returns true if `branch` is in the mask.
    #[inline]
    pub const fn contains(self, branch: BranchId) -> bool {
        self.0 & branch.bit() != 0
    }

    /// Adds `branch` to the mask.
    #[inline]
    pub const fn insert(&mut self, branch: BranchId) {
        self.0 |= branch.bit();
    }

    /// Removes `branch` from the mask.
    #[inline]
    pub const fn remove(&mut self, branch: BranchId) {
        self.0 &= !branch.bit();
    }

    /// Returns the number of branches in the mask.
    #[inline]
    pub const fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns true if no branch is in the mask.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the lowest-numbered branch below `width` not in the mask.
    pub const fn first_clear(self, width: usize) -> Option<BranchId> {
        let idx = self.0.trailing_ones();
        if (idx as usize) < width {
            Some(BranchId(idx))
        } else {
            None
        }
    }
}

impl fmt::Display for BranchMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#b}", self.0)
    }
}

/// State captured when a branch is renamed.
#[derive(Clone, Debug)]
pub struct Checkpoint {
    /// Speculative map at the branch.
    pub rmt: RenameMap,
    /// Free list head at the branch.
    pub free_head: Cursor,
    /// Branches older than this one that were unresolved at the branch.
    pub recover_mask: BranchMask,
}

/// The checkpoint slots together with the live global branch mask.
#[derive(Clone, Debug)]
pub struct CheckpointPool {
    slots: Vec<Checkpoint>,
    gbm: BranchMask,
}

impl CheckpointPool {
    /// Creates `branches` idle slots sized for `log_regs` logical registers.
    pub fn new(branches: usize, log_regs: usize) -> Self {
        let blank = Checkpoint {
            rmt: RenameMap::identity(log_regs),
            free_head: Cursor::default(),
            recover_mask: BranchMask::EMPTY,
        };
        Self {
            slots: vec![blank; branches],
            gbm: BranchMask::EMPTY,
        }
    }

    /// Returns the number of slots.
    #[inline]
    pub fn width(&self) -> usize {
        self.slots.len()
    }

    /// Returns the live global branch mask.
    #[inline]
    pub const fn mask(&self) -> BranchMask {
        self.gbm
    }

    /// Returns the number of idle slots.
    #[inline]
    pub fn free(&self) -> usize {
        self.width() - self.gbm.count()
    }

    /// Returns true if fewer than `bundle_branch` slots are idle.
    #[inline]
    pub fn stall(&self, bundle_branch: usize) -> bool {
        bundle_branch > self.free()
    }

    /// Claims the lowest idle slot and records `rmt` and `free_head` in it.
    pub fn take(&mut self, rmt: &RenameMap, free_head: Cursor) -> BranchId {
        let branch = self.gbm.first_clear(self.width());
        assert!(branch.is_some(), "checkpoint with no free branch slot");
        let branch = branch.unwrap_or_default();

        let slot = &mut self.slots[branch.idx()];
        slot.rmt.copy_from(rmt);
        slot.free_head = free_head;
        slot.recover_mask = self.gbm;

        self.gbm.insert(branch);
        branch
    }

    /// Returns the checkpoint owned by `branch`, which must be outstanding.
    pub fn get(&self, branch: BranchId) -> &Checkpoint {
        assert!(
            self.gbm.contains(branch),
            "branch {branch} has no outstanding checkpoint"
        );
        &self.slots[branch.idx()]
    }

    /// Rewinds the live mask to the recover mask saved by `branch`.
    ///
    /// This releases `branch` and every younger branch.
    pub fn restore(&mut self, branch: BranchId) -> &Checkpoint {
        let slot = &self.slots[branch.idx()];
        assert!(
            self.gbm.contains(branch),
            "branch {branch} has no outstanding checkpoint"
        );
        self.gbm = slot.recover_mask;
        slot
    }

    /// Releases `branch` after a correct resolution, pruning it from every saved mask.
    pub fn prune(&mut self, branch: BranchId) {
        assert!(
            self.gbm.contains(branch),
            "branch {branch} has no outstanding checkpoint"
        );
        self.gbm.remove(branch);
        for slot in &mut self.slots {
            slot.recover_mask.remove(branch);
        }
    }

    /// Releases every slot.
    pub const fn clear(&mut self) {
        self.gbm = BranchMask::EMPTY;
    }
}
