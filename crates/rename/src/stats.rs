//! Rename unit statistics.
//!
//! Counts the events that drive renamer occupancy. It provides:
//! 1. **Rename traffic:** Destination allocations.
//! 2. **Ledger traffic:** Dispatched and committed instructions, recycled registers.
//! 3. **Recovery:** Checkpoints, correct resolutions, mispredictions, squashes, and
//!    the wrong-path work each discarded.

/// Event counters for a `Renamer`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenameStats {
    /// Destination registers allocated.
    pub dest_renames: u64,
    /// Instructions dispatched into the active list.
    pub dispatched: u64,
    /// Instructions committed.
    pub committed: u64,
    /// Physical registers returned to the free list by commit.
    pub regs_released: u64,
    /// Branch checkpoints taken.
    pub checkpoints: u64,
    /// Branches resolved as correctly predicted.
    pub branches_correct: u64,
    /// Branches resolved as mispredicted.
    pub branches_mispredicted: u64,
    /// Active list entries discarded by misprediction rollback.
    pub rollback_discarded: u64,
    /// Full squashes.
    pub squashes: u64,
    /// Active list entries discarded by squash.
    pub squash_discarded: u64,
}

impl RenameStats {
    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fraction of resolved branches that were mispredicted.
    pub fn misprediction_rate(&self) -> f64 {
        let resolved = self.branches_correct + self.branches_mispredicted;
        if resolved == 0 {
            0.0
        } else {
            self.branches_mispredicted as f64 / resolved as f64
        }
    }

    /// Prints a summary block to stdout.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("RENAME UNIT STATISTICS");
        println!("==========================================================");
        println!("  dest_renames            {}", self.dest_renames);
        println!("  dispatched              {}", self.dispatched);
        println!("  committed               {}", self.committed);
        println!("  regs_released           {}", self.regs_released);
        println!("  checkpoints             {}", self.checkpoints);
        println!("  branches_correct        {}", self.branches_correct);
        println!("  branches_mispredicted   {}", self.branches_mispredicted);
        println!("  misprediction_rate      {:.4}", self.misprediction_rate());
        println!("  rollback_discarded      {}", self.rollback_discarded);
        println!("  squashes                {}", self.squashes);
        println!("  squash_discarded        {}", self.squash_discarded);
    }
}
