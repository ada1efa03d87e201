//! # Invariant Properties
//!
//! Drives the renamer with random but contract-respecting operation sequences
//! and checks after every step that:
//! - free list, architectural map, and in-flight destinations partition the
//!   physical register file,
//! - the global branch mask names exactly the unresolved branches,
//! - a misprediction restores the speculative map seen at its checkpoint,
//! - a squash leaves the speculative map equal to the architectural map.

use proptest::prelude::*;
use rvsim_rename::common::BranchId;
use rvsim_rename::core::regfile::RenameMap;

use crate::common::harness::RenameHarness;

const LOG_REGS: usize = 8;
const PHYS_REGS: usize = 24;
const BRANCHES: usize = 4;
const ACTIVE: usize = 16;

#[derive(Debug, Clone)]
enum Op {
    Alu(usize),
    Store,
    Branch,
    Retire,
    Resolve { pick: usize, correct: bool },
    Squash,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..LOG_REGS).prop_map(Op::Alu),
        1 => Just(Op::Store),
        2 => Just(Op::Branch),
        3 => Just(Op::Retire),
        2 => (any::<usize>(), any::<bool>())
            .prop_map(|(pick, correct)| Op::Resolve { pick, correct }),
        1 => Just(Op::Squash),
    ]
}

/// An unresolved branch: active list slot, checkpoint tag, map at checkpoint.
type Pending = (usize, BranchId, RenameMap);

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_invariants_hold(ops in proptest::collection::vec(op_strategy(), 1..200)) {
        let mut h = RenameHarness::new(LOG_REGS, PHYS_REGS, BRANCHES, ACTIVE);
        // Program order, oldest first.
        let mut pending: Vec<Pending> = Vec::new();

        for op in ops {
            match op {
                Op::Alu(rd) => {
                    if !h.rn.stall_reg(1) && !h.rn.stall_dispatch(1) {
                        let _ = h.alu(rd);
                    }
                }
                Op::Store => {
                    if !h.rn.stall_dispatch(1) {
                        let _ = h.store();
                    }
                }
                Op::Branch => {
                    if !h.rn.stall_branch(1) && !h.rn.stall_dispatch(1) {
                        let snapshot = h.rn.speculative_map().clone();
                        let (slot, branch) = h.branch();
                        pending.push((slot, branch, snapshot));
                    }
                }
                Op::Retire => {
                    if let Some(oldest) = h.rn.oldest_slot() {
                        // A branch resolves before it can retire.
                        if let Some(pos) = pending.iter().position(|(slot, _, _)| *slot == oldest) {
                            let (slot, branch, _) = pending.remove(pos);
                            h.rn.resolve(slot, branch, true);
                        }
                        h.retire(1);
                    }
                }
                Op::Resolve { pick, correct } => {
                    if !pending.is_empty() {
                        let i = pick % pending.len();
                        if correct {
                            let (slot, branch, _) = pending.remove(i);
                            h.rn.resolve(slot, branch, true);
                        } else {
                            let (slot, branch, snapshot) = pending[i].clone();
                            h.rn.resolve(slot, branch, false);
                            prop_assert_eq!(h.rn.speculative_map(), &snapshot);
                            prop_assert_eq!(h.rn.in_flight().last().map(|(s, _)| s), Some(slot));
                            pending.truncate(i);
                        }
                    }
                }
                Op::Squash => {
                    h.rn.squash();
                    pending.clear();
                    prop_assert_eq!(h.rn.speculative_map(), h.rn.architectural_map());
                    prop_assert_eq!(h.rn.active_len(), 0);
                }
            }

            prop_assert_eq!(h.rn.check_invariants(), Ok(()));

            let in_flight = h.rn.in_flight().filter(|(_, e)| e.dest.is_some()).count();
            prop_assert_eq!(h.rn.free_count() + LOG_REGS + in_flight, PHYS_REGS);

            let expected_mask = pending.iter().fold(0, |mask, (_, branch, _)| mask | branch.bit());
            prop_assert_eq!(h.rn.get_branch_mask().0, expected_mask);
        }
    }

    #[test]
    fn prop_stall_reg_matches_free_count(allocs in 0..=16usize, bundle in 0..24usize) {
        let mut h = RenameHarness::new(LOG_REGS, PHYS_REGS, BRANCHES, ACTIVE);
        for i in 0..allocs {
            let _ = h.alu(i % LOG_REGS);
        }
        let free = PHYS_REGS - LOG_REGS - allocs;
        prop_assert_eq!(h.rn.free_count(), free);
        prop_assert_eq!(h.rn.stall_reg(bundle), bundle > free);
    }
}
