//! # Register State Tests
//!
//! Reset state of the maps and register file, destination allocation, and the
//! allocate/commit round trip.

use pretty_assertions::assert_eq;
use rvsim_rename::common::{LogReg, PhysReg};

use crate::common::harness::RenameHarness;

fn regs(ids: &[usize]) -> Vec<PhysReg> {
    ids.iter().copied().map(PhysReg).collect()
}

#[test]
fn test_reset_state() {
    let h = RenameHarness::new(4, 8, 2, 4);
    for i in 0..4 {
        assert_eq!(h.rn.rename_source(LogReg(i)), PhysReg(i));
        assert_eq!(h.rn.architectural_map().get(LogReg(i)), PhysReg(i));
    }
    for i in 0..8 {
        assert!(h.rn.is_ready(PhysReg(i)));
        assert_eq!(h.rn.read(PhysReg(i)), 0);
    }
    assert_eq!(h.rn.free_registers().collect::<Vec<_>>(), regs(&[4, 5, 6, 7]));
    assert_eq!(h.rn.active_len(), 0);
    assert!(h.rn.precommit().is_none());
    h.check();
}

#[test]
fn test_rename_destination_updates_rmt_only() {
    let mut h = RenameHarness::new(4, 8, 2, 4);
    let p = h.rn.rename_destination(LogReg(2));
    assert_eq!(p, PhysReg(4));
    assert_eq!(h.rn.rename_source(LogReg(2)), PhysReg(4));
    assert_eq!(h.rn.architectural_map().get(LogReg(2)), PhysReg(2));
    assert_eq!(h.rn.free_count(), 3);
    assert_eq!(h.rn.stats().dest_renames, 1);
}

#[test]
fn test_rename_source_is_pure() {
    let h = RenameHarness::new(4, 8, 2, 4);
    let before = h.rn.speculative_map().clone();
    let _ = h.rn.rename_source(LogReg(3));
    assert_eq!(h.rn.speculative_map(), &before);
    assert_eq!(h.rn.free_count(), 4);
}

#[test]
fn test_value_and_ready() {
    let mut h = RenameHarness::new(4, 8, 2, 4);
    let (_, p) = h.alu(1);
    h.rn.clear_ready(p);
    assert!(!h.rn.is_ready(p));
    h.rn.write(p, 0xdead_beef);
    h.rn.set_ready(p);
    assert!(h.rn.is_ready(p));
    assert_eq!(h.rn.read(p), 0xdead_beef);
}

#[test]
fn test_allocate_commit_round_trip() {
    let mut h = RenameHarness::new(4, 8, 2, 4);
    let (_, p) = h.alu(2);
    assert_eq!(p, PhysReg(4));
    h.check();

    h.retire(1);
    assert_eq!(h.rn.architectural_map().get(LogReg(2)), PhysReg(4));
    // The register AMT used to hold for r2 goes to the tail of the free list.
    assert_eq!(h.rn.free_registers().collect::<Vec<_>>(), regs(&[5, 6, 7, 2]));
    assert_eq!(h.rn.stats().committed, 1);
    assert_eq!(h.rn.stats().regs_released, 1);
    h.check();
}

#[test]
fn test_write_after_write_commit_order() {
    let mut h = RenameHarness::new(4, 8, 2, 4);
    let (_, first) = h.alu(1);
    let (_, second) = h.alu(1);
    assert_eq!(h.rn.rename_source(LogReg(1)), second);

    h.retire(1);
    assert_eq!(h.rn.architectural_map().get(LogReg(1)), first);
    h.retire(1);
    assert_eq!(h.rn.architectural_map().get(LogReg(1)), second);
    // r1's reset register is freed first, then the first rename's register.
    assert_eq!(h.rn.free_registers().collect::<Vec<_>>(), regs(&[6, 7, 1, 4]));
    h.check();
}

#[test]
fn test_free_list_recycles_through_wraparound() {
    let mut h = RenameHarness::new(2, 4, 1, 2);
    for i in 0..20 {
        let _ = h.alu(i % 2);
        h.retire(1);
        h.check();
    }
    assert_eq!(h.rn.free_count(), 2);
    assert_eq!(h.rn.stats().committed, 20);
}

#[test]
#[should_panic(expected = "empty free list")]
fn test_rename_without_free_register_panics() {
    let mut h = RenameHarness::new(2, 3, 1, 4);
    let _ = h.alu(0);
    let _ = h.rn.rename_destination(LogReg(1));
}
