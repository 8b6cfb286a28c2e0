/*!
 * Address Recycling Test
 * Verifies that released ranges and block slots are reused
 */

use qhalloc::memory::MemoryManager;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_address_recycling() {
    let mut manager = MemoryManager::new(1000);

    let addr = |m: &MemoryManager, id| m.block(id).map(|b| b.begin);

    let id1 = manager.allocate(100).unwrap().expect("Failed to allocate block 1");
    let id2 = manager.allocate(200).unwrap().expect("Failed to allocate block 2");
    let id3 = manager.allocate(50).unwrap().expect("Failed to allocate block 3");

    assert_eq!(addr(&manager, id1), Some(1));
    assert_eq!(addr(&manager, id2), Some(101));
    assert_eq!(addr(&manager, id3), Some(301));

    // Fill the tail so the freed middle block becomes the largest hole
    let tail = manager.allocate(600).unwrap().expect("Failed to allocate tail");
    assert_eq!(addr(&manager, tail), Some(351));

    manager.free(Some(id2)).expect("Failed to free block 2");

    // Worst-fit: the 200-unit hole is the largest free block
    let id4 = manager.allocate(120).unwrap().expect("Failed to allocate block 4");
    assert_eq!(addr(&manager, id4), Some(101));

    // The remainder of the split block serves the next request
    let id5 = manager.allocate(80).unwrap().expect("Failed to allocate block 5");
    assert_eq!(addr(&manager, id5), Some(221));

    let stats = manager.stats();
    assert_eq!(stats.used_memory, 950);
    assert_eq!(stats.free_blocks, 1);
    assert_eq!(stats.largest_free_block, 50);
    assert!(manager.check_invariants());
}

#[test]
fn test_block_slots_do_not_grow_under_churn() {
    let mut manager = MemoryManager::new(4096);
    let mut rng = StdRng::seed_from_u64(42);
    let mut live = Vec::new();

    for _ in 0..20_000 {
        if live.is_empty() || rng.gen_bool(0.5) {
            if let Some(id) = manager.allocate(rng.gen_range(1..64)).unwrap() {
                live.push(id);
            }
        } else {
            let victim = live.swap_remove(rng.gen_range(0..live.len()));
            manager.free(Some(victim)).unwrap();
        }
    }
    assert!(manager.check_invariants());

    for id in live.drain(..) {
        manager.free(Some(id)).unwrap();
    }
    manager.collect();

    let stats = manager.stats();
    assert_eq!(stats.used_memory, 0);
    assert_eq!(stats.free_blocks, 1);
    assert_eq!(stats.tombstones, 0);
    assert_eq!(stats.largest_free_block, 4096);
    assert!(manager.check_invariants());
}

#[test]
fn test_tombstones_stay_bounded_under_churn() {
    use qhalloc::core::limits::TOMBSTONE_COMPACTION_FLOOR;

    let mut manager = MemoryManager::new(1 << 20);
    let mut rng = StdRng::seed_from_u64(7);
    let mut live = Vec::new();

    for _ in 0..50_000 {
        if live.is_empty() || rng.gen_bool(0.5) {
            if let Some(id) = manager.allocate(rng.gen_range(1..50)).unwrap() {
                live.push(id);
            }
        } else {
            let victim = live.swap_remove(rng.gen_range(0..live.len()));
            manager.free(Some(victim)).unwrap();
        }

        let stats = manager.stats();
        let bound = stats.free_blocks.max(TOMBSTONE_COMPACTION_FLOOR);
        assert!(
            stats.tombstones <= bound,
            "{} tombstones for {} live free blocks",
            stats.tombstones,
            stats.free_blocks
        );
        assert_eq!(stats.queued_entries, stats.free_blocks + stats.tombstones);
    }
    assert!(manager.check_invariants());
}
