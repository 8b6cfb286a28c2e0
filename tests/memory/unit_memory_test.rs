/*!
 * Memory Manager Tests
 * Allocation, release, coalescing and failure handling
 */

use pretty_assertions::assert_eq;
use qhalloc::memory::{
    Allocator, BlockState, ManagerConfig, MemoryError, MemoryInfo, MemoryManager, MemoryPressure,
};

fn layout(manager: &MemoryManager) -> Vec<(usize, usize, BlockState)> {
    manager
        .blocks()
        .map(|b| (b.begin, b.size, b.state))
        .collect()
}

#[test]
fn test_memory_manager_initialization() {
    let mem_mgr = MemoryManager::new(100);
    let (total, used, available) = mem_mgr.info();

    assert_eq!(total, 100);
    assert_eq!(used, 0);
    assert_eq!(available, total);
    assert_eq!(layout(&mem_mgr), vec![(1, 100, BlockState::Free)]);
}

#[test]
fn test_sequential_allocations_are_contiguous() {
    let mut mem_mgr = MemoryManager::new(100);

    let first = mem_mgr.allocate(30).unwrap().unwrap();
    let second = mem_mgr.allocate(50).unwrap().unwrap();

    assert_eq!(mem_mgr.block(first).unwrap().begin, 1);
    assert_eq!(mem_mgr.block(second).unwrap().begin, 31);
    assert_eq!(
        layout(&mem_mgr),
        vec![
            (1, 30, BlockState::Allocated),
            (31, 50, BlockState::Allocated),
            (81, 20, BlockState::Free),
        ]
    );
}

#[test]
fn test_freed_gap_is_reused() {
    let mut mem_mgr = MemoryManager::new(100);

    let first = mem_mgr.allocate(30).unwrap();
    mem_mgr.allocate(50).unwrap();
    mem_mgr.free(first).unwrap();

    let third = mem_mgr.allocate(20).unwrap().unwrap();
    assert_eq!(mem_mgr.block(third).unwrap().begin, 1);
    assert!(mem_mgr.check_invariants());
}

#[test]
fn test_oversized_request_leaves_arena_unchanged() {
    let mut mem_mgr = MemoryManager::new(100);
    let before = layout(&mem_mgr);

    assert_eq!(mem_mgr.allocate(1000).unwrap(), None);
    assert_eq!(layout(&mem_mgr), before);
    assert_eq!(mem_mgr.info(), (100, 0, 100));
}

#[test]
fn test_fragmented_arena_rejects_large_request() {
    let mut mem_mgr = MemoryManager::new(30);
    let ids: Vec<_> = (0..3).map(|_| mem_mgr.allocate(10).unwrap()).collect();
    mem_mgr.free(ids[0]).unwrap();
    mem_mgr.free(ids[2]).unwrap();

    // 20 units are free but split into two 10-unit holes
    assert_eq!(mem_mgr.stats().available_memory, 20);
    assert_eq!(mem_mgr.allocate(11).unwrap(), None);
    assert!(mem_mgr.allocate(10).unwrap().is_some());
}

#[test]
fn test_free_merges_left_neighbour() {
    let mut mem_mgr = MemoryManager::new(30);
    let a = mem_mgr.allocate(10).unwrap();
    let b = mem_mgr.allocate(10).unwrap();
    mem_mgr.allocate(10).unwrap();

    mem_mgr.free(a).unwrap();
    mem_mgr.free(b).unwrap();
    assert_eq!(
        layout(&mem_mgr),
        vec![(1, 20, BlockState::Free), (21, 10, BlockState::Allocated)]
    );
}

#[test]
fn test_free_merges_right_neighbour() {
    let mut mem_mgr = MemoryManager::new(30);
    mem_mgr.allocate(10).unwrap();
    let b = mem_mgr.allocate(10).unwrap();

    mem_mgr.free(b).unwrap();
    assert_eq!(
        layout(&mem_mgr),
        vec![(1, 10, BlockState::Allocated), (11, 20, BlockState::Free)]
    );
}

#[test]
fn test_free_merges_both_neighbours() {
    let mut mem_mgr = MemoryManager::new(30);
    let a = mem_mgr.allocate(10).unwrap();
    let b = mem_mgr.allocate(10).unwrap();
    let c = mem_mgr.allocate(10).unwrap();

    mem_mgr.free(a).unwrap();
    mem_mgr.free(c).unwrap();
    mem_mgr.free(b).unwrap();
    assert_eq!(layout(&mem_mgr), vec![(1, 30, BlockState::Free)]);
    assert!(mem_mgr.check_invariants());
}

#[test]
fn test_invalid_deallocation() {
    let mut mem_mgr = MemoryManager::new(10);
    let id = mem_mgr.allocate(5).unwrap().unwrap();
    mem_mgr.free(Some(id)).unwrap();

    let result = mem_mgr.free(Some(id));
    assert_eq!(result, Err(MemoryError::InvalidHandle(id)));
    assert!(!mem_mgr.is_allocated(id));
    assert_eq!(mem_mgr.block(id), None);
}

#[test]
fn test_free_of_none_is_silent() {
    let mut mem_mgr = MemoryManager::new(10);
    mem_mgr.allocate(5).unwrap();
    let before = layout(&mem_mgr);
    mem_mgr.free(None).unwrap();
    assert_eq!(layout(&mem_mgr), before);
}

#[test]
fn test_trait_objects() {
    let mut mem_mgr = MemoryManager::new(64);
    let allocator: &mut dyn Allocator = &mut mem_mgr;
    let id = allocator.allocate(16).unwrap().unwrap();
    assert!(allocator.is_allocated(id));
    allocator.free(Some(id)).unwrap();

    let info: &dyn MemoryInfo = &mem_mgr;
    assert_eq!(info.info(), (64, 0, 64));
    assert_eq!(info.pressure(), MemoryPressure::Low);
}

#[test]
fn test_pressure_escalates() {
    let mut mem_mgr = MemoryManager::new(100);
    mem_mgr.allocate(65).unwrap();
    assert_eq!(mem_mgr.pressure(), MemoryPressure::Medium);
    mem_mgr.allocate(20).unwrap();
    assert_eq!(mem_mgr.pressure(), MemoryPressure::High);
    mem_mgr.allocate(15).unwrap();
    assert_eq!(mem_mgr.pressure(), MemoryPressure::Critical);
}

#[test]
fn test_stats_serialize() {
    let mut mem_mgr = MemoryManager::with_config(ManagerConfig::new(50));
    mem_mgr.allocate(20).unwrap();
    let json = serde_json::to_value(mem_mgr.stats()).unwrap();
    assert_eq!(json["used_memory"], 20);
    assert_eq!(json["largest_free_block"], 30);
}
