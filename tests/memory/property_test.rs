/*!
 * Memory Manager Property Tests
 * Random request sequences against the arena invariants
 */

use proptest::prelude::*;
use qhalloc::memory::{BlockState, ManagerConfig, MemoryManager};

#[derive(Debug, Clone)]
enum Op {
    Allocate(usize),
    Free(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1usize..48).prop_map(Op::Allocate),
        2 => any::<usize>().prop_map(Op::Free),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn arena_stays_partitioned(
        arena in 1usize..512,
        ops in prop::collection::vec(op_strategy(), 1..200),
    ) {
        let mut manager = MemoryManager::new(arena);
        let mut live = Vec::new();

        for op in ops {
            match op {
                Op::Allocate(size) => {
                    let largest_before = manager.stats().largest_free_block;
                    match manager.allocate(size).unwrap() {
                        Some(id) => {
                            let block = manager.block(id).unwrap();
                            prop_assert_eq!(block.size, size);
                            prop_assert_eq!(block.state, BlockState::Allocated);
                            live.push(id);
                        }
                        None => prop_assert!(largest_before < size),
                    }
                }
                Op::Free(pick) if !live.is_empty() => {
                    let id = live.swap_remove(pick % live.len());
                    manager.free(Some(id)).unwrap();
                }
                Op::Free(_) => {}
            }

            prop_assert!(manager.check_invariants());
            let blocks: Vec<_> = manager.blocks().collect();
            let covered: usize = blocks.iter().map(|b| b.size).sum();
            prop_assert_eq!(covered, arena);
            prop_assert!(blocks.windows(2).all(|w| w[0].end() == w[1].begin));
            prop_assert!(blocks.windows(2).all(|w| !(w[0].is_free() && w[1].is_free())));
        }
    }

    #[test]
    fn worst_fit_takes_the_largest_hole(
        sizes in prop::collection::vec(1usize..32, 2..16),
        request in 1usize..32,
    ) {
        let arena: usize = sizes.iter().sum();
        let mut manager = MemoryManager::new(arena);
        let ids: Vec<_> = sizes
            .iter()
            .map(|&s| manager.allocate(s).unwrap().unwrap())
            .collect();
        // Every other block becomes a hole with an allocated block between holes
        for id in ids.iter().step_by(2) {
            manager.free(Some(*id)).unwrap();
        }

        let holes: Vec<_> = manager.blocks().filter(|b| b.is_free()).collect();
        let largest = holes.iter().map(|b| b.size).max().unwrap();
        let expected = holes.iter().find(|b| b.size == largest).unwrap().begin;

        match manager.allocate(request).unwrap() {
            Some(id) => {
                prop_assert!(request <= largest);
                prop_assert_eq!(manager.block(id).unwrap().begin, expected);
            }
            None => prop_assert!(request > largest),
        }
    }

    #[test]
    fn small_index_never_loses_blocks(
        capacity in 1usize..4,
        ops in prop::collection::vec(op_strategy(), 1..120),
    ) {
        let mut manager =
            MemoryManager::with_config(ManagerConfig::new(256).with_queue_capacity(capacity));
        let mut live = Vec::new();

        for op in ops {
            match op {
                Op::Allocate(size) => {
                    if let Some(id) = manager.allocate(size).unwrap() {
                        live.push(id);
                    }
                }
                Op::Free(pick) if !live.is_empty() => {
                    let idx = pick % live.len();
                    // An undersized index refuses the free up front and leaves the block live
                    if manager.free(Some(live[idx])).is_ok() {
                        live.swap_remove(idx);
                    }
                }
                Op::Free(_) => {}
            }
            prop_assert!(manager.check_invariants());
        }
    }
}
