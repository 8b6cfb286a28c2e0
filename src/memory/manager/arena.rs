/*!
 * Block Arena
 * Slot storage for the address-ordered block list
 */

use super::super::types::{Block, BlockId, BlockState};
use crate::core::types::{Address, Size};
use std::ops::{Index, IndexMut};

/// Slot of the leading boundary block
pub(super) const HEAD: usize = 0;
/// Slot of the trailing boundary block
pub(super) const TAIL: usize = 1;

/// Node of the doubly-linked block list
#[derive(Debug, Clone)]
pub(super) struct BlockNode {
    pub begin: Address,
    pub size: Size,
    pub state: BlockState,
    /// Cleared once a coalesce supersedes this free block
    pub valid: bool,
    pub prev: usize,
    pub next: usize,
}

impl BlockNode {
    pub fn free(begin: Address, size: Size, prev: usize, next: usize) -> Self {
        Self {
            begin,
            size,
            state: BlockState::Free,
            valid: true,
            prev,
            next,
        }
    }

    pub fn allocated(begin: Address, size: Size, prev: usize, next: usize) -> Self {
        Self {
            state: BlockState::Allocated,
            ..Self::free(begin, size, prev, next)
        }
    }

    fn boundary(begin: Address, prev: usize, next: usize) -> Self {
        Self {
            state: BlockState::Boundary,
            ..Self::free(begin, 0, prev, next)
        }
    }

    pub fn is_free(&self) -> bool {
        self.state == BlockState::Free
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<BlockNode>,
}

/// Owner of every block, boundaries included
///
/// Blocks refer to their neighbours by slot index. Released slots are recycled with a
/// bumped generation so handles to the old occupant stop resolving.
#[derive(Debug)]
pub(super) struct BlockArena {
    slots: Vec<Slot>,
    vacant: Vec<usize>,
}

impl BlockArena {
    /// Arena holding only the two boundary blocks around `[1, arena_size]`
    pub fn new(arena_size: Size) -> Self {
        let head = BlockNode::boundary(0, HEAD, TAIL);
        let tail = BlockNode::boundary(arena_size + 1, HEAD, TAIL);
        Self {
            slots: vec![
                Slot {
                    generation: 0,
                    node: Some(head),
                },
                Slot {
                    generation: 0,
                    node: Some(tail),
                },
            ],
            vacant: Vec::new(),
        }
    }

    /// Store a node, reusing a vacant slot when one exists
    pub fn insert(&mut self, node: BlockNode) -> usize {
        match self.vacant.pop() {
            Some(index) => {
                self.slots[index].node = Some(node);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                self.slots.len() - 1
            }
        }
    }

    /// Take a node out of its slot and retire the slot's current generation
    pub fn release(&mut self, index: usize) -> Option<BlockNode> {
        debug_assert!(index != HEAD && index != TAIL, "boundary blocks are permanent");
        let slot = self.slots.get_mut(index)?;
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.vacant.push(index);
        Some(node)
    }

    pub fn get(&self, index: usize) -> Option<&BlockNode> {
        self.slots.get(index)?.node.as_ref()
    }

    /// Handle for the node currently stored at `index`
    pub fn id(&self, index: usize) -> BlockId {
        BlockId {
            index,
            generation: self.slots[index].generation,
        }
    }

    /// Slot index for a handle, if it still names a live node
    pub fn resolve(&self, id: BlockId) -> Option<usize> {
        let slot = self.slots.get(id.index)?;
        (slot.generation == id.generation && slot.node.is_some()).then_some(id.index)
    }

    /// Public snapshot of the node at `index`
    pub fn snapshot(&self, index: usize) -> Option<Block> {
        self.get(index).map(|node| Block {
            id: self.id(index),
            begin: node.begin,
            size: node.size,
            state: node.state,
        })
    }

    /// Point the neighbours of `index` at it
    pub fn link(&mut self, index: usize) {
        let (prev, next) = {
            let node = &self[index];
            (node.prev, node.next)
        };
        self[prev].next = index;
        self[next].prev = index;
    }

    /// Slot indices in address order, boundaries excluded
    pub fn walk(&self) -> impl Iterator<Item = usize> + '_ {
        let mut cursor = self[HEAD].next;
        std::iter::from_fn(move || {
            if cursor == TAIL {
                return None;
            }
            let current = cursor;
            cursor = self[current].next;
            Some(current)
        })
    }

    /// Number of occupied slots, boundaries and tombstones included
    pub fn occupied_slots(&self) -> usize {
        self.slots.len() - self.vacant.len()
    }
}

impl Index<usize> for BlockArena {
    type Output = BlockNode;

    fn index(&self, index: usize) -> &BlockNode {
        match self.get(index) {
            Some(node) => node,
            None => panic!("block slot {index} is vacant"),
        }
    }
}

impl IndexMut<usize> for BlockArena {
    fn index_mut(&mut self, index: usize) -> &mut BlockNode {
        match self.slots.get_mut(index).and_then(|slot| slot.node.as_mut()) {
            Some(node) => node,
            None => panic!("block slot {index} is vacant"),
        }
    }
}
