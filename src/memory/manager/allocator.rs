/*!
 * Memory Allocator Implementation
 * Allocation and deallocation logic
 */

use super::super::types::{BlockId, BlockState, MemoryError, MemoryResult};
use super::arena::BlockNode;
use super::free_index::FreeEntry;
use super::MemoryManager;
use crate::core::types::Size;
use log::{debug, warn};

impl MemoryManager {
    /// Allocate `size` units from the largest free block
    ///
    /// Returns `Ok(None)` when the request cannot be met (including `size == 0`); the
    /// arena is left untouched in that case. `Err` only reports a broken free-block index.
    pub fn allocate(&mut self, size: Size) -> MemoryResult<Option<BlockId>> {
        if size == 0 {
            debug!("Rejected zero-size allocation");
            return Ok(None);
        }

        self.purge_invalid()?;

        let largest = if self.free_index.is_empty() {
            None
        } else {
            Some(*self.free_index.peek_min()?)
        };
        let Some(largest) = largest.filter(|entry| entry.size >= size) else {
            debug!(
                "Cannot allocate {} units: largest free block is {} units ({} used / {} total)",
                size,
                largest.map_or(0, |entry| entry.size),
                self.used_memory,
                self.total_memory
            );
            return Ok(None);
        };

        self.free_index.extract_min()?;
        let Some(slot) = self.blocks.resolve(largest.block) else {
            // purge_invalid left a live entry on top, so its block must resolve
            return Err(MemoryError::InvalidHandle(largest.block));
        };
        let Some(source) = self.blocks.release(slot) else {
            return Err(MemoryError::InvalidHandle(largest.block));
        };
        self.free_blocks -= 1;

        let allocated = self.blocks.insert(BlockNode::allocated(
            source.begin,
            size,
            source.prev,
            source.next,
        ));
        self.blocks.link(allocated);

        if source.size > size {
            let remainder = self.blocks.insert(BlockNode::free(
                source.begin + size,
                source.size - size,
                allocated,
                source.next,
            ));
            self.blocks.link(remainder);
            self.index_free_block(remainder)?;
            debug!(
                "Split block at {}: keeping {} units, {} units at {} stay free",
                source.begin,
                size,
                source.size - size,
                source.begin + size
            );
        }

        self.used_memory += size;
        self.allocated_blocks += 1;
        self.compact_if_sparse();

        if let Some(level) = self.check_memory_pressure(self.used_memory) {
            warn!(
                "Memory pressure {}: allocated {} units at {} ({:.1}% used: {} / {})",
                level,
                size,
                source.begin,
                (self.used_memory as f64 / self.total_memory as f64) * 100.0,
                self.used_memory,
                self.total_memory
            );
        } else {
            debug!("Allocated {} units at {}", size, source.begin);
        }

        Ok(Some(self.blocks.id(allocated)))
    }

    /// Release an allocated block, merging it with free neighbours
    ///
    /// `None` is ignored. Stale handles and handles to blocks that are not allocated are
    /// rejected without touching the arena.
    pub fn free(&mut self, handle: Option<BlockId>) -> MemoryResult<()> {
        let Some(handle) = handle else {
            return Ok(());
        };

        let Some(slot) = self.blocks.resolve(handle) else {
            warn!("Attempted to free stale or unknown block {}", handle);
            return Err(MemoryError::InvalidHandle(handle));
        };
        if self.blocks[slot].state != BlockState::Allocated {
            warn!("Attempted to free block {} which is not allocated", handle);
            return Err(MemoryError::NotAllocated(handle));
        }

        // Make sure the merged block can be indexed before the list is rewritten
        let absorbed = [self.blocks[slot].prev, self.blocks[slot].next]
            .into_iter()
            .filter(|&neighbour| self.blocks[neighbour].is_free())
            .count();
        self.ensure_index_room(absorbed)?;

        let Some(freed) = self.blocks.release(slot) else {
            return Err(MemoryError::InvalidHandle(handle));
        };
        self.used_memory -= freed.size;
        self.allocated_blocks -= 1;

        let (mut begin, mut size) = (freed.begin, freed.size);
        let (mut prev, mut next) = (freed.prev, freed.next);

        if self.blocks[prev].is_free() {
            let left = &mut self.blocks[prev];
            left.valid = false;
            begin = left.begin;
            size += left.size;
            prev = left.prev;
            self.retire_free_block();
        }
        if self.blocks[next].is_free() {
            let right = &mut self.blocks[next];
            right.valid = false;
            size += right.size;
            next = right.next;
            self.retire_free_block();
        }

        let merged = self.blocks.insert(BlockNode::free(begin, size, prev, next));
        self.blocks.link(merged);
        self.index_free_block(merged)?;
        self.compact_if_sparse();

        debug!(
            "Freed {} units at {}; free block now spans {} units at {}",
            freed.size, freed.begin, size, begin
        );
        Ok(())
    }

    /// Check if a handle names a live allocated block
    pub fn is_allocated(&self, handle: BlockId) -> bool {
        self.blocks
            .resolve(handle)
            .is_some_and(|slot| self.blocks[slot].state == BlockState::Allocated)
    }

    /// Add the free block at `slot` to the free-block index, sweeping tombstones out
    /// first if the index is full
    pub(super) fn index_free_block(&mut self, slot: usize) -> MemoryResult<()> {
        let node = &self.blocks[slot];
        let entry = FreeEntry {
            size: node.size,
            begin: node.begin,
            block: self.blocks.id(slot),
        };
        if self.free_index.is_full() {
            self.collect();
        }
        self.free_index.insert(entry)?;
        self.free_blocks += 1;
        Ok(())
    }

    /// Account for a free block turned into a tombstone
    fn retire_free_block(&mut self) {
        self.free_blocks -= 1;
        self.tombstones += 1;
    }
}
