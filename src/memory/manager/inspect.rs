/*!
 * Memory Manager Introspection
 * Block lookup, statistics and consistency checks
 */

use super::super::types::{Block, BlockId, BlockState, MemoryPressure, MemoryStats};
use super::arena::{HEAD, TAIL};
use super::MemoryManager;
use crate::core::limits::{ARENA_BASE_OFFSET, MEDIUM_PRESSURE_THRESHOLD};
use crate::core::types::Size;

impl MemoryManager {
    /// Look up a live block by handle
    pub fn block(&self, handle: BlockId) -> Option<Block> {
        let slot = self.blocks.resolve(handle)?;
        self.blocks.snapshot(slot)
    }

    /// Blocks in address order, boundaries excluded
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.blocks
            .walk()
            .filter_map(move |slot| self.blocks.snapshot(slot))
    }

    /// Get memory info as (total, used, available)
    pub fn info(&self) -> (Size, Size, Size) {
        (
            self.total_memory,
            self.used_memory,
            self.total_memory - self.used_memory,
        )
    }

    pub fn stats(&self) -> MemoryStats {
        let largest_free_block = self
            .blocks()
            .filter(Block::is_free)
            .map(|block| block.size)
            .max()
            .unwrap_or(0);
        let usage_percentage = if self.total_memory == 0 {
            0.0
        } else {
            (self.used_memory as f64 / self.total_memory as f64) * 100.0
        };

        MemoryStats {
            total_memory: self.total_memory,
            used_memory: self.used_memory,
            available_memory: self.total_memory - self.used_memory,
            usage_percentage,
            allocated_blocks: self.allocated_blocks,
            free_blocks: self.free_blocks,
            largest_free_block,
            queued_entries: self.free_index.len(),
            queue_capacity: self.free_index.capacity(),
            tombstones: self.tombstones,
            pressure: self.pressure(),
        }
    }

    /// Get memory pressure level against this manager's thresholds
    pub fn pressure(&self) -> MemoryPressure {
        self.check_memory_pressure(self.used_memory)
            .unwrap_or_else(|| {
                let usage_ratio = self.used_memory as f64 / self.total_memory.max(1) as f64;
                if usage_ratio >= MEDIUM_PRESSURE_THRESHOLD {
                    MemoryPressure::Medium
                } else {
                    MemoryPressure::Low
                }
            })
    }

    /// Verify the block list and the counters kept alongside it
    ///
    /// Checks link symmetry, contiguous coverage of `[1, arena_size]` (which implies
    /// conservation and no overlap), absence of adjacent free blocks, and that every
    /// live free block appears in the free-block index exactly once.
    pub fn check_invariants(&self) -> bool {
        let mut expected_begin = ARENA_BASE_OFFSET;
        let mut prev = HEAD;
        let mut prev_free = false;
        let (mut used, mut allocated, mut free) = (0, 0, 0);

        for slot in self.blocks.walk() {
            let node = &self.blocks[slot];
            if node.prev != prev || node.begin != expected_begin || node.size == 0 || !node.valid {
                return false;
            }
            match node.state {
                BlockState::Free if prev_free => return false,
                BlockState::Free => free += 1,
                BlockState::Allocated => {
                    allocated += 1;
                    used += node.size;
                }
                BlockState::Boundary => return false,
            }
            prev_free = node.is_free();
            expected_begin += node.size;
            prev = slot;
        }

        let tail = &self.blocks[TAIL];
        if tail.prev != prev
            || tail.begin != expected_begin
            || expected_begin != self.total_memory + ARENA_BASE_OFFSET
        {
            return false;
        }
        if used != self.used_memory
            || allocated != self.allocated_blocks
            || free != self.free_blocks
        {
            return false;
        }

        let mut live_entries = 0;
        let mut stale_entries = 0;
        for entry in self.free_index.iter() {
            match self.blocks.resolve(entry.block).map(|slot| &self.blocks[slot]) {
                Some(node) if node.valid && node.is_free() => {
                    if node.begin != entry.begin || node.size != entry.size {
                        return false;
                    }
                    live_entries += 1;
                }
                Some(node) if !node.valid => stale_entries += 1,
                _ => return false,
            }
        }

        live_entries == self.free_blocks
            && stale_entries == self.tombstones
            && self.free_index.check_invariants()
    }
}
