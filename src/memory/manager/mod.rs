/*!
 * Memory Management
 *
 * Arena allocator over an address-ordered block list.
 *
 * ## Allocation
 *
 * Free blocks are indexed by a **QuickHeap** whose minimum is the *largest* free
 * block (worst-fit):
 * - A request is served from the largest block, or fails when even that is too small
 * - The block is split: the front becomes the allocation, the remainder stays free
 *
 * ## Release
 *
 * - **Coalescing**: a freed block absorbs free neighbours on both sides, so no two
 *   free blocks are ever adjacent
 * - **Tombstones**: absorbed neighbours are marked invalid instead of being dug out
 *   of the index; the allocator discards them when they surface at the top
 * - **Compaction**: when the index fills up, tombstones are swept out in one pass
 */

mod allocator;
mod arena;
mod free_index;
mod gc;
mod inspect;

use super::config::ManagerConfig;
use super::traits::{Allocator, MemoryInfo};
use super::types::{Block, BlockId, MemoryPressure, MemoryResult, MemoryStats};
use crate::core::limits::ARENA_BASE_OFFSET;
use crate::core::types::Size;
use arena::{BlockArena, BlockNode, HEAD, TAIL};
use free_index::{new_index, FreeIndex};
use log::{error, info};

/// Memory manager
pub struct MemoryManager {
    blocks: BlockArena,
    free_index: FreeIndex,
    total_memory: Size,
    used_memory: Size,
    allocated_blocks: usize,
    free_blocks: usize,
    tombstones: usize,
    // Memory pressure thresholds (ratio of used to total)
    warning_threshold: f64,
    critical_threshold: f64,
}

impl MemoryManager {
    /// Manager for an arena of `arena_size` units starting at offset 1
    pub fn new(arena_size: Size) -> Self {
        Self::with_config(ManagerConfig::new(arena_size))
    }

    pub fn with_config(config: ManagerConfig) -> Self {
        // The initial free block needs one slot even under an explicit zero capacity
        let capacity = config.resolved_queue_capacity().max(1);
        let mut manager = Self {
            blocks: BlockArena::new(config.arena_size),
            free_index: new_index(capacity),
            total_memory: config.arena_size,
            used_memory: 0,
            allocated_blocks: 0,
            free_blocks: 0,
            tombstones: 0,
            warning_threshold: config.warning_threshold,
            critical_threshold: config.critical_threshold,
        };

        if config.arena_size > 0 {
            let whole = manager.blocks.insert(BlockNode::free(
                ARENA_BASE_OFFSET,
                config.arena_size,
                HEAD,
                TAIL,
            ));
            manager.blocks.link(whole);
            if let Err(e) = manager.index_free_block(whole) {
                error!("Failed to index the initial free block: {}", e);
            }
        }

        info!(
            "Memory manager initialized with {} units and a {}-slot worst-fit free-block index",
            config.arena_size, capacity
        );
        manager
    }

    /// Total units under management
    pub fn arena_size(&self) -> Size {
        self.total_memory
    }

    /// Check memory pressure level for a given usage
    pub(super) fn check_memory_pressure(&self, used: Size) -> Option<MemoryPressure> {
        if self.total_memory == 0 {
            return None;
        }
        let usage_ratio = used as f64 / self.total_memory as f64;

        if usage_ratio >= self.critical_threshold {
            Some(MemoryPressure::Critical)
        } else if usage_ratio >= self.warning_threshold {
            Some(MemoryPressure::High)
        } else {
            None
        }
    }
}

// Implement trait interfaces
impl Allocator for MemoryManager {
    fn allocate(&mut self, size: Size) -> MemoryResult<Option<BlockId>> {
        MemoryManager::allocate(self, size)
    }

    fn free(&mut self, handle: Option<BlockId>) -> MemoryResult<()> {
        MemoryManager::free(self, handle)
    }

    fn is_allocated(&self, handle: BlockId) -> bool {
        MemoryManager::is_allocated(self, handle)
    }

    fn block(&self, handle: BlockId) -> Option<Block> {
        MemoryManager::block(self, handle)
    }
}

impl MemoryInfo for MemoryManager {
    fn stats(&self) -> MemoryStats {
        MemoryManager::stats(self)
    }

    fn info(&self) -> (Size, Size, Size) {
        MemoryManager::info(self)
    }

    fn pressure(&self) -> MemoryPressure {
        MemoryManager::pressure(self)
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::with_config(ManagerConfig::default())
    }
}

impl std::fmt::Debug for MemoryManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryManager")
            .field("total_memory", &self.total_memory)
            .field("used_memory", &self.used_memory)
            .field("allocated_blocks", &self.allocated_blocks)
            .field("free_blocks", &self.free_blocks)
            .field("tombstones", &self.tombstones)
            .field("free_index", &self.free_index)
            .finish()
    }
}
