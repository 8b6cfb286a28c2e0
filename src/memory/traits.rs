/*!
 * Memory Traits
 * Memory management abstractions
 */

use super::types::*;
use crate::core::types::Size;

/// Memory allocator interface
pub trait Allocator {
    /// Allocate `size` units; `Ok(None)` when no free block is large enough
    fn allocate(&mut self, size: Size) -> MemoryResult<Option<BlockId>>;

    /// Release a block; `None` is a no-op
    fn free(&mut self, handle: Option<BlockId>) -> MemoryResult<()>;

    /// Check if a handle names a live allocated block
    fn is_allocated(&self, handle: BlockId) -> bool;

    /// Look up a block by handle
    fn block(&self, handle: BlockId) -> Option<Block>;
}

/// Memory statistics provider
pub trait MemoryInfo {
    /// Get overall memory statistics
    fn stats(&self) -> MemoryStats;

    /// Get memory info as (total, used, available)
    fn info(&self) -> (Size, Size, Size);

    /// Get memory pressure level
    fn pressure(&self) -> MemoryPressure {
        self.stats().pressure
    }
}
