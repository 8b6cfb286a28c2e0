/*!
 * QuickHeap Allocator Library
 *
 * Arena memory manager with a worst-fit free-block index built on an
 * incremental-quicksort priority queue.
 */

pub mod cli;
pub mod core;
pub mod heap;
pub mod memory;
pub mod monitoring;

// Re-exports
pub use heap::{Comparator, NaturalOrder, PriorityQueue, QueueError, QueueResult, QuickHeap};
pub use memory::{
    Allocator, Block, BlockId, BlockState, ManagerConfig, MemoryError, MemoryInfo, MemoryManager,
    MemoryPressure, MemoryResult, MemoryStats,
};
pub use monitoring::init_tracing;
