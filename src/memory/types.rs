/*!
 * Memory Types
 * Common types for the arena allocator
 */

use crate::core::types::{Address, Size};
use crate::heap::QueueError;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
///
/// Running out of space is not an error: `allocate` reports it as `Ok(None)`.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum MemoryError {
    #[error("Invalid block handle {0}: stale or never issued by this manager")]
    #[diagnostic(
        code(memory::invalid_handle),
        help("The block was probably freed already. Drop handles once they are freed.")
    )]
    InvalidHandle(BlockId),

    #[error("Block {0} is not allocated")]
    #[diagnostic(
        code(memory::not_allocated),
        help("Only handles returned by allocate() can be freed.")
    )]
    NotAllocated(BlockId),

    #[error("Free-block index failure: {0}")]
    #[diagnostic(
        code(memory::free_index),
        help("The free-block index is too small for this arena. Raise the queue capacity.")
    )]
    Queue(#[from] QueueError),
}

/// Stable handle to a block
///
/// Slots in the block arena are recycled; the generation tells a recycled slot apart
/// from the block a stale handle once named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Block occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockState {
    Free,
    Allocated,
    /// Zero-size sentinel at either end of the block list
    Boundary,
}

/// Snapshot of a block in the address-ordered list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub begin: Address,
    pub size: Size,
    pub state: BlockState,
}

impl Block {
    /// One past the last address of the block
    pub fn end(&self) -> Address {
        self.begin + self.size
    }

    pub fn is_free(&self) -> bool {
        self.state == BlockState::Free
    }

    pub fn is_allocated(&self) -> bool {
        self.state == BlockState::Allocated
    }
}

/// Memory statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_memory: usize,
    pub used_memory: usize,
    pub available_memory: usize,
    pub usage_percentage: f64,
    pub allocated_blocks: usize,
    pub free_blocks: usize,
    pub largest_free_block: usize,
    /// Entries in the free-block index, tombstones included
    pub queued_entries: usize,
    /// Slots reserved for the free-block index
    pub queue_capacity: usize,
    pub tombstones: usize,
    /// Pressure level against the manager's configured thresholds
    pub pressure: MemoryPressure,
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}
