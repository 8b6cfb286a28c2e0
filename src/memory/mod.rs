/*!
 * Memory Module
 * Arena allocator with worst-fit placement over a QuickHeap free-block index
 */

pub mod config;
pub mod manager;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use config::{ManagerConfig, DEFAULT_ARENA_SIZE};
pub use manager::MemoryManager;
pub use traits::*;
pub use types::*;
