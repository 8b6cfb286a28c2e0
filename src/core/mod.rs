/*!
 * Core Module
 * Shared address types and allocator-wide limits
 */

pub mod limits;
pub mod types;

// Re-export for convenience
pub use types::*;
