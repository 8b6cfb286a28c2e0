/*!
 * Core Types
 * Common types used across the allocator
 */

/// Offset inside the managed arena (1-based, 0 is reserved for the leading boundary)
pub type Address = usize;

/// Extent of a block in address units
pub type Size = usize;
