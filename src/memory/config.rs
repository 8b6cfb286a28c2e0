/*!
 * Memory Manager Configuration
 *
 * Arena size, free-block index capacity and pressure thresholds
 */

use crate::core::limits::{
    DEFAULT_CRITICAL_THRESHOLD, DEFAULT_WARNING_THRESHOLD, MAX_QUEUE_CAPACITY, QUEUE_CAPACITY_ENV,
};
use crate::core::types::Size;
use log::warn;
use serde::{Deserialize, Serialize};

/// Default arena size when none is given (1M address units)
pub const DEFAULT_ARENA_SIZE: Size = 1024 * 1024;

/// Memory manager configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Number of address units managed
    pub arena_size: Size,
    /// Slots reserved for the free-block index; derived from the arena size when unset
    pub queue_capacity: Option<usize>,
    /// Upper bound on the number of allocations the caller will make, if known
    pub allocation_hint: Option<usize>,
    /// Usage ratio at which allocations log a pressure warning
    pub warning_threshold: f64,
    /// Usage ratio reported as critical
    pub critical_threshold: f64,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ARENA_SIZE)
    }
}

impl ManagerConfig {
    pub fn new(arena_size: Size) -> Self {
        Self {
            arena_size,
            queue_capacity: None,
            allocation_hint: None,
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
            critical_threshold: DEFAULT_CRITICAL_THRESHOLD,
        }
    }

    /// Configuration for `arena_size` with overrides read from the environment
    ///
    /// Environment variables:
    /// - QHALLOC_QUEUE_CAPACITY: free-block index capacity (default: derived)
    pub fn from_env(arena_size: Size) -> Self {
        let mut config = Self::new(arena_size);
        if let Ok(raw) = std::env::var(QUEUE_CAPACITY_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(capacity) => config.queue_capacity = Some(capacity),
                Err(e) => warn!(
                    "Ignoring {}={:?}: {} (using derived capacity)",
                    QUEUE_CAPACITY_ENV, raw, e
                ),
            }
        }
        config
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }

    /// Bound the derived index capacity by the number of allocations that will be made
    pub fn with_allocation_hint(mut self, allocations: usize) -> Self {
        self.allocation_hint = Some(allocations);
        self
    }

    pub fn with_thresholds(mut self, warning: f64, critical: f64) -> Self {
        self.warning_threshold = warning;
        self.critical_threshold = critical;
        self
    }

    /// Capacity of the free-block index
    ///
    /// Coalescing never leaves two free blocks adjacent, so an arena of `n` units holds at
    /// most `ceil(n / 2)` free blocks at once, and `k` allocations split it into at most
    /// `k + 1` free blocks. One extra slot leaves room for the insert that follows a
    /// compaction. The whole buffer is reserved up front, hence the tighter of the bounds.
    pub fn resolved_queue_capacity(&self) -> usize {
        self.queue_capacity.unwrap_or_else(|| {
            let by_arena = self.arena_size.div_ceil(2);
            let live_bound = self
                .allocation_hint
                .map_or(by_arena, |allocations| by_arena.min(allocations.saturating_add(1)));
            (live_bound + 1).min(MAX_QUEUE_CAPACITY)
        })
    }
}
