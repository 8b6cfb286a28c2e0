/*!
 * Allocator Limits and Constants
 *
 * Centralized location for the tuning knobs of the priority queue engine and the
 * memory manager. Grouped by the subsystem that consumes them.
 */

// =============================================================================
// PRIORITY QUEUE ENGINE
// =============================================================================

/// Group size for median-of-medians pivot selection
/// [PERF] Five is the smallest group that keeps the selection linear
pub const MEDIAN_GROUP_SIZE: usize = 5;

/// Ranges at or below this length are resolved with insertion sort during quickselect
pub const INSERTION_SORT_THRESHOLD: usize = 20;

// =============================================================================
// MEMORY MANAGER
// =============================================================================

/// First usable offset of the arena (offsets are 1-based)
pub const ARENA_BASE_OFFSET: usize = 1;

/// Upper bound on the default free-block index size
/// The index reserves its whole buffer up front, so huge arenas are capped here;
/// tombstone compaction keeps the index within this bound in practice
pub const MAX_QUEUE_CAPACITY: usize = 1 << 22;

/// Tombstones tolerated in the free-block index before a sweep, when live free blocks
/// are fewer than this
pub const TOMBSTONE_COMPACTION_FLOOR: usize = 16;

/// Usage ratio at which pressure is reported as medium
pub const MEDIUM_PRESSURE_THRESHOLD: f64 = 0.60;

/// Usage ratio at which allocations start logging warnings
pub const DEFAULT_WARNING_THRESHOLD: f64 = 0.80;

/// Usage ratio considered critical
pub const DEFAULT_CRITICAL_THRESHOLD: f64 = 0.95;

/// Environment override for the free-block index capacity
pub const QUEUE_CAPACITY_ENV: &str = "QHALLOC_QUEUE_CAPACITY";
