/*!
 * Priority Queue Engine
 *
 * Bounded min-priority queue built on incremental quicksort (QuickHeap).
 *
 * ## Layout
 *
 * Elements live in a fixed circular buffer of `capacity + 1` slots. The live window
 * starts at `begin` and is followed by a permanent `+infinity` sentinel. A stack of
 * pivot positions splits the window into chunks: every element left of a pivot orders
 * at or before it, every element right of it at or after it. The bottom of the stack is
 * always the sentinel.
 *
 * ## Costs
 *
 * - **insert**: proportional to the number of pivots the new element has to pass
 * - **peek_min / extract_min**: partitions the first chunk until the minimum sits at
 *   `begin`; amortized O(log n) per extraction over a full drain
 * - Pivots are chosen with median-of-medians, so partitions never degenerate
 */

mod circular;
mod ordering;
mod partition;
mod quickheap;
mod traits;
mod types;

pub use circular::CircularRange;
pub use ordering::{Comparator, NaturalOrder};
pub use quickheap::QuickHeap;
pub use traits::PriorityQueue;
pub use types::{QueueError, QueueResult};
