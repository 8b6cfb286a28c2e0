/*!
 * Queue Traits
 * Priority queue abstraction
 */

use super::types::QueueResult;

/// Bounded min-priority queue interface
pub trait PriorityQueue<T> {
    /// Insert an element
    fn insert(&mut self, element: T) -> QueueResult<()>;

    /// Borrow the minimum element without removing it
    fn peek_min(&mut self) -> QueueResult<&T>;

    /// Remove and return the minimum element
    fn extract_min(&mut self) -> QueueResult<T>;

    /// Number of live elements
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
