/*!
 * QuickHeap
 * Incremental-quicksort priority queue over a circular buffer
 */

use super::circular::CircularRange;
use super::ordering::{Comparator, NaturalOrder};
use super::partition::Window;
use super::traits::PriorityQueue;
use super::types::{QueueError, QueueResult};
use std::cmp::Ordering;
use std::fmt;

/// Bounded min-priority queue
///
/// # Invariants
/// - `pivots[0]` is the slot right after the last live element and holds `infinity`
/// - pivot offsets (relative to `begin`) strictly decrease from bottom to top
/// - every live element left of a pivot orders at or before it, every element right of
///   it at or after it
pub struct QuickHeap<T, C = NaturalOrder> {
    slots: Vec<T>,
    ring: CircularRange,
    capacity: usize,
    begin: usize,
    len: usize,
    pivots: Vec<usize>,
    infinity: T,
    cmp: C,
}

impl<T: Clone + Ord> QuickHeap<T, NaturalOrder> {
    /// Queue ordered by `T`'s own `Ord`
    pub fn with_natural_order(capacity: usize, infinity: T) -> Self {
        Self::new(capacity, infinity, NaturalOrder)
    }
}

impl<T: Clone, C: Comparator<T>> QuickHeap<T, C> {
    /// Create a queue holding at most `capacity` elements
    ///
    /// `infinity` must order at or after every element that will ever be inserted; it
    /// occupies the extra slot of the buffer as the permanent right-hand pivot.
    pub fn new(capacity: usize, infinity: T, cmp: C) -> Self {
        let ring = CircularRange::new(capacity + 1);
        Self {
            slots: vec![infinity.clone(); capacity + 1],
            ring,
            capacity,
            begin: 0,
            len: 0,
            pivots: vec![0],
            infinity,
            cmp,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Number of partition boundaries currently recorded, sentinel included
    pub fn pivot_depth(&self) -> usize {
        self.pivots.len()
    }

    /// Insert an element
    ///
    /// Every pivot the element does not order after is shifted one slot to the right,
    /// rotating the first element of the chunk behind it into the vacated slot. The
    /// element lands in the hole left by the last shifted pivot.
    pub fn insert(&mut self, element: T) -> QueueResult<()> {
        if self.is_full() {
            return Err(QueueError::Overflow {
                capacity: self.capacity,
            });
        }
        if self.cmp.compare(&element, &self.infinity) == Ordering::Greater {
            return Err(QueueError::InvalidArgument);
        }

        // The sentinel always moves: nothing orders after it.
        let mut hole = self.pivots[0];
        let shifted = self.ring.advance(hole, 1);
        self.slots.swap(hole, shifted);
        self.pivots[0] = shifted;

        for depth in 1..self.pivots.len() {
            let pivot = self.pivots[depth];
            if self.cmp.compare(&element, &self.slots[pivot]) == Ordering::Greater {
                break;
            }
            let first = self.ring.advance(pivot, 1);
            self.slots.swap(hole, first);
            self.slots.swap(pivot, first);
            self.pivots[depth] = first;
            hole = pivot;
        }

        self.slots[hole] = element;
        self.len += 1;
        Ok(())
    }

    /// Borrow the minimum, partitioning the first chunk as far as needed
    pub fn peek_min(&mut self) -> QueueResult<&T> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }
        self.resolve_min();
        Ok(&self.slots[self.begin])
    }

    /// Remove and return the minimum
    pub fn extract_min(&mut self) -> QueueResult<T> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }
        self.resolve_min();

        let min = std::mem::replace(&mut self.slots[self.begin], self.infinity.clone());
        self.pivots.pop();
        self.begin = self.ring.advance(self.begin, 1);
        self.len -= 1;
        Ok(min)
    }

    /// Drop every element for which `keep` returns false
    ///
    /// Survivors are compacted to the front of the window and the pivot stack collapses
    /// to the sentinel, leaving one unpartitioned chunk. Returns the number removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut kept = 0;
        for offset in 0..self.len {
            let src = self.ring.advance(self.begin, offset);
            if keep(&self.slots[src]) {
                let dst = self.ring.advance(self.begin, kept);
                self.slots.swap(src, dst);
                kept += 1;
            }
        }

        for offset in kept..=self.len {
            let slot = self.ring.advance(self.begin, offset);
            self.slots[slot] = self.infinity.clone();
        }

        let removed = self.len - kept;
        self.len = kept;
        self.pivots.clear();
        self.pivots.push(self.ring.advance(self.begin, kept));
        removed
    }

    /// Remove every element
    pub fn clear(&mut self) {
        self.retain(|_| false);
    }

    /// Live elements in buffer order; no ordering is implied
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).map(move |offset| &self.slots[self.ring.advance(self.begin, offset)])
    }

    /// Verify the pivot-partition invariant
    ///
    /// Walks the whole window once per pivot, so it is meant for tests and debugging.
    pub fn check_invariants(&self) -> bool {
        let Some(&sentinel) = self.pivots.first() else {
            return false;
        };
        if sentinel != self.ring.advance(self.begin, self.len)
            || self.cmp.compare(&self.slots[sentinel], &self.infinity) != Ordering::Equal
        {
            return false;
        }
        if self.pivots[1..]
            .iter()
            .any(|&p| !self.ring.contains(self.begin, sentinel, p))
        {
            return false;
        }

        let offsets: Vec<usize> = self
            .pivots
            .iter()
            .map(|&p| self.ring.distance(self.begin, p))
            .collect();
        if offsets.windows(2).any(|w| w[1] >= w[0]) {
            return false;
        }

        offsets.iter().all(|&pivot_offset| {
            let pivot = &self.slots[self.ring.advance(self.begin, pivot_offset)];
            self.iter().enumerate().all(|(offset, element)| {
                let order = self.cmp.compare(element, pivot);
                match offset.cmp(&pivot_offset) {
                    Ordering::Less => order != Ordering::Greater,
                    Ordering::Greater => order != Ordering::Less,
                    Ordering::Equal => true,
                }
            })
        })
    }

    /// Incremental quicksort: split the first chunk until its boundary reaches `begin`
    fn resolve_min(&mut self) {
        while let Some(&top) = self.pivots.last() {
            if top == self.begin {
                break;
            }
            let chunk = self.ring.distance(self.begin, top);
            let boundary = Window::new(&mut self.slots, self.ring, self.begin, &self.cmp).split(chunk);
            self.pivots.push(self.ring.advance(self.begin, boundary));
        }
    }
}

impl<T: Clone, C: Comparator<T>> PriorityQueue<T> for QuickHeap<T, C> {
    fn insert(&mut self, element: T) -> QueueResult<()> {
        QuickHeap::insert(self, element)
    }

    fn peek_min(&mut self) -> QueueResult<&T> {
        QuickHeap::peek_min(self)
    }

    fn extract_min(&mut self) -> QueueResult<T> {
        QuickHeap::extract_min(self)
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl<T: fmt::Debug, C> fmt::Debug for QuickHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuickHeap")
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .field("begin", &self.begin)
            .field("pivots", &self.pivots)
            .field("infinity", &self.infinity)
            .finish()
    }
}
