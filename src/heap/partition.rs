/*!
 * Partitioning Kernels
 *
 * Three-way partition, insertion sort and median-of-medians selection over a
 * contiguous stretch of the ring buffer. Positions are logical offsets from `base`;
 * every translation to a physical slot goes through `CircularRange`.
 */

use super::circular::CircularRange;
use super::ordering::Comparator;
use crate::core::limits::{INSERTION_SORT_THRESHOLD, MEDIAN_GROUP_SIZE};
use std::cmp::Ordering;

/// Mutable view of the buffer anchored at a logical offset 0
pub(super) struct Window<'a, T, C: ?Sized> {
    slots: &'a mut [T],
    ring: CircularRange,
    base: usize,
    cmp: &'a C,
}

impl<'a, T: Clone, C: Comparator<T> + ?Sized> Window<'a, T, C> {
    pub fn new(slots: &'a mut [T], ring: CircularRange, base: usize, cmp: &'a C) -> Self {
        debug_assert_eq!(slots.len(), ring.modulus());
        Self {
            slots,
            ring,
            base,
            cmp,
        }
    }

    #[inline]
    fn slot(&self, offset: usize) -> usize {
        self.ring.advance(self.base, offset)
    }

    #[inline]
    pub fn get(&self, offset: usize) -> &T {
        &self.slots[self.slot(offset)]
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        if a != b {
            let (a, b) = (self.slot(a), self.slot(b));
            self.slots.swap(a, b);
        }
    }

    #[inline]
    fn compare_at(&self, a: usize, b: usize) -> Ordering {
        self.cmp.compare(self.get(a), self.get(b))
    }

    /// Sort `[lo, hi)` in place
    pub fn insertion_sort(&mut self, lo: usize, hi: usize) {
        for i in (lo + 1)..hi {
            let mut j = i;
            while j > lo && self.compare_at(j - 1, j) == Ordering::Greater {
                self.swap(j - 1, j);
                j -= 1;
            }
        }
    }

    /// Dutch-flag partition of `[lo, hi)` around `pivot`
    ///
    /// Returns `(lt, gt)`: `[lo, lt)` orders before the pivot, `[lt, gt)` equal to it,
    /// `[gt, hi)` after it.
    pub fn partition(&mut self, lo: usize, hi: usize, pivot: &T) -> (usize, usize) {
        let (mut lt, mut i, mut gt) = (lo, lo, hi);
        while i < gt {
            match self.cmp.compare(self.get(i), pivot) {
                Ordering::Less => {
                    self.swap(lt, i);
                    lt += 1;
                    i += 1;
                }
                Ordering::Greater => {
                    gt -= 1;
                    self.swap(i, gt);
                }
                Ordering::Equal => i += 1,
            }
        }
        (lt, gt)
    }

    /// Quickselect: rearranges `[lo, hi)` and returns the offset holding its `k`-th
    /// smallest element
    pub fn select(&mut self, mut lo: usize, mut hi: usize, mut k: usize) -> usize {
        debug_assert!(k < hi - lo);
        loop {
            if hi - lo <= INSERTION_SORT_THRESHOLD {
                self.insertion_sort(lo, hi);
                return lo + k;
            }

            let pivot = self.median_of_medians(lo, hi);
            let (lt, gt) = self.partition(lo, hi, &pivot);

            if k < lt - lo {
                hi = lt;
            } else if k < gt - lo {
                return lo + k;
            } else {
                k -= gt - lo;
                lo = gt;
            }
        }
    }

    /// Median of the group medians of `[lo, hi)`
    ///
    /// Group medians are gathered at the front of the range before the recursive
    /// selection, so the range is permuted but keeps the same elements.
    pub fn median_of_medians(&mut self, lo: usize, hi: usize) -> T {
        debug_assert!(lo < hi);
        let groups = (hi - lo).div_ceil(MEDIAN_GROUP_SIZE);

        for group in 0..groups {
            let start = lo + group * MEDIAN_GROUP_SIZE;
            let end = (start + MEDIAN_GROUP_SIZE).min(hi);
            self.insertion_sort(start, end);
            self.swap(lo + group, start + (end - start - 1) / 2);
        }

        let median = self.select(lo, lo + groups, (groups - 1) / 2);
        self.get(median).clone()
    }

    /// One incremental quicksort step over `[0, hi)`
    ///
    /// Returns the first offset of the pivot-equal run. Everything before it orders
    /// strictly before the element stored there.
    pub fn split(&mut self, hi: usize) -> usize {
        let pivot = self.median_of_medians(0, hi);
        let (lt, _) = self.partition(0, hi, &pivot);
        lt
    }
}
