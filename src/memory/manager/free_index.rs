/*!
 * Free-Block Index
 * QuickHeap keyed so that its minimum is the largest free block
 */

use super::super::types::BlockId;
use crate::core::types::{Address, Size};
use crate::heap::{Comparator, QuickHeap};
use std::cmp::Ordering;

/// Queue entry for one free block
///
/// A block's extent never changes while it is free (a coalesce replaces it), so the
/// size and offset copied here stay accurate for as long as the entry is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct FreeEntry {
    pub size: Size,
    pub begin: Address,
    pub block: BlockId,
}

impl FreeEntry {
    /// Orders after every real entry: nothing is smaller than an empty block
    pub fn infinity() -> Self {
        Self {
            size: 0,
            begin: Address::MAX,
            block: BlockId {
                index: usize::MAX,
                generation: u32::MAX,
            },
        }
    }
}

/// Worst-fit ordering: larger blocks first, lower offsets break ties
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct LargestFirst;

impl Comparator<FreeEntry> for LargestFirst {
    fn compare(&self, a: &FreeEntry, b: &FreeEntry) -> Ordering {
        b.size.cmp(&a.size).then_with(|| a.begin.cmp(&b.begin))
    }
}

pub(super) type FreeIndex = QuickHeap<FreeEntry, LargestFirst>;

pub(super) fn new_index(capacity: usize) -> FreeIndex {
    QuickHeap::new(capacity, FreeEntry::infinity(), LargestFirst)
}
