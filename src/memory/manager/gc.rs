/*!
 * Memory Manager Garbage Collection
 * Tombstone removal for the free-block index
 */

use super::super::types::{MemoryError, MemoryResult};
use super::free_index::FreeEntry;
use super::MemoryManager;
use crate::core::limits::TOMBSTONE_COMPACTION_FLOOR;
use crate::heap::QueueError;
use log::debug;

impl MemoryManager {
    /// Pop tombstones off the top of the free-block index
    ///
    /// Stops at the first live entry. Returns how many tombstones were discarded.
    pub(super) fn purge_invalid(&mut self) -> MemoryResult<usize> {
        let mut purged = 0;
        while !self.free_index.is_empty() {
            let top = *self.free_index.peek_min()?;
            if self.is_live_entry(&top) {
                break;
            }
            self.free_index.extract_min()?;
            self.release_tombstone(&top);
            purged += 1;
        }

        if purged > 0 {
            debug!("Purged {} tombstones from the top of the free-block index", purged);
        }
        Ok(purged)
    }

    /// Sweep every tombstone out of the free-block index
    ///
    /// Live entries survive in one unpartitioned chunk. Returns the number removed.
    pub fn collect(&mut self) -> usize {
        let blocks = &self.blocks;
        let mut stale = Vec::new();
        let removed = self.free_index.retain(|entry| {
            let live = blocks
                .resolve(entry.block)
                .is_some_and(|slot| blocks[slot].valid);
            if !live {
                stale.push(*entry);
            }
            live
        });

        for entry in &stale {
            self.release_tombstone(entry);
        }

        if removed > 0 {
            debug!(
                "Garbage collection complete: removed {} tombstones, {} live free blocks indexed",
                removed,
                self.free_index.len()
            );
        }
        removed
    }

    /// Sweep the index once tombstones outnumber live free blocks
    ///
    /// Absorbed neighbours are smaller than the block that absorbed them, so under
    /// worst-fit they rarely surface at the top for `purge_invalid`. Each sweep removes
    /// more tombstones than the live entries it walks over.
    pub(super) fn compact_if_sparse(&mut self) -> usize {
        if self.tombstones > self.free_blocks.max(TOMBSTONE_COMPACTION_FLOOR) {
            self.collect()
        } else {
            0
        }
    }

    /// Fail unless the index can take one more live block after a free that absorbs
    /// `absorbed` free neighbours
    pub(super) fn ensure_index_room(&self, absorbed: usize) -> MemoryResult<()> {
        let live_after = self.free_blocks + 1 - absorbed;
        if live_after > self.free_index.capacity() {
            return Err(MemoryError::Queue(QueueError::Overflow {
                capacity: self.free_index.capacity(),
            }));
        }
        Ok(())
    }

    fn is_live_entry(&self, entry: &FreeEntry) -> bool {
        self.blocks
            .resolve(entry.block)
            .is_some_and(|slot| self.blocks[slot].valid)
    }

    /// Recycle the arena slot of a tombstone that has left the index
    fn release_tombstone(&mut self, entry: &FreeEntry) {
        if let Some(slot) = self.blocks.resolve(entry.block) {
            self.blocks.release(slot);
            self.tombstones -= 1;
        }
    }
}
