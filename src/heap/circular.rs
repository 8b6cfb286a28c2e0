/*!
 * Circular Range Arithmetic
 * Index math for a ring buffer of fixed length
 */

/// Modular index helper shared by every routine that walks the queue buffer
///
/// All operations expect indices already reduced below `modulus` and never overflow,
/// even for moduli close to `usize::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircularRange {
    modulus: usize,
}

impl CircularRange {
    pub fn new(modulus: usize) -> Self {
        debug_assert!(modulus > 0, "circular range needs at least one slot");
        Self { modulus }
    }

    /// Number of slots in the ring
    #[inline]
    pub fn modulus(&self) -> usize {
        self.modulus
    }

    /// Move `index` forward by `steps`
    #[inline]
    pub fn advance(&self, index: usize, steps: usize) -> usize {
        let steps = steps % self.modulus;
        if index >= self.modulus - steps {
            index - (self.modulus - steps)
        } else {
            index + steps
        }
    }

    /// Forward distance from `from` to `to`
    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> usize {
        if to >= from {
            to - from
        } else {
            self.modulus - from + to
        }
    }

    /// Is `index` inside the half-open circular range `[begin, end)`
    #[inline]
    pub fn contains(&self, begin: usize, end: usize, index: usize) -> bool {
        self.distance(begin, index) < self.distance(begin, end)
    }
}
