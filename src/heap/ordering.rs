/*!
 * Ordering Strategies
 * Injected three-way comparators for the queue engine
 */

use std::cmp::Ordering;

/// Three-way ordering policy
///
/// The queue never falls back to `Ord`; the comparator it was built with is the only
/// source of ordering. Any `Fn(&T, &T) -> Ordering` closure is a comparator.
pub trait Comparator<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Ascending order from the element's own `Ord` implementation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}
