use core::cmp::Ordering;

/// Decides the order of keys inside a [`SkipList`](crate::SkipList).
///
/// Implementations must describe a strict total order that stays the same for
/// the whole lifetime of the list. Two keys comparing [`Ordering::Equal`] are
/// treated as the same key.
pub trait Comparator<K: ?Sized> {
    /// Returns how `a` orders relative to `b`.
    ///
    /// Must be antisymmetric (`compare(a, b)` is the reverse of
    /// `compare(b, a)`) and transitive, and must not change while the keys
    /// are stored in a list. A panic leaves the list unchanged.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord + ?Sized> Comparator<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Orders keys with a closure.
///
/// ```
/// use rankskip::{FnComparator, Options, SkipList};
///
/// let by_len = FnComparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
/// let mut list = SkipList::with_comparator(by_len, Options::default()).unwrap();
///
/// list.insert("three", 3).unwrap();
/// list.insert("a", 1).unwrap();
///
/// assert_eq!(list.key_at(0), Some(&"a"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnComparator<F>(pub F);

impl<K: ?Sized, F> Comparator<K> for FnComparator<F>
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.0)(a, b)
    }
}
