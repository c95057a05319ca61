//! The skip list and the ordering it is built on.
//!
//! Ordering is supplied as a [Comparator], resolved statically when the list is built.
//! Only `less` is ever called; equivalence is derived from two `less` calls.

use core::fmt::{self, Debug};

pub use crate::internal::skiplist::{iter, SkipList};
pub use crate::internal::utils::Handle;

/// A strict weak order over `T`.
///
/// `less` must be irreflexive, asymmetric and transitive, and must answer the same way for
/// the same pair for as long as both values are in a list.
pub trait Comparator<T: ?Sized> {
    fn less(&self, a: &T, b: &T) -> bool;

    fn equivalent(&self, a: &T, b: &T) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }
}

/// Orders by `T`'s own [Ord].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<T> Comparator<T> for Natural
where
    T: Ord + ?Sized,
{
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// Orders with a `less than` closure.
///
/// ```
/// use rankskip::{FnLess, SkipList};
///
/// let mut list = SkipList::with_comparator(FnLess(|a: &&str, b: &&str| a.len() < b.len()));
/// list.extend(["ccc", "a", "bb"]);
///
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), ["a", "bb", "ccc"]);
/// ```
#[derive(Clone, Copy)]
pub struct FnLess<F>(pub F);

impl<T, F> Comparator<T> for FnLess<F>
where
    T: ?Sized,
    F: Fn(&T, &T) -> bool,
{
    fn less(&self, a: &T, b: &T) -> bool {
        (self.0)(a, b)
    }
}

impl<F> Debug for FnLess<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnLess(..)")
    }
}

#[cfg(test)]
mod comparator_test {
    use super::*;

    #[test]
    fn test_natural() {
        assert!(Natural.less(&1, &2));
        assert!(!Natural.less(&2, &1));
        assert!(!Natural.less(&2, &2));
        assert!(Natural.equivalent(&2, &2));
        assert!(Natural.less("abc", "abd"));
    }

    #[test]
    fn test_fn_less_by_key() {
        let by_first = FnLess(|a: &(i32, i32), b: &(i32, i32)| a.0 < b.0);

        assert!(by_first.less(&(1, 9), &(2, 0)));
        assert!(by_first.equivalent(&(1, 9), &(1, 0)));
        assert!(!by_first.equivalent(&(1, 9), &(3, 9)));
    }
}
