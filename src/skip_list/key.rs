//! Keys of skip-list nodes.

use std::borrow::Borrow;
use std::cmp::Ordering;

/// Position of an element inside the element arena of a [`SkipListSet`](super::SkipListSet).
pub type ElementIndex = usize;

/// The key a skip-list node is ordered by.
///
/// Every level is bounded by a [`NegInf`](Self::NegInf) node on the left and a
/// [`PosInf`](Self::PosInf) node on the right. All other nodes refer to an
/// element by its index, so an element promoted to several levels is stored
/// only once.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum SkipListKey {
    /// Orders before every element.
    NegInf,
    /// Refers to the element at this index of the element arena.
    Element(ElementIndex),
    /// Orders after every element.
    PosInf,
}

impl SkipListKey {
    /// Returns `true` for the two sentinel keys.
    #[inline]
    #[must_use]
    pub const fn is_sentinel(self) -> bool {
        !matches!(self, Self::Element(_))
    }

    /// Returns the element index, or `None` for a sentinel.
    #[inline]
    #[must_use]
    pub const fn element_index(self) -> Option<ElementIndex> {
        match self {
            Self::Element(index) => Some(index),
            Self::NegInf | Self::PosInf => None,
        }
    }

    /// Compares the key against `target`, resolving element keys in `elements`.
    ///
    /// # Panics
    ///
    /// Panics if an element key is out of bounds for `elements`.
    #[must_use]
    pub fn compare_with<T, Q>(self, elements: &[T], target: &Q) -> Ordering
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self {
            Self::NegInf => Ordering::Less,
            Self::Element(index) => elements[index].borrow().cmp(target),
            Self::PosInf => Ordering::Greater,
        }
    }
}
