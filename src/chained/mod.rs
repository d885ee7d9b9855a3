//! Unordered set based on a separately chained hash table.
//!
//! This module provides [`ChainedHashSet`], a mutable set that stores its
//! elements in an array of singly linked chains.
//!
//! # Overview
//!
//! An element lives in bucket `hash(element) mod capacity`. Whenever an
//! insertion would bring the load factor (`len / capacity`) to 0.8 or above,
//! the bucket array is replaced by one with `capacity * 2 + 1` buckets and
//! every entry is relinked into it, so the load factor stays below 0.8 after
//! every insertion.
//!
//! The hash function is supplied by the caller as any [`HashFunction`]; the
//! default is a [`BuildHasherFunction`] over [`DefaultBuildHasher`].
//!
//! # Time Complexity
//!
//! | Operation             | Complexity                    |
//! |-----------------------|-------------------------------|
//! | `add`                 | O(1) amortized, O(n) on growth|
//! | `contains`            | O(1) expected                 |
//! | `len`                 | O(1)                          |
//! | `elements_at_index`   | O(chain length)               |
//! | `is_element_at_index` | O(chain length)               |
//!
//! # Examples
//!
//! ```rust
//! use setcraft::chained::ChainedHashSet;
//!
//! let mut set = ChainedHashSet::with_hash_function(|element: &u32| u64::from(*element));
//! set.add(3);
//! set.add(13);
//! set.add(4);
//!
//! assert_eq!(set.capacity(), 10);
//! assert_eq!(set.elements_at_index(3), 2);
//! assert!(set.is_element_at_index(&13, 3));
//! assert_eq!(set.elements_at_index(99), 0);
//! ```

mod chain;
mod hash_function;

pub use hash_function::{BuildHasherFunction, DefaultBuildHasher, DefaultHashFunction, HashFunction};

use std::fmt;

use crate::error::SetError;
use crate::set::{UniqueSet, add_or_warn};
use chain::{Buckets, Chain, Entry};

/// Bucket count of a set created without an explicit capacity.
pub const DEFAULT_CAPACITY: usize = 10;

/// The load factor 0.8 as the fraction 4/5, compared in integers.
const LOAD_FACTOR_NUMERATOR: usize = 4;
const LOAD_FACTOR_DENOMINATOR: usize = 5;

/// Returns `true` if `len` elements in `capacity` buckets reach the load factor.
#[inline]
const fn reaches_load_factor(len: usize, capacity: usize) -> bool {
    len.saturating_mul(LOAD_FACTOR_DENOMINATOR) >= capacity.saturating_mul(LOAD_FACTOR_NUMERATOR)
}

/// Returns the capacity that keeps `len` elements under the load factor,
/// growing `capacity` by `capacity * 2 + 1` steps.
#[inline]
const fn grown_capacity(len: usize, mut capacity: usize) -> usize {
    while reaches_load_factor(len, capacity) {
        capacity = capacity.saturating_mul(2).saturating_add(1);
    }
    capacity
}

/// A mutable unordered set backed by a separately chained hash table.
///
/// # Type Parameters
///
/// * `T` - The element type. Must implement `Eq` to be inserted or queried.
/// * `H` - The hash function. Defaults to [`DefaultHashFunction`].
///
/// # Examples
///
/// ```rust
/// use setcraft::chained::ChainedHashSet;
///
/// let mut set = ChainedHashSet::new();
/// assert!(set.add("alpha"));
/// assert!(!set.add("alpha"));
/// assert!(set.contains(&"alpha"));
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Clone)]
pub struct ChainedHashSet<T, H = DefaultHashFunction> {
    buckets: Buckets,
    entries: Vec<Entry<T>>,
    hash_function: H,
}

static_assertions::assert_impl_all!(ChainedHashSet<i32>: Send, Sync, Clone, Default);

impl<T> ChainedHashSet<T, DefaultHashFunction> {
    /// Creates an empty set with [`DEFAULT_CAPACITY`] buckets and the default
    /// hash function.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_hash_function(DefaultHashFunction::default())
    }

    /// Creates an empty set with `capacity` buckets (at least one) and the
    /// default hash function.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hash_function(capacity, DefaultHashFunction::default())
    }
}

impl<T, H> ChainedHashSet<T, H> {
    /// Creates an empty set with [`DEFAULT_CAPACITY`] buckets that hashes with
    /// `hash_function`.
    #[inline]
    #[must_use]
    pub fn with_hash_function(hash_function: H) -> Self {
        Self::with_capacity_and_hash_function(DEFAULT_CAPACITY, hash_function)
    }

    /// Creates an empty set with `capacity` buckets (at least one) that hashes
    /// with `hash_function`.
    #[must_use]
    pub fn with_capacity_and_hash_function(capacity: usize, hash_function: H) -> Self {
        Self {
            buckets: vec![None; capacity.max(1)],
            entries: Vec::new(),
            hash_function,
        }
    }

    /// Returns the number of elements in the set.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the set holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of buckets.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `len / capacity`. Always below 0.8.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    /// Returns the hash function.
    #[inline]
    #[must_use]
    pub const fn hash_function(&self) -> &H {
        &self.hash_function
    }

    /// Returns the number of elements stored in bucket `index`, or 0 if `index`
    /// is not a valid bucket.
    #[must_use]
    pub fn elements_at_index(&self, index: usize) -> usize {
        self.buckets
            .get(index)
            .map_or(0, |&head| Chain::new(&self.entries, head).count())
    }

    /// Returns an iterator over the elements in insertion order.
    #[inline]
    pub fn iter(&self) -> ChainedHashSetIterator<'_, T> {
        ChainedHashSetIterator {
            entries: self.entries.iter(),
        }
    }

    /// Creates a deep copy, reporting allocation failure instead of aborting.
    ///
    /// The copy has the same capacity and the same chains as the original.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::AllocationFailure`] if the bucket array or the entry
    /// arena cannot be reserved. Nothing is allocated in that case.
    pub fn try_clone(&self) -> Result<Self, SetError>
    where
        T: Clone,
        H: Clone,
    {
        let mut buckets = Vec::new();
        buckets.try_reserve_exact(self.buckets.len())?;
        let mut entries = Vec::new();
        entries.try_reserve_exact(self.entries.len())?;
        buckets.extend_from_slice(&self.buckets);
        entries.extend(self.entries.iter().cloned());
        Ok(Self {
            buckets,
            entries,
            hash_function: self.hash_function.clone(),
        })
    }

    /// Replaces the contents of `self` with a deep copy of `source`, including
    /// its hash function.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::AllocationFailure`] if the copy cannot be built;
    /// `self` is unchanged in that case.
    pub fn try_clone_from(&mut self, source: &Self) -> Result<(), SetError>
    where
        T: Clone,
        H: Clone,
    {
        let copy = source.try_clone()?;
        *self = copy;
        Ok(())
    }

    fn chain(&self, index: usize) -> Chain<'_, T> {
        Chain::new(&self.entries, self.buckets[index])
    }
}

impl<T: Eq, H: HashFunction<T>> ChainedHashSet<T, H> {
    /// Adds an element if it is not already present.
    ///
    /// Returns `true` if the element was inserted.
    ///
    /// # Complexity
    ///
    /// O(1) amortized; O(n) when the insertion triggers growth.
    #[inline]
    pub fn add(&mut self, element: T) -> bool {
        add_or_warn("chained", || self.try_add(element))
    }

    /// Adds an element if it is not already present, reporting allocation failure.
    ///
    /// The new bucket array (if the insertion triggers growth) and the new entry
    /// are both reserved before anything is linked.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::AllocationFailure`] if either reservation fails. The
    /// set keeps its previous elements and capacity in that case.
    pub fn try_add(&mut self, element: T) -> Result<bool, SetError> {
        let hash = self.hash_function.hash_element(&element);
        let index = chain::bucket_index(hash, self.capacity());
        if self.chain(index).any(|entry| entry.element == element) {
            return Ok(false);
        }

        let len = self.len() + 1;
        let grown = if reaches_load_factor(len, self.capacity()) {
            Some(chain::allocate_buckets(grown_capacity(len, self.capacity()))?)
        } else {
            None
        };
        self.entries.try_reserve(1)?;

        let inserted = self.entries.len();
        if let Some(mut buckets) = grown {
            self.entries.push(Entry {
                element,
                hash,
                next: None,
            });
            chain::relink(&mut self.entries, &mut buckets);
            tracing::debug!(
                from = self.capacity(),
                to = buckets.len(),
                len,
                "chained hash set grew"
            );
            self.buckets = buckets;
        } else {
            self.entries.push(Entry {
                element,
                hash,
                next: self.buckets[index],
            });
            self.buckets[index] = Some(inserted);
        }
        Ok(true)
    }

    /// Returns `true` if the set contains the element.
    ///
    /// Only the element's own bucket is scanned.
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        let hash = self.hash_function.hash_element(element);
        let index = chain::bucket_index(hash, self.capacity());
        self.chain(index).any(|entry| entry.element == *element)
    }
}

impl<T: PartialEq, H> ChainedHashSet<T, H> {
    /// Returns `true` if `element` is stored in bucket `index`, or `false` if
    /// it is not or `index` is not a valid bucket.
    #[must_use]
    pub fn is_element_at_index(&self, element: &T, index: usize) -> bool {
        self.buckets
            .get(index)
            .is_some_and(|&head| Chain::new(&self.entries, head).any(|entry| entry.element == *element))
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over the elements of a [`ChainedHashSet`], in insertion order.
pub struct ChainedHashSetIterator<'a, T> {
    entries: std::slice::Iter<'a, Entry<T>>,
}

impl<'a, T> Iterator for ChainedHashSetIterator<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|entry| &entry.element)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<T> ExactSizeIterator for ChainedHashSetIterator<'_, T> {
    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<T> std::iter::FusedIterator for ChainedHashSetIterator<'_, T> {}

// =============================================================================
// Contract Implementation
// =============================================================================

impl<T: Eq, H: HashFunction<T>> UniqueSet<T> for ChainedHashSet<T, H> {
    fn add(&mut self, element: T) -> bool {
        Self::add(self, element)
    }

    fn try_add(&mut self, element: T) -> Result<bool, SetError> {
        Self::try_add(self, element)
    }

    fn contains(&self, element: &T) -> bool {
        Self::contains(self, element)
    }

    fn len(&self) -> usize {
        Self::len(self)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, H: Default> Default for ChainedHashSet<T, H> {
    #[inline]
    fn default() -> Self {
        Self::with_hash_function(H::default())
    }
}

impl<T: Eq, H: HashFunction<T>> Extend<T> for ChainedHashSet<T, H> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<T: Eq, H: HashFunction<T> + Default> FromIterator<T> for ChainedHashSet<T, H> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<'a, T, H> IntoIterator for &'a ChainedHashSet<T, H> {
    type Item = &'a T;
    type IntoIter = ChainedHashSetIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two sets are equal when they hold the same elements, regardless of capacity
/// or chain layout.
impl<T: Eq, H: HashFunction<T>> PartialEq for ChainedHashSet<T, H> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|element| other.contains(element))
    }
}

impl<T: Eq, H: HashFunction<T>> Eq for ChainedHashSet<T, H> {}

impl<T: fmt::Debug, H> fmt::Debug for ChainedHashSet<T, H> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn identity(element: &u32) -> u64 {
        u64::from(*element)
    }

    fn identity_set() -> ChainedHashSet<u32, fn(&u32) -> u64> {
        ChainedHashSet::with_hash_function(identity as fn(&u32) -> u64)
    }

    #[rstest]
    #[case(0, 10, false)]
    #[case(7, 10, false)]
    #[case(8, 10, true)]
    #[case(1, 1, true)]
    #[case(2, 3, false)]
    fn test_reaches_load_factor(#[case] len: usize, #[case] capacity: usize, #[case] expected: bool) {
        assert_eq!(reaches_load_factor(len, capacity), expected);
    }

    #[rstest]
    #[case(8, 10, 21)]
    #[case(1, 1, 3)]
    #[case(3, 3, 7)]
    #[case(2, 3, 3)]
    fn test_grown_capacity(#[case] len: usize, #[case] capacity: usize, #[case] expected: usize) {
        assert_eq!(grown_capacity(len, capacity), expected);
    }

    #[rstest]
    fn test_new_has_default_capacity() {
        let set: ChainedHashSet<i32> = ChainedHashSet::new();
        assert_eq!(set.capacity(), DEFAULT_CAPACITY);
        assert!(set.is_empty());
    }

    #[rstest]
    fn test_zero_capacity_is_raised_to_one() {
        let set: ChainedHashSet<i32> = ChainedHashSet::with_capacity(0);
        assert_eq!(set.capacity(), 1);
    }

    #[rstest]
    fn test_growth_happens_when_load_factor_reached() {
        let mut set = identity_set();
        set.extend(0..7);
        assert_eq!(set.capacity(), 10);
        set.add(7);
        assert_eq!(set.capacity(), 21);
        assert_eq!(set.len(), 8);
        assert!((0..8).all(|element| set.contains(&element)));
    }

    #[rstest]
    fn test_duplicate_does_not_trigger_growth() {
        let mut set = identity_set();
        set.extend(0..7);
        assert!(!set.add(3));
        assert_eq!(set.capacity(), 10);
        assert_eq!(set.len(), 7);
    }

    #[rstest]
    fn test_chain_collisions_share_a_bucket() {
        let mut set = identity_set();
        set.extend([1, 11, 21]);
        assert_eq!(set.elements_at_index(1), 3);
        assert!(set.is_element_at_index(&11, 1));
        assert!(!set.is_element_at_index(&11, 2));
        assert_eq!(set.elements_at_index(0), 0);
    }

    #[rstest]
    fn test_out_of_range_queries_are_neutral() {
        let mut set = identity_set();
        set.add(5);
        assert_eq!(set.elements_at_index(set.capacity()), 0);
        assert!(!set.is_element_at_index(&5, usize::MAX));
    }

    #[rstest]
    fn test_relinked_elements_move_to_new_buckets() {
        let mut set = identity_set();
        set.extend([3, 13]);
        assert_eq!(set.elements_at_index(3), 2);
        set.extend([0, 1, 2, 4, 5, 6]);
        assert_eq!(set.capacity(), 21);
        assert!(set.is_element_at_index(&3, 3));
        assert!(set.is_element_at_index(&13, 13));
        assert_eq!(set.elements_at_index(3), 1);
    }

    #[rstest]
    fn test_bucket_counts_sum_to_len() {
        let mut set = identity_set();
        set.extend((0..200).map(|element| element * 7));
        let total: usize = (0..set.capacity()).map(|index| set.elements_at_index(index)).sum();
        assert_eq!(total, set.len());
        assert!(set.load_factor() < 0.8);
    }

    #[rstest]
    fn test_iter_is_insertion_order() {
        let mut set = identity_set();
        set.extend([9, 2, 5, 2]);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![9, 2, 5]);
        assert_eq!(set.iter().len(), 3);
    }

    #[rstest]
    fn test_try_clone_is_independent() {
        let mut original = identity_set();
        original.extend([1, 2, 3]);
        let mut copy = original.try_clone().expect("small clone must succeed");
        copy.add(4);
        assert_eq!(original.len(), 3);
        assert!(!original.contains(&4));
        assert_eq!(copy.len(), 4);
        assert_eq!(copy.capacity(), original.capacity());
    }

    #[rstest]
    fn test_take_leaves_empty_source() {
        let mut set: ChainedHashSet<i32> = (0..20).collect();
        let moved = std::mem::take(&mut set);
        assert_eq!(moved.len(), 20);
        assert!(set.is_empty());
        assert_eq!(set.capacity(), DEFAULT_CAPACITY);
    }

    #[rstest]
    fn test_equality_ignores_capacity() {
        let mut small = ChainedHashSet::with_capacity_and_hash_function(1, identity as fn(&u32) -> u64);
        let mut large = ChainedHashSet::with_capacity_and_hash_function(101, identity as fn(&u32) -> u64);
        small.extend([4, 8, 15]);
        large.extend([15, 8, 4]);
        assert_ne!(small.capacity(), large.capacity());
        assert_eq!(small, large);
    }

    #[rstest]
    fn test_debug_uses_set_notation() {
        let mut set = identity_set();
        set.extend([1, 2]);
        assert_eq!(format!("{set:?}"), "{1, 2}");
    }
}
