//! Hash functions for [`ChainedHashSet`](super::ChainedHashSet).
//!
//! The table only needs to map an element to an integer; which integer it gets
//! is up to the caller. Any `Fn(&T) -> u64` works, which makes it easy to pin
//! elements to known buckets in tests. [`BuildHasherFunction`] adapts any
//! [`BuildHasher`] for types that implement [`Hash`].

use std::hash::{BuildHasher, Hash};

/// Maps an element to a hash value.
///
/// Equal elements must produce equal hashes.
///
/// # Examples
///
/// ```rust
/// use setcraft::chained::HashFunction;
///
/// let length = |word: &String| word.len() as u64;
/// assert_eq!(length.hash_element(&"four".to_string()), 4);
/// ```
pub trait HashFunction<T: ?Sized> {
    /// Returns the hash of `element`.
    fn hash_element(&self, element: &T) -> u64;
}

impl<T, F> HashFunction<T> for F
where
    T: ?Sized,
    F: Fn(&T) -> u64,
{
    #[inline]
    fn hash_element(&self, element: &T) -> u64 {
        self(element)
    }
}

/// A [`HashFunction`] backed by a [`BuildHasher`].
#[derive(Clone, Debug, Default)]
pub struct BuildHasherFunction<S> {
    build_hasher: S,
}

impl<S> BuildHasherFunction<S> {
    /// Wraps a `BuildHasher`.
    #[inline]
    #[must_use]
    pub const fn new(build_hasher: S) -> Self {
        Self { build_hasher }
    }

    /// Returns the wrapped `BuildHasher`.
    #[inline]
    #[must_use]
    pub const fn build_hasher(&self) -> &S {
        &self.build_hasher
    }
}

impl<T, S> HashFunction<T> for BuildHasherFunction<S>
where
    T: Hash + ?Sized,
    S: BuildHasher,
{
    #[inline]
    fn hash_element(&self, element: &T) -> u64 {
        self.build_hasher.hash_one(element)
    }
}

/// The `BuildHasher` used when no hash function is supplied.
#[cfg(feature = "ahash")]
pub type DefaultBuildHasher = ahash::RandomState;

/// The `BuildHasher` used when no hash function is supplied.
#[cfg(all(feature = "fxhash", not(feature = "ahash")))]
pub type DefaultBuildHasher = rustc_hash::FxBuildHasher;

/// The `BuildHasher` used when no hash function is supplied.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultBuildHasher = std::collections::hash_map::RandomState;

/// The hash function used by [`ChainedHashSet::new`](super::ChainedHashSet::new).
pub type DefaultHashFunction = BuildHasherFunction<DefaultBuildHasher>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_closure_is_a_hash_function() {
        let identity = |element: &u32| u64::from(*element);
        assert_eq!(identity.hash_element(&7), 7);
    }

    #[rstest]
    fn test_function_pointer_is_a_hash_function() {
        fn constant(_: &str) -> u64 {
            0
        }
        assert_eq!(HashFunction::<str>::hash_element(&constant, "anything"), 0);
    }

    #[rstest]
    fn test_build_hasher_function_is_deterministic_per_instance() {
        let function = DefaultHashFunction::default();
        let first = function.hash_element("word");
        let second = function.hash_element("word");
        assert_eq!(first, second);
    }

    #[rstest]
    fn test_build_hasher_function_clone_hashes_alike() {
        let function = DefaultHashFunction::default();
        let copy = function.clone();
        assert_eq!(function.hash_element(&42_u64), copy.hash_element(&42_u64));
    }
}
