//! The contract shared by every set engine.
//!
//! [`UniqueSet`] is the abstract "set of unique elements" capability. It is
//! object safe, so callers that do not care which engine they get can hold a
//! `Box<dyn UniqueSet<T>>` or take a `&mut dyn UniqueSet<T>`.
//!
//! # Examples
//!
//! ```rust
//! use setcraft::prelude::*;
//!
//! fn engines() -> Vec<Box<dyn UniqueSet<String>>> {
//!     vec![
//!         Box::new(AvlSet::<String>::new()),
//!         Box::new(ChainedHashSet::<String>::new()),
//!         Box::new(SkipListSet::<String>::new()),
//!     ]
//! }
//!
//! for mut set in engines() {
//!     assert!(set.add("alpha".to_string()));
//!     assert!(!set.add("alpha".to_string()));
//!     assert!(set.contains(&"alpha".to_string()));
//!     assert_eq!(set.len(), 1);
//! }
//! ```

use crate::error::SetError;

/// A mutable collection that holds each element at most once.
///
/// Implementations never remove elements. Adding an element that is already
/// present leaves the size and membership unchanged.
pub trait UniqueSet<T> {
    /// Adds `element` if it is not already present.
    ///
    /// Returns `true` if the element was inserted. If memory for the insertion
    /// cannot be reserved, the set is left unchanged, a warning is logged, and
    /// `false` is returned; use [`try_add`](Self::try_add) to observe the error.
    fn add(&mut self, element: T) -> bool;

    /// Adds `element` if it is not already present, reporting allocation failure.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::AllocationFailure`] if the memory needed for the
    /// insertion could not be reserved. The set is unchanged in that case.
    fn try_add(&mut self, element: T) -> Result<bool, SetError>;

    /// Returns `true` if `element` is in the set.
    fn contains(&self, element: &T) -> bool;

    /// Returns the number of distinct elements in the set.
    fn len(&self) -> usize;

    /// Returns `true` if the set holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Runs a fallible insertion and converts a failure into a logged no-op.
pub(crate) fn add_or_warn<F>(kind: &'static str, insert: F) -> bool
where
    F: FnOnce() -> Result<bool, SetError>,
{
    match insert() {
        Ok(inserted) => inserted,
        Err(error) => {
            tracing::warn!(set = kind, %error, "add failed; set left unchanged");
            false
        }
    }
}
