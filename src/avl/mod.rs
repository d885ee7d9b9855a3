//! Ordered set based on an AVL tree.
//!
//! This module provides [`AvlSet`], a mutable set that keeps its elements in a
//! height-balanced binary search tree.
//!
//! # Overview
//!
//! Every node records the height of its subtree. After each insertion the
//! heights along the insertion path are recomputed and, when balancing is
//! enabled, any node whose subtrees differ in height by two is restored with
//! one of the four classical rotations ([`Rotation`]).
//!
//! Balancing is a construction-time switch. With [`Balancing::Disabled`] the
//! set is a plain binary search tree, and sorted input produces a tree of
//! linear height. That mode is intentional and observable through
//! [`AvlSet::height`].
//!
//! # Time Complexity
//!
//! | Operation   | Balanced  | Unbalanced (worst case) |
//! |-------------|-----------|-------------------------|
//! | `add`       | O(log n)  | O(n)                    |
//! | `contains`  | O(log n)  | O(n)                    |
//! | `len`       | O(1)      | O(1)                    |
//! | `height`    | O(1)      | O(1)                    |
//! | traversals  | O(n)      | O(n)                    |
//!
//! # Examples
//!
//! ```rust
//! use setcraft::avl::{AvlSet, Balancing};
//!
//! let balanced: AvlSet<i32> = (1..=7).collect();
//! assert_eq!(balanced.height(), 2);
//!
//! let mut preorder = Vec::new();
//! balanced.preorder(|element| preorder.push(*element));
//! assert_eq!(preorder, vec![4, 2, 1, 3, 6, 5, 7]);
//!
//! let mut degenerate = AvlSet::with_balancing(Balancing::Disabled);
//! degenerate.extend(1..=7);
//! assert_eq!(degenerate.height(), 6);
//! ```

mod node;
mod traversal;

pub use node::Rotation;
pub use traversal::{AvlSetIterator, TraversalOrder};

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

use crate::error::SetError;
use crate::set::{UniqueSet, add_or_warn};
use node::{Node, NodeIndex, Side};

/// Number of path entries kept inline during insertion.
///
/// A balanced tree with 2^32 elements is at most 46 levels deep.
const INLINE_PATH_LENGTH: usize = 48;

/// Whether an [`AvlSet`] rebalances itself after insertion.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum Balancing {
    /// Rotate to keep sibling subtree heights within one of each other.
    #[default]
    Enabled,
    /// Never rotate; behave as a plain binary search tree.
    Disabled,
}

impl Balancing {
    /// Returns `true` for [`Balancing::Enabled`].
    #[inline]
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl From<bool> for Balancing {
    fn from(should_balance: bool) -> Self {
        if should_balance {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

/// A mutable ordered set backed by an AVL tree.
///
/// # Type Parameters
///
/// * `T` - The element type. Must implement `Ord` to be inserted or queried.
///
/// # Examples
///
/// ```rust
/// use setcraft::avl::AvlSet;
///
/// let mut set = AvlSet::new();
/// assert!(set.add(11));
/// assert!(set.add(1));
/// assert!(set.add(5));
/// assert!(!set.add(5));
///
/// assert_eq!(set.len(), 3);
/// assert!(set.contains(&5));
/// assert!(!set.contains(&9));
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 5, 11]);
/// ```
#[derive(Clone)]
pub struct AvlSet<T> {
    nodes: Vec<Node<T>>,
    root: Option<NodeIndex>,
    balancing: Balancing,
}

static_assertions::assert_impl_all!(AvlSet<i32>: Send, Sync, Clone, Default);

impl<T> AvlSet<T> {
    /// Creates an empty, balancing set.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_balancing(Balancing::Enabled)
    }

    /// Creates an empty set with or without balancing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setcraft::avl::{AvlSet, Balancing};
    ///
    /// let mut set = AvlSet::with_balancing(Balancing::Disabled);
    /// set.extend([1, 2, 3]);
    /// assert_eq!(set.height(), 2);
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_balancing(balancing: Balancing) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            balancing,
        }
    }

    /// Returns the balancing mode chosen at construction.
    #[inline]
    #[must_use]
    pub const fn balancing(&self) -> Balancing {
        self.balancing
    }

    /// Returns the number of elements in the set.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the set holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the height of the tree. An empty tree has height -1.
    #[inline]
    #[must_use]
    pub fn height(&self) -> i32 {
        node::height_of(&self.nodes, self.root)
    }

    /// Calls `visit` on every element in preorder (node, left, right).
    pub fn preorder<F: FnMut(&T)>(&self, visit: F) {
        traversal::preorder(&self.nodes, self.root, visit);
    }

    /// Calls `visit` on every element in inorder (left, node, right), which is
    /// ascending order.
    pub fn inorder<F: FnMut(&T)>(&self, visit: F) {
        traversal::inorder(&self.nodes, self.root, visit);
    }

    /// Calls `visit` on every element in postorder (left, right, node).
    pub fn postorder<F: FnMut(&T)>(&self, visit: F) {
        traversal::postorder(&self.nodes, self.root, visit);
    }

    /// Calls `visit` on every element in the given order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setcraft::avl::{AvlSet, TraversalOrder};
    ///
    /// let set: AvlSet<i32> = [2, 1, 3].into_iter().collect();
    /// let mut visited = Vec::new();
    /// set.traverse(TraversalOrder::Postorder, |element| visited.push(*element));
    /// assert_eq!(visited, vec![1, 3, 2]);
    /// ```
    pub fn traverse<F: FnMut(&T)>(&self, order: TraversalOrder, visit: F) {
        match order {
            TraversalOrder::Preorder => self.preorder(visit),
            TraversalOrder::Inorder => self.inorder(visit),
            TraversalOrder::Postorder => self.postorder(visit),
        }
    }

    /// Returns an iterator over the elements in ascending order.
    #[inline]
    pub fn iter(&self) -> AvlSetIterator<'_, T> {
        AvlSetIterator::new(&self.nodes, self.root)
    }

    /// Returns the smallest element, if any.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        let mut index = self.root?;
        while let Some(left) = self.nodes[index].left {
            index = left;
        }
        Some(&self.nodes[index].value)
    }

    /// Returns the largest element, if any.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        let mut index = self.root?;
        while let Some(right) = self.nodes[index].right {
            index = right;
        }
        Some(&self.nodes[index].value)
    }

    /// Returns `true` if every node's subtrees differ in height by at most one.
    ///
    /// Always holds for a balancing set; an unbalanced set may or may not
    /// satisfy it depending on insertion order.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        (0..self.nodes.len()).all(|index| node::balance_factor(&self.nodes, index).abs() <= 1)
    }

    /// Creates a deep copy, reporting allocation failure instead of aborting.
    ///
    /// The copy has the same shape as the original.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::AllocationFailure`] if the node arena cannot be
    /// reserved. Nothing is allocated in that case.
    pub fn try_clone(&self) -> Result<Self, SetError>
    where
        T: Clone,
    {
        let mut nodes = Vec::new();
        nodes.try_reserve_exact(self.nodes.len())?;
        nodes.extend(self.nodes.iter().cloned());
        Ok(Self {
            nodes,
            root: self.root,
            balancing: self.balancing,
        })
    }

    /// Replaces the contents of `self` with a deep copy of `source`.
    ///
    /// The copy is built in isolation and swapped in only once complete.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::AllocationFailure`] if the copy cannot be built;
    /// `self` is unchanged in that case.
    pub fn try_clone_from(&mut self, source: &Self) -> Result<(), SetError>
    where
        T: Clone,
    {
        let copy = source.try_clone()?;
        *self = copy;
        Ok(())
    }

    /// Recomputes heights and, when enabled, rebalances along `path` from the
    /// deepest ancestor up to the root, linking `inserted` below the deepest one.
    fn retrace(&mut self, path: &[(NodeIndex, Side)], inserted: NodeIndex)
    where
        T: Ord,
    {
        let mut subtree = inserted;
        for &(ancestor, side) in path.iter().rev() {
            self.nodes[ancestor].set_child(side, Some(subtree));
            node::update_height(&mut self.nodes, ancestor);
            subtree = ancestor;
            if self.balancing.is_enabled()
                && let Some((lifted, rotation)) = node::rebalance(&mut self.nodes, ancestor, inserted)
            {
                tracing::trace!(?rotation, "avl rotation");
                subtree = lifted;
            }
        }
        self.root = Some(subtree);
    }
}

impl<T: Ord> AvlSet<T> {
    /// Adds an element if it is not already present.
    ///
    /// Returns `true` if the element was inserted. A duplicate leaves the tree
    /// untouched, whether or not balancing is enabled.
    ///
    /// # Complexity
    ///
    /// O(log n) when balancing; O(height) otherwise.
    #[inline]
    pub fn add(&mut self, element: T) -> bool {
        add_or_warn("avl", || self.try_add(element))
    }

    /// Adds an element if it is not already present, reporting allocation failure.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::AllocationFailure`] if the node arena cannot grow.
    /// The tree is unchanged in that case.
    pub fn try_add(&mut self, element: T) -> Result<bool, SetError> {
        let mut path: SmallVec<[(NodeIndex, Side); INLINE_PATH_LENGTH]> = SmallVec::new();
        let mut cursor = self.root;
        while let Some(index) = cursor {
            let node = &self.nodes[index];
            match element.cmp(&node.value) {
                Ordering::Less => {
                    path.push((index, Side::Left));
                    cursor = node.left;
                }
                Ordering::Greater => {
                    path.push((index, Side::Right));
                    cursor = node.right;
                }
                Ordering::Equal => return Ok(false),
            }
        }

        self.nodes.try_reserve(1)?;
        let inserted = self.nodes.len();
        self.nodes.push(Node::leaf(element));
        self.retrace(&path, inserted);
        Ok(true)
    }

    /// Returns `true` if the set contains the element.
    ///
    /// The element may be any borrowed form of the set's element type, but the
    /// ordering on the borrowed form must match the ordering on `T`.
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cursor = self.root;
        while let Some(index) = cursor {
            let node = &self.nodes[index];
            match element.cmp(node.value.borrow()) {
                Ordering::Less => cursor = node.left,
                Ordering::Greater => cursor = node.right,
                Ordering::Equal => return true,
            }
        }
        false
    }
}

// =============================================================================
// Contract Implementation
// =============================================================================

impl<T: Ord> UniqueSet<T> for AvlSet<T> {
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

impl<T> Default for AvlSet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Extend<T> for AvlSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<T: Ord> FromIterator<T> for AvlSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, T> IntoIterator for &'a AvlSet<T> {
    type Item = &'a T;
    type IntoIter = AvlSetIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two sets are equal when they hold the same elements, regardless of shape or
/// balancing mode.
impl<T: Ord> PartialEq for AvlSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Ord> Eq for AvlSet<T> {}

impl<T: Hash> Hash for AvlSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
