//! Ordered set based on a skip list.
//!
//! This module provides [`SkipListSet`], a mutable set that keeps its elements
//! in a stack of sorted linked lists.
//!
//! # Overview
//!
//! Level 0 holds every element in ascending order. Each higher level holds a
//! subset of the level below it, so a search can skip over runs of elements
//! before dropping down. Every level is bounded by a −∞ and a +∞ sentinel,
//! and every node links to its successor on the same level and to the node
//! for the same key on the level below.
//!
//! How many levels an element occupies is decided by a [`LevelTester`] when
//! the element is inserted. The default [`RandomLevelTester`] flips a fair
//! coin, which gives an expected height of O(log n). New levels appear only as
//! a side effect of insertion and their number never exceeds
//! [`max_levels`](SkipListSet::max_levels).
//!
//! # Time Complexity
//!
//! | Operation             | Expected  | Worst case |
//! |-----------------------|-----------|------------|
//! | `add`                 | O(log n)  | O(n)       |
//! | `contains`            | O(log n)  | O(n)       |
//! | `len`                 | O(1)      | O(1)       |
//! | `level_count`         | O(1)      | O(1)       |
//! | `elements_on_level`   | O(n)      | O(n)       |
//! | `is_element_on_level` | O(log n)  | O(n)       |
//!
//! # Examples
//!
//! ```rust
//! use setcraft::skip_list::{AlwaysPromote, SkipListSet};
//!
//! let mut set = SkipListSet::with_level_tester_and_max_levels(AlwaysPromote, 3);
//! set.add(20);
//! set.add(10);
//!
//! assert_eq!(set.level_count(), 3);
//! assert_eq!(set.elements_on_level(2), 2);
//! assert!(set.is_element_on_level(&10, 2));
//! assert_eq!(set.elements_on_level(3), 0);
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![10, 20]);
//! ```

mod key;
mod level_tester;

pub use key::{ElementIndex, SkipListKey};
pub use level_tester::{
    AlwaysPromote, FnLevelTester, LevelTester, NeverPromote, RandomLevelTester, ScriptedLevelTester,
};

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

use crate::error::SetError;
use crate::set::{UniqueSet, add_or_warn};

/// Level cap of a set created without an explicit one.
pub const DEFAULT_MAX_LEVELS: usize = 32;

type NodeIndex = usize;

#[derive(Clone, Copy, Debug)]
struct Node {
    key: SkipListKey,
    /// Successor on the same level; `None` only for a +∞ sentinel.
    next: Option<NodeIndex>,
    /// Node for the same key one level down; `None` on level 0.
    down: Option<NodeIndex>,
}

/// A mutable ordered set backed by a skip list.
///
/// # Type Parameters
///
/// * `T` - The element type. Must implement `Ord` to be inserted or queried.
/// * `L` - The promotion policy. Defaults to [`RandomLevelTester`].
///
/// # Examples
///
/// ```rust
/// use setcraft::skip_list::SkipListSet;
///
/// let mut set = SkipListSet::new();
/// assert!(set.add("pear"));
/// assert!(set.add("apple"));
/// assert!(!set.add("pear"));
///
/// assert_eq!(set.len(), 2);
/// assert!(set.contains("apple"));
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec!["apple", "pear"]);
/// ```
pub struct SkipListSet<T, L = RandomLevelTester> {
    elements: Vec<T>,
    nodes: Vec<Node>,
    /// The −∞ sentinel of each level, bottom first.
    heads: Vec<NodeIndex>,
    /// The +∞ sentinel of each level, bottom first.
    tails: Vec<NodeIndex>,
    level_tester: L,
    max_levels: usize,
}

static_assertions::assert_impl_all!(SkipListSet<i32>: Send, Sync, Clone, Default);

impl<T> SkipListSet<T, RandomLevelTester> {
    /// Creates an empty set with an OS-seeded [`RandomLevelTester`] and
    /// [`DEFAULT_MAX_LEVELS`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_level_tester(RandomLevelTester::new())
    }
}

impl<T, L> SkipListSet<T, L> {
    /// Creates an empty set that promotes with `level_tester`, capped at
    /// [`DEFAULT_MAX_LEVELS`].
    #[inline]
    #[must_use]
    pub fn with_level_tester(level_tester: L) -> Self {
        Self::with_level_tester_and_max_levels(level_tester, DEFAULT_MAX_LEVELS)
    }

    /// Creates an empty set that promotes with `level_tester` and never grows
    /// beyond `max_levels` levels (at least one).
    #[must_use]
    pub fn with_level_tester_and_max_levels(level_tester: L, max_levels: usize) -> Self {
        let nodes = vec![
            Node {
                key: SkipListKey::NegInf,
                next: Some(1),
                down: None,
            },
            Node {
                key: SkipListKey::PosInf,
                next: None,
                down: None,
            },
        ];
        Self {
            elements: Vec::new(),
            nodes,
            heads: vec![0],
            tails: vec![1],
            level_tester,
            max_levels: max_levels.max(1),
        }
    }

    /// Returns the number of elements in the set.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the set holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the number of levels, including level 0. Never zero.
    #[inline]
    #[must_use]
    pub const fn level_count(&self) -> usize {
        self.heads.len()
    }

    /// Returns the level cap.
    #[inline]
    #[must_use]
    pub const fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Returns the promotion policy.
    #[inline]
    #[must_use]
    pub const fn level_tester(&self) -> &L {
        &self.level_tester
    }

    /// Returns the number of elements on `level`, or 0 if the level does not
    /// exist. Sentinels are not counted.
    #[must_use]
    pub fn elements_on_level(&self, level: usize) -> usize {
        self.heads
            .get(level)
            .map_or(0, |&head| self.walk(head).filter(|node| !node.key.is_sentinel()).count())
    }

    /// Returns an ascending iterator over the elements.
    #[inline]
    pub fn iter(&self) -> SkipListSetIterator<'_, T> {
        SkipListSetIterator {
            elements: &self.elements,
            nodes: &self.nodes,
            cursor: self.nodes[self.heads[0]].next,
            remaining: self.elements.len(),
        }
    }

    /// Creates a deep copy with an independent level tester, reporting
    /// allocation failure instead of aborting.
    ///
    /// The copy has the same levels as the original.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::AllocationFailure`] if any arena cannot be reserved.
    pub fn try_clone(&self) -> Result<Self, SetError>
    where
        T: Clone,
        L: LevelTester<T>,
    {
        let mut elements = Vec::new();
        elements.try_reserve_exact(self.elements.len())?;
        let mut nodes = Vec::new();
        nodes.try_reserve_exact(self.nodes.len())?;
        let mut heads = Vec::new();
        heads.try_reserve_exact(self.heads.len())?;
        let mut tails = Vec::new();
        tails.try_reserve_exact(self.tails.len())?;

        elements.extend(self.elements.iter().cloned());
        nodes.extend_from_slice(&self.nodes);
        heads.extend_from_slice(&self.heads);
        tails.extend_from_slice(&self.tails);
        Ok(Self {
            elements,
            nodes,
            heads,
            tails,
            level_tester: self.level_tester.clone_tester(),
            max_levels: self.max_levels,
        })
    }

    /// Replaces the contents of `self` with a deep copy of `source`, including
    /// an independent copy of its level tester.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::AllocationFailure`] if the copy cannot be built;
    /// `self` is unchanged in that case.
    pub fn try_clone_from(&mut self, source: &Self) -> Result<(), SetError>
    where
        T: Clone,
        L: LevelTester<T>,
    {
        let copy = source.try_clone()?;
        *self = copy;
        Ok(())
    }

    fn top_head(&self) -> NodeIndex {
        self.heads[self.heads.len() - 1]
    }

    /// Iterates over the nodes of one level, starting after `head`.
    fn walk(&self, head: NodeIndex) -> impl Iterator<Item = &Node> + '_ {
        std::iter::successors(self.nodes[head].next, |&index| self.nodes[index].next)
            .map(|index| &self.nodes[index])
    }

    /// Walks right from `start` while the successor is below `target`.
    ///
    /// Returns the last node passed and whether its successor equals `target`.
    fn advance<Q>(&self, start: NodeIndex, target: &Q) -> (NodeIndex, bool)
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cursor = start;
        while let Some(next) = self.nodes[cursor].next {
            match self.nodes[next].key.compare_with(&self.elements, target) {
                Ordering::Less => cursor = next,
                Ordering::Equal => return (cursor, true),
                Ordering::Greater => break,
            }
        }
        (cursor, false)
    }

    /// Appends an empty level whose sentinels sit above the current top ones.
    ///
    /// Room for two nodes and one head and tail must already be reserved.
    fn push_level(&mut self) {
        let level = self.heads.len();
        let head = self.nodes.len();
        let tail = head + 1;
        self.nodes.push(Node {
            key: SkipListKey::NegInf,
            next: Some(tail),
            down: self.heads.last().copied(),
        });
        self.nodes.push(Node {
            key: SkipListKey::PosInf,
            next: None,
            down: self.tails.last().copied(),
        });
        self.heads.push(head);
        self.tails.push(tail);
        tracing::trace!(level, "skip list level added");
    }
}

impl<T: Ord, L: LevelTester<T>> SkipListSet<T, L> {
    /// Adds an element if it is not already present.
    ///
    /// Returns `true` if the element was inserted. The level tester is only
    /// consulted for elements that are actually inserted.
    ///
    /// # Complexity
    ///
    /// Expected O(log n).
    #[inline]
    pub fn add(&mut self, element: T) -> bool {
        add_or_warn("skip_list", || self.try_add(element))
    }

    /// Adds an element if it is not already present, reporting allocation failure.
    ///
    /// The promotion height is decided before anything is reserved, and every
    /// node the insertion needs is reserved before anything is linked.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::AllocationFailure`] if an arena cannot grow. The
    /// set's elements and levels are unchanged in that case, although the
    /// level tester has already been consulted.
    pub fn try_add(&mut self, element: T) -> Result<bool, SetError> {
        // Predecessors, top level first.
        let mut path: SmallVec<[NodeIndex; DEFAULT_MAX_LEVELS]> = SmallVec::new();
        let mut cursor = self.top_head();
        loop {
            let (predecessor, found) = self.advance(cursor, &element);
            if found {
                return Ok(false);
            }
            path.push(predecessor);
            match self.nodes[predecessor].down {
                Some(below) => cursor = below,
                None => break,
            }
        }
        path.reverse();

        let mut height = 1;
        while height < self.max_levels && self.level_tester.should_occupy_next_level(&element) {
            height += 1;
        }
        let new_levels = height.saturating_sub(self.level_count());

        self.elements.try_reserve(1)?;
        self.nodes.try_reserve(height + 2 * new_levels)?;
        self.heads.try_reserve(new_levels)?;
        self.tails.try_reserve(new_levels)?;

        let element_index = self.elements.len();
        self.elements.push(element);
        let mut below = None;
        for level in 0..height {
            if level == self.level_count() {
                self.push_level();
            }
            let predecessor = path.get(level).copied().unwrap_or(self.heads[level]);
            let node = self.nodes.len();
            self.nodes.push(Node {
                key: SkipListKey::Element(element_index),
                next: self.nodes[predecessor].next,
                down: below,
            });
            self.nodes[predecessor].next = Some(node);
            below = Some(node);
        }
        Ok(true)
    }
}

impl<T, L> SkipListSet<T, L> {
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
        let mut cursor = Some(self.top_head());
        while let Some(start) = cursor {
            let (predecessor, found) = self.advance(start, element);
            if found {
                return true;
            }
            cursor = self.nodes[predecessor].down;
        }
        false
    }

    /// Returns `true` if `element` occupies `level`, or `false` if it does not
    /// or the level does not exist.
    #[must_use]
    pub fn is_element_on_level(&self, element: &T, level: usize) -> bool
    where
        T: Ord,
    {
        if level >= self.level_count() {
            return false;
        }
        let mut current = self.level_count() - 1;
        let mut cursor = self.top_head();
        loop {
            let (predecessor, found) = self.advance(cursor, element);
            // Presence on a level implies presence on every level below it.
            if found {
                return true;
            }
            if current == level {
                return false;
            }
            let Some(below) = self.nodes[predecessor].down else {
                return false;
            };
            cursor = below;
            current -= 1;
        }
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An ascending iterator over the elements of a [`SkipListSet`].
pub struct SkipListSetIterator<'a, T> {
    elements: &'a [T],
    nodes: &'a [Node],
    cursor: Option<NodeIndex>,
    remaining: usize,
}

impl<'a, T> Iterator for SkipListSetIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.nodes[self.cursor?];
        let index = node.key.element_index()?;
        self.cursor = node.next;
        self.remaining -= 1;
        Some(&self.elements[index])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for SkipListSetIterator<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> std::iter::FusedIterator for SkipListSetIterator<'_, T> {}

// =============================================================================
// Contract Implementation
// =============================================================================

impl<T: Ord, L: LevelTester<T>> UniqueSet<T> for SkipListSet<T, L> {
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

/// Cloning gives the copy its own level tester through
/// [`LevelTester::clone_tester`].
impl<T: Clone, L: LevelTester<T>> Clone for SkipListSet<T, L> {
    fn clone(&self) -> Self {
        Self {
            elements: self.elements.clone(),
            nodes: self.nodes.clone(),
            heads: self.heads.clone(),
            tails: self.tails.clone(),
            level_tester: self.level_tester.clone_tester(),
            max_levels: self.max_levels,
        }
    }
}

impl<T, L: Default> Default for SkipListSet<T, L> {
    #[inline]
    fn default() -> Self {
        Self::with_level_tester(L::default())
    }
}

impl<T: Ord, L: LevelTester<T>> Extend<T> for SkipListSet<T, L> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<T: Ord, L: LevelTester<T> + Default> FromIterator<T> for SkipListSet<T, L> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<'a, T, L> IntoIterator for &'a SkipListSet<T, L> {
    type Item = &'a T;
    type IntoIter = SkipListSetIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two sets are equal when they hold the same elements, regardless of their
/// levels or level testers.
impl<T: Ord, L> PartialEq for SkipListSet<T, L> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Ord, L> Eq for SkipListSet<T, L> {}

impl<T: Hash, L> Hash for SkipListSet<T, L> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug, L> fmt::Debug for SkipListSet<T, L> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
