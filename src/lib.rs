//! # setcraft
//!
//! Mutable sets of unique elements with three interchangeable engines.
//!
//! ## Overview
//!
//! Every engine implements the same [`UniqueSet`](set::UniqueSet) contract
//! (`add`, `contains`, `len`) but uses a different internal representation:
//!
//! - **[`AvlSet`](avl::AvlSet)**: a height-balanced binary search tree with
//!   preorder, inorder and postorder traversals. Balancing can be switched off
//!   to get a plain binary search tree.
//! - **[`ChainedHashSet`](chained::ChainedHashSet)**: a separately chained hash
//!   table that grows to `capacity * 2 + 1` whenever the load factor reaches 0.8.
//! - **[`SkipListSet`](skip_list::SkipListSet)**: a skip list whose level
//!   promotion is decided by a pluggable [`LevelTester`](skip_list::LevelTester).
//!
//! All nodes live in index-addressed arenas, so copying a set is a deep copy and
//! dropping it releases everything at once. None of the engines removes elements.
//!
//! ## Feature Flags
//!
//! - `avl`: the AVL tree set
//! - `chained`: the chained hash set
//! - `skip-list`: the skip list set
//! - `fxhash`: use `rustc-hash` for the default hash function
//! - `ahash`: use `ahash` for the default hash function (wins over `fxhash`)
//!
//! ## Example
//!
//! ```rust
//! use setcraft::prelude::*;
//!
//! fn fill(set: &mut dyn UniqueSet<i32>) {
//!     for element in [5, 3, 8, 3] {
//!         set.add(element);
//!     }
//! }
//!
//! let mut tree: AvlSet<i32> = AvlSet::new();
//! let mut table: ChainedHashSet<i32> = ChainedHashSet::new();
//! let mut list: SkipListSet<i32> = SkipListSet::new();
//!
//! fill(&mut tree);
//! fill(&mut table);
//! fill(&mut list);
//!
//! assert_eq!(tree.len(), 3);
//! assert_eq!(table.len(), 3);
//! assert!(list.contains(&8));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the contract trait, the error type, and every enabled engine.
///
/// # Usage
///
/// ```rust
/// use setcraft::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::*;
    pub use crate::set::*;

    #[cfg(feature = "avl")]
    pub use crate::avl::*;

    #[cfg(feature = "chained")]
    pub use crate::chained::*;

    #[cfg(feature = "skip-list")]
    pub use crate::skip_list::*;
}

pub mod error;
pub mod set;

#[cfg(feature = "avl")]
pub mod avl;

#[cfg(feature = "chained")]
pub mod chained;

#[cfg(feature = "skip-list")]
pub mod skip_list;
