//! Ordered sets over keys with a total order.
//!
//! Two independent structures share the [`OrderedSet`] contract:
//!
//! - [`RedBlackTree`], a binary search tree kept balanced by node coloring,
//!   with worst-case logarithmic `insert`, `remove` and `contains`.
//! - [`SkipList`], a stack of sorted linked lists where each node's height is
//!   drawn at random, giving expected logarithmic search without rotations.
//!   Node heights come from an injectable [`HeightControl`], so a seeded
//!   generator reproduces the exact shape of a list.
//!
//! Neither structure does any internal synchronization: every operation runs
//! to completion on the calling thread. Both are `Send` and `Sync` when their
//! keys are, so they can be handed to another thread or shared behind a lock.
//!
//! ```
//! use ordset::{OrderedSet, RedBlackTree, SkipList};
//!
//! fn fill<S: OrderedSet<u32>>(set: &mut S) {
//!     for key in [5, 1, 4, 1, 3] {
//!         set.insert(key);
//!     }
//! }
//!
//! let mut tree = RedBlackTree::new();
//! let mut list = SkipList::with_seed(7);
//! fill(&mut tree);
//! fill(&mut list);
//!
//! assert_eq!(tree.len(), 4);
//! assert!(list.contains(&4));
//! assert!(tree.iter().eq(list.iter()));
//! ```

#[macro_use]
mod macros;

mod error;
mod height_control;
mod iter;
mod node;
mod ordered_set;
mod rbtree;
mod skiplist;
mod tree_node;

pub use error::InvariantViolation;
pub use height_control::{GeometricalGenerator, HeightControl, MAX_HEIGHT, UPGRADE_PROBABILITY};
pub use iter::{RedBlackTreeIter, SkipListIter};
pub use ordered_set::OrderedSet;
pub use rbtree::RedBlackTree;
pub use skiplist::SkipList;
pub use tree_node::Color;
