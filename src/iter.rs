use crate::node::{Link, Node};
use crate::rbtree::RedBlackTree;
use crate::tree_node::NIL;

use std::iter::FusedIterator;
use std::marker::PhantomData;

/// Walks level 0 of a `SkipList`, yielding keys in increasing order.
pub struct SkipListIter<'a, K> {
    current_: Link<K>,
    remaining_: usize,
    marker_: PhantomData<&'a Node<K>>,
}

impl<'a, K> SkipListIter<'a, K> {
    pub(crate) fn new(first: Link<K>, length: usize) -> SkipListIter<'a, K> {
        SkipListIter {
            current_: first,
            remaining_: length,
            marker_: PhantomData,
        }
    }
}

impl<'a, K> Iterator for SkipListIter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.current_.map(|node| {
            // The list is borrowed for 'a, so none of its nodes can be freed
            // while the iterator is alive.
            let node: &'a Node<K> = unsafe { &*node.as_ptr() };
            self.current_ = node.next(0);
            self.remaining_ -= 1;
            node.key()
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining_, Some(self.remaining_))
    }
}

impl<'a, K> ExactSizeIterator for SkipListIter<'a, K> {}

// SAFETY: the iterator behaves like a `&'a K` into a list it borrows
// immutably, so it can cross threads whenever such a reference can.
unsafe impl<'a, K: Sync> Send for SkipListIter<'a, K> {}

unsafe impl<'a, K: Sync> Sync for SkipListIter<'a, K> {}

impl<'a, K> FusedIterator for SkipListIter<'a, K> {}

/// In-order traversal of a `RedBlackTree`. Follows parent links, so it needs
/// no auxiliary stack.
pub struct RedBlackTreeIter<'a, K> {
    tree_: &'a RedBlackTree<K>,
    current_: usize,
    remaining_: usize,
}

impl<'a, K> RedBlackTreeIter<'a, K> {
    pub(crate) fn new(tree: &'a RedBlackTree<K>, first: usize) -> RedBlackTreeIter<'a, K> {
        RedBlackTreeIter {
            tree_: tree,
            current_: first,
            remaining_: tree.len(),
        }
    }
}

impl<'a, K> Iterator for RedBlackTreeIter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_ == NIL {
            return None;
        }

        let key = self.tree_.key_at(self.current_);
        self.current_ = self.tree_.successor(self.current_);
        self.remaining_ -= 1;
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining_, Some(self.remaining_))
    }
}

impl<'a, K> ExactSizeIterator for RedBlackTreeIter<'a, K> {}

impl<'a, K> FusedIterator for RedBlackTreeIter<'a, K> {}
