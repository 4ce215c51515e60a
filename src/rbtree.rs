use crate::error::InvariantViolation;
use crate::iter::RedBlackTreeIter;
use crate::ordered_set::OrderedSet;
use crate::tree_node::{Color, TreeNode, NIL};

use log::{debug, trace};
use std::borrow::Borrow;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// An ordered set kept balanced by red-black coloring.
///
/// Nodes live in an arena and link to each other by slot index. Slot `NIL`
/// holds the sentinel shared by every leaf and by the root's parent link;
/// it is written once, by the constructor. Slots freed by `remove` are
/// recycled by later insertions. The arena keeps its peak size while the
/// tree holds any key, and is released once the last key is removed.
#[derive(Clone)]
pub struct RedBlackTree<K> {
    nodes_: Vec<TreeNode<K>>,
    free_: Vec<usize>,
    root_: usize,
    length_: usize,
}

impl<K> RedBlackTree<K> {
    pub fn new() -> RedBlackTree<K> {
        RedBlackTree {
            nodes_: vec![TreeNode::sentinel()],
            free_: Vec::new(),
            root_: NIL,
            length_: 0,
        }
    }

    /// Returns the number of keys stored in the tree.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.length_
    }

    /// Returns `true` if the tree holds no keys.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.length_ == 0
    }

    /// Removes all keys, releasing the arena.
    pub fn clear(&mut self) {
        debug!("cleared red-black tree of {} keys", self.length_);
        self.nodes_.truncate(1);
        self.free_.clear();
        self.root_ = NIL;
        self.length_ = 0;
    }

    pub fn root(&self) -> Option<&K> {
        self.nodes_[self.root_].key.as_ref()
    }

    pub fn root_color(&self) -> Option<Color> {
        if self.root_ == NIL {
            None
        } else {
            Some(self.color(self.root_))
        }
    }

    /// Number of black nodes on any path from the root (exclusive) down to
    /// the sentinel (inclusive). Zero for an empty tree.
    pub fn black_height(&self) -> usize {
        if self.root_ == NIL {
            return 0;
        }

        let mut height = 1;
        let mut current = self.left(self.root_);
        while current != NIL {
            if self.color(current) == Color::Black {
                height += 1;
            }
            current = self.left(current);
        }
        height
    }

    pub fn first(&self) -> Option<&K> {
        if self.root_ == NIL {
            None
        } else {
            Some(self.key_at(self.minimum(self.root_)))
        }
    }

    pub fn last(&self) -> Option<&K> {
        if self.root_ == NIL {
            None
        } else {
            Some(self.key_at(self.maximum(self.root_)))
        }
    }

    /// Iterates over the keys in increasing order.
    pub fn iter(&self) -> RedBlackTreeIter<'_, K> {
        let first = if self.root_ == NIL {
            NIL
        } else {
            self.minimum(self.root_)
        };
        RedBlackTreeIter::new(self, first)
    }

    pub(crate) fn key_at(&self, slot: usize) -> &K {
        match self.nodes_[slot].key {
            Some(ref key) => key,
            None => unreachable!("slot {} is linked into the tree but holds no key", slot),
        }
    }

    /// In-order successor of `slot`, or `NIL` if it holds the largest key.
    pub(crate) fn successor(&self, mut slot: usize) -> usize {
        let right = self.right(slot);
        if right != NIL {
            return self.minimum(right);
        }

        let mut parent = self.parent(slot);
        while parent != NIL && slot == self.right(parent) {
            slot = parent;
            parent = self.parent(slot);
        }
        parent
    }

    fn minimum(&self, mut slot: usize) -> usize {
        while self.left(slot) != NIL {
            slot = self.left(slot);
        }
        slot
    }

    fn maximum(&self, mut slot: usize) -> usize {
        while self.right(slot) != NIL {
            slot = self.right(slot);
        }
        slot
    }

    fn allocate_node(&mut self, key: K, parent: usize) -> usize {
        let node = TreeNode::new(key, parent);
        match self.free_.pop() {
            Some(slot) => {
                self.nodes_[slot] = node;
                slot
            }
            None => {
                self.nodes_.push(node);
                self.nodes_.len() - 1
            }
        }
    }

    fn free_node(&mut self, slot: usize) {
        let node = self.node_mut(slot);
        node.key = None;
        node.left = NIL;
        node.right = NIL;
        node.parent = NIL;
        self.free_.push(slot);
    }

    fn node_mut(&mut self, slot: usize) -> &mut TreeNode<K> {
        assert_ne!(slot, NIL, "attempted to write to the sentinel");
        &mut self.nodes_[slot]
    }

    #[inline]
    fn color(&self, slot: usize) -> Color {
        self.nodes_[slot].color
    }

    #[inline]
    fn set_color(&mut self, slot: usize, color: Color) {
        self.node_mut(slot).color = color;
    }

    #[inline]
    fn left(&self, slot: usize) -> usize {
        self.nodes_[slot].left
    }

    #[inline]
    fn right(&self, slot: usize) -> usize {
        self.nodes_[slot].right
    }

    #[inline]
    fn parent(&self, slot: usize) -> usize {
        self.nodes_[slot].parent
    }

    fn child(&self, slot: usize, side: Side) -> usize {
        match side {
            Side::Left => self.left(slot),
            Side::Right => self.right(slot),
        }
    }

    fn set_child(&mut self, slot: usize, side: Side, child: usize) {
        let node = self.node_mut(slot);
        match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
    }

    // Which child of its parent `slot` is. Only meaningful for non-root nodes.
    fn side_of(&self, slot: usize) -> Side {
        if self.left(self.parent(slot)) == slot {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Puts `replacement` where `slot` hangs from its parent (or at the root).
    /// The sentinel's parent link is left untouched.
    fn transplant(&mut self, slot: usize, replacement: usize) {
        let parent = self.parent(slot);
        if parent == NIL {
            self.root_ = replacement;
        } else {
            let side = self.side_of(slot);
            self.set_child(parent, side, replacement);
        }

        if replacement != NIL {
            self.node_mut(replacement).parent = parent;
        }
    }

    /// Rotates the subtree at `pivot` towards `side`. The child of `pivot` on
    /// the opposite side takes its place and `pivot` becomes that child's
    /// `side` child. Rotating left and then right at the promoted node
    /// restores the original shape.
    fn rotate(&mut self, pivot: usize, side: Side) {
        let other = side.opposite();
        let promoted = self.child(pivot, other);
        assert_ne!(promoted, NIL, "rotation at slot {} has no child to promote", pivot);

        let inner = self.child(promoted, side);
        self.set_child(pivot, other, inner);
        if inner != NIL {
            self.node_mut(inner).parent = pivot;
        }

        self.transplant(pivot, promoted);
        self.set_child(promoted, side, pivot);
        self.node_mut(pivot).parent = promoted;

        trace!("rotated {:?} at slot {}, promoting slot {}", side, pivot, promoted);
    }

    fn insert_fixup(&mut self, mut cursor: usize) {
        // The only possible violation is `cursor` and its parent both red. A
        // red parent is never the root, so the grandparent is a real node.
        while self.color(self.parent(cursor)) == Color::Red {
            let parent = self.parent(cursor);
            let grandparent = self.parent(parent);
            let side = self.side_of(parent);
            let uncle = self.child(grandparent, side.opposite());

            if self.color(uncle) == Color::Red {
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                cursor = grandparent;
                continue;
            }

            if cursor == self.child(parent, side.opposite()) {
                cursor = parent;
                self.rotate(cursor, side);
            }

            let parent = self.parent(cursor);
            let grandparent = self.parent(parent);
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
        }

        let root = self.root_;
        self.set_color(root, Color::Black);
    }

    // `cursor` may be the sentinel, which has no usable parent link, so its
    // parent is tracked alongside it.
    fn delete_fixup(&mut self, mut cursor: usize, mut parent: usize) {
        while cursor != self.root_ && self.color(cursor) == Color::Black {
            // The sentinel is never the sibling here: the sibling's subtree
            // has a black-height of at least one more than `cursor`'s.
            let side = if self.left(parent) == cursor {
                Side::Left
            } else {
                Side::Right
            };
            let other = side.opposite();

            let mut sibling = self.child(parent, other);
            assert_ne!(sibling, NIL, "doubly black slot {} has no sibling", cursor);

            if self.color(sibling) == Color::Red {
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate(parent, side);
                sibling = self.child(parent, other);
            }

            let near = self.child(sibling, side);
            let far = self.child(sibling, other);
            if self.color(near) == Color::Black && self.color(far) == Color::Black {
                self.set_color(sibling, Color::Red);
                cursor = parent;
                parent = self.parent(cursor);
                continue;
            }

            if self.color(far) == Color::Black {
                self.set_color(near, Color::Black);
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, other);
                sibling = self.child(parent, other);
            }

            let parent_color = self.color(parent);
            self.set_color(sibling, parent_color);
            self.set_color(parent, Color::Black);
            let far = self.child(sibling, other);
            self.set_color(far, Color::Black);
            self.rotate(parent, side);

            cursor = self.root_;
            parent = NIL;
        }

        if cursor != NIL {
            self.set_color(cursor, Color::Black);
        }
    }
}

impl<K: Ord> RedBlackTree<K> {
    fn find<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root_;
        while current != NIL {
            let stored: &Q = self.key_at(current).borrow();
            current = match key.cmp(stored) {
                Ordering::Less => self.left(current),
                Ordering::Greater => self.right(current),
                Ordering::Equal => return current,
            };
        }
        NIL
    }

    /// Inserts `key`. Returns `false`, leaving the tree untouched, if an equal
    /// key is already stored.
    pub fn insert(&mut self, key: K) -> bool {
        let mut parent = NIL;
        let mut side = Side::Left;
        let mut current = self.root_;

        while current != NIL {
            parent = current;
            side = match key.cmp(self.key_at(current)) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return false,
            };
            current = self.child(current, side);
        }

        let node = self.allocate_node(key, parent);
        if parent == NIL {
            self.root_ = node;
        } else {
            self.set_child(parent, side, node);
        }

        self.length_ += 1;
        self.insert_fixup(node);

        trace!("inserted slot {}, length {}", node, self.length_);
        debug_verify!(self);
        true
    }

    /// Returns a reference to the stored key equal to `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.find(key) {
            NIL => None,
            slot => Some(self.key_at(slot)),
        }
    }

    /// Returns true if `key` is in the tree.
    #[inline(always)]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key) != NIL
    }

    /// Removes `key` from the tree. Returns `false` if it was not found.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let target = self.find(key);
        if target == NIL {
            return false;
        }

        let mut removed_color = self.color(target);
        let cursor;
        let cursor_parent;

        if self.left(target) == NIL {
            cursor = self.right(target);
            cursor_parent = self.parent(target);
            self.transplant(target, cursor);
        } else if self.right(target) == NIL {
            cursor = self.left(target);
            cursor_parent = self.parent(target);
            self.transplant(target, cursor);
        } else {
            // Two children: the in-order successor moves into the target's
            // position and takes its color, so the structural slot that loses
            // a node is the successor's old one.
            let successor = self.minimum(self.right(target));
            removed_color = self.color(successor);
            cursor = self.right(successor);

            if self.parent(successor) == target {
                cursor_parent = successor;
            } else {
                cursor_parent = self.parent(successor);
                self.transplant(successor, cursor);
                let right = self.right(target);
                self.node_mut(successor).right = right;
                self.node_mut(right).parent = successor;
            }

            self.transplant(target, successor);
            let left = self.left(target);
            self.node_mut(successor).left = left;
            self.node_mut(left).parent = successor;
            let color = self.color(target);
            self.set_color(successor, color);
        }

        self.free_node(target);
        self.length_ -= 1;

        if removed_color == Color::Black {
            self.delete_fixup(cursor, cursor_parent);
        }

        if self.length_ == 0 {
            // Nothing is linked any more, so the whole arena can go.
            self.nodes_.truncate(1);
            self.free_.clear();
        }

        trace!("removed slot {}, length {}", target, self.length_);
        debug_verify!(self);
        true
    }

    /// Checks the coloring, ordering and linking of the whole tree.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if !self.nodes_[NIL].is_sentinel() {
            return Err(InvariantViolation::SentinelModified);
        }

        if self.color(self.root_) == Color::Red {
            return Err(InvariantViolation::RedRoot);
        }

        if self.root_ != NIL && self.parent(self.root_) != NIL {
            return Err(InvariantViolation::BrokenParentLink(self.root_));
        }

        let mut found = 0;
        self.check_subtree(self.root_, None, None, &mut found)?;
        if found != self.length_ {
            return Err(InvariantViolation::LengthMismatch {
                expected: self.length_,
                found,
            });
        }

        Ok(())
    }

    // Returns the black-height of the subtree at `slot`, with every key
    // required to lie strictly between `lower` and `upper`.
    fn check_subtree(
        &self,
        slot: usize,
        lower: Option<&K>,
        upper: Option<&K>,
        found: &mut usize,
    ) -> Result<usize, InvariantViolation> {
        if slot == NIL {
            return Ok(1);
        }
        *found += 1;

        let node = &self.nodes_[slot];
        let key = match node.key {
            Some(ref key) => key,
            None => return Err(InvariantViolation::VacantSlot(slot)),
        };

        if lower.map_or(false, |lower| key <= lower) || upper.map_or(false, |upper| key >= upper) {
            return Err(InvariantViolation::OrderViolation(slot));
        }

        for child in [node.left, node.right] {
            if child != NIL && self.parent(child) != slot {
                return Err(InvariantViolation::BrokenParentLink(child));
            }
        }

        if node.color == Color::Red
            && (self.color(node.left) == Color::Red || self.color(node.right) == Color::Red)
        {
            return Err(InvariantViolation::RedRedEdge(slot));
        }

        let left = self.check_subtree(node.left, lower, Some(key), found)?;
        let right = self.check_subtree(node.right, Some(key), upper, found)?;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch {
                node: slot,
                left,
                right,
            });
        }

        Ok(match node.color {
            Color::Black => left + 1,
            Color::Red => left,
        })
    }
}

impl<K> Default for RedBlackTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> OrderedSet<K> for RedBlackTree<K> {
    fn insert(&mut self, key: K) -> bool {
        RedBlackTree::insert(self, key)
    }

    fn remove(&mut self, key: &K) -> bool {
        RedBlackTree::remove(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        RedBlackTree::contains(self, key)
    }

    fn len(&self) -> usize {
        self.length_
    }
}

impl<K: std::fmt::Display> std::fmt::Display for RedBlackTree<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[")?;

        for (position, key) in self.iter().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", key)?;
        }

        write!(f, "]")
    }
}

impl<K: std::fmt::Debug> std::fmt::Debug for RedBlackTree<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Ord> Extend<K> for RedBlackTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for RedBlackTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = RedBlackTree::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, K> IntoIterator for &'a RedBlackTree<K> {
    type Item = &'a K;
    type IntoIter = RedBlackTreeIter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
