/// Slot of the shared sentinel in every tree's arena. It stands for "no
/// child" and "no parent", is always black, and is never written after the
/// tree is constructed.
pub(crate) const NIL: usize = 0;

/// Node color of a red-black tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// An arena slot. Links are slot indices into the owning tree's arena.
#[derive(Debug, Clone)]
pub(crate) struct TreeNode<K> {
    // `None` for the sentinel and for slots waiting on the free list.
    pub key: Option<K>,
    pub color: Color,
    pub left: usize,
    pub right: usize,
    pub parent: usize,
}

impl<K> TreeNode<K> {
    /// Freshly inserted nodes are red leaves.
    pub fn new(key: K, parent: usize) -> TreeNode<K> {
        TreeNode {
            key: Some(key),
            color: Color::Red,
            left: NIL,
            right: NIL,
            parent,
        }
    }

    pub fn sentinel() -> TreeNode<K> {
        TreeNode {
            key: None,
            color: Color::Black,
            left: NIL,
            right: NIL,
            parent: NIL,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.key.is_none()
            && self.color == Color::Black
            && self.left == NIL
            && self.right == NIL
            && self.parent == NIL
    }
}
