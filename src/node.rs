use std::borrow::Borrow;
use std::ptr::NonNull;

pub(crate) type Link<K> = Option<NonNull<Node<K>>>;

#[derive(Debug)]
pub(crate) struct Node<K> {
    // `None` only for the head of a list.
    key_: Option<K>,
    forward_: Vec<Link<K>>,
}

impl<K> Node<K> {
    // A node of height `h` is linked into levels `0..h`, so it holds exactly
    // `h` forward pointers.
    pub fn new(key: K, height: usize) -> Node<K> {
        debug_assert!(height > 0);
        Node {
            key_: Some(key),
            forward_: vec![None; height],
        }
    }

    pub fn head(height: usize) -> Node<K> {
        Node {
            key_: None,
            forward_: vec![None; height],
        }
    }

    pub fn height(&self) -> usize {
        self.forward_.len()
    }

    pub fn key(&self) -> &K {
        match self.key_ {
            Some(ref key) => key,
            None => unreachable!("the head node carries no key"),
        }
    }

    pub fn borrowed_key<Q>(&self) -> &Q
    where
        K: Borrow<Q>,
        Q: ?Sized,
    {
        self.key().borrow()
    }

    pub fn next(&self, level: usize) -> Link<K> {
        self.forward_.get(level).copied().flatten()
    }

    pub fn link_to(&mut self, level: usize, destination: Link<K>) {
        self.forward_[level] = destination;
    }

    pub fn unlink_all(&mut self) {
        for link in self.forward_.iter_mut() {
            *link = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new() {
        let node = Node::new(3, 5);
        assert_eq!(*node.key(), 3);
        assert_eq!(node.height(), 5);
    }

    #[test]
    fn next_out_of_bounds() {
        let node = Node::new(3, 5);
        assert!(node.next(5).is_none());
        assert!(node.next(10).is_none());
    }

    #[test]
    fn next_empty() {
        let node = Node::new(3, 5);
        for level in 0..node.height() {
            assert!(node.next(level).is_none());
        }
    }

    #[test]
    #[should_panic]
    fn head_has_no_key() {
        let head: Node<i32> = Node::head(4);
        head.key();
    }

    #[test]
    fn link_singleton() {
        let linked_level = 0;

        let mut node = Node::new(4, 5);
        let mut next_node = Box::new(Node::new(9, 2));
        node.link_to(linked_level, Some(NonNull::from(&mut *next_node)));

        for level in 0..node.height() {
            let next = node.next(level);
            if level == linked_level {
                let next = next.unwrap();
                assert_eq!(*unsafe { next.as_ref() }.key(), 9);
            } else {
                assert!(next.is_none());
            }
        }

        node.unlink_all();
        assert!(node.next(linked_level).is_none());
    }
}
