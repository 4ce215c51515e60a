use crate::error::InvariantViolation;
use crate::height_control::{GeometricalGenerator, HeightControl};
use crate::iter::SkipListIter;
use crate::node::{Link, Node};
use crate::ordered_set::OrderedSet;

use log::{debug, trace};
use std::borrow::Borrow;
use std::marker::PhantomData;
use std::ptr::NonNull;

pub struct SkipList<K> {
    /// Pointer to the head of the Skip List. The first node is actually a "ghost"
    /// node: it is created within `SkipList::new`, should only be deleted in
    /// `SkipList::drop`, has the maximum possible height, and it holds no key.
    ///
    /// Searches for nodes all begin in the ghost node, which has as `next(0)`
    /// the actual first element, if any.
    pub(crate) head_: NonNull<Node<K>>,

    /// Number of elements in the SkipList
    length_: usize,

    /// Number of levels in use. Starts at 1 and only grows, except on `clear`.
    height_: usize,

    /// Maximum height the `controller_` can generate. Cached here so that the
    /// hot paths don't go through a virtual call.
    max_height_: usize,

    /// Used to generate the height for any given node when inserting data.
    controller_: Box<dyn HeightControl>,

    marker_: PhantomData<Box<Node<K>>>,
}

impl<K> SkipList<K> {
    pub fn new(controller: Box<dyn HeightControl>) -> SkipList<K> {
        let max_height = controller.max_height();
        assert!(max_height > 0);

        SkipList {
            head_: Self::allocate_node(Node::head(max_height)),
            length_: 0,
            height_: 1,
            max_height_: max_height,
            // The only direct call to controller_ should be done in the
            // `SkipList::insert` function.
            controller_: controller,
            marker_: PhantomData,
        }
    }

    /// A list with the default height distribution and a deterministic
    /// generator, so the shape of the list is reproducible.
    pub fn with_seed(seed: u64) -> SkipList<K> {
        Self::new(Box::new(GeometricalGenerator::seeded(seed)))
    }

    fn allocate_node(node: Node<K>) -> NonNull<Node<K>> {
        NonNull::from(Box::leak(Box::new(node)))
    }

    /// Frees every node except the head. Leaves the head's forward pointers
    /// dangling; callers must reset or free the head afterwards.
    fn dispose(&mut self) {
        unsafe {
            let mut current = self.head_.as_ref().next(0);
            while let Some(node) = current {
                let node = Box::from_raw(node.as_ptr());
                current = node.next(0);
            }
        }
    }

    /// Removes all elements and resets the active height.
    pub fn clear(&mut self) {
        self.dispose();
        unsafe { (*self.head_.as_ptr()).unlink_all() };
        debug!("cleared skip list of {} elements", self.length_);
        self.length_ = 0;
        self.height_ = 1;
    }

    /// Returns the number of elements stored in the structure.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.length_
    }

    /// Returns `true` if there are no elements stored within the structure.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.length_ == 0
    }

    /// Returns the number of levels currently in use.
    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height_
    }

    /// Returns the maximum reachable height of the SkipList.
    #[inline(always)]
    pub fn max_height(&self) -> usize {
        self.max_height_
    }

    pub fn first(&self) -> Option<&K> {
        unsafe { self.head_.as_ref().next(0).map(|node| (*node.as_ptr()).key()) }
    }

    pub fn iter(&self) -> SkipListIter<'_, K> {
        SkipListIter::new(unsafe { self.head_.as_ref() }.next(0), self.length_)
    }

    // Every node on `level`, in list order.
    fn level_nodes(&self, level: usize) -> Vec<NonNull<Node<K>>> {
        let mut nodes = Vec::new();
        let mut current = unsafe { self.head_.as_ref() }.next(level);
        while let Some(node) = current {
            nodes.push(node);
            current = unsafe { node.as_ref() }.next(level);
        }
        nodes
    }
}

impl<K: Ord> SkipList<K> {
    /// Returns the first node whose key is not less than `key`, if any.
    ///
    /// When `updates` is given, `updates[level]` is set to the last node at
    /// `level` whose key is less than `key` (the head if there is none), for
    /// every active level.
    fn find_greater_or_equal<Q>(&self, key: &Q, mut updates: Option<&mut [NonNull<Node<K>>]>) -> Link<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.head_;
        let mut level = self.height_ - 1;

        loop {
            let next = unsafe { current.as_ref() }.next(level);
            match next {
                Some(node) if unsafe { node.as_ref() }.borrowed_key::<Q>() < key => current = node,
                _ => {
                    if let Some(updates) = updates.as_deref_mut() {
                        updates[level] = current;
                    }

                    if level == 0 {
                        return next;
                    }
                    level -= 1;
                }
            }
        }
    }

    /// Inserts `key`. Returns `false` if `key` was already present, in which
    /// case the list is left untouched.
    pub fn insert(&mut self, key: K) -> bool {
        // Levels above the active height keep the head as their predecessor.
        let mut updates = vec![self.head_; self.max_height_];

        if let Some(found) = self.find_greater_or_equal(&key, Some(updates.as_mut_slice())) {
            if unsafe { found.as_ref() }.key() == &key {
                return false;
            }
        }

        let height = self.controller_.get_height();
        assert!(
            height >= 1 && height <= self.max_height_,
            "height controller produced {} outside 1..={}",
            height,
            self.max_height_
        );

        if height > self.height_ {
            debug!("skip list height grows from {} to {}", self.height_, height);
            self.height_ = height;
        }

        let node = Self::allocate_node(Node::new(key, height));
        for (level, update) in updates.iter().enumerate().take(height) {
            unsafe {
                let predecessor = update.as_ptr();
                (*node.as_ptr()).link_to(level, (*predecessor).next(level));
                (*predecessor).link_to(level, Some(node));
            }
        }

        self.length_ += 1;
        trace!("inserted node of height {}, length {}", height, self.length_);
        debug_verify!(self);
        true
    }

    /// Returns a reference to the stored key equal to `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_greater_or_equal(key, None).and_then(|node| {
            let node = unsafe { &*node.as_ptr() };
            if node.borrowed_key::<Q>() == key {
                Some(node.key())
            } else {
                None
            }
        })
    }

    /// Returns true if `key` is in the list.
    #[inline(always)]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes `key` from the list. Returns true if it was successfully
    /// removed; false if it was not found.
    ///
    /// The active height is never lowered, even if the removed node was the
    /// only one reaching the top levels.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut updates = vec![self.head_; self.max_height_];

        let removal = match self.find_greater_or_equal(key, Some(updates.as_mut_slice())) {
            Some(node) if unsafe { node.as_ref() }.borrowed_key::<Q>() == key => node,
            _ => return false,
        };

        let removal = unsafe { Box::from_raw(removal.as_ptr()) };
        for (level, update) in updates.iter().enumerate().take(removal.height()) {
            unsafe {
                let predecessor = update.as_ptr();
                debug_assert!((*predecessor).next(level) == Some(NonNull::from(&*removal)));
                (*predecessor).link_to(level, removal.next(level));
            }
        }

        self.length_ -= 1;
        trace!("removed node of height {}, length {}", removal.height(), self.length_);
        debug_verify!(self);
        true
    }

    /// Verifies the ordering and linking invariants of every level.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.height_ == 0 || self.height_ > self.max_height_ {
            return Err(InvariantViolation::HeightOutOfBounds {
                height: self.height_,
                limit: self.max_height_,
            });
        }

        let bottom = self.level_nodes(0);
        if bottom.len() != self.length_ {
            return Err(InvariantViolation::LengthMismatch {
                expected: self.length_,
                found: bottom.len(),
            });
        }

        let head = unsafe { self.head_.as_ref() };
        if let Some(level) = (self.height_..self.max_height_).find(|&level| head.next(level).is_some()) {
            return Err(InvariantViolation::StaleHeadLink { level });
        }

        for level in 0..self.height_ {
            let nodes = self.level_nodes(level);
            let sorted = nodes.windows(2).all(|pair| unsafe {
                pair[0].as_ref().key() < pair[1].as_ref().key()
            });
            if !sorted {
                return Err(InvariantViolation::LevelOrderViolation { level });
            }

            for node in &nodes {
                let height = unsafe { node.as_ref() }.height();
                if height == 0 || height > self.height_ {
                    return Err(InvariantViolation::HeightOutOfBounds {
                        height,
                        limit: self.height_,
                    });
                }
            }

            // A node is on `level` exactly when it is tall enough to be.
            let expected = bottom
                .iter()
                .filter(|node| unsafe { node.as_ref() }.height() > level);
            if !expected.eq(nodes.iter()) {
                return Err(InvariantViolation::LevelNotSubsequence { level });
            }
        }

        Ok(())
    }
}

// SAFETY: the list exclusively owns every node reachable from `head_`, and no
// node pointer ever escapes it. Moving the list moves all of its keys with it.
unsafe impl<K: Send> Send for SkipList<K> {}

// SAFETY: `&SkipList` only ever reads nodes; every write to a node or to the
// height controller goes through `&mut self`.
unsafe impl<K: Sync> Sync for SkipList<K> {}

impl<K> Default for SkipList<K> {
    fn default() -> Self {
        Self::new(Box::new(GeometricalGenerator::default()))
    }
}

impl<K> Drop for SkipList<K> {
    fn drop(&mut self) {
        self.dispose();
        unsafe {
            drop(Box::from_raw(self.head_.as_ptr()));
        }
    }
}

impl<K: Ord> OrderedSet<K> for SkipList<K> {
    fn insert(&mut self, key: K) -> bool {
        SkipList::insert(self, key)
    }

    fn remove(&mut self, key: &K) -> bool {
        SkipList::remove(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        SkipList::contains(self, key)
    }

    fn len(&self) -> usize {
        self.length_
    }
}

impl<K: std::fmt::Display> std::fmt::Display for SkipList<K> {
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

impl<K: std::fmt::Debug> std::fmt::Debug for SkipList<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Ord> Extend<K> for SkipList<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for SkipList<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut list = SkipList::default();
        list.extend(iter);
        list
    }
}

impl<'a, K> IntoIterator for &'a SkipList<K> {
    type Item = &'a K;
    type IntoIter = SkipListIter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
