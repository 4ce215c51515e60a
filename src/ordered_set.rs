/// The contract shared by every ordered set in this crate.
///
/// Keys only need a total order. Inserting a key that is already present and
/// removing a key that is absent are both no-ops, signalled by returning
/// `false`; neither is an error.
pub trait OrderedSet<K: Ord> {
    /// Stores `key`. Returns `false` if it was already present.
    fn insert(&mut self, key: K) -> bool;

    /// Drops `key`. Returns `false` if it was not present.
    fn remove(&mut self, key: &K) -> bool;

    /// Returns `true` if `key` is stored.
    fn contains(&self, key: &K) -> bool;

    /// Returns the number of keys stored.
    fn len(&self) -> usize;

    /// Returns `true` if there are no keys stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
