use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::treap::node::Node;
use crate::treap::tree;
use log::{debug, trace};
use rand::{Rng, SeedableRng, XorShiftRng};
use std::borrow::Borrow;
use std::fmt::{self, Debug, Display};
use std::iter::FromIterator;
use std::ops::Index;

/// An ordered map implemented using a treap.
///
/// A treap is a tree that satisfies both the binary search tree property and a heap property. Each
/// node has a key, a value, and a priority. The key of any node is greater than all keys in its
/// left subtree and less than all keys occuring in its right subtree. The priority of a node is
/// greater than or equal to the priority of all nodes in its subtrees. By randomly generating
/// priorities, the expected height of the tree is proportional to the logarithm of the number of
/// keys.
///
/// # Examples
///
/// ```
/// use treap_map::{Error, TreapMap};
///
/// let mut map = TreapMap::new();
/// map.insert("c", 3);
/// map.insert("a", 1);
/// map.insert("b", 2);
///
/// assert_eq!(map.get(&"a"), Ok(&1));
/// assert_eq!(map.get(&"z"), Err(Error::KeyNotFound));
/// assert_eq!(map.len(), 3);
///
/// assert_eq!(map.keys().collect::<Vec<_>>(), vec![&"a", &"b", &"c"]);
/// assert_eq!(map.keys().rev().collect::<Vec<_>>(), vec![&"c", &"b", &"a"]);
///
/// *map.get_mut(&"a").unwrap() = 10;
/// assert_eq!(map.remove(&"a"), Ok(("a", 10)));
/// assert_eq!(map.remove(&"a"), Err(Error::KeyNotFound));
/// assert_eq!(map.to_string(), "{b: 2, c: 3}");
/// ```
pub struct TreapMap<T, U> {
    tree: tree::Tree<T, U>,
    rng: XorShiftRng,
    len: usize,
}

impl<T, U> TreapMap<T, U>
where
    T: Ord,
{
    /// Constructs a new, empty `TreapMap<T, U>` whose priorities are drawn from a generator seeded
    /// by the operating system.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::TreapMap;
    ///
    /// let map: TreapMap<u32, u32> = TreapMap::new();
    /// ```
    pub fn new() -> Self {
        TreapMap {
            tree: None,
            rng: rand::weak_rng(),
            len: 0,
        }
    }

    /// Constructs a new, empty `TreapMap<T, U>` whose priorities are drawn from a generator with
    /// a fixed seed. Two maps built with the same seed and the same sequence of operations have
    /// the same shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::TreapMap;
    ///
    /// let mut map = TreapMap::with_seed(42);
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&1), Ok(&1));
    /// ```
    pub fn with_seed(seed: u64) -> Self {
        let lo = seed as u32;
        let hi = (seed >> 32) as u32;
        // The generator rejects an all-zero seed, which these words can never form.
        let rng = XorShiftRng::from_seed([lo, hi, lo ^ 0x9e37_79b9, hi ^ 0x7f4a_7c15]);
        TreapMap {
            tree: None,
            rng,
            len: 0,
        }
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, its value is
    /// replaced and the old value is returned. The key and the position of the node are left
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Ok(&1));
    /// assert_eq!(map.insert(1, 2), Some(1));
    /// assert_eq!(map.get(&1), Ok(&2));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Option<U> {
        let priority = self.rng.next_u32();
        self.insert_with_priority(key, value, priority)
    }

    /// Inserts a key-value pair into the map with an explicit priority instead of a random one.
    /// The priority is ignored if the key already exists in the map.
    ///
    /// Supplying non-random priorities gives up the expected logarithmic height of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert_with_priority(1, 1, 10);
    /// map.insert_with_priority(2, 2, 20);
    /// assert_eq!(map.keys().collect::<Vec<_>>(), vec![&1, &2]);
    /// ```
    pub fn insert_with_priority(&mut self, key: T, value: U, priority: u32) -> Option<U> {
        let TreapMap {
            ref mut tree,
            ref mut len,
            ..
        } = self;
        let ret = tree::insert(tree, Node::new(key, value, priority));
        if ret.is_none() {
            *len += 1;
        }
        ret
    }

    /// Removes a key-value pair from the map and returns it. Returns `Error::KeyNotFound` and
    /// leaves the map unchanged if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::{Error, TreapMap};
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Ok((1, 1)));
    /// assert_eq!(map.remove(&1), Err(Error::KeyNotFound));
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Result<(T, U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let TreapMap {
            ref mut tree,
            ref mut len,
            ..
        } = self;
        match tree::remove(tree, key) {
            Some(entry) => {
                *len -= 1;
                Ok(entry.into_pair())
            },
            None => Err(Error::KeyNotFound),
        }
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains(&0));
    /// assert!(map.contains(&1));
    /// ```
    pub fn contains<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::contains(&self.tree, key)
    }

    /// Returns an immutable reference to the value associated with a particular key. Returns
    /// `Error::KeyNotFound` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::{Error, TreapMap};
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), Err(Error::KeyNotFound));
    /// assert_eq!(map.get(&1), Ok(&1));
    /// ```
    pub fn get<V>(&self, key: &V) -> Result<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::get(&self.tree, key)
            .map(|entry| &entry.value)
            .ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns
    /// `Error::KeyNotFound` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Ok(&2));
    /// ```
    pub fn get_mut<V>(&mut self, key: &V) -> Result<&mut U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::get_mut(&mut self.tree, key)
            .map(|entry| &mut entry.value)
            .ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with a particular key, first inserting
    /// the value returned by `f` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// *map.get_or_insert_with("a", || 0) += 1;
    /// *map.get_or_insert_with("a", || 0) += 1;
    /// assert_eq!(map.get(&"a"), Ok(&2));
    /// ```
    pub fn get_or_insert_with<F>(&mut self, key: T, f: F) -> &mut U
    where
        F: FnOnce() -> U,
    {
        let index = tree::rank(&self.tree, &key);
        if !self.contains(&key) {
            self.insert(key, f());
        }
        let entry = tree::get_index_mut(&mut self.tree, index).expect("Unreachable code");
        &mut entry.value
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::TreapMap;
    ///
    /// let map: TreapMap<u32, u32> = TreapMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert!(map.is_empty());
    /// ```
    pub fn clear(&mut self) {
        tree::clear(&mut self.tree);
        self.len = 0;
    }

    /// Removes and returns the entry with the minimum key. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.pop_min(), Some((1, 1)));
    /// assert_eq!(map.pop_min(), Some((3, 3)));
    /// assert_eq!(map.pop_min(), None);
    /// ```
    pub fn pop_min(&mut self) -> Option<(T, U)> {
        let TreapMap {
            ref mut tree,
            ref mut len,
            ..
        } = self;
        tree::remove_min(tree).map(|entry| {
            *len -= 1;
            entry.into_pair()
        })
    }

    /// Removes and returns the entry with the maximum key. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.pop_max(), Some((3, 3)));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn pop_max(&mut self) -> Option<(T, U)> {
        let TreapMap {
            ref mut tree,
            ref mut len,
            ..
        } = self;
        tree::remove_max(tree).map(|entry| {
            *len -= 1;
            entry.into_pair()
        })
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        tree::min(&self.tree).map(|entry| &entry.key)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        tree::max(&self.tree).map(|entry| &entry.key)
    }

    /// Splits the map into two maps. The first contains every key less than or equal to `key`
    /// and the second contains every key greater than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.insert(3, 3);
    ///
    /// let (left, right) = map.split(&2);
    /// assert_eq!(left.keys().collect::<Vec<_>>(), vec![&1, &2]);
    /// assert_eq!(right.keys().collect::<Vec<_>>(), vec![&3]);
    /// ```
    pub fn split<V>(mut self, key: &V) -> (Self, Self)
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut left_tree = self.tree.take();
        let right_tree = tree::split(&mut left_tree, key);
        let left_rng = self.rng.gen::<XorShiftRng>();
        let right_rng = self.rng.gen::<XorShiftRng>();
        let left_len = tree::len(&left_tree);
        let right_len = tree::len(&right_tree);
        trace!("split treap into halves of {} and {} keys", left_len, right_len);
        (
            TreapMap {
                tree: left_tree,
                rng: left_rng,
                len: left_len,
            },
            TreapMap {
                tree: right_tree,
                rng: right_rng,
                len: right_len,
            },
        )
    }

    /// Merges two maps into one. Every key in `left` must be less than every key in `right`,
    /// otherwise `Error::InvariantViolation` is returned and both maps are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::TreapMap;
    ///
    /// let mut left = TreapMap::new();
    /// left.insert(1, 1);
    ///
    /// let mut right = TreapMap::new();
    /// right.insert(2, 2);
    ///
    /// let map = TreapMap::merge(left, right).unwrap();
    /// assert_eq!(map.keys().collect::<Vec<_>>(), vec![&1, &2]);
    ///
    /// let mut overlapping = TreapMap::new();
    /// overlapping.insert(0, 0);
    /// assert!(TreapMap::merge(map, overlapping).is_err());
    /// ```
    pub fn merge(mut left: Self, mut right: Self) -> Result<Self> {
        if let (Some(left_max), Some(right_min)) = (left.max(), right.min()) {
            if left_max >= right_min {
                debug!(
                    "rejected merge of treaps with {} and {} keys: key ranges overlap",
                    left.len, right.len,
                );
                return Err(Error::InvariantViolation(String::from(
                    "every key in the left map must be less than every key in the right map",
                )));
            }
        }

        let mut root = left.tree.take();
        tree::merge(&mut root, right.tree.take());
        trace!("merged treaps of {} and {} keys", left.len, right.len);
        Ok(TreapMap {
            tree: root,
            rng: left.rng.gen::<XorShiftRng>(),
            len: left.len + right.len,
        })
    }

    /// Verifies that the map satisfies the binary search tree property, the heap property, and
    /// that its length matches the number of nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::TreapMap;
    ///
    /// let map = (0..100).map(|key| (key, key)).collect::<TreapMap<u32, u32>>();
    /// assert_eq!(map.check_invariants(), Ok(()));
    /// ```
    pub fn check_invariants(&self) -> Result<()> {
        tree::check(&self.tree)?;
        let tree_len = tree::len(&self.tree);
        if tree_len != self.len {
            return Err(Error::InvariantViolation(format!(
                "map length {} does not match tree size {}",
                self.len, tree_len,
            )));
        }
        Ok(())
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal, and can be reversed to yield them in descending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&3, &3)));
    /// assert_eq!(iterator.next(), None);
    /// assert_eq!(map.iter().rev().next(), Some((&3, &3)));
    /// ```
    pub fn iter(&self) -> TreapMapIter<'_, T, U> {
        TreapMapIter::new(&self.tree, self.len)
    }

    /// Returns a mutable iterator over the map. The iterator will yield key-value pairs using
    /// in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    ///
    /// for (_, value) in &mut map {
    ///     *value += 1;
    /// }
    ///
    /// let mut iterator = map.iter_mut();
    /// assert_eq!(iterator.next(), Some((&1, &mut 2)));
    /// assert_eq!(iterator.next(), Some((&3, &mut 4)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter_mut(&mut self) -> TreapMapIterMut<'_, T, U> {
        TreapMapIterMut {
            current: self.tree.as_mut().map(|node| &mut **node),
            stack: Vec::new(),
            remaining: self.len,
        }
    }

    /// Returns an iterator over the keys of the map in ascending order. The iterator can be
    /// reversed to yield keys in descending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(3, 3);
    /// map.insert(1, 1);
    /// assert_eq!(map.keys().collect::<Vec<_>>(), vec![&1, &3]);
    /// assert_eq!(map.keys().rev().collect::<Vec<_>>(), vec![&3, &1]);
    /// ```
    pub fn keys(&self) -> TreapMapKeys<'_, T, U> {
        TreapMapKeys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the map, ordered by their keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(3, "c");
    /// map.insert(1, "a");
    /// assert_eq!(map.values().collect::<Vec<_>>(), vec![&"a", &"c"]);
    /// ```
    pub fn values(&self) -> TreapMapValues<'_, T, U> {
        TreapMapValues { inner: self.iter() }
    }

    /// Returns a mutable iterator over the values of the map, ordered by their keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_map::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// for value in map.values_mut() {
    ///     *value *= 10;
    /// }
    /// assert_eq!(map.get(&1), Ok(&10));
    /// ```
    pub fn values_mut(&mut self) -> TreapMapValuesMut<'_, T, U> {
        TreapMapValuesMut {
            inner: self.iter_mut(),
        }
    }
}

impl<T, U> IntoIterator for TreapMap<T, U>
where
    T: Ord,
{
    type IntoIter = TreapMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(mut self) -> Self::IntoIter {
        TreapMapIntoIter {
            current: self.tree.take(),
            stack: Vec::new(),
            remaining: self.len,
        }
    }
}

impl<'a, T, U> IntoIterator for &'a TreapMap<T, U>
where
    T: 'a + Ord,
    U: 'a,
{
    type IntoIter = TreapMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, U> IntoIterator for &'a mut TreapMap<T, U>
where
    T: 'a + Ord,
    U: 'a,
{
    type IntoIter = TreapMapIterMut<'a, T, U>;
    type Item = (&'a T, &'a mut U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An owning iterator for `TreapMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields owned entries.
pub struct TreapMapIntoIter<T, U> {
    current: tree::Tree<T, U>,
    stack: Vec<Node<T, U>>,
    remaining: usize,
}

impl<T, U> Iterator for TreapMapIntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(*node);
        }
        self.stack.pop().map(|node| {
            let Node { entry, right, .. } = node;
            self.current = right;
            self.remaining -= 1;
            entry.into_pair()
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, U> ExactSizeIterator for TreapMapIntoIter<T, U> {}

impl<T, U> Drop for TreapMapIntoIter<T, U> {
    fn drop(&mut self) {
        tree::clear(&mut self.current);
        for mut node in self.stack.drain(..) {
            tree::clear(&mut node.right);
        }
    }
}

/// An iterator for `TreapMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
/// Ascending and descending traversal each keep their own explicit stack of pending nodes.
pub struct TreapMapIter<'a, T, U> {
    front: Vec<&'a Node<T, U>>,
    back: Vec<&'a Node<T, U>>,
    remaining: usize,
}

impl<'a, T, U> TreapMapIter<'a, T, U> {
    fn new(tree: &'a tree::Tree<T, U>, len: usize) -> Self {
        let mut ret = TreapMapIter {
            front: Vec::new(),
            back: Vec::new(),
            remaining: len,
        };
        ret.push_left_spine(tree);
        ret.push_right_spine(tree);
        ret
    }

    fn push_left_spine(&mut self, mut tree: &'a tree::Tree<T, U>) {
        while let Some(ref node) = *tree {
            self.front.push(node);
            tree = &node.left;
        }
    }

    fn push_right_spine(&mut self, mut tree: &'a tree::Tree<T, U>) {
        while let Some(ref node) = *tree {
            self.back.push(node);
            tree = &node.right;
        }
    }
}

impl<'a, T, U> Iterator for TreapMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.front.pop().map(|node| {
            self.push_left_spine(&node.right);
            self.remaining -= 1;
            (&node.entry.key, &node.entry.value)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, U> DoubleEndedIterator for TreapMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.back.pop().map(|node| {
            self.push_right_spine(&node.left);
            self.remaining -= 1;
            (&node.entry.key, &node.entry.value)
        })
    }
}

impl<'a, T, U> ExactSizeIterator for TreapMapIter<'a, T, U> {}

/// A mutable iterator for `TreapMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields mutable references.
pub struct TreapMapIterMut<'a, T, U> {
    current: Option<&'a mut Node<T, U>>,
    stack: Vec<(&'a mut Entry<T, U>, Option<&'a mut Node<T, U>>)>,
    remaining: usize,
}

impl<'a, T, U> Iterator for TreapMapIterMut<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a mut U);

    fn next(&mut self) -> Option<Self::Item> {
        let TreapMapIterMut {
            ref mut current,
            ref mut stack,
            ref mut remaining,
        } = self;
        while let Some(node) = current.take() {
            let Node {
                entry, left, right, ..
            } = node;
            *current = left.as_mut().map(|node| &mut **node);
            stack.push((entry, right.as_mut().map(|node| &mut **node)));
        }
        stack.pop().map(|(entry, right)| {
            *current = right;
            *remaining -= 1;
            let &mut Entry {
                ref key,
                ref mut value,
            } = entry;
            (key, value)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, U> ExactSizeIterator for TreapMapIterMut<'a, T, U> {}

/// An iterator over the keys of a `TreapMap<T, U>` in ascending order.
pub struct TreapMapKeys<'a, T, U> {
    inner: TreapMapIter<'a, T, U>,
}

impl<'a, T, U> Iterator for TreapMapKeys<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T, U> DoubleEndedIterator for TreapMapKeys<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<'a, T, U> ExactSizeIterator for TreapMapKeys<'a, T, U> {}

/// An iterator over the values of a `TreapMap<T, U>`, ordered by their keys.
pub struct TreapMapValues<'a, T, U> {
    inner: TreapMapIter<'a, T, U>,
}

impl<'a, T, U> Iterator for TreapMapValues<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = &'a U;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T, U> DoubleEndedIterator for TreapMapValues<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<'a, T, U> ExactSizeIterator for TreapMapValues<'a, T, U> {}

/// A mutable iterator over the values of a `TreapMap<T, U>`, ordered by their keys.
pub struct TreapMapValuesMut<'a, T, U> {
    inner: TreapMapIterMut<'a, T, U>,
}

impl<'a, T, U> Iterator for TreapMapValuesMut<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = &'a mut U;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T, U> ExactSizeIterator for TreapMapValuesMut<'a, T, U> {}

impl<T, U> Drop for TreapMap<T, U> {
    fn drop(&mut self) {
        tree::clear(&mut self.tree);
    }
}

impl<T, U> Default for TreapMap<T, U>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U> FromIterator<(T, U)> for TreapMap<T, U>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (T, U)>,
    {
        let mut map = TreapMap::new();
        map.extend(iter);
        map
    }
}

impl<T, U> Extend<(T, U)> for TreapMap<T, U>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (T, U)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<T, U> PartialEq for TreapMap<T, U>
where
    T: Ord,
    U: PartialEq,
{
    fn eq(&self, other: &TreapMap<T, U>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T, U> Eq for TreapMap<T, U>
where
    T: Ord,
    U: Eq,
{
}

impl<T, U> Debug for TreapMap<T, U>
where
    T: Ord + Debug,
    U: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<T, U> Display for TreapMap<T, U>
where
    T: Ord + Display,
    U: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (index, (key, value)) in self.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

impl<'a, T, U, V> Index<&'a V> for TreapMap<T, U>
where
    T: Ord + Borrow<V>,
    V: Ord + ?Sized,
{
    type Output = U;

    fn index(&self, key: &V) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

#[cfg(test)]
mod tests {
    use super::TreapMap;
    use crate::error::Error;

    fn letters() -> TreapMap<&'static str, u32> {
        let mut map = TreapMap::new();
        map.insert("c", 3);
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("d", 4);
        map
    }

    #[test]
    fn test_len_empty() {
        let map: TreapMap<u32, u32> = TreapMap::new();
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let map: TreapMap<u32, u32> = TreapMap::new();
        assert!(map.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let map: TreapMap<u32, u32> = TreapMap::new();
        assert_eq!(map.min(), None);
        assert_eq!(map.max(), None);
    }

    #[test]
    fn test_empty_map_errors() {
        let mut map: TreapMap<&str, u32> = TreapMap::new();
        assert_eq!(map.get(&"x"), Err(Error::KeyNotFound));
        assert_eq!(map.remove(&"x"), Err(Error::KeyNotFound));
        assert!(!map.contains(&"x"));
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_insert() {
        let mut map = TreapMap::new();
        map.insert(1, 1);
        assert!(map.contains(&1));
        assert_eq!(map.get(&1), Ok(&1));
    }

    #[test]
    fn test_insert_replace() {
        let mut map = TreapMap::new();
        let ret_1 = map.insert(1, 1);
        let ret_2 = map.insert(1, 3);
        assert_eq!(map.get(&1), Ok(&3));
        assert_eq!(ret_1, None);
        assert_eq!(ret_2, Some(1));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_ordered_keys() {
        let map = letters();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec![&"a", &"b", &"c", &"d"]);
        let mut values = map.values().cloned().collect::<Vec<_>>();
        values.sort();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_reversed_keys() {
        let map = letters();
        assert_eq!(map.keys().rev().collect::<Vec<_>>(), vec![&"d", &"c", &"b", &"a"]);
    }

    #[test]
    fn test_remove() {
        let mut map = letters();
        assert_eq!(map.remove(&"b"), Ok(("b", 2)));
        assert!(!map.contains(&"b"));
        assert_eq!(map.get(&"b"), Err(Error::KeyNotFound));
        assert_eq!(map.len(), 3);
        assert_eq!(map.check_invariants(), Ok(()));
    }

    #[test]
    fn test_overwrite_keeps_len() {
        let mut map = letters();
        assert_eq!(map.insert("a", 10), Some(1));
        assert_eq!(map.len(), 4);
        assert_eq!(map.get(&"a"), Ok(&10));
    }

    #[test]
    fn test_display() {
        let map = letters();
        let rendered = map.to_string();
        for pair in &["a: 1", "b: 2", "c: 3", "d: 4"] {
            assert!(rendered.contains(pair));
        }
        assert_eq!(rendered, "{a: 1, b: 2, c: 3, d: 4}");
        assert_eq!(TreapMap::<u32, u32>::new().to_string(), "{}");
    }

    #[test]
    fn test_debug() {
        let mut map = TreapMap::new();
        map.insert(2, "b");
        map.insert(1, "a");
        assert_eq!(format!("{:?}", map), r#"{1: "a", 2: "b"}"#);
    }

    #[test]
    fn test_views_consistent() {
        let map = letters();
        let items = map.iter().collect::<Vec<_>>();
        let zipped = map.keys().zip(map.values()).collect::<Vec<_>>();
        assert_eq!(items, zipped);
    }

    #[test]
    fn test_iter_meets_in_middle() {
        let map = (0..10).map(|key| (key, key)).collect::<TreapMap<u32, u32>>();
        let mut iter = map.keys();
        let mut front = Vec::new();
        let mut back = Vec::new();
        loop {
            match iter.next() {
                Some(key) => front.push(*key),
                None => break,
            }
            match iter.next_back() {
                Some(key) => back.push(*key),
                None => break,
            }
        }
        assert_eq!(front, vec![0, 1, 2, 3, 4]);
        assert_eq!(back, vec![9, 8, 7, 6, 5]);
        assert_eq!(iter.len(), 0);
    }

    #[test]
    fn test_min_max() {
        let mut map = TreapMap::new();
        map.insert(1, 1);
        map.insert(3, 3);
        map.insert(5, 5);

        assert_eq!(map.min(), Some(&1));
        assert_eq!(map.max(), Some(&5));
    }

    #[test]
    fn test_get_mut() {
        let mut map = TreapMap::new();
        map.insert(1, 1);
        {
            let value = map.get_mut(&1);
            *value.unwrap() = 3;
        }
        assert_eq!(map.get(&1), Ok(&3));
        assert_eq!(map.get_mut(&2), Err(Error::KeyNotFound));
    }

    #[test]
    fn test_get_or_insert_with() {
        let mut map = TreapMap::with_seed(7);
        for key in &[5, 1, 9, 3, 7] {
            map.insert(*key, 0);
        }
        *map.get_or_insert_with(4, || 40) += 1;
        *map.get_or_insert_with(9, || 90) += 1;
        assert_eq!(map.get(&4), Ok(&41));
        assert_eq!(map.get(&9), Ok(&1));
        assert_eq!(map.len(), 6);
        assert_eq!(map.check_invariants(), Ok(()));
    }

    #[test]
    fn test_borrowed_lookup() {
        let mut map = TreapMap::new();
        map.insert(String::from("a"), 1);
        assert!(map.contains("a"));
        assert_eq!(map.get("a"), Ok(&1));
        assert_eq!(map["a"], 1);
        assert_eq!(map.remove("a"), Ok((String::from("a"), 1)));
    }

    #[test]
    #[should_panic]
    fn test_index_missing_key() {
        let map: TreapMap<u32, u32> = TreapMap::new();
        let _value = map[&1];
    }

    #[test]
    fn test_clear() {
        let mut map = letters();
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.iter().next(), None);
        map.insert("a", 1);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_split_merge() {
        let map = (0..20).map(|key| (key, key * 2)).collect::<TreapMap<u32, u32>>();
        let (left, right) = map.split(&9);
        assert_eq!(left.len(), 10);
        assert_eq!(right.len(), 10);
        assert_eq!(left.max(), Some(&9));
        assert_eq!(right.min(), Some(&10));
        assert_eq!(left.check_invariants(), Ok(()));
        assert_eq!(right.check_invariants(), Ok(()));

        let map = TreapMap::merge(left, right).unwrap();
        assert_eq!(map.len(), 20);
        assert_eq!(map.check_invariants(), Ok(()));
        assert_eq!(
            map.into_iter().collect::<Vec<_>>(),
            (0..20).map(|key| (key, key * 2)).collect::<Vec<_>>(),
        );
    }

    #[test]
    fn test_merge_empty() {
        let left: TreapMap<u32, u32> = TreapMap::new();
        let mut right = TreapMap::new();
        right.insert(1, 1);
        let map = TreapMap::merge(left, right).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_merge_overlapping() {
        let mut left = TreapMap::new();
        left.insert(1, 1);
        left.insert(5, 5);
        let mut right = TreapMap::new();
        right.insert(5, 50);
        match TreapMap::merge(left, right) {
            Err(Error::InvariantViolation(_)) => {},
            _ => panic!("expected merge of overlapping maps to fail"),
        }
    }

    #[test]
    fn test_eq() {
        let left = (0..10).map(|key| (key, key)).collect::<TreapMap<u32, u32>>();
        let right = (0..10).rev().map(|key| (key, key)).collect::<TreapMap<u32, u32>>();
        assert_eq!(left, right);

        let other = (0..10).map(|key| (key, key + 1)).collect::<TreapMap<u32, u32>>();
        assert_ne!(left, other);
    }

    #[test]
    fn test_into_iter() {
        let mut map = TreapMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        let iter = map.into_iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.collect::<Vec<(u32, u32)>>(), vec![(1, 2), (3, 4), (5, 6)]);
    }

    #[test]
    fn test_iter() {
        let mut map = TreapMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &2), (&3, &4), (&5, &6)],
        );
        assert_eq!(
            map.iter().rev().collect::<Vec<(&u32, &u32)>>(),
            vec![(&5, &6), (&3, &4), (&1, &2)],
        );
    }

    #[test]
    fn test_iter_mut() {
        let mut map = TreapMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        for (_, value) in &mut map {
            *value += 1;
        }

        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &3), (&3, &5), (&5, &7)],
        );
    }

    fn deep_chain(len: u32) -> TreapMap<u32, u32> {
        let mut map = TreapMap::new();
        for key in 0..len {
            map.insert_with_priority(key, key, key);
        }
        map
    }

    #[test]
    fn test_drop_deep_chain() {
        let map = deep_chain(200_000);
        assert_eq!(map.len(), 200_000);
        assert_eq!(map.keys().next_back(), Some(&199_999));
        drop(map);
    }

    #[test]
    fn test_clear_deep_chain() {
        let mut map = deep_chain(200_000);
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.iter().next(), None);
    }

    #[test]
    fn test_drop_partial_into_iter_deep_chain() {
        let mut iter = deep_chain(200_000).into_iter();
        assert_eq!(iter.next(), Some((0, 0)));
        assert_eq!(iter.len(), 199_999);
        drop(iter);
    }

    #[test]
    fn test_pop_min_max() {
        let mut map = letters();
        assert_eq!(map.pop_min(), Some(("a", 1)));
        assert_eq!(map.pop_max(), Some(("d", 4)));
        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec![&"b", &"c"]);
        assert_eq!(map.check_invariants(), Ok(()));

        assert_eq!(map.pop_max(), Some(("c", 3)));
        assert_eq!(map.pop_min(), Some(("b", 2)));
        assert_eq!(map.pop_min(), None);
        assert_eq!(map.pop_max(), None);
        assert!(map.is_empty());
    }

    #[test]
    fn test_iter_mut_len() {
        let mut map = letters();
        let mut iter = map.iter_mut();
        assert_eq!(iter.len(), 4);
        iter.next();
        assert_eq!(iter.size_hint(), (3, Some(3)));
        assert_eq!(iter.count(), 3);

        let mut values = map.values_mut();
        assert_eq!(values.len(), 4);
        values.next();
        values.next();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_seeded_maps_share_shape() {
        let mut left = TreapMap::with_seed(1);
        let mut right = TreapMap::with_seed(1);
        for key in 0..50 {
            left.insert(key, ());
            right.insert(key, ());
        }
        let left_priorities = left.tree.as_ref().map(|node| node.priority);
        let right_priorities = right.tree.as_ref().map(|node| node.priority);
        assert_eq!(left_priorities, right_priorities);
    }
}
