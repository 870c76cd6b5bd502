//! Ordered map backed by an unbalanced binary search tree.
//!
//! This module provides [`OrderedMap`], a mutable ordered map whose entries
//! live in a plain (non-rebalancing) binary search tree.
//!
//! # Overview
//!
//! - O(h) insert, get, remove, depth, successor and predecessor
//! - O(h) min/max
//! - O(h + k) range queries where k is the number of results
//! - O(n) height, leaf count and full traversal
//! - O(1) len and `is_empty`
//!
//! Here h is the height of the tree. The tree is never rebalanced, so h
//! depends on insertion order: random orders give h = O(log N), while
//! monotonic orders give h = N. Every traversal uses an explicit stack,
//! so even a list-shaped tree is handled without deep recursion.
//!
//! # Examples
//!
//! ```rust
//! use bstmap::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.insert(5, "root");
//! map.insert(3, "left");
//! map.insert(7, "right");
//!
//! assert_eq!(map.sorted_keys(), vec![3, 5, 7]);
//! assert_eq!(map.height(), 2);
//! assert_eq!(map.depth(&7), Some(2));
//! assert_eq!(map.successor(&5), Some(&7));
//! assert_eq!(map.keys_in_range(&4, &6), vec![5]);
//! ```
//!
//! # Removal
//!
//! Removing a node with two children keeps the node in place and hands it
//! the key and value of its in-order successor (the leftmost node of its
//! right subtree). The successor node is then unlinked, and its right child
//! takes over its slot.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::RangeBounds;

use tracing::trace;

use crate::display::DisplayKeys;
use crate::error::OrderedMapError;
use crate::iter::{IntoIter, Iter, Keys, Range, Values};
use crate::node::{Link, Node, detach_min, duplicate, locate_mut, release};

// =============================================================================
// OrderedMap Definition
// =============================================================================

/// An ordered map backed by an unbalanced binary search tree.
///
/// Keys must implement `Ord`. Every key in a node's left subtree is
/// strictly smaller than the node's key, and every key in its right subtree
/// is strictly greater. Keys are unique: inserting an existing key updates
/// its value in place.
///
/// Queries on a missing key return `None` rather than failing.
///
/// # Time Complexity
///
/// | Operation      | Complexity |
/// |----------------|------------|
/// | `new`          | O(1)       |
/// | `get`          | O(h)       |
/// | `insert`       | O(h)       |
/// | `remove`       | O(h)       |
/// | `depth`        | O(h)       |
/// | `successor`    | O(h)       |
/// | `min_key`      | O(h)       |
/// | `range`        | O(h + k)   |
/// | `height`       | O(n)       |
/// | `count_leaves` | O(n)       |
/// | `len`          | O(1)       |
///
/// # Examples
///
/// ```rust
/// use bstmap::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert(2, "two");
/// map.insert(1, "one");
///
/// assert_eq!(map.get(&1), Some(&"one"));
/// assert_eq!(map.remove(&1), Some("one"));
/// assert!(!map.contains_key(&1));
/// ```
pub struct OrderedMap<K, V> {
    /// Root slot of the tree
    root: Link<K, V>,
    /// Number of nodes reachable from `root`
    length: usize,
}

impl<K, V> OrderedMap<K, V> {
    /// Creates a new empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let map: OrderedMap<i32, String> = OrderedMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            length: 0,
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let map: OrderedMap<_, _> = [(1, "one"), (2, "two")].into_iter().collect();
    /// assert_eq!(map.len(), 2);
    /// ```
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        trace!(length = self.length, "clearing map");
        release(self.root.take());
        self.length = 0;
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    ///
    /// An empty map has height 0 and a single entry has height 1.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.height(), 0);
    ///
    /// map.insert(5, ());
    /// map.insert(3, ());
    /// map.insert(7, ());
    /// assert_eq!(map.height(), 2);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        let mut tallest = 0;
        let mut pending: Vec<(&Node<K, V>, usize)> =
            self.root.as_deref().map(|root| (root, 1)).into_iter().collect();
        while let Some((node, level)) = pending.pop() {
            tallest = tallest.max(level);
            pending.extend(node.left.as_deref().map(|left| (left, level + 1)));
            pending.extend(node.right.as_deref().map(|right| (right, level + 1)));
        }
        tallest
    }

    /// Returns the number of nodes without children.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let map: OrderedMap<_, _> = [(5, ()), (3, ()), (7, ())].into_iter().collect();
    /// assert_eq!(map.count_leaves(), 2);
    /// ```
    #[must_use]
    pub fn count_leaves(&self) -> usize {
        let mut leaves = 0;
        let mut pending: Vec<&Node<K, V>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = pending.pop() {
            if node.is_leaf() {
                leaves += 1;
            }
            pending.extend(node.left.as_deref());
            pending.extend(node.right.as_deref());
        }
        leaves
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the smallest key, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let map: OrderedMap<_, _> = [(5, ()), (3, ()), (7, ())].into_iter().collect();
    /// assert_eq!(map.min_key(), Some(&3));
    /// assert_eq!(map.max_key(), Some(&7));
    /// ```
    #[must_use]
    pub fn min_key(&self) -> Option<&K> {
        self.first_key_value().map(|(key, _)| key)
    }

    /// Returns the largest key, or `None` if the map is empty.
    #[must_use]
    pub fn max_key(&self) -> Option<&K> {
        self.last_key_value().map(|(key, _)| key)
    }

    /// Returns an iterator over entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let map: OrderedMap<_, _> = [(3, "c"), (1, "a"), (2, "b")].into_iter().collect();
    /// let entries: Vec<(&i32, &&str)> = map.iter().collect();
    /// assert_eq!(entries, vec![(&1, &"a"), (&2, &"b"), (&3, &"c")]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), self.length)
    }

    /// Returns an iterator over keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over values in ascending key order.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns all keys in ascending order, collected into a fresh `Vec`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let map: OrderedMap<_, _> = [(5, ()), (3, ()), (7, ())].into_iter().collect();
    /// assert_eq!(map.sorted_keys(), vec![3, 5, 7]);
    /// ```
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.keys().cloned().collect()
    }

    /// Returns a view that formats the keys in ascending order, separated
    /// by single spaces.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let map: OrderedMap<_, _> = [(5, ()), (3, ()), (7, ())].into_iter().collect();
    /// assert_eq!(map.display_keys().to_string(), "3 5 7");
    /// ```
    #[must_use]
    pub const fn display_keys(&self) -> DisplayKeys<'_, K, V> {
        DisplayKeys::new(self)
    }
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Finds the node holding `key`.
    fn find<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return Some(node),
            }
        }
        None
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("hello".to_string(), 42);
    ///
    /// assert_eq!(map.get("hello"), Some(&42));
    /// assert_eq!(map.get("world"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        locate_mut(&mut self.root, key)
            .as_deref_mut()
            .map(|node| &mut node.value)
    }

    /// Returns `true` if the map contains a value for the specified key.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Inserts a key-value pair into the map.
    ///
    /// A new key is attached as a leaf at the position found by descending
    /// from the root. An existing key keeps its node and only has its value
    /// replaced; the previous value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.insert(1, "one"), None);
    /// assert_eq!(map.insert(1, "ONE"), Some("one"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let slot = locate_mut(&mut self.root, &key);
        if let Some(node) = slot.as_mut() {
            return Some(mem::replace(&mut node.value, value));
        }
        *slot = Some(Node::leaf(key, value));
        self.length += 1;
        trace!(length = self.length, "attached new leaf");
        None
    }

    /// Inserts a key-value pair only if the key is absent.
    ///
    /// Returns a mutable reference to the freshly inserted value.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedMapError::DuplicateKey`] if the key is already
    /// present. The map is left unchanged and `value` is dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::{OrderedMap, OrderedMapError};
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.try_insert(1, 10), Ok(&mut 10));
    /// assert_eq!(map.try_insert(1, 20), Err(OrderedMapError::DuplicateKey));
    /// assert_eq!(map.get(&1), Some(&10));
    /// ```
    pub fn try_insert(&mut self, key: K, value: V) -> Result<&mut V, OrderedMapError> {
        let slot = locate_mut(&mut self.root, &key);
        if slot.is_some() {
            return Err(OrderedMapError::DuplicateKey);
        }
        let node = slot.insert(Node::leaf(key, value));
        self.length += 1;
        trace!(length = self.length, "attached new leaf");
        Ok(&mut node.value)
    }

    /// Replaces the value of an existing key, returning the old value.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedMapError::KeyNotFound`] if the key is absent. No
    /// entry is created in that case.
    pub fn replace<Q>(&mut self, key: &Q, value: V) -> Result<V, OrderedMapError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_mut(key)
            .map(|slot| mem::replace(slot, value))
            .ok_or(OrderedMapError::KeyNotFound)
    }

    /// Removes a key from the map, returning its value if it was present.
    ///
    /// A leaf is simply unlinked and a node with one child is replaced by
    /// that child. A node with two children takes over the key and value of
    /// its in-order successor, which is then unlinked from the right
    /// subtree. Removing an absent key is a no-op.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let mut map: OrderedMap<_, _> = [(5, "a"), (3, "b"), (7, "c")].into_iter().collect();
    /// assert_eq!(map.remove(&5), Some("a"));
    /// assert_eq!(map.remove(&5), None);
    /// assert_eq!(map.sorted_keys(), vec![3, 7]);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let slot = locate_mut(&mut self.root, key);
        let mut node = slot.take()?;
        let removed = match (node.left.take(), node.right.take()) {
            (None, None) => {
                trace!("removed leaf");
                Some(node.value)
            }
            (Some(child), None) | (None, Some(child)) => {
                trace!("spliced only child into vacated slot");
                *slot = Some(child);
                Some(node.value)
            }
            (Some(left), Some(right)) => {
                trace!("promoting in-order successor");
                let mut right = Some(right);
                let removed = detach_min(&mut right).map(|successor| {
                    let Node {
                        key: successor_key,
                        value: successor_value,
                        ..
                    } = *successor;
                    node.key = successor_key;
                    mem::replace(&mut node.value, successor_value)
                });
                node.left = Some(left);
                node.right = right;
                *slot = Some(node);
                removed
            }
        };
        if removed.is_some() {
            self.length -= 1;
        }
        removed
    }

    /// Returns the 1-based depth of `key` (the root has depth 1), or `None`
    /// if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let map: OrderedMap<_, _> = [(5, ()), (3, ()), (7, ())].into_iter().collect();
    /// assert_eq!(map.depth(&5), Some(1));
    /// assert_eq!(map.depth(&3), Some(2));
    /// assert_eq!(map.depth(&10), None);
    /// ```
    #[must_use]
    pub fn depth<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        let mut level = 1;
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return Some(level),
            }
            level += 1;
        }
        None
    }

    /// Returns the smallest key strictly greater than `key`.
    ///
    /// `key` itself does not have to be present in the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let map: OrderedMap<_, _> = [(3, ()), (5, ()), (7, ())].into_iter().collect();
    /// assert_eq!(map.successor(&3), Some(&5));
    /// assert_eq!(map.successor(&4), Some(&5));
    /// assert_eq!(map.successor(&7), None);
    /// ```
    #[must_use]
    pub fn successor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        let mut candidate = None;
        while let Some(node) = current {
            if key.cmp(node.key.borrow()).is_lt() {
                candidate = Some(&node.key);
                current = node.left.as_deref();
            } else {
                current = node.right.as_deref();
            }
        }
        candidate
    }

    /// Returns the largest key strictly less than `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let map: OrderedMap<_, _> = [(3, ()), (5, ()), (7, ())].into_iter().collect();
    /// assert_eq!(map.predecessor(&5), Some(&3));
    /// assert_eq!(map.predecessor(&3), None);
    /// ```
    #[must_use]
    pub fn predecessor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        let mut candidate = None;
        while let Some(node) = current {
            if key.cmp(node.key.borrow()).is_gt() {
                candidate = Some(&node.key);
                current = node.right.as_deref();
            } else {
                current = node.left.as_deref();
            }
        }
        candidate
    }

    /// Returns an iterator over entries within the specified range.
    ///
    /// The range is specified using Rust's range syntax:
    /// - `a..b` - from a (inclusive) to b (exclusive)
    /// - `a..=b` - from a (inclusive) to b (inclusive)
    /// - `a..` - from a (inclusive) to the end
    /// - `..b` - from the start to b (exclusive)
    ///
    /// An inverted range yields nothing.
    ///
    /// # Complexity
    ///
    /// O(h + k) where k is the number of entries in the range
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let map: OrderedMap<_, _> = (1..=5).map(|key| (key, key * 10)).collect();
    /// let range: Vec<(&i32, &i32)> = map.range(2..=4).collect();
    /// assert_eq!(range, vec![(&2, &20), (&3, &30), (&4, &40)]);
    /// ```
    pub fn range<Q, R>(&self, range: R) -> Range<'_, K, V, Q, R>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        R: RangeBounds<Q>,
    {
        Range::new(self.root.as_deref(), range)
    }

    /// Returns the keys in `[low, high]` in ascending order.
    ///
    /// Returns an empty `Vec` when `low > high`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let map: OrderedMap<_, _> = [(3, ()), (5, ()), (7, ())].into_iter().collect();
    /// assert_eq!(map.keys_in_range(&3, &7), vec![3, 5, 7]);
    /// assert_eq!(map.keys_in_range(&4, &6), vec![5]);
    /// ```
    #[must_use]
    pub fn keys_in_range(&self, low: &K, high: &K) -> Vec<K>
    where
        K: Clone,
    {
        self.range::<K, _>(low..=high).map(|(key, _)| key.clone()).collect()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for OrderedMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for OrderedMap<K, V> {
    fn drop(&mut self) {
        release(self.root.take());
    }
}

/// Cloning keeps the exact tree shape, not just the entries.
impl<K: Clone, V: Clone> Clone for OrderedMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            root: duplicate(self.root.as_deref()),
            length: self.length,
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        let length = mem::take(&mut self.length);
        IntoIter::new(self.root.take(), length)
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two maps are equal when they hold the same entries, whatever the shape
/// of their trees.
impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}

impl<K: Hash, V: Hash> Hash for OrderedMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for OrderedMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for OrderedMap<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct OrderedMapVisitor<K, V> {
    marker: std::marker::PhantomData<fn() -> OrderedMap<K, V>>,
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for OrderedMapVisitor<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    type Value = OrderedMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        // Entries are inserted in input order, so the input order decides
        // the tree shape.
        let mut map = OrderedMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for OrderedMap<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_serialize_in_key_order() {
        let map: OrderedMap<i32, String> = [(2, "b".to_string()), (1, "a".to_string())]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"1":"a","2":"b"}"#);
    }

    #[rstest]
    fn test_deserialize_builds_tree_in_input_order() {
        let json = r#"{"5":"x","3":"y","7":"z"}"#;
        let map: OrderedMap<i32, String> = serde_json::from_str(json).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.depth(&5), Some(1));
        assert_eq!(map.get(&7), Some(&"z".to_string()));
    }

    #[rstest]
    fn test_deserialize_overwrites_duplicate_keys() {
        let json = r#"{"1":"first","1":"second"}"#;
        let map: OrderedMap<i32, String> = serde_json::from_str(json).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&"second".to_string()));
    }

    #[rstest]
    fn test_roundtrip_empty() {
        let map: OrderedMap<i32, i32> = OrderedMap::new();
        let json = serde_json::to_string(&map).unwrap();
        let restored: OrderedMap<i32, i32> = serde_json::from_str(&json).unwrap();
        assert!(restored.is_empty());
    }
}
