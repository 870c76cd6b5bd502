//! Iterators over an [`OrderedMap`](crate::OrderedMap).
//!
//! All iterators walk the tree in order with an explicit stack, so a
//! degenerate (list-shaped) tree is traversed without deep recursion.

use std::borrow::Borrow;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ops::{Bound, RangeBounds};

use crate::node::{Link, Node, release};

// =============================================================================
// Iter
// =============================================================================

/// An iterator over the entries of an [`OrderedMap`](crate::OrderedMap),
/// in ascending key order.
///
/// Created by [`OrderedMap::iter`](crate::OrderedMap::iter).
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>, length: usize) -> Self {
        let mut iterator = Self {
            stack: Vec::new(),
            remaining: length,
        };
        iterator.push_left_spine(root);
        iterator
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

// =============================================================================
// Keys / Values
// =============================================================================

/// An iterator over the keys of an [`OrderedMap`](crate::OrderedMap), in
/// ascending order.
pub struct Keys<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of an [`OrderedMap`](crate::OrderedMap), in
/// ascending key order.
pub struct Values<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

// =============================================================================
// Range
// =============================================================================

/// An iterator over the entries of an [`OrderedMap`](crate::OrderedMap)
/// whose keys fall within a range.
///
/// Subtrees that cannot hold a key inside the range are never entered:
/// a node's left subtree is visited only when the node's key lies above
/// the lower bound, and its right subtree only when the key lies below the
/// upper bound. Iteration stops at the first key past the upper bound.
///
/// Created by [`OrderedMap::range`](crate::OrderedMap::range).
pub struct Range<'a, K, V, Q: ?Sized, R> {
    stack: Vec<&'a Node<K, V>>,
    bounds: R,
    marker: PhantomData<fn(&Q)>,
}

impl<'a, K, V, Q, R> Range<'a, K, V, Q, R>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
    R: RangeBounds<Q>,
{
    pub(crate) fn new(root: Option<&'a Node<K, V>>, bounds: R) -> Self {
        let mut iterator = Self {
            stack: Vec::new(),
            bounds,
            marker: PhantomData,
        };
        iterator.descend(root);
        iterator
    }

    fn satisfies_lower(&self, key: &Q) -> bool {
        match self.bounds.start_bound() {
            Bound::Included(low) => key >= low,
            Bound::Excluded(low) => key > low,
            Bound::Unbounded => true,
        }
    }

    fn satisfies_upper(&self, key: &Q) -> bool {
        match self.bounds.end_bound() {
            Bound::Included(high) => key <= high,
            Bound::Excluded(high) => key < high,
            Bound::Unbounded => true,
        }
    }

    fn left_may_qualify(&self, key: &Q) -> bool {
        match self.bounds.start_bound() {
            Bound::Included(low) | Bound::Excluded(low) => key > low,
            Bound::Unbounded => true,
        }
    }

    fn right_may_qualify(&self, key: &Q) -> bool {
        match self.bounds.end_bound() {
            Bound::Included(high) | Bound::Excluded(high) => key < high,
            Bound::Unbounded => true,
        }
    }

    /// Pushes the pruned left spine of `node` onto the stack.
    fn descend(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(current) = node {
            let key: &Q = current.key.borrow();
            if self.satisfies_lower(key) {
                self.stack.push(current);
                node = if self.left_may_qualify(key) {
                    current.left.as_deref()
                } else {
                    None
                };
            } else if self.right_may_qualify(key) {
                node = current.right.as_deref();
            } else {
                node = None;
            }
        }
    }
}

impl<'a, K, V, Q, R> Iterator for Range<'a, K, V, Q, R>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
    R: RangeBounds<Q>,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let key: &Q = node.key.borrow();
        if !self.satisfies_upper(key) {
            self.stack.clear();
            return None;
        }
        if self.right_may_qualify(key) {
            self.descend(node.right.as_deref());
        }
        Some((&node.key, &node.value))
    }
}

impl<K, V, Q, R> FusedIterator for Range<'_, K, V, Q, R>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
    R: RangeBounds<Q>,
{
}

// =============================================================================
// IntoIter
// =============================================================================

/// An owning iterator over the entries of an
/// [`OrderedMap`](crate::OrderedMap), in ascending key order.
///
/// Created by the [`IntoIterator`] implementation of `OrderedMap`.
pub struct IntoIter<K, V> {
    stack: Vec<Box<Node<K, V>>>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(root: Link<K, V>, length: usize) -> Self {
        let mut iterator = Self {
            stack: Vec::new(),
            remaining: length,
        };
        iterator.push_left_spine(root);
        iterator
    }

    fn push_left_spine(&mut self, mut link: Link<K, V>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left_spine(node.right.take());
        self.remaining = self.remaining.saturating_sub(1);
        let Node { key, value, .. } = *node;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> Drop for IntoIter<K, V> {
    fn drop(&mut self) {
        for node in self.stack.drain(..) {
            release(Some(node));
        }
    }
}
