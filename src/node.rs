//! Tree nodes and slot-level helpers.
//!
//! A node is owned by exactly one slot: either the map's root slot or the
//! `left`/`right` slot of its parent. Every structural change in
//! [`OrderedMap`](crate::OrderedMap) is expressed as taking a subtree out of
//! a slot and putting the repaired subtree back, so no node ever needs a
//! parent pointer.

use std::borrow::Borrow;
use std::cmp::Ordering;

/// An owning child slot. `None` is an empty subtree.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// Internal node of the binary search tree.
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    /// Creates a boxed node with no children.
    pub(crate) fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
        })
    }

    /// Checks if this node has no children.
    pub(crate) const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Walks down from `link` and returns the slot where `key` lives, or the
/// empty slot where it would be attached.
pub(crate) fn locate_mut<'a, K, V, Q>(mut link: &'a mut Link<K, V>, key: &Q) -> &'a mut Link<K, V>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    loop {
        let ordering = link.as_deref().map(|node| key.cmp(node.key.borrow()));
        link = match (ordering, link) {
            (Some(Ordering::Less), Some(node)) => &mut node.left,
            (Some(Ordering::Greater), Some(node)) => &mut node.right,
            (_, found) => return found,
        };
    }
}

/// Unlinks the leftmost node below `link`, splicing its right child into
/// the vacated slot.
///
/// The returned node has both child slots empty.
pub(crate) fn detach_min<K, V>(mut link: &mut Link<K, V>) -> Option<Box<Node<K, V>>> {
    let slot = loop {
        let has_left = link.as_deref().is_some_and(|node| node.left.is_some());
        link = match (has_left, link) {
            (true, Some(node)) => &mut node.left,
            (_, leftmost) => break leftmost,
        };
    };
    let mut minimum = slot.take()?;
    *slot = minimum.right.take();
    Some(minimum)
}

/// Frees a subtree without recursing once per level.
pub(crate) fn release<K, V>(link: Link<K, V>) {
    let mut pending: Vec<Box<Node<K, V>>> = link.into_iter().collect();
    while let Some(mut node) = pending.pop() {
        pending.extend(node.left.take());
        pending.extend(node.right.take());
    }
}

/// Builds a copy of a subtree with the same shape, assembling nodes in
/// post-order so that no call-stack recursion is needed.
pub(crate) fn duplicate<K: Clone, V: Clone>(root: Option<&Node<K, V>>) -> Link<K, V> {
    enum Step<'a, K, V> {
        Visit(Option<&'a Node<K, V>>),
        Assemble(&'a Node<K, V>),
    }

    let mut steps = vec![Step::Visit(root)];
    let mut built: Vec<Link<K, V>> = Vec::new();
    while let Some(step) = steps.pop() {
        match step {
            Step::Visit(None) => built.push(None),
            Step::Visit(Some(node)) => {
                steps.push(Step::Assemble(node));
                steps.push(Step::Visit(node.right.as_deref()));
                steps.push(Step::Visit(node.left.as_deref()));
            }
            Step::Assemble(node) => {
                let right = built.pop().flatten();
                let left = built.pop().flatten();
                built.push(Some(Box::new(Node {
                    key: node.key.clone(),
                    value: node.value.clone(),
                    left,
                    right,
                })));
            }
        }
    }
    built.pop().flatten()
}
