//! Property-based tests for OrderedMap.
//!
//! This module verifies that OrderedMap satisfies the map laws and agrees
//! with `std::collections::BTreeMap` used as a model.

use bstmap::OrderedMap;
use proptest::prelude::*;
use std::collections::BTreeMap;

// =============================================================================
// Strategy for generating test data
// =============================================================================

fn arbitrary_key() -> impl Strategy<Value = i32> {
    -100..100i32
}

fn arbitrary_value() -> impl Strategy<Value = i32> {
    any::<i32>()
}

fn arbitrary_entries() -> impl Strategy<Value = Vec<(i32, i32)>> {
    prop::collection::vec((arbitrary_key(), arbitrary_value()), 0..60)
}

#[derive(Debug, Clone)]
enum Operation {
    Insert(i32, i32),
    Remove(i32),
}

fn arbitrary_operations() -> impl Strategy<Value = Vec<Operation>> {
    let operation = prop_oneof![
        (arbitrary_key(), arbitrary_value()).prop_map(|(key, value)| Operation::Insert(key, value)),
        arbitrary_key().prop_map(Operation::Remove),
    ];
    prop::collection::vec(operation, 0..120)
}

fn apply(operations: &[Operation]) -> (OrderedMap<i32, i32>, BTreeMap<i32, i32>) {
    let mut map = OrderedMap::new();
    let mut model = BTreeMap::new();
    for operation in operations {
        match *operation {
            Operation::Insert(key, value) => {
                assert_eq!(map.insert(key, value), model.insert(key, value));
            }
            Operation::Remove(key) => {
                assert_eq!(map.remove(&key), model.remove(&key));
            }
        }
    }
    (map, model)
}

// =============================================================================
// Model Agreement
// =============================================================================

proptest! {
    #[test]
    fn prop_agrees_with_btreemap(operations in arbitrary_operations()) {
        let (map, model) = apply(&operations);

        prop_assert_eq!(map.len(), model.len());
        prop_assert_eq!(map.sorted_keys(), model.keys().copied().collect::<Vec<_>>());
        prop_assert_eq!(
            map.iter().map(|(key, value)| (*key, *value)).collect::<Vec<_>>(),
            model.iter().map(|(key, value)| (*key, *value)).collect::<Vec<_>>()
        );
        prop_assert_eq!(map.min_key(), model.keys().next());
        prop_assert_eq!(map.max_key(), model.keys().next_back());
    }
}

// =============================================================================
// Sorted Keys Law: strictly increasing and sized like the map
// =============================================================================

proptest! {
    #[test]
    fn prop_sorted_keys_strictly_increasing(operations in arbitrary_operations()) {
        let (map, _) = apply(&operations);
        let keys = map.sorted_keys();

        prop_assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(keys.len(), map.len());
    }
}

// =============================================================================
// Get-Insert Law: map.insert(k, v); map.get(&k) == Some(&v)
// =============================================================================

proptest! {
    #[test]
    fn prop_get_insert_law(
        entries in arbitrary_entries(),
        key in arbitrary_key(),
        value in arbitrary_value()
    ) {
        let mut map: OrderedMap<i32, i32> = entries.into_iter().collect();
        let had_key = map.contains_key(&key);
        let length_before = map.len();

        map.insert(key, value);

        prop_assert_eq!(map.get(&key), Some(&value));
        prop_assert_eq!(map.len(), length_before + usize::from(!had_key));
    }
}

// =============================================================================
// Remove-Get Law: map.remove(&k); !map.contains_key(&k)
// =============================================================================

proptest! {
    #[test]
    fn prop_remove_law(entries in arbitrary_entries(), key in arbitrary_key()) {
        let mut map: OrderedMap<i32, i32> = entries.into_iter().collect();
        let had_key = map.contains_key(&key);
        let length_before = map.len();

        map.remove(&key);

        prop_assert!(!map.contains_key(&key));
        prop_assert_eq!(map.len(), length_before - usize::from(had_key));
    }
}

proptest! {
    #[test]
    fn prop_remove_idempotent(entries in arbitrary_entries(), key in arbitrary_key()) {
        let mut once: OrderedMap<i32, i32> = entries.iter().copied().collect();
        let mut twice: OrderedMap<i32, i32> = entries.into_iter().collect();

        once.remove(&key);
        twice.remove(&key);
        twice.remove(&key);

        prop_assert_eq!(once.sorted_keys(), twice.sorted_keys());
        prop_assert_eq!(once.height(), twice.height());
    }
}

// =============================================================================
// Ordered Query Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_successor_is_smallest_greater_key(
        operations in arbitrary_operations(),
        probe in -120..120i32
    ) {
        let (map, model) = apply(&operations);
        let expected = model.range(probe + 1..).next().map(|(key, _)| key);

        prop_assert_eq!(map.successor(&probe), expected);
    }
}

proptest! {
    #[test]
    fn prop_predecessor_is_largest_smaller_key(
        operations in arbitrary_operations(),
        probe in -120..120i32
    ) {
        let (map, model) = apply(&operations);
        let expected = model.range(..probe).next_back().map(|(key, _)| key);

        prop_assert_eq!(map.predecessor(&probe), expected);
    }
}

proptest! {
    #[test]
    fn prop_keys_in_range_matches_filter(
        operations in arbitrary_operations(),
        low in -120..120i32,
        high in -120..120i32
    ) {
        let (map, _) = apply(&operations);
        let expected: Vec<i32> = map
            .sorted_keys()
            .into_iter()
            .filter(|key| low <= *key && *key <= high)
            .collect();

        prop_assert_eq!(map.keys_in_range(&low, &high), expected);
    }
}

// =============================================================================
// Shape Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_depth_bounded_by_height(operations in arbitrary_operations()) {
        let (map, _) = apply(&operations);
        let height = map.height();

        for key in map.keys() {
            let depth = map.depth(key);
            prop_assert!(depth.is_some());
            prop_assert!(depth.unwrap_or(0) <= height);
        }
        let deepest = map.keys().filter_map(|key| map.depth(key)).max().unwrap_or(0);
        prop_assert_eq!(deepest, height);
    }
}

proptest! {
    #[test]
    fn prop_leaf_count_bounds(operations in arbitrary_operations()) {
        let (map, _) = apply(&operations);
        let leaves = map.count_leaves();

        if map.is_empty() {
            prop_assert_eq!(leaves, 0);
        } else {
            prop_assert!(leaves >= 1);
            prop_assert!(leaves <= map.len().div_ceil(2));
        }
    }
}

proptest! {
    #[test]
    fn prop_clone_preserves_depths(operations in arbitrary_operations()) {
        let (map, _) = apply(&operations);
        let cloned = map.clone();

        for key in map.keys() {
            prop_assert_eq!(cloned.depth(key), map.depth(key));
        }
        prop_assert_eq!(cloned, map);
    }
}

// =============================================================================
// Shape Agreement with a Recursive Copy-Then-Delete Tree
// =============================================================================

struct ModelNode {
    key: i32,
    left: Option<Box<ModelNode>>,
    right: Option<Box<ModelNode>>,
}

fn model_insert(link: Option<Box<ModelNode>>, key: i32) -> Option<Box<ModelNode>> {
    let Some(mut node) = link else {
        return Some(Box::new(ModelNode {
            key,
            left: None,
            right: None,
        }));
    };
    if key < node.key {
        node.left = model_insert(node.left.take(), key);
    } else if key > node.key {
        node.right = model_insert(node.right.take(), key);
    }
    Some(node)
}

/// Copies the successor's key into the node, then deletes the successor
/// from the right subtree.
fn model_remove(link: Option<Box<ModelNode>>, key: i32) -> Option<Box<ModelNode>> {
    let mut node = link?;
    if key < node.key {
        node.left = model_remove(node.left.take(), key);
        return Some(node);
    }
    if key > node.key {
        node.right = model_remove(node.right.take(), key);
        return Some(node);
    }
    match (node.left.take(), node.right.take()) {
        (None, None) => None,
        (Some(child), None) | (None, Some(child)) => Some(child),
        (Some(left), Some(right)) => {
            let mut successor = &right;
            while let Some(next) = &successor.left {
                successor = next;
            }
            let successor_key = successor.key;
            node.key = successor_key;
            node.left = Some(left);
            node.right = model_remove(Some(right), successor_key);
            Some(node)
        }
    }
}

fn model_depths(link: Option<&ModelNode>, level: usize, depths: &mut Vec<(i32, usize)>) {
    if let Some(node) = link {
        model_depths(node.left.as_deref(), level + 1, depths);
        depths.push((node.key, level));
        model_depths(node.right.as_deref(), level + 1, depths);
    }
}

proptest! {
    #[test]
    fn prop_shape_matches_copy_then_delete_tree(operations in arbitrary_operations()) {
        let mut map: OrderedMap<i32, i32> = OrderedMap::new();
        let mut model: Option<Box<ModelNode>> = None;

        for operation in &operations {
            match *operation {
                Operation::Insert(key, value) => {
                    map.insert(key, value);
                    model = model_insert(model, key);
                }
                Operation::Remove(key) => {
                    map.remove(&key);
                    model = model_remove(model, key);
                }
            }

            // In-order keys plus per-key depths pin down a binary search tree.
            let mut expected = Vec::new();
            model_depths(model.as_deref(), 1, &mut expected);
            let actual: Vec<(i32, usize)> = map
                .keys()
                .map(|key| (*key, map.depth(key).unwrap_or(0)))
                .collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
