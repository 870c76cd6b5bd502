//! # bstmap
//!
//! An ordered map backed by an unbalanced binary search tree.
//!
//! ## Overview
//!
//! [`OrderedMap`] stores unique, totally-ordered keys with arbitrary values
//! and supports:
//!
//! - **Point operations**: `insert`, `get`, `get_mut`, `contains_key`, `remove`
//! - **Strict variants**: `try_insert`, `replace` (fail with [`OrderedMapError`])
//! - **Ordered queries**: `min_key`, `max_key`, `successor`, `predecessor`
//! - **Traversal**: `iter`, `keys`, `values`, `sorted_keys`, `range`, `keys_in_range`
//! - **Shape queries**: `len`, `height`, `depth`, `count_leaves`
//!
//! The tree never rebalances, so its shape is fully determined by the order
//! of insertions and removals. Traversals use explicit stacks, which keeps
//! list-shaped trees safe from stack overflow.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`OrderedMap`]
//!
//! ## Logging
//!
//! Structural changes are reported as `TRACE` events through [`tracing`].
//! Nothing is emitted unless the application installs a subscriber.
//!
//! ## Example
//!
//! ```rust
//! use bstmap::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.insert(5, "root");
//! map.insert(3, "left");
//! map.insert(7, "right");
//!
//! assert!(map.contains_key(&5));
//! assert_eq!(map.len(), 3);
//! assert_eq!(map.height(), 2);
//! assert_eq!(map.count_leaves(), 2);
//! assert_eq!(map.keys_in_range(&3, &7), vec![3, 5, 7]);
//! assert_eq!(map.successor(&7), None);
//! assert_eq!(map.display_keys().to_string(), "3 5 7");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod display;
mod error;
mod iter;
mod map;
mod node;

pub use display::DisplayKeys;
pub use error::OrderedMapError;
pub use iter::{IntoIter, Iter, Keys, Range, Values};
pub use map::OrderedMap;
