//! Error types for the strict map operations.
//!
//! Plain lookups report a missing key as `None`. Only the operations that
//! insist on a particular key state ([`OrderedMap::try_insert`] and
//! [`OrderedMap::replace`]) report failure through [`OrderedMapError`].
//!
//! [`OrderedMap::try_insert`]: crate::OrderedMap::try_insert
//! [`OrderedMap::replace`]: crate::OrderedMap::replace

use thiserror::Error;

/// Errors returned by the strict insert/update operations of
/// [`OrderedMap`](crate::OrderedMap).
///
/// # Examples
///
/// ```rust
/// use bstmap::{OrderedMap, OrderedMapError};
///
/// let mut map = OrderedMap::new();
/// map.insert(1, "one");
///
/// assert_eq!(map.try_insert(1, "uno"), Err(OrderedMapError::DuplicateKey));
/// assert_eq!(map.replace(&2, "two"), Err(OrderedMapError::KeyNotFound));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum OrderedMapError {
    /// The key was already present, so nothing was inserted.
    #[error("key is already present in the map")]
    DuplicateKey,
    /// The key was not present, so nothing was updated.
    #[error("key is not present in the map")]
    KeyNotFound,
}
