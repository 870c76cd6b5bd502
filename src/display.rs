//! Space-separated key listing.

use std::fmt;

use crate::OrderedMap;

/// Formats the keys of an [`OrderedMap`] in ascending order, separated by
/// single spaces.
///
/// Created by [`OrderedMap::display_keys`]. Combine it with `println!` to
/// dump a map's keys on one line.
///
/// # Examples
///
/// ```rust
/// use bstmap::OrderedMap;
///
/// let map: OrderedMap<_, _> = [(7, 'c'), (3, 'a'), (5, 'b')].into_iter().collect();
/// println!("{}", map.display_keys()); // prints "3 5 7"
/// ```
pub struct DisplayKeys<'a, K, V> {
    map: &'a OrderedMap<K, V>,
}

impl<'a, K, V> DisplayKeys<'a, K, V> {
    pub(crate) const fn new(map: &'a OrderedMap<K, V>) -> Self {
        Self { map }
    }
}

impl<K: fmt::Display, V> fmt::Display for DisplayKeys<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys = self.map.keys();
        if let Some(first) = keys.next() {
            write!(formatter, "{first}")?;
            for key in keys {
                write!(formatter, " {key}")?;
            }
        }
        Ok(())
    }
}
