// THEORY:
// The `FrequencyTable` is a "dumb" data container: one count per distinct
// `ColorKey`. It carries no order. Order only appears when a `Report` is rendered
// from it, which keeps the hot loop a plain hash-map increment.
//
// Invariant: every stored count is at least 1, and the sum of counts equals the
// number of pixels scanned to build the table.

use std::collections::HashMap;
use std::collections::hash_map;

use crate::core_modules::color_key::ColorKey;

pub type Count = u64;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<ColorKey, Count>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `key`, starting at 1 on first sight.
    pub fn increment(&mut self, key: ColorKey) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    pub fn get(&self, key: &ColorKey) -> Option<Count> {
        self.counts.get(key).copied()
    }

    /// Number of distinct colors.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total_count(&self) -> Count {
        self.counts.values().sum()
    }

    /// Entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (ColorKey, Count)> + '_ {
        self.counts.iter().map(|(key, count)| (*key, *count))
    }
}

impl IntoIterator for FrequencyTable {
    type Item = (ColorKey, Count);
    type IntoIter = hash_map::IntoIter<ColorKey, Count>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

impl FromIterator<ColorKey> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = ColorKey>>(keys: I) -> Self {
        let mut table = FrequencyTable::new();
        for key in keys {
            table.increment(key);
        }
        table
    }
}
