// src/reconcile/merge.rs
use indexmap::IndexMap;
use indexmap::map::Entry;

use super::Sighting;
use crate::schema::Record;

/// Collapse the union to one row per case key, first sighting wins.
///
/// The union is incoming rows followed by stored rows, so a re-scraped case
/// always replaces its stored version. Iteration order is first-seen order.
pub fn merge(union: Vec<Sighting>) -> Vec<Record> {
    let mut by_key: IndexMap<String, Record> = IndexMap::with_capacity(union.len());
    for s in union {
        if let Entry::Vacant(slot) = by_key.entry(s.key) {
            slot.insert(s.row);
        }
    }
    by_key.into_values().collect()
}
