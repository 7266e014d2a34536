// src/reconcile/classify.rs
use std::collections::HashMap;

use indexmap::IndexMap;

use super::{Origin, Sighting};
use super::recency::Recency;
use crate::schema::{Record, Schema};

/// Incoming rows whose key appears exactly once in the whole union and whose
/// occurrence date falls inside the recency window.
pub fn new_cases(union: &[Sighting], schema: &Schema, recency: &Recency) -> Vec<Record> {
    let mut counts: HashMap<&str, usize> = HashMap::with_capacity(union.len());
    for s in union {
        *counts.entry(s.key.as_str()).or_insert(0) += 1;
    }

    union
        .iter()
        .filter(|s| s.origin == Origin::Incoming)
        .filter(|s| counts.get(s.key.as_str()) == Some(&1))
        .filter(|s| recency.accepts(schema.occurred_of(&s.row)))
        .map(|s| s.row.clone())
        .collect()
}

/// Open cases whose two most recent distinct row values differ.
/// The freshest sighting is returned.
///
/// Repeats of the newest value (the same incident on two pages, say) are
/// skipped when looking for the previous value. Rows carrying the terminal
/// status are dropped before pairing, so a case that closed since the last
/// run never shows up here.
pub fn updated_cases(union: &[Sighting], schema: &Schema, terminal: Option<&str>) -> Vec<Record> {
    // Newest value per key, and whether an older different value exists.
    // Union order is freshest-first.
    let mut latest: IndexMap<&str, (&Record, bool)> = IndexMap::new();
    for s in union.iter().filter(|s| is_open(schema, terminal, &s.row)) {
        latest
            .entry(s.key.as_str())
            .and_modify(|(newest, changed)| {
                if !*changed && *newest != &s.row {
                    *changed = true;
                }
            })
            .or_insert((&s.row, false));
    }

    latest
        .into_values()
        .filter_map(|(newest, changed)| changed.then(|| newest.clone()))
        .collect()
}

fn is_open(schema: &Schema, terminal: Option<&str>, row: &[String]) -> bool {
    match (terminal, schema.status_of(row)) {
        (Some(code), Some(status)) => !status.eq_ignore_ascii_case(code),
        _ => true,
    }
}
