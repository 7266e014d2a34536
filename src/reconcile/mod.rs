// src/reconcile/mod.rs
//! # Incremental reconciliation
//!
//! Folds a freshly scraped batch into the stored canonical table and derives
//! the two per-run feeds.
//!
//! ## Inputs
//! - the incoming batch (header optional, extraction order)
//! - the canonical table as loaded by `store::Store` (may not exist yet)
//!
//! ## Outputs
//! - the merged canonical table: one row per case key, re-scraped rows
//!   replacing stored ones, header kept first
//! - **new cases**: incoming rows whose key appears exactly once in
//!   `incoming ++ stored` and whose occurrence year is recent
//! - **updated cases**: open cases whose two most recent sightings differ
//!
//! Malformed rows are dropped with a warning and reported in
//! `Reconciliation::rejected`; they never reach the canonical table.
//! A scraped header whose width differs from the stored one fails the whole
//! reconciliation: every incoming row would otherwise be rejected.
//!
//! Everything here is pure: no I/O, no clock. `runner` owns both.

pub mod classify;
pub mod merge;
pub mod recency;
pub mod validate;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::DatasetKind;
use crate::error::ReconcileError;
use crate::schema::{Record, Schema};
use crate::store::{DataSet, Loaded};

pub use recency::Recency;
pub use validate::{Origin, Reason, Rejected};

/// One row of the pre-dedup union, with its key already extracted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sighting {
    pub key: String,
    pub origin: Origin,
    pub row: Record,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reconciliation {
    pub canonical: DataSet,
    pub schema: Schema,
    pub new_cases: Vec<Record>,
    pub updated_cases: Vec<Record>,
    pub rejected: Vec<Rejected>,
}

/// Reconcile `incoming` against the stored table as of `today`.
pub fn reconcile(
    kind: DatasetKind,
    incoming: DataSet,
    prior: Option<Loaded>,
    today: NaiveDate,
) -> Result<Reconciliation, ReconcileError> {
    let prior_data = prior.map(|l| l.data).unwrap_or_default();

    let headers = choose_header(kind, prior_data.headers, incoming.headers)?;
    let mut schema = Schema::resolve(kind, headers.as_deref());
    if schema.width.is_none() {
        // Headerless first run: the first keyed row fixes the shape.
        schema.width = incoming.rows.iter().find(|r| schema.key_of(r).is_some()).map(Vec::len);
    }

    let mut rejected = Vec::new();
    let fresh = validate::partition(kind, &schema, Origin::Incoming, incoming.rows, &mut rejected);
    let stored = validate::partition(kind, &schema, Origin::Canonical, prior_data.rows, &mut rejected);

    let union = build_union(&schema, fresh, stored);

    let recency = Recency::as_of(today);
    let new_cases = classify::new_cases(&union, &schema, &recency);
    let updated_cases = classify::updated_cases(&union, &schema, kind.terminal_status());

    let union_len = union.len();
    let rows = merge::merge(union);
    debug!(
        dataset = %kind,
        union = union_len,
        merged = rows.len(),
        new = new_cases.len(),
        updated = updated_cases.len(),
        rejected = rejected.len(),
        "reconciled"
    );

    Ok(Reconciliation {
        canonical: DataSet::new(headers, rows),
        schema,
        new_cases,
        updated_cases,
        rejected,
    })
}

fn build_union(schema: &Schema, fresh: Vec<Record>, stored: Vec<Record>) -> Vec<Sighting> {
    let mut union = Vec::with_capacity(fresh.len() + stored.len());
    let tagged = fresh
        .into_iter()
        .map(|row| (Origin::Incoming, row))
        .chain(stored.into_iter().map(|row| (Origin::Canonical, row)));
    for (origin, row) in tagged {
        // Keyless rows were already rejected by `validate`.
        if let Some(key) = schema.key_of(&row).map(str::to_owned) {
            union.push(Sighting { key, origin, row });
        }
    }
    union
}

/// The stored header keeps its identity; the scraped one is only used when
/// nothing has been stored yet. Renamed columns are tolerated, a different
/// column count is not.
fn choose_header(
    kind: DatasetKind,
    stored: Option<Record>,
    scraped: Option<Record>,
) -> Result<Option<Record>, ReconcileError> {
    match (stored, scraped) {
        (Some(stored), Some(scraped)) => {
            if stored.len() != scraped.len() {
                return Err(ReconcileError::HeaderWidth { kind, stored: stored.len(), scraped: scraped.len() });
            }
            if stored != scraped {
                warn!(dataset = %kind, ?stored, ?scraped, "scraped header differs from stored header; keeping stored");
            }
            Ok(Some(stored))
        }
        (stored, scraped) => Ok(stored.or(scraped)),
    }
}
