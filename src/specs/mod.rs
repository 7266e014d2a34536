// src/specs/mod.rs
//! # Page readers
//!
//! Each reader knows where the records live in one source's HTML and turns a
//! page into a `PageTable` (header + flat records).
//!
//! ## What lives here
//! - **Pure HTML reading** over the `core::html` helpers; no network, no disk.
//! - **Sub-row pairing** (`table::SubRows`): one record per incident, never two
//!   half-records.
//! - The synthetic trailing column label each source needs.
//!
//! ## What does **not** live here
//! - Fetching (`core::net`), period selection (`scrape`).
//! - Validation, dedup, classification (`reconcile`). Readers pass on whatever
//!   the page holds, odd rows included; the engine decides what to keep.
//!
//! Readers are testable offline against saved pages in `tests/fixtures/`.
pub mod activity;
pub mod arrests;
pub mod table;

pub use table::PageTable;

use crate::config::DatasetKind;

pub fn extract(kind: DatasetKind, doc: &str) -> PageTable {
    match kind {
        DatasetKind::Activity => activity::extract(doc),
        DatasetKind::Arrests => arrests::extract(doc),
    }
}
