// src/specs/arrests.rs
//! Arrest report ledger, one page per year.
//!
//! Columns: ARREST NUMBER, ARREST DATE TIME, UMPD CASE NUMBER, AGE, RACE, SEX,
//! then the charge description from the second sub-row.

use super::table::{self, PageTable};
use crate::config::DatasetKind;

pub fn extract(doc: &str) -> PageTable {
    table::extract(doc, DatasetKind::Arrests.trailing_label())
}
