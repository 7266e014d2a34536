// src/specs/activity.rs
//! Daily crime and incident log, one page per month.
//!
//! Columns: UMPD CASE NUMBER, OCCURRED DATE TIME, REPORT DATE TIME, TYPE,
//! DISPOSITION, then the location from the second sub-row.

use super::table::{self, PageTable};
use crate::config::DatasetKind;

pub fn extract(doc: &str) -> PageTable {
    table::extract(doc, DatasetKind::Activity.trailing_label())
}
