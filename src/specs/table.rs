// src/specs/table.rs
//! Two-sub-row incident tables.
//!
//! Both UMPD sources render one incident as two consecutive `<tr>`s:
//!
//! ```text
//! <tr><th>UMPD CASE NUMBER</th><th>…</th></tr>            header
//! <tr><td>2026-00123</td><td>…</td><td>…</td></tr>     first sub-row: the fields
//! <tr><td colspan=5>Lot 1, Stadium Dr</td></tr>         second sub-row: one free-text cell
//! ```
//!
//! `SubRows` folds that stream into one flat record per incident. The free-text
//! cell becomes a trailing column whose label the page itself does not print,
//! so the caller supplies it (`LOCATION`, `DESCRIPTION`).

use std::mem;

use tracing::debug;

use crate::core::html::{cell_text, next_tag_block_ci, tag_blocks_ci};
use crate::schema::Record;

/// Header plus records extracted from one page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageTable {
    pub headers: Option<Record>,
    pub rows: Vec<Record>,
}

#[derive(Debug, Default)]
enum SubRowState {
    #[default]
    AwaitingFirstSubrow,
    AwaitingSecondSubrow(Record),
}

/// Pairs sub-rows into records.
#[derive(Debug, Default)]
pub struct SubRows {
    state: SubRowState,
    done: Vec<Record>,
}

impl SubRows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the `<td>` texts of the next `<tr>`.
    pub fn push(&mut self, cells: Vec<String>) {
        self.state = match mem::take(&mut self.state) {
            SubRowState::AwaitingFirstSubrow => {
                if cells.is_empty() {
                    // Spacer row between incidents.
                    SubRowState::AwaitingFirstSubrow
                } else {
                    SubRowState::AwaitingSecondSubrow(cells)
                }
            }
            SubRowState::AwaitingSecondSubrow(mut record) => {
                // A cell-less second sub-row still closes the incident; the
                // short record is rejected downstream by the width check.
                if let Some(text) = cells.into_iter().next() {
                    record.push(text);
                }
                self.done.push(record);
                SubRowState::AwaitingFirstSubrow
            }
        };
    }

    /// Completed records. A dangling first sub-row is emitted as-is.
    pub fn finish(mut self) -> Vec<Record> {
        if let SubRowState::AwaitingSecondSubrow(record) = self.state {
            debug!(fields = record.len(), "table ended between sub-rows");
            self.done.push(record);
        }
        self.done
    }
}

/// Extract the first `<table>` of `doc`.
///
/// The header is the first `<tr>` holding `<th>` cells, extended with
/// `trailing_label`. Every later `<tr>` goes through `SubRows`. A page
/// without a table yields an empty `PageTable`.
pub fn extract(doc: &str, trailing_label: &str) -> PageTable {
    let Some((t_s, t_e)) = next_tag_block_ci(doc, "<table", "</table>", 0) else {
        return PageTable::default();
    };
    let table = &doc[t_s..t_e];

    let mut headers: Option<Record> = None;
    let mut pairs = SubRows::new();

    for tr in tag_blocks_ci(table, "<tr", "</tr>") {
        if headers.is_none() {
            let th: Record = tag_blocks_ci(tr, "<th", "</th>").into_iter().map(cell_text).collect();
            if !th.is_empty() {
                let mut h = th;
                h.push(s!(trailing_label));
                headers = Some(h);
                continue;
            }
        }
        let cells: Record = tag_blocks_ci(tr, "<td", "</td>").into_iter().map(cell_text).collect();
        pairs.push(cells);
    }

    PageTable { headers, rows: pairs.finish() }
}
