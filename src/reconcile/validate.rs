// src/reconcile/validate.rs
use std::fmt;

use tracing::warn;

use crate::config::DatasetKind;
use crate::schema::{Record, Schema, is_header_token};

/// Where a row entered the union.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Incoming,
    Canonical,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Origin::Incoming => "incoming",
            Origin::Canonical => "canonical",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reason {
    Blank,
    /// Key cell holds a column label: a repeated header line.
    EmbeddedHeader,
    MissingKey,
    WidthMismatch { expected: usize, found: usize },
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Blank => f.write_str("blank row"),
            Reason::EmbeddedHeader => f.write_str("header line inside data"),
            Reason::MissingKey => f.write_str("missing case key"),
            Reason::WidthMismatch { expected, found } => {
                write!(f, "expected {expected} fields, found {found}")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejected {
    pub origin: Origin,
    pub row: Record,
    pub reason: Reason,
}

/// Check one row against the schema.
///
/// Width is only enforced on incoming rows; stored rows were accepted by an
/// earlier run and are kept even if the table has since changed shape.
pub fn check(kind: DatasetKind, schema: &Schema, origin: Origin, row: &[String]) -> Result<(), Reason> {
    if row.iter().all(|c| c.trim().is_empty()) {
        return Err(Reason::Blank);
    }
    if row.get(schema.key).is_some_and(|k| is_header_token(kind, k)) {
        return Err(Reason::EmbeddedHeader);
    }
    if origin == Origin::Incoming {
        if let Some(expected) = schema.width {
            if row.len() != expected {
                return Err(Reason::WidthMismatch { expected, found: row.len() });
            }
        }
    }
    if schema.key_of(row).is_none() {
        return Err(Reason::MissingKey);
    }
    Ok(())
}

/// Split rows into accepted ones and rejections, logging each rejection.
pub fn partition(
    kind: DatasetKind,
    schema: &Schema,
    origin: Origin,
    rows: Vec<Record>,
    rejected: &mut Vec<Rejected>,
) -> Vec<Record> {
    let mut ok = Vec::with_capacity(rows.len());
    for row in rows {
        match check(kind, schema, origin, &row) {
            Ok(()) => ok.push(row),
            Err(reason) => {
                warn!(dataset = %kind, %origin, %reason, row = ?row, "skipping malformed row");
                rejected.push(Rejected { origin, row, reason });
            }
        }
    }
    ok
}
