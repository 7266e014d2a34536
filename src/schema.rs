// src/schema.rs
//
// Resolves the handful of columns reconciliation cares about against a
// header row, once, so nothing downstream indexes by magic number.
//
// The site has renamed its headers over time ("UMPD CASE NUMBER",
// "Case Number", "OCCURRED DATE TIMELOCATION", ...). Every spelling we know
// of lives on `DatasetKind`; this module only matches them.

use tracing::warn;

use crate::config::DatasetKind;

pub type Record = Vec<String>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schema {
    pub key: usize,
    pub status: Option<usize>,
    pub occurred: Option<usize>,
    /// Expected field count. `None` until a header or first row fixes it.
    pub width: Option<usize>,
}

impl Schema {
    /// Resolve from a header, falling back to the dataset's fixed positions
    /// for any column the header does not name.
    pub fn resolve(kind: DatasetKind, header: Option<&[String]>) -> Schema {
        let fallback = kind.fallback_positions();
        let Some(header) = header else {
            return Schema {
                key: fallback.key,
                status: fallback.status,
                occurred: fallback.occurred,
                width: None,
            };
        };

        let key = find_column(header, kind.key_candidates()).unwrap_or_else(|| {
            warn!(dataset = %kind, "no case key column in header; using position {}", fallback.key);
            fallback.key
        });
        let status = find_column(header, kind.status_candidates()).or(fallback.status);
        let occurred = find_column(header, kind.occurred_candidates()).or(fallback.occurred);

        Schema { key, status, occurred, width: Some(header.len()) }
    }

    pub fn key_of<'a>(&self, row: &'a [String]) -> Option<&'a str> {
        row.get(self.key).map(|s| s.trim()).filter(|s| !s.is_empty())
    }

    pub fn status_of<'a>(&self, row: &'a [String]) -> Option<&'a str> {
        self.status.and_then(|i| row.get(i)).map(|s| s.trim())
    }

    pub fn occurred_of<'a>(&self, row: &'a [String]) -> Option<&'a str> {
        self.occurred.and_then(|i| row.get(i)).map(|s| s.as_str())
    }
}

/// Upper-case and collapse whitespace so header spellings compare equal.
pub fn normalize_label(s: &str) -> String {
    s.split_whitespace()
        .map(|w| w.to_ascii_uppercase())
        .collect::<Vec<_>>()
        .join(" ")
}

fn find_column(header: &[String], candidates: &[&str]) -> Option<usize> {
    let labels: Vec<String> = header.iter().map(|h| normalize_label(h)).collect();
    candidates
        .iter()
        .find_map(|c| labels.iter().position(|l| l == c))
}

/// True if `cell` is one of the dataset's header labels: any spelling of the
/// key column, or one of the extra header tokens.
pub fn is_header_token(kind: DatasetKind, cell: &str) -> bool {
    let label = normalize_label(cell);
    kind.key_candidates()
        .iter()
        .chain(kind.header_tokens())
        .any(|t| *t == label)
}

/// True if any cell of `row` is a header label. Used to sniff whether the
/// first line of a stored file is a header.
pub fn looks_like_header(kind: DatasetKind, row: &[String]) -> bool {
    row.iter().any(|c| is_header_token(kind, c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity_header() -> Record {
        record!["UMPD CASE NUMBER", "OCCURRED DATE TIME", "REPORT DATE TIME", "TYPE", "DISPOSITION", "LOCATION"]
    }

    #[test]
    fn resolves_activity_columns_by_name() {
        let h = activity_header();
        let s = Schema::resolve(DatasetKind::Activity, Some(&h));
        assert_eq!(s, Schema { key: 0, status: Some(4), occurred: Some(1), width: Some(6) });
    }

    #[test]
    fn header_variants_match_case_and_spacing() {
        let h = record!["Disposition", "  umpd   case number ", "Date Occurred"];
        let s = Schema::resolve(DatasetKind::Activity, Some(&h));
        assert_eq!(s.key, 1);
        assert_eq!(s.status, Some(0));
        assert_eq!(s.occurred, Some(2));
    }

    #[test]
    fn arrests_key_is_case_number_not_arrest_number() {
        let h = record!["ARREST NUMBER", "ARREST DATE TIME", "UMPD CASE NUMBER", "AGE", "RACE", "SEX", "DESCRIPTION"];
        let s = Schema::resolve(DatasetKind::Arrests, Some(&h));
        assert_eq!(s.key, 2);
        assert_eq!(s.status, None);
        assert_eq!(s.occurred, Some(1));
    }

    #[test]
    fn missing_header_uses_fallbacks() {
        let s = Schema::resolve(DatasetKind::Activity, None);
        assert_eq!(s, Schema { key: 0, status: Some(4), occurred: Some(1), width: None });
    }

    #[test]
    fn blank_key_reads_as_none() {
        let s = Schema::resolve(DatasetKind::Activity, None);
        assert_eq!(s.key_of(&record!["  ", "x"]), None);
        assert_eq!(s.key_of(&record![" 2026-00001 "]), Some("2026-00001"));
    }

    #[test]
    fn header_sniffing() {
        assert!(looks_like_header(DatasetKind::Activity, &activity_header()));
        assert!(!looks_like_header(DatasetKind::Activity, &record!["2026-00012", "1/2/2026", "OPEN"]));
        assert!(is_header_token(DatasetKind::Arrests, "arrest  number"));
    }

    #[test]
    fn every_key_spelling_is_a_header_token() {
        for kind in DatasetKind::ALL {
            for label in kind.key_candidates() {
                assert!(is_header_token(kind, label), "{kind}: {label}");
            }
        }
        assert!(looks_like_header(DatasetKind::Activity, &record!["Case No", "Date Occurred", "Status"]));
    }
}
