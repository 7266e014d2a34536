// src/reconcile/recency.rs
//
// Year-only recency check for the new-case feed. Dates arrive as the site
// prints them (`M/D/YYYY`, `M/D/YY`, often with a time after a space or a
// dash), so only the year component is trusted.

use chrono::{Datelike, NaiveDate};

/// Cut-offs derived from a reference date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Recency {
    /// Oldest accepted four-digit year.
    pub min_year: i32,
    /// Oldest accepted two-digit year.
    pub min_short_year: i32,
}

impl Recency {
    pub fn as_of(today: NaiveDate) -> Self {
        let year = today.year();
        Self {
            min_year: year - 1,
            min_short_year: (year - 2001).rem_euclid(100),
        }
    }

    /// `false` for anything that does not carry a readable year.
    pub fn accepts(&self, occurred: Option<&str>) -> bool {
        let Some(year) = occurred.and_then(year_component) else {
            return false;
        };
        if !year.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        let Ok(value) = year.parse::<i32>() else {
            return false;
        };
        match year.len() {
            4 => value >= self.min_year,
            2 => value >= self.min_short_year,
            _ => false,
        }
    }
}

/// `"3/14/2026 10:05"` → `"2026"`
fn year_component(date: &str) -> Option<&str> {
    let mut parts = date.trim().split('/');
    let _month = parts.next()?;
    let _day = parts.next()?;
    let rest = parts.next()?;
    rest.split(|c: char| c.is_whitespace() || c == '-' || c == '\u{2013}' || c == '\u{2014}')
        .find(|s| !s.is_empty())
}
