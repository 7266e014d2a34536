// src/scrape.rs
use std::{thread, time::Duration};

use chrono::{Datelike, NaiveDate};
use tracing::{info, warn};

use crate::{
    config::{DatasetKind, Period, options::Granularity},
    core::PageSource,
    progress::Progress,
    schema::Record,
    specs,
    store::DataSet,
};

/// Everything gathered for one dataset in one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Collected {
    pub batch: DataSet,
    pub fetched: Vec<Period>,
    pub failed: Vec<(Period, String)>,
}

/// Pages to fetch: every period from January of `today.year() - lookback_years`
/// through the current one. Months after `today` are not requested.
pub fn periods(kind: DatasetKind, today: NaiveDate, lookback_years: i32) -> Vec<Period> {
    let first_year = today.year() - lookback_years.max(0);
    match kind.granularity() {
        Granularity::Year => (first_year..=today.year()).map(Period::Year).collect(),
        Granularity::Month => (first_year..=today.year())
            .flat_map(|year| (1..=12u32).map(move |month| Period::Month { year, month }))
            .filter(|p| match p {
                Period::Month { year, month } => (*year, *month) <= (today.year(), today.month()),
                Period::Year(_) => true,
            })
            .collect(),
    }
}

/// Fetch and read every period in order, one request at a time.
///
/// A period that fails to fetch is logged and skipped; the rest still run.
pub fn collect(
    kind: DatasetKind,
    source: &dyn PageSource,
    periods: &[Period],
    pause: Duration,
    mut progress: Option<&mut dyn Progress>,
) -> Collected {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(periods.len());
        p.log(&format!("Fetching {kind}…"));
    }

    let mut out = Collected::default();
    let mut batch = BatchBuilder::new(kind);

    for (i, period) in periods.iter().enumerate() {
        if i > 0 && !pause.is_zero() {
            thread::sleep(pause); // be polite
        }

        match source.fetch(kind, period) {
            Ok(doc) => {
                let page = specs::extract(kind, &doc);
                let n = page.rows.len();
                if page.headers.is_none() && n == 0 {
                    info!(dataset = %kind, %period, "no table on page");
                }
                batch.absorb(period, page.headers, page.rows);
                out.fetched.push(*period);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(period, n);
                }
            }
            Err(e) => {
                warn!(dataset = %kind, %period, error = %e, "period fetch failed; continuing");
                let msg = e.to_string();
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(period, &msg);
                }
                out.failed.push((*period, msg));
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    out.batch = batch.finish();
    info!(
        dataset = %kind,
        fetched = out.fetched.len(),
        failed = out.failed.len(),
        rows = out.batch.len(),
        "collected"
    );
    out
}

/// Accumulates pages into one batch with a single header.
struct BatchBuilder {
    kind: DatasetKind,
    headers: Option<Record>,
    rows: Vec<Record>,
}

impl BatchBuilder {
    fn new(kind: DatasetKind) -> Self {
        Self { kind, headers: None, rows: Vec::new() }
    }

    fn absorb(&mut self, period: &Period, headers: Option<Record>, rows: Vec<Record>) {
        if let Some(h) = headers {
            if self.headers.is_none() {
                self.headers = Some(h);
            } else if self.headers.as_ref() != Some(&h) {
                warn!(dataset = %self.kind, %period, header = ?h, "page header differs from first page");
            }
        }
        self.rows.extend(rows);
    }

    fn finish(self) -> DataSet {
        DataSet::new(self.headers, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use std::collections::HashMap;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monthly_periods_stop_at_current_month() {
        let p = periods(DatasetKind::Activity, day(2026, 3, 9), 1);
        assert_eq!(p.len(), 12 + 3);
        assert_eq!(p.first(), Some(&Period::Month { year: 2025, month: 1 }));
        assert_eq!(p.last(), Some(&Period::Month { year: 2026, month: 3 }));
    }

    #[test]
    fn yearly_periods_cover_lookback() {
        let p = periods(DatasetKind::Arrests, day(2026, 10, 19), 2);
        assert_eq!(p, vec![Period::Year(2024), Period::Year(2025), Period::Year(2026)]);
    }

    struct Pages(HashMap<Period, &'static str>);

    impl PageSource for Pages {
        fn fetch(&self, _kind: DatasetKind, period: &Period) -> Result<String, FetchError> {
            self.0.get(period).map(|s| s.to_string()).ok_or_else(|| FetchError::Status {
                url: period.to_string(),
                status: 404,
            })
        }
    }

    const PAGE_A: &str = "<table><tr><th>K</th></tr><tr><td>a</td></tr><tr><td>la</td></tr></table>";
    const PAGE_B: &str = "<table><tr><th>K</th></tr><tr><td>b</td></tr><tr><td>lb</td></tr></table>";

    #[test]
    fn failed_period_does_not_stop_the_others() {
        let (y24, y25, y26) = (Period::Year(2024), Period::Year(2025), Period::Year(2026));
        let src = Pages(HashMap::from([(y24, PAGE_A), (y26, PAGE_B)]));

        let got = collect(DatasetKind::Arrests, &src, &[y24, y25, y26], Duration::ZERO, None);

        assert_eq!(got.fetched, vec![y24, y26]);
        assert_eq!(got.failed.len(), 1);
        assert_eq!(got.failed[0].0, y25);
        assert_eq!(got.batch.headers, Some(record!["K", "DESCRIPTION"]));
        assert_eq!(got.batch.rows, vec![record!["a", "la"], record!["b", "lb"]]);
    }
}
