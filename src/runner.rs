// src/runner.rs
use std::path::PathBuf;
use std::time::Duration;

use tracing::{error, info};

use crate::{
    config::{DatasetKind, RunOptions, consts::{NEW_CASES_SEP, UPDATED_CASES_SEP}},
    core::PageSource,
    error::RunError,
    file::write_table_atomic,
    progress::Progress,
    reconcile::{self, Reconciliation},
    scrape,
    store::Store,
};

/// Summary of what one dataset run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub kind: DatasetKind,
    pub fetched_periods: usize,
    pub failed_periods: usize,
    pub incoming_rows: usize,
    pub rejected_rows: usize,
    pub canonical_rows: usize,
    pub new_cases: usize,
    pub updated_cases: usize,
    pub files_written: Vec<PathBuf>,
}

/// One full run for one dataset: load, scrape, reconcile, save, artifacts.
///
/// The canonical file is loaded before anything is fetched, so an unreadable
/// file aborts the run without touching disk. Fetch failures are not fatal.
pub fn run_dataset(
    opts: &RunOptions,
    kind: DatasetKind,
    source: &dyn PageSource,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, RunError> {
    let store = Store::new(kind, opts.canonical_path(kind));
    let prior = store.load()?;

    let periods = scrape::periods(kind, opts.today, opts.lookback_years);
    let collected = scrape::collect(kind, source, &periods, Duration::from_millis(opts.pause_ms), progress);
    let incoming_rows = collected.batch.len();

    let outcome = reconcile::reconcile(kind, collected.batch, prior, opts.today)?;
    let files_written = persist(opts, &store, &outcome)?;

    let summary = RunSummary {
        kind,
        fetched_periods: collected.fetched.len(),
        failed_periods: collected.failed.len(),
        incoming_rows,
        rejected_rows: outcome.rejected.len(),
        canonical_rows: outcome.canonical.len(),
        new_cases: outcome.new_cases.len(),
        updated_cases: outcome.updated_cases.len(),
        files_written,
    };
    info!(
        dataset = %kind,
        canonical = summary.canonical_rows,
        new = summary.new_cases,
        updated = summary.updated_cases,
        rejected = summary.rejected_rows,
        "run complete"
    );
    Ok(summary)
}

/// Write the canonical table, then the artifacts (always, even when empty).
pub fn persist(opts: &RunOptions, store: &Store, outcome: &Reconciliation) -> Result<Vec<PathBuf>, RunError> {
    let mut written = Vec::with_capacity(3);

    store.save(&outcome.canonical)?;
    written.push(store.path().to_path_buf());

    if let Some(artifacts) = store.kind().artifacts() {
        let new_path = opts.artifact_path(artifacts.new_cases);
        write_table_atomic(&new_path, None, &outcome.new_cases, NEW_CASES_SEP)?;
        written.push(new_path);

        let updated_path = opts.artifact_path(artifacts.updated_cases);
        write_table_atomic(&updated_path, None, &outcome.updated_cases, UPDATED_CASES_SEP)?;
        written.push(updated_path);
    }

    Ok(written)
}

/// Run every selected dataset. A fatal error in one does not stop the next.
pub fn run_all(
    opts: &RunOptions,
    source: &dyn PageSource,
    mut progress: Option<&mut dyn Progress>,
) -> Vec<(DatasetKind, Result<RunSummary, RunError>)> {
    let mut results = Vec::with_capacity(opts.datasets.len());
    for &kind in &opts.datasets {
        // Reborrow with a shorter object lifetime for each dataset.
        let p = progress.as_deref_mut().map(|p| p as &mut dyn Progress);
        let result = run_dataset(opts, kind, source, p);
        if let Err(e) = &result {
            error!(dataset = %kind, error = %e, "run aborted");
        }
        results.push((kind, result));
    }
    results
}
