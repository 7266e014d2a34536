// src/progress.rs
use crate::config::Period;

/// Lightweight progress reporting for a scrape run.
/// The CLI implements this to print per-period status.
pub trait Progress {
    /// Called at the start with the number of periods to fetch.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one period has been fetched and read.
    fn item_done(&mut self, _period: &Period, _rows: usize) {}

    /// Called when a period could not be fetched.
    fn item_failed(&mut self, _period: &Period, _error: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
