// src/cli.rs
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::{
    config::{DatasetKind, Period, RunOptions},
    core::{DirSource, HttpSource, PageSource},
    error::{CliError, RunError},
    progress::Progress,
    runner::{self, RunSummary},
};

pub const HELP: &str = include_str!("cli_help.txt");

pub enum Command {
    Run(Invocation),
    Help,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Invocation {
    pub opts: RunOptions,
    /// Read saved pages from here instead of the network.
    pub pages_dir: Option<PathBuf>,
}

/// Parse everything after the program name.
pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut inv = Invocation::default();
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        match a.as_str() {
            "--data-dir" => {
                let v = args.next().ok_or(CliError::MissingValue("--data-dir"))?;
                inv.opts.data_dir = PathBuf::from(v);
            }
            "--dataset" => {
                let v = args.next().ok_or(CliError::MissingValue("--dataset"))?;
                inv.opts.datasets = parse_datasets(&v)?;
            }
            "--years" => {
                let v = args.next().ok_or(CliError::MissingValue("--years"))?;
                inv.opts.lookback_years = match v.parse::<i32>() {
                    Ok(n) if n >= 0 => n,
                    _ => return Err(CliError::InvalidValue { flag: "--years", value: v }),
                };
            }
            "--today" => {
                let v = args.next().ok_or(CliError::MissingValue("--today"))?;
                inv.opts.today = NaiveDate::parse_from_str(&v, "%Y-%m-%d")
                    .map_err(|_| CliError::InvalidValue { flag: "--today", value: v })?;
            }
            "--pause-ms" => {
                let v = args.next().ok_or(CliError::MissingValue("--pause-ms"))?;
                inv.opts.pause_ms =
                    v.parse().map_err(|_| CliError::InvalidValue { flag: "--pause-ms", value: v })?;
            }
            "--pages-dir" => {
                let v = args.next().ok_or(CliError::MissingValue("--pages-dir"))?;
                inv.pages_dir = Some(PathBuf::from(v));
            }
            "-h" | "--help" => return Ok(Command::Help),
            _ => return Err(CliError::UnknownArg(a)),
        }
    }

    Ok(Command::Run(inv))
}

fn parse_datasets(v: &str) -> Result<Vec<DatasetKind>, CliError> {
    if v.trim().eq_ignore_ascii_case("all") {
        return Ok(DatasetKind::ALL.to_vec());
    }
    DatasetKind::parse(v)
        .map(|k| vec![k])
        .ok_or_else(|| CliError::UnknownDataset(v.to_string()))
}

/// Prints one line per period to stdout.
pub struct ConsoleProgress {
    total: usize,
    seen: usize,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self { total: 0, seen: 0 }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.seen = 0;
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self, period: &Period, rows: usize) {
        self.seen += 1;
        println!("  [{}/{}] {period}: {rows} rows", self.seen, self.total);
    }

    fn item_failed(&mut self, period: &Period, error: &str) {
        self.seen += 1;
        println!("  [{}/{}] {period}: FAILED ({error})", self.seen, self.total);
    }
}

/// Run every selected dataset and print a summary per dataset.
/// Returns how many datasets failed.
pub fn run(inv: &Invocation) -> Result<usize, RunError> {
    let source: Box<dyn PageSource> = match &inv.pages_dir {
        Some(dir) => Box::new(DirSource::new(dir)),
        None => Box::new(HttpSource::new().map_err(RunError::Client)?),
    };

    let mut progress = ConsoleProgress::new();
    let results = runner::run_all(&inv.opts, source.as_ref(), Some(&mut progress));

    let mut failed = 0;
    for (kind, result) in &results {
        match result {
            Ok(summary) => print_summary(summary),
            Err(e) => {
                failed += 1;
                eprintln!("{kind}: FAILED: {e}");
            }
        }
    }
    Ok(failed)
}

fn print_summary(s: &RunSummary) {
    println!(
        "{}: {} periods fetched, {} failed; {} incoming rows, {} rejected; {} canonical rows",
        s.kind, s.fetched_periods, s.failed_periods, s.incoming_rows, s.rejected_rows, s.canonical_rows
    );
    if s.kind.artifacts().is_some() {
        println!("  new cases: {}, updated cases: {}", s.new_cases, s.updated_cases);
    }
    for path in &s.files_written {
        println!("  wrote {}", path.display());
    }
}
