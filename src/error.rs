// src/error.rs
//! Typed errors for the library. The CLI wraps these with `color_eyre`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::DatasetKind;

/// CSV text that cannot be turned into rows.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CsvError {
    #[error("unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },
}

/// Canonical file load/save failures. All of these are fatal for the run.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("corrupt dataset {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: CsvError,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path exists but is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },
}

/// A single page fetch that did not produce HTML.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("cannot read page {url}: {source}")]
    Local {
        url: String,
        #[source]
        source: io::Error,
    },
}

/// The scraped table cannot be folded into the stored one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("{kind}: site header has {scraped} columns but the stored file has {stored}; stored file left unchanged")]
    HeaderWidth { kind: DatasetKind, stored: usize, scraped: usize },
}

/// Fatal errors for one dataset's run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Bad command-line input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("missing value for {0}")]
    MissingValue(&'static str),

    #[error("unknown dataset: {0} (expected activity, arrests or all)")]
    UnknownDataset(String),

    #[error("invalid value for {flag}: {value}")]
    InvalidValue { flag: &'static str, value: String },

    #[error("unknown arg: {0}")]
    UnknownArg(String),
}
