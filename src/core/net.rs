// src/core/net.rs
//
// Page fetch for one period of one dataset. No retries: a failed period is
// skipped by the caller and picked up again on the next scheduled run.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::config::consts::{REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::config::{DatasetKind, Period};
use crate::error::FetchError;

/// Anything that can hand back the HTML for a dataset period.
pub trait PageSource {
    fn fetch(&self, kind: DatasetKind, period: &Period) -> Result<String, FetchError>;
}

/// Live pages over HTTPS.
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }
}

impl PageSource for HttpSource {
    fn fetch(&self, kind: DatasetKind, period: &Period) -> Result<String, FetchError> {
        let url = kind.page_url(period);
        debug!(%url, "GET");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|source| FetchError::Transport { url: url.clone(), source })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status: status.as_u16() });
        }
        resp.text().map_err(|source| FetchError::Transport { url, source })
    }
}

/// Saved pages on disk, named `<dataset>-<period>.html`
/// (e.g. `activity-2026-03.html`, `arrests-2025.html`).
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn page_path(&self, kind: DatasetKind, period: &Period) -> PathBuf {
        self.dir.join(format!("{}-{}.html", kind.name(), period))
    }
}

impl PageSource for DirSource {
    fn fetch(&self, kind: DatasetKind, period: &Period) -> Result<String, FetchError> {
        let path = self.page_path(kind, period);
        fs::read_to_string(&path).map_err(|source| FetchError::Local {
            url: path.display().to_string(),
            source,
        })
    }
}
