// src/config/options.rs
use std::fmt;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use super::consts::*;

/// The two UMPD tables we track. Everything that differs between them
/// (paths, file names, header vocabulary, artifacts) hangs off this enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Activity,
    Arrests,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 2] = [DatasetKind::Activity, DatasetKind::Arrests];

    pub fn name(&self) -> &'static str {
        match self {
            DatasetKind::Activity => "activity",
            DatasetKind::Arrests => "arrests",
        }
    }

    pub fn parse(s: &str) -> Option<DatasetKind> {
        match s.trim().to_ascii_lowercase().as_str() {
            "activity" | "activities" => Some(DatasetKind::Activity),
            "arrests" | "arrest" => Some(DatasetKind::Arrests),
            _ => None,
        }
    }

    pub fn canonical_file(&self) -> &'static str {
        match self {
            DatasetKind::Activity => ACTIVITY_FILE,
            DatasetKind::Arrests => ARRESTS_FILE,
        }
    }

    /// Label the extractor appends for the second sub-row's cell.
    pub fn trailing_label(&self) -> &'static str {
        match self {
            DatasetKind::Activity => "LOCATION",
            DatasetKind::Arrests => "DESCRIPTION",
        }
    }

    /// Activity logs are published per month, arrest ledgers per year.
    pub fn granularity(&self) -> Granularity {
        match self {
            DatasetKind::Activity => Granularity::Month,
            DatasetKind::Arrests => Granularity::Year,
        }
    }

    /// Header spellings seen for the case key column, upper-cased.
    pub fn key_candidates(&self) -> &'static [&'static str] {
        match self {
            DatasetKind::Activity => &["UMPD CASE NUMBER", "CASE NUMBER", "CASE NO"],
            DatasetKind::Arrests => &["UMPD CASE NUMBER", "CASE NUMBER", "CASE NO"],
        }
    }

    pub fn status_candidates(&self) -> &'static [&'static str] {
        match self {
            DatasetKind::Activity => &["DISPOSITION", "STATUS"],
            DatasetKind::Arrests => &[],
        }
    }

    pub fn occurred_candidates(&self) -> &'static [&'static str] {
        match self {
            DatasetKind::Activity => &[
                "OCCURRED DATE TIME",
                "OCCURRED DATE TIMELOCATION",
                "DATE OCCURRED",
                "DATEOCCURRED",
                "OCCURRED",
            ],
            DatasetKind::Arrests => &["ARREST DATE TIME", "ARREST DATE", "DATE"],
        }
    }

    /// Column positions used when the header is missing or unrecognized.
    pub fn fallback_positions(&self) -> FallbackPositions {
        match self {
            DatasetKind::Activity => FallbackPositions { key: 0, status: Some(4), occurred: Some(1) },
            DatasetKind::Arrests => FallbackPositions { key: 2, status: None, occurred: Some(1) },
        }
    }

    /// Labels besides the key candidates that mark a row as a header line.
    /// `schema::is_header_token` checks both lists.
    pub fn header_tokens(&self) -> &'static [&'static str] {
        match self {
            DatasetKind::Activity => &[],
            DatasetKind::Arrests => &["ARREST NUMBER", "ARRESTNUMBER"],
        }
    }

    pub fn terminal_status(&self) -> Option<&'static str> {
        match self {
            DatasetKind::Activity => Some(TERMINAL_STATUS),
            DatasetKind::Arrests => None,
        }
    }

    /// Only the activity log feeds the new/updated artifacts.
    pub fn artifacts(&self) -> Option<ArtifactPaths> {
        match self {
            DatasetKind::Activity => Some(ArtifactPaths {
                new_cases: NEW_CASES_FILE,
                updated_cases: UPDATED_CASES_FILE,
            }),
            DatasetKind::Arrests => None,
        }
    }

    pub fn page_url(&self, period: &Period) -> String {
        match (self, period) {
            (DatasetKind::Activity, Period::Month { year, month }) => {
                format!("https://{HOST}{ACTIVITY_PATH}/{year}/{month:02}")
            }
            (DatasetKind::Activity, Period::Year(year)) => {
                format!("https://{HOST}{ACTIVITY_PATH}/{year}")
            }
            (DatasetKind::Arrests, Period::Year(year)) | (DatasetKind::Arrests, Period::Month { year, .. }) => {
                format!("https://{HOST}{ARRESTS_PATH}/{year}")
            }
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FallbackPositions {
    pub key: usize,
    pub status: Option<usize>,
    pub occurred: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub new_cases: &'static str,
    pub updated_cases: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Granularity {
    Month,
    Year,
}

/// One fetchable page of a source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Period {
    Year(i32),
    Month { year: i32, month: u32 },
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Year(y) => write!(f, "{y}"),
            Period::Month { year, month } => write!(f, "{year}-{month:02}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub data_dir: PathBuf,
    pub datasets: Vec<DatasetKind>,
    /// How many calendar years before the current one to scrape.
    pub lookback_years: i32,
    /// Reference date for period selection and the new-case recency window.
    pub today: NaiveDate,
    pub pause_ms: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            datasets: DatasetKind::ALL.to_vec(),
            lookback_years: DEFAULT_LOOKBACK_YEARS,
            today: Local::now().date_naive(),
            pause_ms: REQUEST_PAUSE_MS,
        }
    }
}

impl RunOptions {
    pub fn canonical_path(&self, kind: DatasetKind) -> PathBuf {
        self.data_dir.join(kind.canonical_file())
    }

    pub fn artifact_path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}
