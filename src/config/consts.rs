// src/config/consts.rs

// Net config
pub const HOST: &str = "umpd.umd.edu";
pub const ACTIVITY_PATH: &str = "/statistics-reports/daily-crime-and-incident-logs";
pub const ARRESTS_PATH: &str = "/statistics-reports/arrest-report-ledgers";
pub const USER_AGENT: &str = "umpd_scrape/0.1";
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

// Local data
pub const DEFAULT_DATA_DIR: &str = "data";
pub const STORE_SEP: char = ',';
pub const LOG_FILE: &str = "debug.log";

pub const ACTIVITY_FILE: &str = "all-police-activity.csv";
pub const ARRESTS_FILE: &str = "all-police-arrests.csv";
pub const NEW_CASES_FILE: &str = "new_cases.csv";
pub const UPDATED_CASES_FILE: &str = "updated-activities.csv";
pub const NEW_CASES_SEP: char = ';';
pub const UPDATED_CASES_SEP: char = ',';

// Reconcile
/// Disposition code for a case closed by exception; such cases are final.
pub const TERMINAL_STATUS: &str = "CBE";

// Scrape
pub const DEFAULT_LOOKBACK_YEARS: i32 = 1;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
