// tests/run_e2e.rs
use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use umpd_scrape::config::{DatasetKind, RunOptions};
use umpd_scrape::core::DirSource;
use umpd_scrape::error::{ReconcileError, RunError, StoreError};
use umpd_scrape::progress::NullProgress;
use umpd_scrape::runner::{run_all, run_dataset};

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("umpd_e2e_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn fixtures() -> DirSource {
    DirSource::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures"))
}

fn opts(data_dir: PathBuf) -> RunOptions {
    RunOptions {
        data_dir,
        datasets: DatasetKind::ALL.to_vec(),
        lookback_years: 0,
        today: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        pause_ms: 0,
    }
}

fn read(opts: &RunOptions, file: &str) -> String {
    fs::read_to_string(opts.data_dir.join(file)).unwrap()
}

#[test]
fn first_run_writes_canonical_files_and_artifacts() {
    let opts = opts(tmp_dir("first"));
    let results = run_all(&opts, &fixtures(), None);

    assert_eq!(results.len(), 2);
    let activity = results[0].1.as_ref().unwrap();
    // Only October has a saved page; the other months fail and are skipped.
    assert_eq!(activity.fetched_periods, 1);
    assert_eq!(activity.failed_periods, 9);
    assert_eq!(activity.canonical_rows, 3);
    assert_eq!(activity.new_cases, 3);
    assert_eq!(activity.updated_cases, 0);
    assert_eq!(activity.files_written.len(), 3);

    let arrests = results[1].1.as_ref().unwrap();
    assert_eq!(arrests.canonical_rows, 2);
    assert_eq!(arrests.files_written.len(), 1);

    let canonical = read(&opts, "all-police-activity.csv");
    let mut lines = canonical.lines();
    assert_eq!(
        lines.next(),
        Some("UMPD CASE NUMBER,OCCURRED DATE TIME,REPORT DATE TIME,TYPE,DISPOSITION,LOCATION")
    );
    assert_eq!(lines.next(), Some("2026-00412,10/02/26 21:40,10/02/26 22:05,Theft,Pending,\"Lot 1, Stadium Dr\""));
    assert_eq!(lines.next(), Some("2026-00413,10/03/26 01:15,10/03/26 01:20,CDS Violation,Arrest,4200 block Knox Rd"));

    let new_cases = read(&opts, "new_cases.csv");
    assert_eq!(new_cases.lines().count(), 3);
    assert!(new_cases.starts_with("2026-00412;10/02/26 21:40;"));
    assert_eq!(read(&opts, "updated-activities.csv"), "");

    let arrests = read(&opts, "all-police-arrests.csv");
    assert!(arrests.starts_with("ARREST NUMBER,ARREST DATE TIME,UMPD CASE NUMBER,AGE,RACE,SEX,DESCRIPTION\n"));
    assert!(arrests.contains("Possession of alcohol under 21 & fake ID"));
    assert!(!opts.data_dir.join(".new_cases.csv.tmp").exists());
}

#[test]
fn second_run_is_a_no_op() {
    let opts = opts(tmp_dir("again"));
    run_all(&opts, &fixtures(), None);
    let before = read(&opts, "all-police-activity.csv");

    let summary = run_dataset(&opts, DatasetKind::Activity, &fixtures(), Some(&mut NullProgress)).unwrap();

    assert_eq!(read(&opts, "all-police-activity.csv"), before);
    assert_eq!(summary.new_cases, 0);
    assert_eq!(summary.updated_cases, 0);
    // Artifacts are rewritten empty rather than left stale.
    assert_eq!(read(&opts, "new_cases.csv"), "");
    assert_eq!(read(&opts, "updated-activities.csv"), "");
}

#[test]
fn changed_open_case_is_reported_and_closed_case_is_not() {
    let opts = opts(tmp_dir("updated"));
    run_dataset(&opts, DatasetKind::Activity, &fixtures(), None).unwrap();

    // Pretend the last run saw different dispositions.
    let path = opts.canonical_path(DatasetKind::Activity);
    let stored = fs::read_to_string(&path).unwrap();
    let stored = stored.replace(",Pending,", ",Open,").replace(",CBE,", ",Open,");
    fs::write(&path, stored).unwrap();

    let summary = run_dataset(&opts, DatasetKind::Activity, &fixtures(), None).unwrap();

    assert_eq!(summary.updated_cases, 1);
    let updated = read(&opts, "updated-activities.csv");
    assert!(updated.starts_with("2026-00412,"));
    assert!(updated.contains(",Pending,"));
    assert!(!updated.contains("2026-00414"));

    // The canonical file takes the fresh dispositions either way.
    let canonical = read(&opts, "all-police-activity.csv");
    assert!(canonical.contains(",Pending,"));
    assert!(canonical.contains(",CBE,"));
    assert!(!canonical.contains(",Open,"));
}

#[test]
fn corrupt_canonical_file_aborts_before_writing() {
    let opts = opts(tmp_dir("corrupt"));
    let path = opts.canonical_path(DatasetKind::Activity);
    let broken = "UMPD CASE NUMBER,OCCURRED DATE TIME\n2026-00001,\"10/01/26 08:00\n";
    fs::write(&path, broken).unwrap();

    let err = run_dataset(&opts, DatasetKind::Activity, &fixtures(), None).unwrap_err();

    assert!(matches!(err, RunError::Store(StoreError::Corrupt { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), broken);
    assert!(!opts.data_dir.join("new_cases.csv").exists());
    assert!(!opts.data_dir.join("updated-activities.csv").exists());
}

#[test]
fn one_failed_dataset_does_not_stop_the_other() {
    let opts = opts(tmp_dir("partial"));
    fs::write(opts.canonical_path(DatasetKind::Activity), "\"unterminated\n").unwrap();

    let results = run_all(&opts, &fixtures(), None);

    assert!(results[0].1.is_err());
    let arrests = results[1].1.as_ref().unwrap();
    assert_eq!(arrests.canonical_rows, 2);
}

#[test]
fn header_width_change_fails_the_dataset_and_keeps_files() {
    let opts = opts(tmp_dir("width"));
    let path = opts.canonical_path(DatasetKind::Activity);
    // Stored before the site added LOCATION as a trailing column.
    let stored = "UMPD CASE NUMBER,OCCURRED DATE TIME,REPORT DATE TIME,TYPE,DISPOSITION\n\
                  2026-00001,10/01/26 08:00,10/01/26 08:30,Theft,Pending\n";
    fs::write(&path, stored).unwrap();

    let err = run_dataset(&opts, DatasetKind::Activity, &fixtures(), None).unwrap_err();

    assert!(matches!(
        err,
        RunError::Reconcile(ReconcileError::HeaderWidth { stored: 5, scraped: 6, .. })
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), stored);
    assert!(!opts.data_dir.join("new_cases.csv").exists());
}
