// benches/reconcile.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use chrono::NaiveDate;
use umpd_scrape::{
    config::DatasetKind,
    reconcile,
    record,
    schema::{Record, Schema},
    specs,
    store::{DataSet, Loaded},
};

fn header() -> Record {
    record!["UMPD CASE NUMBER", "OCCURRED DATE TIME", "REPORT DATE TIME", "TYPE", "DISPOSITION", "LOCATION"]
}

// Synthetic year of activity: `n` cases, every third one re-scraped with a new disposition.
fn synthetic(n: usize) -> (DataSet, Loaded) {
    let row = |i: usize, status: &str| {
        record![
            format!("2026-{i:05}"),
            format!("{}/{}/2026 10:00", i % 12 + 1, i % 28 + 1),
            format!("{}/{}/2026 10:30", i % 12 + 1, i % 28 + 1),
            "Theft",
            status,
            format!("Lot {}", i % 40)
        ]
    };
    let stored: Vec<Record> = (0..n).map(|i| row(i, "Pending")).collect();
    let fresh: Vec<Record> = (0..n)
        .step_by(3)
        .map(|i| row(i, "Arrest"))
        .chain((n..n + n / 10).map(|i| row(i, "Pending")))
        .collect();

    let data = DataSet::new(Some(header()), stored);
    let schema = Schema::resolve(DatasetKind::Activity, data.headers());
    (DataSet::new(Some(header()), fresh), Loaded { data, schema })
}

fn bench_reconcile(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let (incoming, prior) = synthetic(20_000);

    c.bench_function("reconcile_20k", |b| {
        b.iter(|| {
            let out = reconcile::reconcile(
                DatasetKind::Activity,
                black_box(incoming.clone()),
                Some(black_box(prior.clone())),
                today,
            )
            .expect("reconcile");
            black_box(out.canonical.rows.len())
        })
    });
}

fn bench_extract(c: &mut Criterion) {
    let doc = std::fs::read_to_string("tests/fixtures/activity-2026-10.html")
        .expect("read tests/fixtures/activity-2026-10.html");

    c.bench_function("extract_activity_page", |b| {
        b.iter(|| {
            let page = specs::extract(DatasetKind::Activity, black_box(&doc));
            black_box(page.rows.len())
        })
    });
}

criterion_group!(benches, bench_reconcile, bench_extract);
criterion_main!(benches);
