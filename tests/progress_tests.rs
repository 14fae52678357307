//! Tests for progress reporting while reading input files.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use fastautils::builder::Analysis;
use fastautils::input::Input;
use fastautils::progress::{Progress, ProgressMeter};
use fastautils::reader::FastaReader;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn collect_reports(analysis: &Analysis, input: &Input) -> Vec<Progress> {
    let reports = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&reports);
    analysis
        .run_with_progress(input, Vec::new(), move |progress| {
            sink.lock().unwrap().push(progress);
        })
        .expect("run should succeed");
    let reports = reports.lock().unwrap().clone();
    reports
}

#[test]
fn run_with_progress_invokes_callback() {
    let path = fixture_path("simple.fa");
    let total = std::fs::metadata(&path).unwrap().len();
    let reports = collect_reports(&Analysis::new().orfs(), &Input::from_path(&path));

    assert!(!reports.is_empty(), "progress callback should be invoked");
    let last = reports.last().unwrap();
    assert_eq!(last.bytes_read, total);
    assert_eq!(last.total_bytes, total);
    assert!((last.fraction - 1.0).abs() < f64::EPSILON);
}

#[test]
fn reports_advance_by_more_than_half_a_point() {
    let mut file = NamedTempFile::new().unwrap();
    for i in 0..500 {
        writeln!(file, ">seq{i}\nACGTACGTAC").unwrap();
    }
    file.flush().unwrap();

    let reports = collect_reports(
        &Analysis::new().patterns(1, 2).unwrap(),
        &Input::from_path(file.path()),
    );

    assert!(reports.len() > 10);
    assert!(reports.len() <= 200);
    assert!(reports[0].percent() > ProgressMeter::STEP);
    for pair in reports.windows(2) {
        assert!(pair[1].percent() - pair[0].percent() > ProgressMeter::STEP);
        assert!(pair[1].records >= pair[0].records);
    }
}

#[test]
fn progress_does_not_change_output() {
    let path = fixture_path("simple.fa");
    let analysis = Analysis::new().patterns(1, 3).unwrap();

    let mut plain = Vec::new();
    analysis.run(&Input::from_path(&path), &mut plain).unwrap();

    let mut tracked = Vec::new();
    analysis
        .run_with_progress(&Input::from_path(&path), &mut tracked, |_| {})
        .unwrap();

    assert_eq!(plain, tracked);
}

#[test]
fn reader_without_total_reports_nothing() {
    let reports = Arc::new(Mutex::new(0u32));
    let sink = Arc::clone(&reports);
    let reader = FastaReader::new(&b">a\nACGT\n>b\nAC\n"[..]).with_progress(0, move |_| {
        *sink.lock().unwrap() += 1;
    });

    assert_eq!(reader.count(), 2);
    assert_eq!(*reports.lock().unwrap(), 0);
}
