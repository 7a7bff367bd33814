use gaze_isc::output::{build_report, read_report, validate_path, write_report, write_results};
use gaze_isc::{FixationRecord, FrameIscResult, IscConfig, IscEngine};
use std::path::Path;

fn scored_run() -> gaze_isc::IscRun {
    let records = vec![
        FixationRecord::at("A", "clip1.mp4", 10, 20.0, 20.0),
        FixationRecord::at("B", "clip1.mp4", 10, 24.0, 18.0),
        FixationRecord::at("C", "clip1.mp4", 10, 50.0, 40.0),
    ];
    let config = IscConfig::new().with_raster(64, 48).with_sigma(4.0);
    IscEngine::new(config).unwrap().run(&records).unwrap()
}

#[test]
fn test_validate_output_path_empty() {
    let result = validate_path(Path::new(""));
    assert!(result.is_err());
}

#[test]
fn test_validate_output_path_directory() {
    // Try to write to a directory path
    let temp_dir = tempfile::tempdir().unwrap();
    let result = validate_path(temp_dir.path());
    assert!(result.is_err());
}

#[test]
fn test_report_round_trip_keeps_rows() {
    let run = scored_run();
    let frames: Vec<FrameIscResult> = run.frames.clone();
    let report = build_report(run, &IscConfig::default());

    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("report.json");
    write_report(&report, &path).unwrap();

    let loaded = read_report(&path).unwrap();
    assert_eq!(loaded.frames, frames);
    assert_eq!(loaded.summary.frames_scored, 1);
}

#[test]
fn test_results_csv_has_expected_columns() {
    let run = scored_run();
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("nested/isc.csv");

    write_results(&run.frames, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("movie,frame,n_subjects,isc_mean,isc_sd"));
    assert!(lines.next().unwrap().starts_with("clip1.mp4,10,3,"));
    assert_eq!(lines.next(), None);
}
