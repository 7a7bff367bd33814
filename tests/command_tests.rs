use gaze_isc::commands::{execute_compute, validate_args, ComputeArgs};
use gaze_isc::output::{read_report, read_results};
use gaze_isc::IscConfig;
use pretty_assertions::assert_eq;
use std::fs::File;
use std::path::PathBuf;

const FIXATIONS: &str = "\
subject,movie,calc_frame,duration_ms,x_px,y_px
A,clip1.mp4,10,210,640,360
B,clip1.mp4,10,190,640,360
C,clip1.mp4,10,250,100,100
A,clip1.mp4,11,300,640,360
B,clip1.mp4,11,120,,
A,clip2.mp4,1,200,300,200
B,clip2.mp4,1,180,310,190
C,clip2.mp4,,180,310,190
";

#[test]
fn test_validate_args_valid() {
    let args = ComputeArgs {
        input: PathBuf::from("fixations.csv"),
        ..Default::default()
    };

    assert!(validate_args(&args).is_ok());
}

#[test]
fn test_validate_args_empty_input() {
    let args = ComputeArgs {
        input: PathBuf::new(),
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_same_outputs() {
    let args = ComputeArgs {
        output_json: Some(PathBuf::from("frame_level_eye_ISC.csv")),
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_bad_sigma() {
    let args = ComputeArgs {
        config: IscConfig::new().with_sigma(0.0),
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_min_subjects_too_small() {
    let args = ComputeArgs {
        config: IscConfig::new().with_min_subjects(1),
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_execute_compute_writes_outputs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("ALL_fixations.csv");
    std::fs::write(&input, FIXATIONS).unwrap();

    let args = ComputeArgs {
        input,
        output_csv: temp_dir.path().join("out/isc.csv"),
        output_json: Some(temp_dir.path().join("out/isc.json")),
        config: IscConfig::default(),
        print_summary: true,
    };

    validate_args(&args).unwrap();
    execute_compute(args.clone()).unwrap();

    let rows = read_results(File::open(&args.output_csv).unwrap()).unwrap();
    let keys: Vec<(String, u32, usize)> = rows
        .iter()
        .map(|r| (r.movie.clone(), r.frame, r.n_subjects))
        .collect();

    // clip1#11 has only one subject with coordinates; the row without a frame is dropped
    assert_eq!(
        keys,
        vec![
            ("clip1.mp4".to_string(), 10, 3),
            ("clip2.mp4".to_string(), 1, 2),
        ]
    );

    let report = read_report(args.output_json.as_ref().unwrap()).unwrap();
    assert_eq!(report.frames.len(), 2);
    assert_eq!(report.summary.fixations, 7);
    assert_eq!(report.summary.frame_groups, 3);
    assert_eq!(report.summary.frames_skipped, 1);
    assert_eq!(report.settings, IscConfig::default());
}

#[test]
fn test_execute_compute_missing_input() {
    let temp_dir = tempfile::tempdir().unwrap();
    let args = ComputeArgs {
        input: temp_dir.path().join("missing.csv"),
        output_csv: temp_dir.path().join("isc.csv"),
        ..Default::default()
    };

    assert!(execute_compute(args).is_err());
}
