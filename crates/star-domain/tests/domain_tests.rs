use star_domain::{PowerMode, SputteringRun, StepPhase, DomainError};

#[test]
fn test_run_from_json_with_defaults() {
    let text = r#"{
        "name": "Mo calibration 7",
        "is_a_calibration_experiment": true,
        "sources": [{"material": [{"composition": [{"name": "Mo"}]}]}],
        "steps": [
            {"kind": {"phase": "Presputtering", "mode": "DC"}},
            {"kind": {"phase": "Sputtering", "mode": "DC"}, "creates_new_thin_film": true, "duration": 600.0}
        ]
    }"#;
    let run = SputteringRun::from_json(text).unwrap();
    assert_eq!(run.data_file(), "Mo_calibration_7");
    assert!(run.is_a_calibration_experiment);
    assert!(run.samples.is_empty());
    assert_eq!(run.steps[0].kind.phase, StepPhase::Presputtering);
    assert_eq!(run.steps[1].kind.mode, PowerMode::Dc);
    assert!(run.steps[1].creates_film());
    assert!(!run.steps[0].creates_film());
}

#[test]
fn test_run_with_blank_name_is_rejected() {
    let err = SputteringRun::from_json(r#"{"name": "   "}"#).unwrap_err();
    assert!(matches!(err, DomainError::ValidationError(_)));
}

#[test]
fn test_run_with_bad_json_is_serialization_error() {
    let err = SputteringRun::from_json(r#"{"steps": 3}"#).unwrap_err();
    assert!(matches!(err, DomainError::SerializationError(_)));
}

#[test]
fn test_data_file_is_a_flat_archive_stem() {
    assert_eq!(SputteringRun::new("Run 2024/05/01").data_file(), "Run_2024_05_01");
    assert_eq!(SputteringRun::new("..\\up").data_file(), "_._up");
}
