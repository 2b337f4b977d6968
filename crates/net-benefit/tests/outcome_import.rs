use net_benefit::import::{ImportError, OutcomeTableImporter};
use net_benefit::scoring::{
    score, ConstraintInputs, Direction, ScoringSession, WeightingScheme, EPSILON,
};

#[test]
fn imports_localized_workbook_export() {
    let data = include_bytes!("fixtures/stroke_prevention.csv");

    let outcomes = OutcomeTableImporter::from_reader(&data[..]).expect("fixture imports");

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].label, "脳卒中予防");
    assert_eq!(outcomes[0].direction, Direction::Beneficial);
    let dizziness = &outcomes[1];
    assert_eq!(dizziness.direction, Direction::Harmful);
    assert!((dizziness.effect + 0.02).abs() < EPSILON);
    let interval = dizziness.confidence_interval.expect("interval captured");
    assert!((interval.lower + 0.04).abs() < EPSILON);
    assert_eq!(interval.upper, 0.0);
}

#[test]
fn imported_workbook_scores_like_hand_built_batch() {
    let data = include_bytes!("fixtures/stroke_prevention.csv");
    let outcomes = OutcomeTableImporter::from_reader(&data[..]).expect("fixture imports");

    let result = score(
        &outcomes,
        WeightingScheme::SumNormalized,
        &ConstraintInputs::default(),
    )
    .expect("scores");

    assert_eq!(result.net_per_1000, 91);
    assert_eq!(result.per_outcome[2].contribution, 0.0);
}

#[test]
fn from_path_reports_missing_file() {
    let err = OutcomeTableImporter::from_path("does/not/exist.csv").unwrap_err();
    assert!(matches!(err, ImportError::Io(_)));
}

#[test]
fn out_of_scale_import_is_caught_by_session() {
    let csv = "Outcome,Risk Difference,Importance\nstroke,-0.03,0.7\nfalls,0.01,0.4\n";
    let outcomes = OutcomeTableImporter::from_reader(csv.as_bytes()).expect("imports");

    let session = ScoringSession::new(WeightingScheme::Ordinal);
    assert!(session
        .score(&outcomes, &ConstraintInputs::default())
        .is_err());
}
