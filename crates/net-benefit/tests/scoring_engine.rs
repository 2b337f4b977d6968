use net_benefit::scoring::{
    score, Arrow, ConstraintInputs, ConstraintLevel, Direction, ImportanceScale, Lean,
    NetBanding, NetInterpretation, OutcomeRecord, ScoringError, ScoringSession, Severity,
    Strength, WeightingScheme, EPSILON,
};

fn close(actual: f64, expected: f64, tolerance: f64) -> bool {
    (actual - expected).abs() < tolerance
}

fn mixed_batch() -> Vec<OutcomeRecord> {
    vec![
        OutcomeRecord::new("stroke", -0.031, Direction::Beneficial, 90.0),
        OutcomeRecord::new("major bleeding", 0.012, Direction::Harmful, 70.0)
            .with_confidence_interval(0.004, 0.020),
        OutcomeRecord::new("dizziness", 0.08, Direction::Harmful, 15.0),
        OutcomeRecord::new("falls", 0.0, Direction::Harmful, 40.0),
        OutcomeRecord::new("quality of life", 0.02, Direction::Beneficial, 55.5),
    ]
}

#[test]
fn sum_normalized_example_projects_ninety_one_per_thousand() {
    let outcomes = vec![
        OutcomeRecord::new("stroke prevention", 0.10, Direction::Beneficial, 100.0),
        OutcomeRecord::new("dizziness", -0.02, Direction::Harmful, 13.0),
    ];

    let result = score(
        &outcomes,
        WeightingScheme::SumNormalized,
        &ConstraintInputs::default(),
    )
    .expect("positive importance scores");

    assert!(close(result.per_outcome[0].weight, 0.8850, 1e-4));
    assert!(close(result.per_outcome[0].contribution, 0.08850, 1e-5));
    assert!(close(result.per_outcome[1].weight, 0.1150, 1e-4));
    assert!(close(result.per_outcome[1].contribution, 0.00230, 1e-5));
    assert!(close(result.net_score, 0.09080, 1e-5));
    assert_eq!(result.net_per_1000, 91);
    assert_eq!(result.net_arrow, Arrow::Increase);
}

#[test]
fn max_normalized_example_sits_on_arrow_threshold() {
    let outcomes = vec![OutcomeRecord::new(
        "stroke prevention",
        0.05,
        Direction::Beneficial,
        50.0,
    )];

    let result = score(
        &outcomes,
        WeightingScheme::MaxNormalized,
        &ConstraintInputs::default(),
    )
    .expect("max weighting scores");

    assert_eq!(result.per_outcome[0].weight, 0.5);
    assert!(close(result.net_score, 0.025, EPSILON));
    assert_eq!(result.net_per_1000, 25);
    assert_eq!(result.per_outcome[0].arrow, Arrow::Neutral);
    assert_eq!(result.net_arrow, Arrow::Neutral);
}

#[test]
fn constraint_total_of_two_is_multiple() {
    let constraints = ConstraintInputs::new(Severity::Moderate, Severity::Moderate, Severity::Severe);

    let result = score(&mixed_batch(), WeightingScheme::SumNormalized, &constraints)
        .expect("scores");

    assert_eq!(result.constraint_total, 2.0);
    assert_eq!(result.constraint_level, ConstraintLevel::Multiple);
    assert_eq!(result.constraint_breakdown.len(), 3);
}

#[test]
fn all_zero_importance_is_degenerate_under_sum_normalization() {
    let outcomes = vec![
        OutcomeRecord::new("stroke", -0.03, Direction::Beneficial, 0.0),
        OutcomeRecord::new("falls", 0.01, Direction::Harmful, 0.0),
    ];

    let err = score(
        &outcomes,
        WeightingScheme::SumNormalized,
        &ConstraintInputs::default(),
    )
    .unwrap_err();

    assert!(matches!(err, ScoringError::DegenerateWeights { .. }));
}

#[test]
fn all_zero_importance_is_neutral_under_fixed_weighting() {
    let outcomes = vec![
        OutcomeRecord::new("stroke", -0.03, Direction::Beneficial, 0.0),
        OutcomeRecord::new("falls", 0.01, Direction::Harmful, 0.0),
    ];

    for scheme in [WeightingScheme::MaxNormalized, WeightingScheme::Ordinal] {
        let result = score(&outcomes, scheme, &ConstraintInputs::default())
            .expect("fixed weighting never degenerates");

        assert!(result
            .per_outcome
            .iter()
            .all(|outcome| outcome.contribution == 0.0));
        assert_eq!(result.net_score, 0.0);
        assert_eq!(result.net_arrow, Arrow::Neutral);
        assert_eq!(
            result.net_interpretation,
            NetInterpretation::Directional {
                lean: Lean::Neutral,
                strength: None,
            }
        );
    }
}

#[test]
fn sum_normalized_weights_sum_to_one() {
    let result = score(
        &mixed_batch(),
        WeightingScheme::SumNormalized,
        &ConstraintInputs::default(),
    )
    .expect("scores");

    let total: f64 = result.per_outcome.iter().map(|outcome| outcome.weight).sum();
    assert!(close(total, 1.0, EPSILON));
}

#[test]
fn per_thousand_is_rounded_net_score() {
    for scheme in [WeightingScheme::SumNormalized, WeightingScheme::MaxNormalized] {
        let result = score(&mixed_batch(), scheme, &ConstraintInputs::default()).expect("scores");
        assert_eq!(result.net_per_1000, (result.net_score * 1000.0).round() as i64);
    }
}

#[test]
fn scoring_is_idempotent() {
    let session = ScoringSession::new(WeightingScheme::SumNormalized);
    let constraints = ConstraintInputs::new(Severity::Severe, Severity::None, Severity::Moderate);

    let first = session.score(&mixed_batch(), &constraints).expect("scores");
    let second = session.score(&mixed_batch(), &constraints).expect("scores");

    assert_eq!(first, second);
}

#[test]
fn permuting_outcomes_preserves_contributions() {
    let session = ScoringSession::new(WeightingScheme::SumNormalized);
    let forward = session
        .score(&mixed_batch(), &ConstraintInputs::default())
        .expect("scores");

    let mut reversed_batch = mixed_batch();
    reversed_batch.reverse();
    let reversed = session
        .score(&reversed_batch, &ConstraintInputs::default())
        .expect("scores");

    assert!(close(forward.net_score, reversed.net_score, EPSILON));
    for outcome in &forward.per_outcome {
        let other = reversed.outcome(&outcome.label).expect("label present");
        assert!(close(outcome.contribution, other.contribution, EPSILON));
        assert_eq!(outcome.arrow, other.arrow);
    }
}

#[test]
fn confidence_intervals_never_move_the_score() {
    let plain = mixed_batch();
    let with_wide_intervals: Vec<_> = mixed_batch()
        .into_iter()
        .map(|outcome| outcome.with_confidence_interval(-5.0, 5.0))
        .collect();

    let a = score(&plain, WeightingScheme::SumNormalized, &ConstraintInputs::default())
        .expect("scores");
    let b = score(
        &with_wide_intervals,
        WeightingScheme::SumNormalized,
        &ConstraintInputs::default(),
    )
    .expect("scores");

    assert_eq!(a.net_score, b.net_score);
    let bleeding = b.outcome("major bleeding").expect("present");
    assert_eq!(
        bleeding.confidence_interval.map(|ci| (ci.lower, ci.upper)),
        Some((-5.0, 5.0))
    );
}

#[test]
fn magnitude_banding_is_selected_per_session() {
    let outcomes = vec![OutcomeRecord::new("stroke", -0.08, Direction::Beneficial, 1.0)];

    let directional = ScoringSession::new(WeightingScheme::SumNormalized)
        .with_scale(ImportanceScale::Unit)
        .score(&outcomes, &ConstraintInputs::default())
        .expect("scores");
    let magnitude = ScoringSession::new(WeightingScheme::SumNormalized)
        .with_scale(ImportanceScale::Unit)
        .with_banding(NetBanding::Magnitude)
        .score(&outcomes, &ConstraintInputs::default())
        .expect("scores");

    assert_eq!(
        directional.net_interpretation,
        NetInterpretation::Directional {
            lean: Lean::BeneficialLeaning,
            strength: Some(Strength::Strong),
        }
    );
    assert_eq!(magnitude.net_interpretation.label(), "large");
    assert_eq!(directional.net_score, magnitude.net_score);
}

#[test]
fn result_round_trips_through_json() {
    let result = score(
        &mixed_batch(),
        WeightingScheme::SumNormalized,
        &ConstraintInputs::default(),
    )
    .expect("scores");

    let json = serde_json::to_string(&result).expect("serializes");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["scheme"], "sum_normalized");
    assert_eq!(value["constraint_level"], "none");
    assert_eq!(value["per_outcome"][1]["confidence_interval"]["lower"], 0.004);
}
