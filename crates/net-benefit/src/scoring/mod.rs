//! Net benefit scoring engine.
//!
//! Outcome records flow through the weighting normalizer, the aggregator and
//! the classifier; the constraint aggregator runs beside them and both land in
//! a single [`ScoreResult`].

mod aggregate;
mod classify;
mod constraints;
mod outcome;
mod session;
mod weighting;

pub use aggregate::{aggregate, per_thousand, NetBenefit, PER_THOUSAND};
pub use classify::{
    arrow_for, classify_net, importance_stars, magnitude_rating, Arrow, Lean, MagnitudeBand,
    MagnitudeRating, NetBanding, NetInterpretation, Polarity, StarScale, Strength,
    ARROW_THRESHOLD, LARGE_NET_THRESHOLD, MAGNITUDE_BREAKPOINTS, MAGNITUDE_MAX_UNITS,
    MODERATE_NET_THRESHOLD, PERCENT_STAR_BREAKPOINTS, STRONG_NET_THRESHOLD,
    UNIT_STAR_BREAKPOINTS,
};
pub use constraints::{
    assess_constraints, ConstraintAssessment, ConstraintAxis, ConstraintEntry, ConstraintInputs,
    ConstraintLevel, Severity,
};
pub use outcome::{
    validate_batch, ConfidenceInterval, Direction, ImportanceLevel, ImportanceScale,
    OutcomeRecord,
};
pub use session::{score, OutcomeScore, ScoreResult, ScoringSession};
pub use weighting::{normalize_weights, WeightingScheme, MAX_REFERENCE};

/// Tolerance for every near-zero comparison in the engine.
pub const EPSILON: f64 = 1e-9;

/// Failures raised before a [`ScoreResult`] can be produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("importance values sum to {total}; raise at least one importance above zero")]
    DegenerateWeights { total: f64 },
    #[error("outcome '{label}' has importance {value} outside the {scale} scale")]
    InvalidImportance {
        label: String,
        value: f64,
        scale: ImportanceScale,
    },
    #[error("outcome '{label}' has a non-finite effect ({value})")]
    InvalidEffect { label: String, value: f64 },
    #[error("outcome label '{0}' appears more than once")]
    DuplicateLabel(String),
    #[error("{scheme} weighting cannot be used with {scale} importances")]
    IncompatibleScale {
        scheme: WeightingScheme,
        scale: ImportanceScale,
    },
}
