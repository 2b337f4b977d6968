use super::aggregate::aggregate;
use super::classify::{
    arrow_for, classify_net, importance_stars, magnitude_rating, Arrow, MagnitudeRating,
    NetBanding, NetInterpretation, StarScale,
};
use super::constraints::{assess_constraints, ConstraintEntry, ConstraintInputs, ConstraintLevel};
use super::outcome::{
    validate_batch, ConfidenceInterval, Direction, ImportanceScale, OutcomeRecord,
};
use super::weighting::{normalize_weights, WeightingScheme};
use super::ScoringError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-request scoring configuration. Holds no outcome data between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringSession {
    scheme: WeightingScheme,
    scale: ImportanceScale,
    banding: NetBanding,
}

impl Default for ScoringSession {
    fn default() -> Self {
        Self::new(WeightingScheme::default())
    }
}

impl ScoringSession {
    /// Uses the scheme's default importance scale and directional banding.
    pub fn new(scheme: WeightingScheme) -> Self {
        Self {
            scheme,
            scale: scheme.default_scale(),
            banding: NetBanding::default(),
        }
    }

    pub fn with_scale(mut self, scale: ImportanceScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_banding(mut self, banding: NetBanding) -> Self {
        self.banding = banding;
        self
    }

    pub fn scheme(&self) -> WeightingScheme {
        self.scheme
    }

    pub fn scale(&self) -> ImportanceScale {
        self.scale
    }

    pub fn banding(&self) -> NetBanding {
        self.banding
    }

    pub fn score(
        &self,
        outcomes: &[OutcomeRecord],
        constraints: &ConstraintInputs,
    ) -> Result<ScoreResult, ScoringError> {
        if !self.scheme.accepts(self.scale) {
            return Err(ScoringError::IncompatibleScale {
                scheme: self.scheme,
                scale: self.scale,
            });
        }
        validate_batch(outcomes, self.scale)?;

        let weights = normalize_weights(outcomes, self.scheme)?;
        let net = aggregate(outcomes, &weights);
        let star_scale = StarScale::for_importance(self.scale);

        let per_outcome = outcomes
            .iter()
            .zip(weights.iter().zip(&net.contributions))
            .map(|(outcome, (&weight, &contribution))| OutcomeScore {
                label: outcome.label.clone(),
                effect: outcome.effect,
                direction: outcome.direction,
                importance: outcome.importance,
                weight,
                contribution,
                arrow: arrow_for(outcome.signed_effect()),
                importance_stars: importance_stars(outcome.importance, star_scale),
                magnitude: magnitude_rating(contribution),
                confidence_interval: outcome.confidence_interval,
            })
            .collect();

        let constraints = assess_constraints(constraints);

        debug!(
            scheme = self.scheme.label(),
            scale = self.scale.label(),
            outcomes = outcomes.len(),
            net_score = net.net_score,
            net_per_1000 = net.net_per_1000,
            constraint_total = constraints.total,
            "scored outcome batch"
        );

        Ok(ScoreResult {
            scheme: self.scheme,
            scale: self.scale,
            banding: self.banding,
            net_score: net.net_score,
            net_per_1000: net.net_per_1000,
            net_arrow: arrow_for(net.net_score),
            net_interpretation: classify_net(net.net_score, self.banding),
            per_outcome,
            constraint_total: constraints.total,
            constraint_level: constraints.level,
            constraint_breakdown: constraints.breakdown,
        })
    }
}

/// Scores a batch with the scheme's default scale and directional banding.
pub fn score(
    outcomes: &[OutcomeRecord],
    scheme: WeightingScheme,
    constraints: &ConstraintInputs,
) -> Result<ScoreResult, ScoringError> {
    ScoringSession::new(scheme).score(outcomes, constraints)
}

/// One outcome's share of the net score along with its classifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeScore {
    pub label: String,
    pub effect: f64,
    pub direction: Direction,
    pub importance: f64,
    pub weight: f64,
    pub contribution: f64,
    /// Classified from `effect * direction`, not from the contribution.
    pub arrow: Arrow,
    pub importance_stars: u8,
    pub magnitude: MagnitudeRating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_interval: Option<ConfidenceInterval>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub scheme: WeightingScheme,
    pub scale: ImportanceScale,
    pub banding: NetBanding,
    pub net_score: f64,
    pub net_per_1000: i64,
    pub net_arrow: Arrow,
    pub net_interpretation: NetInterpretation,
    pub per_outcome: Vec<OutcomeScore>,
    pub constraint_total: f64,
    pub constraint_level: ConstraintLevel,
    pub constraint_breakdown: Vec<ConstraintEntry>,
}

impl ScoreResult {
    pub fn outcome(&self, label: &str) -> Option<&OutcomeScore> {
        self.per_outcome.iter().find(|score| score.label == label)
    }

    pub fn summary(&self) -> String {
        format!(
            "net {:+} per 1000 ({}, {} weighting); {}",
            self.net_per_1000,
            self.net_interpretation.label(),
            self.scheme.label(),
            self.constraint_level.label().to_ascii_lowercase()
        )
    }
}
