use super::outcome::OutcomeRecord;
use serde::{Deserialize, Serialize};

/// Population the net score is projected onto.
pub const PER_THOUSAND: f64 = 1000.0;

/// Weighted, signed sum across a batch of outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetBenefit {
    pub net_score: f64,
    pub net_per_1000: i64,
    /// One entry per outcome, in input order.
    pub contributions: Vec<f64>,
}

/// `outcomes` and `weights` are index-aligned, as produced by `normalize_weights`.
pub fn aggregate(outcomes: &[OutcomeRecord], weights: &[f64]) -> NetBenefit {
    debug_assert_eq!(outcomes.len(), weights.len());

    let contributions: Vec<f64> = outcomes
        .iter()
        .zip(weights)
        .map(|(outcome, weight)| outcome.effect * weight * outcome.direction.sign())
        .collect();
    let net_score: f64 = contributions.iter().sum();

    NetBenefit {
        net_score,
        net_per_1000: per_thousand(net_score),
        contributions,
    }
}

/// Rounds half away from zero.
pub fn per_thousand(net_score: f64) -> i64 {
    (net_score * PER_THOUSAND).round() as i64
}
