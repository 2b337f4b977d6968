use super::outcome::{ImportanceScale, OutcomeRecord};
use super::{ScoringError, EPSILON};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Fixed denominator for max-normalized weighting. Deliberately not the batch maximum.
pub const MAX_REFERENCE: f64 = 100.0;

/// How raw importance values become weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightingScheme {
    /// `importance / sum(importance)`; weights sum to one.
    #[default]
    SumNormalized,
    /// `importance / 100`.
    MaxNormalized,
    /// Ordinal level value used directly as the weight.
    Ordinal,
}

impl WeightingScheme {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SumNormalized => "sum-normalized",
            Self::MaxNormalized => "max-normalized",
            Self::Ordinal => "ordinal",
        }
    }

    pub const fn default_scale(self) -> ImportanceScale {
        match self {
            Self::SumNormalized | Self::MaxNormalized => ImportanceScale::Percent,
            Self::Ordinal => ImportanceScale::Ordinal,
        }
    }

    pub const fn accepts(self, scale: ImportanceScale) -> bool {
        match self {
            Self::SumNormalized => true,
            Self::MaxNormalized => matches!(scale, ImportanceScale::Percent),
            Self::Ordinal => matches!(scale, ImportanceScale::Ordinal),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "sum" | "sum-normalized" | "s" => Some(Self::SumNormalized),
            "max" | "max-normalized" | "r" => Some(Self::MaxNormalized),
            "ordinal" | "binary" => Some(Self::Ordinal),
            _ => None,
        }
    }
}

impl fmt::Display for WeightingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn normalize_weights(
    outcomes: &[OutcomeRecord],
    scheme: WeightingScheme,
) -> Result<Vec<f64>, ScoringError> {
    match scheme {
        WeightingScheme::SumNormalized => {
            let total: f64 = outcomes.iter().map(|outcome| outcome.importance).sum();
            if total.abs() < EPSILON {
                warn!(
                    outcomes = outcomes.len(),
                    total, "importance values sum to zero; refusing to normalize"
                );
                return Err(ScoringError::DegenerateWeights { total });
            }
            Ok(outcomes
                .iter()
                .map(|outcome| outcome.importance / total)
                .collect())
        }
        WeightingScheme::MaxNormalized => Ok(outcomes
            .iter()
            .map(|outcome| outcome.importance / MAX_REFERENCE)
            .collect()),
        WeightingScheme::Ordinal => Ok(outcomes.iter().map(|outcome| outcome.importance).collect()),
    }
}
