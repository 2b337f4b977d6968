use super::{ScoringError, EPSILON};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Fixed polarity of an outcome: whether a rise in its effect helps the patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Beneficial,
    Harmful,
}

impl Direction {
    pub const fn sign(self) -> f64 {
        match self {
            Self::Beneficial => 1.0,
            Self::Harmful => -1.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Beneficial => "Beneficial",
            Self::Harmful => "Harmful",
        }
    }
}

/// Scale the caller used when collecting importance values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportanceScale {
    /// 0.0 to 1.0
    Unit,
    /// 0 to 100
    Percent,
    /// exactly one of the [`ImportanceLevel`] values
    Ordinal,
}

impl ImportanceScale {
    pub const fn upper_bound(self) -> f64 {
        match self {
            Self::Unit | Self::Ordinal => 1.0,
            Self::Percent => 100.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Percent => "percent",
            Self::Ordinal => "ordinal",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "unit" | "fraction" | "0-1" => Some(Self::Unit),
            "percent" | "pct" | "0-100" => Some(Self::Percent),
            "ordinal" | "level" | "levels" => Some(Self::Ordinal),
            _ => None,
        }
    }

    pub fn contains(self, value: f64) -> bool {
        if !value.is_finite() || value < 0.0 {
            return false;
        }
        match self {
            Self::Ordinal => ImportanceLevel::from_value(value).is_some(),
            Self::Unit | Self::Percent => value <= self.upper_bound() + EPSILON,
        }
    }
}

impl fmt::Display for ImportanceScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Three-level importance used by the ordinal forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportanceLevel {
    High,
    Medium,
    Low,
}

impl ImportanceLevel {
    pub const fn value(self) -> f64 {
        match self {
            Self::High => 1.0,
            Self::Medium => 0.5,
            Self::Low => 0.0,
        }
    }

    pub fn from_value(value: f64) -> Option<Self> {
        [Self::High, Self::Medium, Self::Low]
            .into_iter()
            .find(|level| (level.value() - value).abs() < EPSILON)
    }
}

/// 95% interval around the risk difference. Carried for display; never scored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

/// One clinical outcome being weighed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub label: String,
    /// Risk difference, intervention minus control.
    pub effect: f64,
    pub direction: Direction,
    pub importance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_interval: Option<ConfidenceInterval>,
}

impl OutcomeRecord {
    pub fn new(
        label: impl Into<String>,
        effect: f64,
        direction: Direction,
        importance: f64,
    ) -> Self {
        Self {
            label: label.into(),
            effect,
            direction,
            importance,
            confidence_interval: None,
        }
    }

    pub fn with_confidence_interval(mut self, lower: f64, upper: f64) -> Self {
        self.confidence_interval = Some(ConfidenceInterval { lower, upper });
        self
    }

    /// Effect with the outcome's polarity applied.
    pub fn signed_effect(&self) -> f64 {
        self.effect * self.direction.sign()
    }
}

pub fn validate_batch(
    outcomes: &[OutcomeRecord],
    scale: ImportanceScale,
) -> Result<(), ScoringError> {
    let mut seen = HashSet::with_capacity(outcomes.len());

    for outcome in outcomes {
        if !seen.insert(outcome.label.as_str()) {
            return Err(ScoringError::DuplicateLabel(outcome.label.clone()));
        }

        if !outcome.effect.is_finite() {
            return Err(ScoringError::InvalidEffect {
                label: outcome.label.clone(),
                value: outcome.effect,
            });
        }

        if !scale.contains(outcome.importance) {
            return Err(ScoringError::InvalidImportance {
                label: outcome.label.clone(),
                value: outcome.importance,
                scale,
            });
        }
    }

    Ok(())
}
