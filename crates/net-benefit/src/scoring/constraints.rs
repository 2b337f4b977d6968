use super::EPSILON;
use serde::{Deserialize, Serialize};

/// Non-clinical feasibility factor scored beside the outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintAxis {
    Financial,
    Access,
    Care,
}

impl ConstraintAxis {
    pub const fn ordered() -> [Self; 3] {
        [Self::Financial, Self::Access, Self::Care]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Financial => "Cost",
            Self::Access => "Access",
            Self::Care => "Care burden",
        }
    }
}

/// Serializes as its name; deserializes from a name or one of the exact levels 0, 0.5 and 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "SeverityInput")]
pub enum Severity {
    #[default]
    None,
    Moderate,
    Severe,
}

impl Severity {
    pub const fn value(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Moderate => 0.5,
            Self::Severe => 1.0,
        }
    }

    /// Exact reverse lookup; severities are ordinal, so 0.3 is not "close to" anything.
    pub fn from_value(value: f64) -> Option<Self> {
        [Self::None, Self::Moderate, Self::Severe]
            .into_iter()
            .find(|severity| (severity.value() - value).abs() < EPSILON)
    }

    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "none" | "no" => return Some(Self::None),
            "moderate" | "some" => return Some(Self::Moderate),
            "severe" | "major" => return Some(Self::Severe),
            _ => {}
        }
        trimmed.parse::<f64>().ok().and_then(Self::from_value)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SeverityInput {
    Level(f64),
    Name(String),
}

impl TryFrom<SeverityInput> for Severity {
    type Error = String;

    fn try_from(input: SeverityInput) -> Result<Self, Self::Error> {
        match input {
            SeverityInput::Level(value) => Self::from_value(value)
                .ok_or_else(|| format!("severity {value} is not one of 0, 0.5 or 1")),
            SeverityInput::Name(name) => Self::parse(&name).ok_or_else(|| {
                format!("unknown severity '{name}' (expected none, moderate or severe)")
            }),
        }
    }
}

/// Severity per axis for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintInputs {
    #[serde(default)]
    pub financial: Severity,
    #[serde(default)]
    pub access: Severity,
    #[serde(default)]
    pub care: Severity,
}

impl ConstraintInputs {
    pub const fn new(financial: Severity, access: Severity, care: Severity) -> Self {
        Self {
            financial,
            access,
            care,
        }
    }

    pub const fn severity(&self, axis: ConstraintAxis) -> Severity {
        match axis {
            ConstraintAxis::Financial => self.financial,
            ConstraintAxis::Access => self.access,
            ConstraintAxis::Care => self.care,
        }
    }

    pub fn total(&self) -> f64 {
        ConstraintAxis::ordered()
            .into_iter()
            .map(|axis| self.severity(axis).value())
            .sum()
    }
}

/// Overall feasibility band over the summed severities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintLevel {
    None,
    Minor,
    Multiple,
    Severe,
}

impl ConstraintLevel {
    pub fn from_total(total: f64) -> Self {
        if total.abs() < EPSILON {
            Self::None
        } else if total <= 1.0 + EPSILON {
            Self::Minor
        } else if total <= 2.0 + EPSILON {
            Self::Multiple
        } else {
            Self::Severe
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "No constraints",
            Self::Minor => "Minor constraints",
            Self::Multiple => "Multiple constraints",
            Self::Severe => "Severe constraints",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintEntry {
    pub axis: ConstraintAxis,
    pub axis_label: String,
    pub severity: Severity,
    pub severity_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintAssessment {
    pub total: f64,
    pub level: ConstraintLevel,
    pub breakdown: Vec<ConstraintEntry>,
}

pub fn assess_constraints(inputs: &ConstraintInputs) -> ConstraintAssessment {
    let total = inputs.total();
    let breakdown = ConstraintAxis::ordered()
        .into_iter()
        .map(|axis| {
            let severity = inputs.severity(axis);
            ConstraintEntry {
                axis,
                axis_label: axis.label().to_string(),
                severity,
                severity_label: severity.label().to_string(),
            }
        })
        .collect();

    ConstraintAssessment {
        total,
        level: ConstraintLevel::from_total(total),
        breakdown,
    }
}
