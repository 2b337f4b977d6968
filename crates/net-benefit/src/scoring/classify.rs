use super::outcome::ImportanceScale;
use super::EPSILON;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signed effects beyond this magnitude get an up or down arrow. Strict on both sides.
pub const ARROW_THRESHOLD: f64 = 0.05;

/// Inclusive upper bounds for one and two stars on the 0-100 scale.
pub const PERCENT_STAR_BREAKPOINTS: [f64; 2] = [33.0, 66.0];

/// Inclusive upper bounds for one and two stars on the 0.0-1.0 scale.
pub const UNIT_STAR_BREAKPOINTS: [f64; 2] = [0.33, 0.66];

/// Exclusive upper bounds for one through four filled units.
pub const MAGNITUDE_BREAKPOINTS: [f64; 4] = [0.01, 0.03, 0.06, 0.10];

pub const MAGNITUDE_MAX_UNITS: u8 = 5;

/// Directional banding: a net score beyond this magnitude is "strong".
pub const STRONG_NET_THRESHOLD: f64 = 0.05;

/// Magnitude banding lower bounds (inclusive) for the large and moderate bands.
pub const LARGE_NET_THRESHOLD: f64 = 0.07;
pub const MODERATE_NET_THRESHOLD: f64 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arrow {
    Increase,
    Decrease,
    Neutral,
}

impl Arrow {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
            Self::Neutral => "neutral",
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Increase => "\u{2191}",
            Self::Decrease => "\u{2193}",
            Self::Neutral => "\u{2192}",
        }
    }
}

pub fn arrow_for(value: f64) -> Arrow {
    if value > ARROW_THRESHOLD {
        Arrow::Increase
    } else if value < -ARROW_THRESHOLD {
        Arrow::Decrease
    } else {
        Arrow::Neutral
    }
}

/// Breakpoint set for the three-star importance rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarScale {
    Percent3,
    Unit3,
}

impl StarScale {
    pub const fn for_importance(scale: ImportanceScale) -> Self {
        match scale {
            ImportanceScale::Percent => Self::Percent3,
            ImportanceScale::Unit | ImportanceScale::Ordinal => Self::Unit3,
        }
    }

    const fn breakpoints(self) -> [f64; 2] {
        match self {
            Self::Percent3 => PERCENT_STAR_BREAKPOINTS,
            Self::Unit3 => UNIT_STAR_BREAKPOINTS,
        }
    }
}

pub fn importance_stars(importance: f64, scale: StarScale) -> u8 {
    let [one, two] = scale.breakpoints();
    if importance <= one {
        1
    } else if importance <= two {
        2
    } else {
        3
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Negative,
    /// Rendered as a dash with no filled units.
    Neutral,
}

/// Five-level rating of a contribution's size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MagnitudeRating {
    pub units: u8,
    pub polarity: Polarity,
}

pub fn magnitude_rating(value: f64) -> MagnitudeRating {
    let magnitude = value.abs();
    if magnitude < EPSILON {
        return MagnitudeRating {
            units: 0,
            polarity: Polarity::Neutral,
        };
    }

    let units = MAGNITUDE_BREAKPOINTS
        .iter()
        .position(|bound| magnitude < *bound)
        .map(|index| index as u8 + 1)
        .unwrap_or(MAGNITUDE_MAX_UNITS);
    let polarity = if value > 0.0 {
        Polarity::Positive
    } else {
        Polarity::Negative
    };

    MagnitudeRating { units, polarity }
}

/// Which convention interprets the aggregate net score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetBanding {
    /// Sign picks the lean, [`STRONG_NET_THRESHOLD`] picks the strength.
    #[default]
    Directional,
    /// Four ordinal bands over the absolute net score.
    Magnitude,
}

impl NetBanding {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Directional => "directional",
            Self::Magnitude => "magnitude",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "directional" | "direction" | "lean" => Some(Self::Directional),
            "magnitude" | "four-band" | "bands" => Some(Self::Magnitude),
            _ => None,
        }
    }
}

impl fmt::Display for NetBanding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lean {
    HarmfulLeaning,
    Neutral,
    BeneficialLeaning,
}

impl Lean {
    pub const fn label(self) -> &'static str {
        match self {
            Self::HarmfulLeaning => "harmful-leaning",
            Self::Neutral => "neutral",
            Self::BeneficialLeaning => "beneficial-leaning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Strong,
    Mild,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MagnitudeBand {
    Negligible,
    Small,
    Moderate,
    Large,
}

impl MagnitudeBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Negligible => "negligible",
            Self::Small => "small",
            Self::Moderate => "moderate",
            Self::Large => "large",
        }
    }
}

/// Qualitative reading of the net score under the active [`NetBanding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "convention", rename_all = "snake_case")]
pub enum NetInterpretation {
    Directional {
        lean: Lean,
        #[serde(skip_serializing_if = "Option::is_none")]
        strength: Option<Strength>,
    },
    Magnitude {
        band: MagnitudeBand,
    },
}

impl NetInterpretation {
    pub fn label(&self) -> String {
        match self {
            Self::Directional {
                lean,
                strength: Some(Strength::Strong),
            } => format!("strong {}", lean.label()),
            Self::Directional {
                lean,
                strength: Some(Strength::Mild),
            } => format!("mild {}", lean.label()),
            Self::Directional {
                lean,
                strength: None,
            } => lean.label().to_string(),
            Self::Magnitude { band } => band.label().to_string(),
        }
    }
}

pub fn classify_net(net_score: f64, banding: NetBanding) -> NetInterpretation {
    let magnitude = net_score.abs();
    match banding {
        NetBanding::Directional => {
            if magnitude < EPSILON {
                return NetInterpretation::Directional {
                    lean: Lean::Neutral,
                    strength: None,
                };
            }
            let lean = if net_score > 0.0 {
                Lean::HarmfulLeaning
            } else {
                Lean::BeneficialLeaning
            };
            let strength = if magnitude > STRONG_NET_THRESHOLD {
                Strength::Strong
            } else {
                Strength::Mild
            };
            NetInterpretation::Directional {
                lean,
                strength: Some(strength),
            }
        }
        NetBanding::Magnitude => {
            let band = if magnitude >= LARGE_NET_THRESHOLD {
                MagnitudeBand::Large
            } else if magnitude >= MODERATE_NET_THRESHOLD {
                MagnitudeBand::Moderate
            } else if magnitude >= EPSILON {
                MagnitudeBand::Small
            } else {
                MagnitudeBand::Negligible
            };
            NetInterpretation::Magnitude { band }
        }
    }
}
