use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest difference still counted as agreement, per dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Metres. Default 0.5.
    pub distance_m: Decimal,
    /// Degrees. Default 0.05 (about three minutes of arc).
    pub bearing_deg: Decimal,
}

impl Default for Tolerances {
    fn default() -> Self {
        Tolerances {
            distance_m: Decimal::new(5, 1),
            bearing_deg: Decimal::new(5, 2),
        }
    }
}

/// How deed records are paired with plan records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Each deed record takes the closest plan record still unused.
    #[default]
    Greedy,
    /// Deed record i is paired with plan record i.
    Positional,
    /// Positional when both sequences are non-empty and equally long,
    /// greedy otherwise.
    Auto,
}

impl Alignment {
    pub fn from_str_loose(s: &str) -> Option<Alignment> {
        match s.trim().to_lowercase().as_str() {
            "greedy" | "best" | "nearest" => Some(Alignment::Greedy),
            "positional" | "index" => Some(Alignment::Positional),
            "auto" => Some(Alignment::Auto),
            _ => None,
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alignment::Greedy => write!(f, "greedy"),
            Alignment::Positional => write!(f, "positional"),
            Alignment::Auto => write!(f, "auto"),
        }
    }
}

/// A named comparison setup stored as JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToleranceProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tolerances: Tolerances,
    #[serde(default)]
    pub alignment: Alignment,
}
