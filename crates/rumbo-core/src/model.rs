use crate::angles::normalize_azimuth;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal places kept for azimuths when a record is finalized.
pub const AZIMUTH_DP: u32 = 6;
/// Decimal places kept for distances when a record is finalized.
pub const DISTANCE_DP: u32 = 2;

/// One bearing/distance leg of a boundary description.
///
/// Either measurement may be missing when extraction only partially
/// succeeded. Records are never dropped for that reason; the comparison
/// engine skips the missing dimension instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Direction in decimal degrees, clockwise from north, in [0, 360).
    pub azimuth: Option<f64>,
    /// Length of the leg in metres.
    pub distance_m: Option<f64>,
    /// The source text the record was recognized from.
    #[serde(default)]
    pub raw_span: String,
}

impl MeasurementRecord {
    /// Build a finalized record: azimuth rounded to [`AZIMUTH_DP`] places and
    /// re-normalized, distance rounded to [`DISTANCE_DP`] places.
    pub fn new(azimuth: Option<f64>, distance_m: Option<f64>, raw_span: impl Into<String>) -> Self {
        MeasurementRecord {
            azimuth: azimuth.map(|a| normalize_azimuth(round_dp(a, AZIMUTH_DP))),
            distance_m: distance_m.map(|d| round_dp(d, DISTANCE_DP)),
            raw_span: raw_span.into(),
        }
    }

    /// True when both azimuth and distance are present.
    pub fn is_complete(&self) -> bool {
        self.azimuth.is_some() && self.distance_m.is_some()
    }
}

impl fmt::Display for MeasurementRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.azimuth {
            Some(az) => write!(f, "{az:.6}°")?,
            None => write!(f, "-")?,
        }
        match self.distance_m {
            Some(d) => write!(f, " {d:.2} m"),
            None => write!(f, " - m"),
        }
    }
}

/// Round half away from zero to `dp` decimal places.
///
/// Values that cannot be represented as a `Decimal` (NaN, infinities, huge
/// magnitudes) are returned unchanged.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}
