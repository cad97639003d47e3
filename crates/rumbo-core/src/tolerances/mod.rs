pub mod schema;

use crate::compare::CompareOptions;
use crate::error::RumboError;
use rust_decimal::Decimal;
use schema::{ToleranceProfile, Tolerances};
use std::path::Path;

/// Load a tolerance profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<ToleranceProfile, RumboError> {
    let content = std::fs::read_to_string(path).map_err(|e| RumboError::ToleranceLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let profile: ToleranceProfile =
        serde_json::from_str(&content).map_err(|e| RumboError::ToleranceLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_tolerances(&profile.tolerances)?;
    tracing::debug!(path = %path.display(), name = ?profile.name, "loaded tolerance profile");
    Ok(profile)
}

/// Parse a tolerance profile from a JSON string (no file path context).
pub fn parse_profile_str(json: &str) -> Result<ToleranceProfile, RumboError> {
    let profile: ToleranceProfile = serde_json::from_str(json)?;
    validate_tolerances(&profile.tolerances)?;
    Ok(profile)
}

/// Tolerances must be non-negative; an angular tolerance above 180° would
/// accept every bearing.
pub fn validate_tolerances(tolerances: &Tolerances) -> Result<(), RumboError> {
    if tolerances.distance_m.is_sign_negative() {
        return Err(RumboError::ToleranceInvalid(format!(
            "distance tolerance must not be negative, got {}",
            tolerances.distance_m
        )));
    }
    if tolerances.bearing_deg.is_sign_negative() {
        return Err(RumboError::ToleranceInvalid(format!(
            "bearing tolerance must not be negative, got {}",
            tolerances.bearing_deg
        )));
    }
    if tolerances.bearing_deg > Decimal::from(180) {
        return Err(RumboError::ToleranceInvalid(format!(
            "bearing tolerance must be at most 180 degrees, got {}",
            tolerances.bearing_deg
        )));
    }
    Ok(())
}

impl ToleranceProfile {
    pub fn options(&self) -> CompareOptions {
        CompareOptions {
            tolerances: self.tolerances,
            alignment: self.alignment,
        }
    }
}
