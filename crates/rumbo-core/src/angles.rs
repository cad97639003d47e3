use crate::parsing::normalize::fold_word;
use crate::parsing::numerals;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The hemisphere a quadrant bearing is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryHemisphere {
    North,
    South,
}

impl PrimaryHemisphere {
    /// Parse a direction letter or word ("N", "Norte", "SUR", ...).
    pub fn from_str_loose(s: &str) -> Option<PrimaryHemisphere> {
        match fold_word(s).as_str() {
            "n" | "norte" => Some(PrimaryHemisphere::North),
            "s" | "sur" => Some(PrimaryHemisphere::South),
            _ => None,
        }
    }
}

impl fmt::Display for PrimaryHemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimaryHemisphere::North => write!(f, "N"),
            PrimaryHemisphere::South => write!(f, "S"),
        }
    }
}

/// The hemisphere a quadrant bearing turns toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecondaryHemisphere {
    East,
    West,
}

impl SecondaryHemisphere {
    /// Parse a direction letter or word. Accepts the Spanish survey
    /// synonyms "Oriente" (east) and "Poniente"/"Occidente" (west), and both
    /// "O" and "W" for west.
    pub fn from_str_loose(s: &str) -> Option<SecondaryHemisphere> {
        match fold_word(s).as_str() {
            "e" | "este" | "oriente" => Some(SecondaryHemisphere::East),
            "o" | "w" | "oeste" | "poniente" | "occidente" => Some(SecondaryHemisphere::West),
            _ => None,
        }
    }
}

impl fmt::Display for SecondaryHemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecondaryHemisphere::East => write!(f, "E"),
            SecondaryHemisphere::West => write!(f, "W"),
        }
    }
}

/// A degrees/minutes/seconds angle as written in a deed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SexagesimalAngle {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl SexagesimalAngle {
    pub fn new(degrees: f64, minutes: f64, seconds: f64) -> Self {
        SexagesimalAngle {
            degrees,
            minutes,
            seconds,
        }
    }

    /// Build from text components, each either digits or number words.
    /// Missing minutes or seconds count as zero.
    pub fn from_phrases(degrees: &str, minutes: Option<&str>, seconds: Option<&str>) -> Self {
        SexagesimalAngle {
            degrees: numerals::convert(degrees),
            minutes: minutes.map(numerals::convert).unwrap_or(0.0),
            seconds: seconds.map(numerals::convert).unwrap_or(0.0),
        }
    }

    pub fn decimal_degrees(&self) -> f64 {
        to_decimal_degrees(self.degrees, self.minutes, self.seconds)
    }
}

/// Combine a sexagesimal triple into decimal degrees. No rounding.
pub fn to_decimal_degrees(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}

/// Convert a quadrant bearing to an azimuth in [0, 360).
///
/// | primary | secondary | azimuth         |
/// |---------|-----------|-----------------|
/// | N       | E         | 90 - bearing    |
/// | N       | W         | 270 + bearing   |
/// | S       | E         | 90 + bearing    |
/// | S       | W         | 270 - bearing   |
/// | N       | -         | bearing         |
/// | S       | -         | 180 + bearing   |
/// | -       | -         | bearing         |
///
/// A missing primary hemisphere is read as north.
pub fn to_azimuth(
    primary: Option<PrimaryHemisphere>,
    bearing: f64,
    secondary: Option<SecondaryHemisphere>,
) -> f64 {
    use PrimaryHemisphere::{North, South};
    use SecondaryHemisphere::{East, West};

    let raw = match (primary.unwrap_or(North), secondary) {
        (North, Some(East)) => 90.0 - bearing,
        (North, Some(West)) => 270.0 + bearing,
        (South, Some(East)) => 90.0 + bearing,
        (South, Some(West)) => 270.0 - bearing,
        (North, None) => bearing,
        (South, None) => 180.0 + bearing,
    };
    normalize_azimuth(raw)
}

/// Wrap any finite angle into [0, 360).
pub fn normalize_azimuth(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Shortest circular distance between two azimuths, in [0, 180].
pub fn angular_diff(a: f64, b: f64) -> f64 {
    ((a - b + 180.0).rem_euclid(360.0) - 180.0).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_decimal_degrees() {
        assert!(close(to_decimal_degrees(83.0, 28.0, 44.0), 83.478_888_888_9));
        assert_eq!(to_decimal_degrees(45.0, 0.0, 0.0), 45.0);
        assert_eq!(to_decimal_degrees(0.0, 30.0, 0.0), 0.5);
    }

    #[test]
    fn test_from_phrases_mixes_digits_and_words() {
        let angle =
            SexagesimalAngle::from_phrases("83", Some("veintiocho"), Some("cuarenta y cuatro"));
        assert_eq!(angle, SexagesimalAngle::new(83.0, 28.0, 44.0));
        let angle = SexagesimalAngle::from_phrases("treinta", None, None);
        assert_eq!(angle.decimal_degrees(), 30.0);
    }

    #[test]
    fn test_quadrant_table() {
        use PrimaryHemisphere::*;
        use SecondaryHemisphere::*;
        assert_eq!(to_azimuth(Some(North), 30.0, Some(East)), 60.0);
        assert_eq!(to_azimuth(Some(North), 30.0, Some(West)), 300.0);
        assert_eq!(to_azimuth(Some(South), 30.0, Some(East)), 120.0);
        assert_eq!(to_azimuth(Some(South), 30.0, Some(West)), 240.0);
        assert_eq!(to_azimuth(Some(North), 30.0, None), 30.0);
        assert_eq!(to_azimuth(Some(South), 30.0, None), 210.0);
        assert_eq!(to_azimuth(None, 390.0, None), 30.0);
        assert_eq!(to_azimuth(None, 30.0, Some(East)), 60.0);
    }

    #[test]
    fn test_north_west_wraps_at_full_circle() {
        let az = to_azimuth(
            Some(PrimaryHemisphere::North),
            90.0,
            Some(SecondaryHemisphere::West),
        );
        assert_eq!(az, 0.0);
    }

    #[test]
    fn test_hemisphere_parsing() {
        assert_eq!(PrimaryHemisphere::from_str_loose("Norte"), Some(PrimaryHemisphere::North));
        assert_eq!(PrimaryHemisphere::from_str_loose("S"), Some(PrimaryHemisphere::South));
        assert_eq!(PrimaryHemisphere::from_str_loose("Este"), None);
        assert_eq!(
            SecondaryHemisphere::from_str_loose("PONIENTE"),
            Some(SecondaryHemisphere::West)
        );
        assert_eq!(SecondaryHemisphere::from_str_loose("O"), Some(SecondaryHemisphere::West));
        assert_eq!(SecondaryHemisphere::from_str_loose("oriente"), Some(SecondaryHemisphere::East));
    }

    #[test]
    fn test_angular_diff_is_shortest_path() {
        assert!(close(angular_diff(359.0, 1.0), 2.0));
        assert!(close(angular_diff(10.0, 10.03), 0.03));
        assert_eq!(angular_diff(0.0, 180.0), 180.0);
    }

    fn primary() -> impl Strategy<Value = Option<PrimaryHemisphere>> {
        prop_oneof![
            Just(None),
            Just(Some(PrimaryHemisphere::North)),
            Just(Some(PrimaryHemisphere::South)),
        ]
    }

    fn secondary() -> impl Strategy<Value = Option<SecondaryHemisphere>> {
        prop_oneof![
            Just(None),
            Just(Some(SecondaryHemisphere::East)),
            Just(Some(SecondaryHemisphere::West)),
        ]
    }

    proptest! {
        #[test]
        fn azimuth_always_in_range(p in primary(), bearing in 0.0f64..=90.0, s in secondary()) {
            let az = to_azimuth(p, bearing, s);
            prop_assert!((0.0..360.0).contains(&az), "azimuth {} out of range", az);
        }

        #[test]
        fn decimal_degrees_monotonic(d in 0u32..359, m in 0u32..59, s in 0u32..59) {
            let (d, m, s) = (d as f64, m as f64, s as f64);
            let base = to_decimal_degrees(d, m, s);
            prop_assert!(to_decimal_degrees(d + 1.0, m, s) > base);
            prop_assert!(to_decimal_degrees(d, m + 1.0, s) > base);
            prop_assert!(to_decimal_degrees(d, m, s + 1.0) > base);
            prop_assert_eq!(to_decimal_degrees(d, 0.0, 0.0), d);
        }
    }
}
