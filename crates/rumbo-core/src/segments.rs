//! Plan sequences from line segments detected in a drawing.
//!
//! Segment detection happens upstream; this module only turns each
//! segment's pixel length and image angle into a metric distance and an
//! azimuth.

use crate::angles::normalize_azimuth;
use crate::error::RumboError;
use crate::model::MeasurementRecord;
use serde::{Deserialize, Serialize};

/// A detected segment, already reduced to length and angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub length_px: f64,
    /// Counter-clockwise from the image +x axis (east when north is up).
    pub angle_deg: f64,
}

/// How pixels map to the ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentScale {
    pub metres_per_pixel: f64,
    /// Rotation of the drawing's north arrow, clockwise from image up.
    #[serde(default)]
    pub north_offset_deg: f64,
}

impl SegmentScale {
    pub fn new(metres_per_pixel: f64, north_offset_deg: f64) -> Result<Self, RumboError> {
        let scale = SegmentScale {
            metres_per_pixel,
            north_offset_deg,
        };
        scale.validate()?;
        Ok(scale)
    }

    pub fn validate(&self) -> Result<(), RumboError> {
        if !self.metres_per_pixel.is_finite() || self.metres_per_pixel <= 0.0 {
            return Err(RumboError::InvalidScale(format!(
                "metres per pixel must be a positive number, got {}",
                self.metres_per_pixel
            )));
        }
        if !self.north_offset_deg.is_finite() {
            return Err(RumboError::InvalidScale(
                "north offset must be a finite angle".into(),
            ));
        }
        Ok(())
    }
}

/// Convert segments to measurement records in input order.
///
/// Segments with a non-finite angle or a non-positive length are skipped.
pub fn segments_to_records(
    segments: &[LineSegment],
    scale: &SegmentScale,
) -> Result<Vec<MeasurementRecord>, RumboError> {
    scale.validate()?;

    let mut records = Vec::with_capacity(segments.len());
    for (i, seg) in segments.iter().enumerate() {
        if !seg.length_px.is_finite() || seg.length_px <= 0.0 || !seg.angle_deg.is_finite() {
            tracing::warn!(
                index = i,
                length_px = seg.length_px,
                angle_deg = seg.angle_deg,
                "skipping degenerate segment"
            );
            continue;
        }
        let azimuth = normalize_azimuth(90.0 - seg.angle_deg + scale.north_offset_deg);
        let distance = seg.length_px * scale.metres_per_pixel;
        records.push(MeasurementRecord::new(
            Some(azimuth),
            Some(distance),
            format!("segment {}: {} px at {}°", i, seg.length_px, seg.angle_deg),
        ));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(length_px: f64, angle_deg: f64) -> LineSegment {
        LineSegment {
            length_px,
            angle_deg,
        }
    }

    #[test]
    fn test_axis_directions() {
        let scale = SegmentScale::new(0.5, 0.0).unwrap();
        let segments = [
            seg(10.0, 0.0),
            seg(10.0, 90.0),
            seg(10.0, 180.0),
            seg(10.0, -90.0),
        ];
        let records = segments_to_records(&segments, &scale).unwrap();
        let azimuths: Vec<_> = records.iter().map(|r| r.azimuth.unwrap()).collect();
        assert_eq!(azimuths, vec![90.0, 0.0, 270.0, 180.0]);
        assert!(records.iter().all(|r| r.distance_m == Some(5.0)));
    }

    #[test]
    fn test_north_offset_rotates() {
        let scale = SegmentScale::new(1.0, 10.0).unwrap();
        let records = segments_to_records(&[seg(3.0, 90.0)], &scale).unwrap();
        assert_eq!(records[0].azimuth, Some(10.0));
    }

    #[test]
    fn test_degenerate_segments_skipped() {
        let scale = SegmentScale::new(1.0, 0.0).unwrap();
        let segments = [seg(0.0, 0.0), seg(f64::NAN, 0.0), seg(4.0, 45.0)];
        let records = segments_to_records(&segments, &scale).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].raw_span.starts_with("segment 2"));
    }

    #[test]
    fn test_invalid_scale_rejected() {
        assert!(SegmentScale::new(0.0, 0.0).is_err());
        assert!(SegmentScale::new(-1.0, 0.0).is_err());
        assert!(SegmentScale::new(1.0, f64::INFINITY).is_err());
    }
}
