use serde::{Deserialize, Serialize};

use crate::modules::measurement::MeasurementSet;

/// RatioSet maps named dimensionless ratios derived from measurements.
///
/// A ratio is omitted when its denominator is not strictly positive or an
/// operand is unknown; the accessor methods supply the documented defaults
/// for downstream consumers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RatioSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_height_ratio: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forehead_cheekbone_ratio: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jaw_cheekbone_ratio: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_lower_face_ratio: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_jaw_angle: Option<f32>,
}

impl RatioSet {
    pub fn width_height(&self) -> f32 {
        self.width_height_ratio.unwrap_or(0.8)
    }

    pub fn forehead_cheekbone(&self) -> f32 {
        self.forehead_cheekbone_ratio.unwrap_or(1.0)
    }

    pub fn jaw_cheekbone(&self) -> f32 {
        self.jaw_cheekbone_ratio.unwrap_or(1.0)
    }

    pub fn upper_lower_face(&self) -> f32 {
        self.upper_lower_face_ratio.unwrap_or(1.0)
    }

    pub fn jaw_angle(&self) -> f32 {
        self.avg_jaw_angle.unwrap_or(90.0)
    }
}

/// RatioCalculator derives the classifier feature ratios from a measurement
/// set.
#[derive(Debug, Clone, Default)]
pub struct RatioCalculator;

impl RatioCalculator {
    pub fn new() -> Self {
        RatioCalculator
    }

    /// ratios computes every derivable ratio, guarding each division.
    pub fn ratios(&self, measurements: &MeasurementSet) -> RatioSet {
        RatioSet {
            width_height_ratio: divide(measurements.cheekbone_width, measurements.face_height),
            forehead_cheekbone_ratio: divide(
                measurements.forehead_width,
                measurements.cheekbone_width,
            ),
            jaw_cheekbone_ratio: divide(measurements.jaw_width, measurements.cheekbone_width),
            upper_lower_face_ratio: divide(
                measurements.upper_face_height,
                measurements.lower_face_height,
            ),
            avg_jaw_angle: average_jaw_angle(
                measurements.jaw_angle_left,
                measurements.jaw_angle_right,
            ),
        }
    }
}

fn divide(numerator: Option<f32>, denominator: Option<f32>) -> Option<f32> {
    let numerator = numerator?;
    let denominator = denominator?;
    if denominator <= 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

/// average_jaw_angle averages the two jaw angles, substituting 90 degrees
/// for a single missing side. With both sides missing there is nothing to
/// average and the ratio is omitted.
fn average_jaw_angle(left: Option<f32>, right: Option<f32>) -> Option<f32> {
    match (left, right) {
        (Some(l), Some(r)) => Some((l + r) / 2.0),
        (Some(l), None) => Some((l + 90.0) / 2.0),
        (None, Some(r)) => Some((r + 90.0) / 2.0),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_measurements() -> MeasurementSet {
        MeasurementSet {
            forehead_width: Some(90.0),
            temple_width: Some(95.0),
            cheekbone_width: Some(100.0),
            jaw_width: Some(80.0),
            chin_width: Some(80.0),
            face_width: None,
            face_height: Some(125.0),
            upper_face_height: Some(55.0),
            lower_face_height: Some(70.0),
            jaw_angle_left: Some(104.0),
            jaw_angle_right: Some(108.0),
        }
    }

    #[test]
    fn test_ratios_from_full_measurements() {
        let ratios = RatioCalculator::new().ratios(&full_measurements());

        assert!((ratios.width_height_ratio.unwrap() - 0.8).abs() < 1e-6);
        assert!((ratios.forehead_cheekbone_ratio.unwrap() - 0.9).abs() < 1e-6);
        assert!((ratios.jaw_cheekbone_ratio.unwrap() - 0.8).abs() < 1e-6);
        assert!((ratios.upper_lower_face_ratio.unwrap() - 55.0 / 70.0).abs() < 1e-6);
        assert!((ratios.avg_jaw_angle.unwrap() - 106.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_cheekbone_width_omits_width_ratios() {
        let mut measurements = full_measurements();
        measurements.cheekbone_width = Some(0.0);

        let ratios = RatioCalculator::new().ratios(&measurements);
        assert_eq!(ratios.forehead_cheekbone_ratio, None);
        assert_eq!(ratios.jaw_cheekbone_ratio, None);
        // Cheekbone width is the numerator here, so the ratio survives as 0.
        assert_eq!(ratios.width_height_ratio, Some(0.0));
    }

    #[test]
    fn test_missing_face_height_omits_width_height() {
        let mut measurements = full_measurements();
        measurements.face_height = None;

        let ratios = RatioCalculator::new().ratios(&measurements);
        assert_eq!(ratios.width_height_ratio, None);
        assert_eq!(ratios.width_height(), 0.8);
    }

    #[test]
    fn test_single_missing_jaw_angle_pairs_with_default() {
        let mut measurements = full_measurements();
        measurements.jaw_angle_right = None;

        let ratios = RatioCalculator::new().ratios(&measurements);
        assert!((ratios.avg_jaw_angle.unwrap() - 97.0).abs() < 1e-6);

        measurements.jaw_angle_left = None;
        let ratios = RatioCalculator::new().ratios(&measurements);
        assert_eq!(ratios.avg_jaw_angle, None);
        assert_eq!(ratios.jaw_angle(), 90.0);
    }

    #[test]
    fn test_empty_measurements_yield_empty_ratios() {
        let ratios = RatioCalculator::new().ratios(&MeasurementSet::default());
        assert_eq!(ratios, RatioSet::default());
        assert_eq!(ratios.width_height(), 0.8);
        assert_eq!(ratios.forehead_cheekbone(), 1.0);
        assert_eq!(ratios.jaw_cheekbone(), 1.0);
        assert_eq!(ratios.upper_lower_face(), 1.0);
    }
}
