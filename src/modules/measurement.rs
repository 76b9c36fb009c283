use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::config::config::LandmarkIndexConfig;
use crate::utils::geometry::{euclidean_distance, point_at, vertex_angle_degrees};

/// MeasurementSet maps named facial metrics to pixel-unit scalars.
///
/// A `None` field means the metric could not be derived from the landmark
/// set and must be treated as unknown, never as zero. Distances are
/// Euclidean; angles are degrees in [0, 180].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MeasurementSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forehead_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temple_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cheekbone_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jaw_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chin_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_face_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_face_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jaw_angle_left: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jaw_angle_right: Option<f32>,
}

/// MeasurementExtractor derives named facial distances and angles from a
/// landmark set.
#[derive(Debug, Clone)]
pub struct MeasurementExtractor {
    indices: LandmarkIndexConfig,
}

impl MeasurementExtractor {
    /// new initializes the extractor with a landmark index map.
    pub fn new(indices: LandmarkIndexConfig) -> Self {
        MeasurementExtractor { indices }
    }

    /// extract converts raw landmark coordinates into named measurements.
    ///
    /// Landmark indices outside the input leave the affected fields unset;
    /// the call itself never fails.
    pub fn extract(&self, landmarks: &Array2<f32>) -> MeasurementSet {
        let idx = &self.indices;

        MeasurementSet {
            forehead_width: self.width_between(landmarks, idx.forehead),
            temple_width: self.width_between(landmarks, idx.temple),
            cheekbone_width: self.width_between(landmarks, idx.cheekbone),
            jaw_width: self.width_between(landmarks, idx.jaw),
            chin_width: self.width_between(landmarks, idx.chin_width),
            face_width: None,
            face_height: self.height_between(landmarks, idx.forehead_top, idx.chin),
            upper_face_height: self.height_between(landmarks, idx.forehead_top, idx.nose_bridge),
            lower_face_height: self.height_between(landmarks, idx.nose_bridge, idx.chin),
            jaw_angle_left: self.jaw_angle(landmarks, idx.jaw.0, idx.cheekbone.0),
            jaw_angle_right: self.jaw_angle(landmarks, idx.jaw.1, idx.cheekbone.1),
        }
    }

    fn width_between(&self, landmarks: &Array2<f32>, pair: (usize, usize)) -> Option<f32> {
        let left = point_at(landmarks, pair.0)?;
        let right = point_at(landmarks, pair.1)?;
        Some(euclidean_distance(left, right))
    }

    fn height_between(&self, landmarks: &Array2<f32>, top: usize, bottom: usize) -> Option<f32> {
        let top_point = point_at(landmarks, top)?;
        let bottom_point = point_at(landmarks, bottom)?;
        Some(euclidean_distance(top_point, bottom_point))
    }

    /// jaw_angle measures the angle at the chin between the vectors to the
    /// jaw corner and to the cheekbone on one side of the face.
    fn jaw_angle(&self, landmarks: &Array2<f32>, jaw_idx: usize, cheek_idx: usize) -> Option<f32> {
        let chin = point_at(landmarks, self.indices.chin)?;
        let jaw = point_at(landmarks, jaw_idx)?;
        let cheek = point_at(landmarks, cheek_idx)?;
        Some(vertex_angle_degrees(chin, jaw, cheek))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn blank_landmarks() -> Array2<f32> {
        Array2::<f32>::zeros((468, 2))
    }

    fn set_point(landmarks: &mut Array2<f32>, idx: usize, x: f32, y: f32) {
        landmarks[[idx, 0]] = x;
        landmarks[[idx, 1]] = y;
    }

    #[test]
    fn test_extract_widths_and_heights() {
        let mut landmarks = blank_landmarks();
        set_point(&mut landmarks, 116, 10.0, 50.0);
        set_point(&mut landmarks, 345, 110.0, 50.0);
        set_point(&mut landmarks, 10, 60.0, 0.0);
        set_point(&mut landmarks, 18, 60.0, 130.0);
        set_point(&mut landmarks, 168, 60.0, 60.0);

        let extractor = MeasurementExtractor::new(LandmarkIndexConfig::new());
        let measurements = extractor.extract(&landmarks);

        assert!((measurements.cheekbone_width.unwrap() - 100.0).abs() < 1e-4);
        assert!((measurements.face_height.unwrap() - 130.0).abs() < 1e-4);
        assert!((measurements.upper_face_height.unwrap() - 60.0).abs() < 1e-4);
        assert!((measurements.lower_face_height.unwrap() - 70.0).abs() < 1e-4);
    }

    #[test]
    fn test_extract_out_of_range_indices() {
        let landmarks = Array2::<f32>::zeros((5, 2));
        let extractor = MeasurementExtractor::new(LandmarkIndexConfig::new());
        let measurements = extractor.extract(&landmarks);

        assert_eq!(measurements, MeasurementSet::default());
    }

    #[test]
    fn test_jaw_angle_defaults_on_coincident_points() {
        // All landmarks at the origin: the chin-to-jaw vector has zero
        // length, so both jaw angles fall back to 90 degrees.
        let landmarks = blank_landmarks();
        let extractor = MeasurementExtractor::new(LandmarkIndexConfig::new());
        let measurements = extractor.extract(&landmarks);

        assert_eq!(measurements.jaw_angle_left, Some(90.0));
        assert_eq!(measurements.jaw_angle_right, Some(90.0));
    }

    #[test]
    fn test_jaw_angle_right_angle_geometry() {
        let mut landmarks = blank_landmarks();
        set_point(&mut landmarks, 18, 0.0, 0.0);
        set_point(&mut landmarks, 172, 0.0, -40.0);
        set_point(&mut landmarks, 116, -40.0, 0.0);

        let extractor = MeasurementExtractor::new(LandmarkIndexConfig::new());
        let measurements = extractor.extract(&landmarks);

        assert!((measurements.jaw_angle_left.unwrap() - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_measurement_set_skips_unknown_fields() {
        let measurements = MeasurementSet {
            face_height: Some(130.0),
            ..Default::default()
        };
        let json = serde_json::to_string(&measurements).unwrap();
        assert_eq!(json, "{\"face_height\":130.0}");
    }
}
