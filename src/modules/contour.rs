use nalgebra::Vector2;
use ndarray::Array2;

use crate::config::config::{ContourConfig, LandmarkIndexConfig};
use crate::pipeline::result::{FaceShape, ShapePrediction};
use crate::utils::geometry::{point_at, turn_magnitude};

/// ContourClassifier classifies the face shape from the jawline contour
/// curvature and the bilateral symmetry of the landmark set.
///
/// It is independent of the geometric classifier and feeds the decision
/// combiner as the secondary opinion.
#[derive(Debug, Clone)]
pub struct ContourClassifier {
    indices: LandmarkIndexConfig,
    config: ContourConfig,
}

impl ContourClassifier {
    pub fn new(indices: LandmarkIndexConfig, config: ContourConfig) -> Self {
        ContourClassifier { indices, config }
    }

    pub fn classify(&self, landmarks: &Array2<f32>) -> ShapePrediction {
        let contour: Vec<Vector2<f32>> = self
            .indices
            .face_outline
            .iter()
            .filter_map(|&idx| point_at(landmarks, idx))
            .collect();

        if contour.len() < self.config.min_outline_points {
            return ShapePrediction {
                shape: self.config.degenerate_shape,
                confidence: self.config.degenerate_confidence,
            };
        }

        let curvature = self.contour_curvature(&contour);
        let symmetry = self.face_symmetry(landmarks);

        let (shape, base) = if curvature > self.config.round_curvature_above {
            (FaceShape::Round, self.config.round_base_confidence)
        } else if curvature < self.config.square_curvature_below {
            (FaceShape::Square, self.config.square_base_confidence)
        } else {
            (FaceShape::Oval, self.config.oval_base_confidence)
        };

        ShapePrediction {
            shape,
            confidence: base + symmetry * self.config.symmetry_weight,
        }
    }

    /// contour_curvature averages the turn magnitude along the outline,
    /// sampling each interior point against its neighbors two steps away.
    fn contour_curvature(&self, contour: &[Vector2<f32>]) -> f32 {
        if contour.len() < 5 {
            return 0.5;
        }

        let mut curvatures = Vec::with_capacity(contour.len() - 4);
        for i in 2..contour.len() - 2 {
            curvatures.push(turn_magnitude(contour[i - 2], contour[i], contour[i + 2]));
        }

        let avg = curvatures.iter().sum::<f32>() / curvatures.len() as f32;
        avg.clamp(0.0, 1.0)
    }

    /// face_symmetry compares how far the symmetric landmark pairs sit from
    /// the vertical midline defined by the nose tip and the chin.
    ///
    /// 1.0 means perfectly mirrored; pairs that collapse onto the midline
    /// are skipped; 0.8 when no pair is computable.
    fn face_symmetry(&self, landmarks: &Array2<f32>) -> f32 {
        let nose_tip = point_at(landmarks, self.indices.nose_tip).unwrap_or_else(Vector2::zeros);
        let chin = point_at(landmarks, self.indices.chin).unwrap_or_else(Vector2::zeros);
        let center_x = (nose_tip.x + chin.x) / 2.0;

        let mut scores = Vec::with_capacity(self.indices.symmetric_pairs.len());
        for &(left_idx, right_idx) in &self.indices.symmetric_pairs {
            let (left, right) = match (point_at(landmarks, left_idx), point_at(landmarks, right_idx))
            {
                (Some(left), Some(right)) => (left, right),
                _ => continue,
            };

            let left_dist = (left.x - center_x).abs();
            let right_dist = (right.x - center_x).abs();
            if left_dist + right_dist > 0.0 {
                scores.push(1.0 - (left_dist - right_dist).abs() / (left_dist + right_dist));
            }
        }

        if scores.is_empty() {
            return self.config.default_symmetry;
        }
        scores.iter().sum::<f32>() / scores.len() as f32
    }
}
