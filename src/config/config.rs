use serde::{Deserialize, Serialize};

use crate::pipeline::result::FaceShape;

/// LandmarkIndexConfig maps named facial features to landmark indices.
///
/// The indices follow the MediaPipe Face Mesh convention used by the
/// external landmark detector. Width features are (left, right) pairs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LandmarkIndexConfig {
    pub forehead: (usize, usize),
    pub temple: (usize, usize),
    pub cheekbone: (usize, usize),
    pub jaw: (usize, usize),
    pub chin_width: (usize, usize),
    pub forehead_top: usize,
    pub chin: usize,
    pub nose_bridge: usize,
    pub nose_tip: usize,
    pub face_outline: Vec<usize>,
    pub symmetric_pairs: Vec<(usize, usize)>,
}

impl LandmarkIndexConfig {
    pub fn new() -> Self {
        LandmarkIndexConfig {
            forehead: (21, 251),
            temple: (127, 356),
            cheekbone: (116, 345),
            jaw: (172, 397),
            chin_width: (172, 397),
            forehead_top: 10,
            chin: 18,
            nose_bridge: 168,
            nose_tip: 1,
            face_outline: vec![
                10, 338, 297, 332, 284, 251, 389, 356, 454, 323, 361, 288, 397, 365, 379, 378,
                400, 377, 152, 148, 176, 149, 150, 136, 172, 58, 132, 93, 234, 127, 162, 21, 54,
                103, 67, 109,
            ],
            symmetric_pairs: vec![(127, 356), (116, 345), (172, 397)],
        }
    }
}

impl Default for LandmarkIndexConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// RatioRange is an inclusive [min, max] band for one ratio feature.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RatioRange {
    pub min: f32,
    pub max: f32,
}

impl RatioRange {
    pub fn new(min: f32, max: f32) -> Self {
        RatioRange { min, max }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// GeometricRule is one row of the shape rule table.
///
/// A `None` band places no constraint on that feature. The jaw angle uses
/// a strict lower bound or an inclusive upper bound so that 100 degrees can
/// act as the ROUND/SQUARE discriminator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeometricRule {
    pub shape: FaceShape,
    pub confidence: f32,
    pub width_height: Option<RatioRange>,
    pub forehead_cheekbone: Option<RatioRange>,
    pub jaw_cheekbone: Option<RatioRange>,
    pub jaw_angle_above: Option<f32>,
    pub jaw_angle_at_most: Option<f32>,
}

/// GeometricRuleConfig holds the ordered rule table of the geometric
/// classifier. Rules are evaluated top to bottom and the first match wins;
/// the bands overlap, so the order is part of the contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeometricRuleConfig {
    pub rules: Vec<GeometricRule>,
    pub default_shape: FaceShape,
    pub default_confidence: f32,
}

impl GeometricRuleConfig {
    pub fn new() -> Self {
        GeometricRuleConfig {
            rules: vec![
                // ROUND: wide face with soft curves
                GeometricRule {
                    shape: FaceShape::Round,
                    confidence: 0.88,
                    width_height: Some(RatioRange::new(0.85, 1.1)),
                    forehead_cheekbone: Some(RatioRange::new(0.9, 1.1)),
                    jaw_cheekbone: Some(RatioRange::new(0.9, 1.1)),
                    jaw_angle_above: Some(100.0),
                    jaw_angle_at_most: None,
                },
                // SQUARE: wide face with angular jaw
                GeometricRule {
                    shape: FaceShape::Square,
                    confidence: 0.85,
                    width_height: Some(RatioRange::new(0.85, 1.05)),
                    forehead_cheekbone: Some(RatioRange::new(0.85, 1.1)),
                    jaw_cheekbone: Some(RatioRange::new(0.85, 1.1)),
                    jaw_angle_above: None,
                    jaw_angle_at_most: Some(100.0),
                },
                // HEART: wide forehead, narrow jaw
                GeometricRule {
                    shape: FaceShape::Heart,
                    confidence: 0.87,
                    width_height: Some(RatioRange::new(0.75, f32::INFINITY)),
                    forehead_cheekbone: Some(RatioRange::new(1.1, f32::INFINITY)),
                    jaw_cheekbone: Some(RatioRange::new(f32::NEG_INFINITY, 0.8)),
                    jaw_angle_above: None,
                    jaw_angle_at_most: None,
                },
                // DIAMOND: wide cheekbones, narrow forehead and jaw
                GeometricRule {
                    shape: FaceShape::Diamond,
                    confidence: 0.84,
                    width_height: Some(RatioRange::new(0.75, 0.95)),
                    forehead_cheekbone: Some(RatioRange::new(f32::NEG_INFINITY, 0.85)),
                    jaw_cheekbone: Some(RatioRange::new(f32::NEG_INFINITY, 0.85)),
                    jaw_angle_above: None,
                    jaw_angle_at_most: None,
                },
                // OBLONG: narrow and long face
                GeometricRule {
                    shape: FaceShape::Oblong,
                    confidence: 0.86,
                    width_height: Some(RatioRange::new(f32::NEG_INFINITY, 0.75)),
                    forehead_cheekbone: Some(RatioRange::new(0.85, 1.15)),
                    jaw_cheekbone: Some(RatioRange::new(0.85, 1.15)),
                    jaw_angle_above: None,
                    jaw_angle_at_most: None,
                },
            ],
            // OVAL: balanced proportions, catch-all
            default_shape: FaceShape::Oval,
            default_confidence: 0.82,
        }
    }
}

impl Default for GeometricRuleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// ContourConfig holds the thresholds of the contour classifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContourConfig {
    pub min_outline_points: usize,
    pub round_curvature_above: f32,
    pub square_curvature_below: f32,
    pub round_base_confidence: f32,
    pub square_base_confidence: f32,
    pub oval_base_confidence: f32,
    pub symmetry_weight: f32,
    pub default_symmetry: f32,
    pub degenerate_shape: FaceShape,
    pub degenerate_confidence: f32,
}

impl ContourConfig {
    pub fn new() -> Self {
        ContourConfig {
            min_outline_points: 10,
            round_curvature_above: 0.8,
            square_curvature_below: 0.3,
            round_base_confidence: 0.75,
            square_base_confidence: 0.73,
            oval_base_confidence: 0.72,
            symmetry_weight: 0.1,
            default_symmetry: 0.8,
            degenerate_shape: FaceShape::Oval,
            degenerate_confidence: 0.70,
        }
    }
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// BasicAnalysisConfig holds the width/height thresholds of the bounding-box
/// fallback tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BasicAnalysisConfig {
    pub round_ratio_above: f32,
    pub oblong_ratio_below: f32,
    pub round_confidence: f32,
    pub oblong_confidence: f32,
    pub oval_confidence: f32,
}

impl BasicAnalysisConfig {
    pub fn new() -> Self {
        BasicAnalysisConfig {
            round_ratio_above: 0.95,
            oblong_ratio_below: 0.75,
            round_confidence: 0.72,
            oblong_confidence: 0.70,
            oval_confidence: 0.75,
        }
    }
}

impl Default for BasicAnalysisConfig {
    fn default() -> Self {
        Self::new()
    }
}
