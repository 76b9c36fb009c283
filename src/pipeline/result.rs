use std::fmt;

use serde::{Deserialize, Serialize};

use crate::modules::measurement::MeasurementSet;
use crate::modules::ratio::RatioSet;
use crate::utils::coordinate::KeyLandmark;

/// FaceShape is the closed set of supported face shape categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum FaceShape {
    Oval,
    Round,
    Square,
    Heart,
    Diamond,
    Oblong,
}

impl FaceShape {
    pub const ALL: [FaceShape; 6] = [
        FaceShape::Oval,
        FaceShape::Round,
        FaceShape::Square,
        FaceShape::Heart,
        FaceShape::Diamond,
        FaceShape::Oblong,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FaceShape::Oval => "OVAL",
            FaceShape::Round => "ROUND",
            FaceShape::Square => "SQUARE",
            FaceShape::Heart => "HEART",
            FaceShape::Diamond => "DIAMOND",
            FaceShape::Oblong => "OBLONG",
        }
    }
}

impl fmt::Display for FaceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ShapePrediction is the (shape, confidence) pair produced by one classifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ShapePrediction {
    pub shape: FaceShape,
    pub confidence: f32,
}

/// AnalysisMethod tags which pipeline tier produced a result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMethod {
    AdvancedGeometricAnalysis,
    BasicHaarCascade,
    Fallback,
}

/// ClassificationResult is the final record returned for every request.
///
/// The record is created fresh per analysis call and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassificationResult {
    pub face_shape: FaceShape,
    pub confidence: f32,
    pub measurements: MeasurementSet,
    pub ratios: RatioSet,
    pub landmarks: Vec<KeyLandmark>,
    pub reasoning: String,
    pub alternatives: Vec<FaceShape>,
    pub analysis_method: AnalysisMethod,
}
