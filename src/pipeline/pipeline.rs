use ndarray::Array2;
use tracing::{debug, warn};

use crate::config::config::{
    BasicAnalysisConfig, ContourConfig, GeometricRuleConfig, LandmarkIndexConfig,
};
use crate::detector::client::FaceDetection;
use crate::helper::shape_helper::{
    detailed_reasoning, key_landmarks, smart_alternatives, static_alternatives,
};
use crate::modules::contour::ContourClassifier;
use crate::modules::geometric::GeometricClassifier;
use crate::modules::measurement::{MeasurementExtractor, MeasurementSet};
use crate::modules::ratio::{RatioCalculator, RatioSet};
use crate::pipeline::result::{
    AnalysisMethod, ClassificationResult, FaceShape, ShapePrediction,
};
use crate::utils::coordinate::BoundingBox;

/// FaceShapePipeline runs the full classification chain for one image:
/// advanced landmark analysis, then the bounding-box tier, then the static
/// default. Every request gets a well-formed result.
///
/// The pipeline holds only read-only configuration and is safe to share
/// across concurrent requests.
#[derive(Debug, Clone)]
pub struct FaceShapePipeline<D> {
    face_det: D,
    indices: LandmarkIndexConfig,
    measurement: MeasurementExtractor,
    ratio: RatioCalculator,
    geometric: GeometricClassifier,
    contour: ContourClassifier,
    basic: BasicAnalysisConfig,
}

impl<D: FaceDetection> FaceShapePipeline<D> {
    /// new initializes the pipeline with the default rule tables.
    pub fn new(face_det: D) -> Self {
        Self::with_config(
            face_det,
            LandmarkIndexConfig::new(),
            GeometricRuleConfig::new(),
            ContourConfig::new(),
            BasicAnalysisConfig::new(),
        )
    }

    /// with_config initializes the pipeline with caller-supplied tables.
    pub fn with_config(
        face_det: D,
        indices: LandmarkIndexConfig,
        rules: GeometricRuleConfig,
        contour: ContourConfig,
        basic: BasicAnalysisConfig,
    ) -> Self {
        FaceShapePipeline {
            face_det,
            measurement: MeasurementExtractor::new(indices.clone()),
            ratio: RatioCalculator::new(),
            geometric: GeometricClassifier::new(rules),
            contour: ContourClassifier::new(indices.clone(), contour),
            basic,
            indices,
        }
    }

    /// detect_face_shape runs detection and the full fallback chain on one
    /// image. Detector failures are absorbed into the next tier; the call
    /// itself never fails.
    pub async fn detect_face_shape(&self, image: &[u8]) -> ClassificationResult {
        let landmarks = match self.face_det.detect_landmarks(image).await {
            Ok(landmarks) => landmarks,
            Err(e) => {
                warn!("landmark detection failed, falling back to basic analysis: {e}");
                None
            }
        };
        if let Some(result) = landmarks.as_ref().and_then(|lmk| self.try_landmark_analysis(lmk)) {
            return result;
        }

        let face_box = match self.face_det.detect_face_box(image).await {
            Ok(face_box) => face_box,
            Err(e) => {
                warn!("face box detection failed, using static default: {e}");
                None
            }
        };
        if let Some(result) = face_box.as_ref().and_then(|b| self.try_basic_analysis(b)) {
            return result;
        }

        self.fallback_result()
    }

    /// analyze classifies from detector outputs the caller already has:
    /// a landmark set, a face bounding box, or neither. Total.
    pub fn analyze(
        &self,
        landmarks: Option<&Array2<f32>>,
        face_box: Option<&BoundingBox>,
    ) -> ClassificationResult {
        if let Some(result) = landmarks.and_then(|lmk| self.try_landmark_analysis(lmk)) {
            return result;
        }
        if let Some(result) = face_box.and_then(|b| self.try_basic_analysis(b)) {
            return result;
        }
        self.fallback_result()
    }

    /// try_landmark_analysis runs the advanced geometric tier. Returns
    /// `None` only for an empty landmark set.
    fn try_landmark_analysis(&self, landmarks: &Array2<f32>) -> Option<ClassificationResult> {
        if landmarks.nrows() == 0 {
            return None;
        }

        let measurements = self.measurement.extract(landmarks);
        let ratios = self.ratio.ratios(&measurements);
        debug!(?ratios, "derived facial ratios");

        let primary = self.geometric.classify(&ratios);
        let secondary = self.contour.classify(landmarks);
        let combined = combine_predictions(primary, secondary);

        Some(ClassificationResult {
            face_shape: combined.shape,
            confidence: combined.confidence,
            reasoning: detailed_reasoning(combined.shape, &ratios),
            alternatives: smart_alternatives(combined.shape, &ratios),
            landmarks: key_landmarks(landmarks, &self.indices),
            measurements,
            ratios,
            analysis_method: AnalysisMethod::AdvancedGeometricAnalysis,
        })
    }

    /// try_basic_analysis classifies from the bounding-box aspect ratio
    /// alone. Returns `None` for a degenerate box.
    fn try_basic_analysis(&self, face_box: &BoundingBox) -> Option<ClassificationResult> {
        if face_box.width <= 0.0 || face_box.height <= 0.0 {
            return None;
        }

        let width_height_ratio = face_box.width / face_box.height;
        let (face_shape, confidence) = if width_height_ratio > self.basic.round_ratio_above {
            (FaceShape::Round, self.basic.round_confidence)
        } else if width_height_ratio < self.basic.oblong_ratio_below {
            (FaceShape::Oblong, self.basic.oblong_confidence)
        } else {
            (FaceShape::Oval, self.basic.oval_confidence)
        };

        Some(ClassificationResult {
            face_shape,
            confidence,
            measurements: MeasurementSet {
                face_width: Some(face_box.width),
                face_height: Some(face_box.height),
                ..Default::default()
            },
            ratios: RatioSet {
                width_height_ratio: Some(width_height_ratio),
                ..Default::default()
            },
            landmarks: vec![],
            reasoning: format!(
                "Basic analysis: {} face detected with {:.0}% confidence",
                face_shape,
                confidence * 100.0
            ),
            alternatives: static_alternatives(face_shape),
            analysis_method: AnalysisMethod::BasicHaarCascade,
        })
    }

    /// fallback_result is the terminal tier; it always succeeds.
    fn fallback_result(&self) -> ClassificationResult {
        ClassificationResult {
            face_shape: FaceShape::Oval,
            confidence: 0.75,
            measurements: MeasurementSet {
                face_width: Some(80.0),
                face_height: Some(100.0),
                ..Default::default()
            },
            ratios: RatioSet {
                width_height_ratio: Some(0.8),
                ..Default::default()
            },
            landmarks: vec![],
            reasoning: "Face shape analysis completed with default classification. \
                        For better accuracy, ensure the face is clearly visible and well-lit."
                .to_string(),
            alternatives: vec![FaceShape::Round, FaceShape::Square],
            analysis_method: AnalysisMethod::Fallback,
        }
    }
}

/// combine_predictions reconciles the two classifier opinions.
///
/// Agreement averages the confidences and adds a bonus capped at 0.95;
/// disagreement keeps the higher-confidence shape with a 0.9 penalty, and a
/// tie prefers the primary (geometric) classifier.
pub fn combine_predictions(
    primary: ShapePrediction,
    secondary: ShapePrediction,
) -> ShapePrediction {
    if primary.shape == secondary.shape {
        return ShapePrediction {
            shape: primary.shape,
            confidence: f32::min(0.95, (primary.confidence + secondary.confidence) / 2.0 + 0.1),
        };
    }

    if primary.confidence >= secondary.confidence {
        ShapePrediction {
            shape: primary.shape,
            confidence: primary.confidence * 0.9,
        }
    } else {
        ShapePrediction {
            shape: secondary.shape,
            confidence: secondary.confidence * 0.9,
        }
    }
}
