use ndarray::Array2;

use crate::config::config::LandmarkIndexConfig;
use crate::modules::ratio::RatioSet;
use crate::pipeline::result::FaceShape;
use crate::utils::coordinate::KeyLandmark;
use crate::utils::geometry::point_at;

/// smart_alternatives returns the two nearest neighbor shapes, refined by
/// borderline ratio values. The primary shape is never included.
pub fn smart_alternatives(primary: FaceShape, ratios: &RatioSet) -> Vec<FaceShape> {
    let width_height = ratios.width_height();

    let alternatives = match primary {
        FaceShape::Oval => {
            if width_height > 0.85 {
                [FaceShape::Round, FaceShape::Heart]
            } else {
                [FaceShape::Oblong, FaceShape::Diamond]
            }
        }
        FaceShape::Round => {
            if ratios.jaw_angle() < 95.0 {
                [FaceShape::Oval, FaceShape::Square]
            } else {
                [FaceShape::Oval, FaceShape::Heart]
            }
        }
        FaceShape::Square => {
            if width_height < 0.9 {
                [FaceShape::Round, FaceShape::Oblong]
            } else {
                [FaceShape::Round, FaceShape::Diamond]
            }
        }
        FaceShape::Heart => {
            if ratios.forehead_cheekbone() < 1.2 {
                [FaceShape::Oval, FaceShape::Diamond]
            } else {
                [FaceShape::Oval, FaceShape::Round]
            }
        }
        FaceShape::Diamond => {
            if ratios.jaw_cheekbone() > 0.7 {
                [FaceShape::Heart, FaceShape::Oval]
            } else {
                [FaceShape::Oval, FaceShape::Oblong]
            }
        }
        FaceShape::Oblong => {
            if width_height > 0.7 {
                [FaceShape::Oval, FaceShape::Square]
            } else {
                [FaceShape::Oval, FaceShape::Diamond]
            }
        }
    };

    alternatives.to_vec()
}

/// static_alternatives returns the fixed adjacency map used by the degraded
/// tiers, where no ratios are available.
pub fn static_alternatives(primary: FaceShape) -> Vec<FaceShape> {
    let alternatives = match primary {
        FaceShape::Oval => [FaceShape::Round, FaceShape::Heart],
        FaceShape::Round => [FaceShape::Oval, FaceShape::Square],
        FaceShape::Square => [FaceShape::Round, FaceShape::Oblong],
        FaceShape::Heart => [FaceShape::Oval, FaceShape::Diamond],
        FaceShape::Diamond => [FaceShape::Heart, FaceShape::Oval],
        FaceShape::Oblong => [FaceShape::Oval, FaceShape::Square],
    };
    alternatives.to_vec()
}

/// detailed_reasoning renders the classification explanation with the three
/// headline ratios at two decimal places.
pub fn detailed_reasoning(shape: FaceShape, ratios: &RatioSet) -> String {
    let description = match shape {
        FaceShape::Oval => "Balanced proportions with gentle curves and harmonious features.",
        FaceShape::Round => {
            "Full cheeks with soft, curved jawline and similar width-height proportions."
        }
        FaceShape::Square => {
            "Strong, angular jawline with similar forehead, cheekbone, and jaw widths."
        }
        FaceShape::Heart => "Wider forehead tapering to a narrower, pointed chin.",
        FaceShape::Diamond => "Narrow forehead and jaw with prominent cheekbones.",
        FaceShape::Oblong => "Longer face with relatively narrow width throughout.",
    };

    format!(
        "Face classified as {} based on advanced geometric analysis. \
         Width-to-height ratio: {:.2}, Forehead-to-cheekbone ratio: {:.2}, \
         Jaw-to-cheekbone ratio: {:.2}. {}",
        shape,
        ratios.width_height_ratio.unwrap_or(0.0),
        ratios.forehead_cheekbone_ratio.unwrap_or(0.0),
        ratios.jaw_cheekbone_ratio.unwrap_or(0.0),
        description,
    )
}

/// key_landmarks extracts the named key points exported for visualization.
/// Indices outside the landmark set are skipped.
pub fn key_landmarks(landmarks: &Array2<f32>, indices: &LandmarkIndexConfig) -> Vec<KeyLandmark> {
    let named_indices = [
        ("forehead_center", indices.forehead_top),
        ("left_temple", indices.temple.0),
        ("right_temple", indices.temple.1),
        ("left_cheekbone", indices.cheekbone.0),
        ("right_cheekbone", indices.cheekbone.1),
        ("nose_tip", indices.nose_tip),
        ("left_jaw", indices.jaw.0),
        ("right_jaw", indices.jaw.1),
        ("chin", indices.chin),
    ];

    let mut key_points = Vec::with_capacity(named_indices.len());
    for (name, idx) in named_indices {
        if let Some(point) = point_at(landmarks, idx) {
            key_points.push(KeyLandmark {
                name: name.to_string(),
                x: point.x,
                y: point.y,
                index: idx,
            });
        }
    }
    key_points
}
