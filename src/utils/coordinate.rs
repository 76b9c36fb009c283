use ndarray::Array2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coordinate2D {
    pub x: f32,
    pub y: f32,
}

/// coordinates_to_landmark_array converts a decoded landmark point list into
/// the (N, 2) array consumed by the pipeline, preserving order.
pub fn coordinates_to_landmark_array(points: &[Coordinate2D]) -> Array2<f32> {
    let mut result: Vec<f32> = Vec::with_capacity(points.len() * 2);
    for point in points {
        result.extend_from_slice(&[point.x, point.y]);
    }

    // The shape is consistent with the vector length by construction.
    Array2::from_shape_vec((points.len(), 2), result).unwrap_or_else(|_| Array2::zeros((0, 2)))
}

/// BoundingBox is the axis-aligned face box reported by the basic detector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// KeyLandmark is a named landmark point exported for visualization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyLandmark {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_to_landmark_array() {
        let points = vec![
            Coordinate2D { x: 169.7128, y: 213.38426 },
            Coordinate2D { x: 455.29285, y: 223.66956 },
            Coordinate2D { x: 310.71146, y: 320.74503 },
        ];
        let landmarks = coordinates_to_landmark_array(&points);
        assert_eq!(landmarks.shape(), &[3, 2]);
        assert_eq!(landmarks[[1, 0]], 455.29285);
        assert_eq!(landmarks[[2, 1]], 320.74503);
    }

    #[test]
    fn test_coordinates_to_landmark_array_empty() {
        let landmarks = coordinates_to_landmark_array(&[]);
        assert_eq!(landmarks.nrows(), 0);
    }
}
