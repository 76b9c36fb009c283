use nalgebra::Vector2;
use ndarray::Array2;

/// point_at reads one landmark row as a 2d vector.
///
/// Returns `None` when the index is outside the landmark set so that callers
/// can treat the derived measurement as unknown rather than zero.
pub fn point_at(landmarks: &Array2<f32>, idx: usize) -> Option<Vector2<f32>> {
    if idx >= landmarks.nrows() || landmarks.ncols() < 2 {
        return None;
    }
    Some(Vector2::new(landmarks[[idx, 0]], landmarks[[idx, 1]]))
}

pub fn euclidean_distance(a: Vector2<f32>, b: Vector2<f32>) -> f32 {
    (a - b).norm()
}

/// vertex_angle_degrees computes the angle at `vertex` between the vectors
/// pointing to `a` and `b`.
///
/// The cosine is clamped to [-1, 1] before the arccosine. Returns 90.0 when
/// either vector has zero length.
pub fn vertex_angle_degrees(vertex: Vector2<f32>, a: Vector2<f32>, b: Vector2<f32>) -> f32 {
    let v1 = a - vertex;
    let v2 = b - vertex;

    let mag1 = v1.norm();
    let mag2 = v2.norm();
    if mag1 <= 0.0 || mag2 <= 0.0 {
        return 90.0;
    }

    let cos_angle = (v1.dot(&v2) / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// turn_magnitude measures how sharply the polyline turns at `p2`.
///
/// It is the normalized cross-product magnitude of the chords p1->p2 and
/// p2->p3, i.e. the sine of the turn angle. Returns 0.0 for degenerate
/// chords.
pub fn turn_magnitude(p1: Vector2<f32>, p2: Vector2<f32>, p3: Vector2<f32>) -> f32 {
    let v1 = p2 - p1;
    let v2 = p3 - p2;

    let mag1 = v1.norm();
    let mag2 = v2.norm();
    if mag1 <= 0.0 || mag2 <= 0.0 {
        return 0.0;
    }

    let cross_product = v1.x * v2.y - v1.y * v2.x;
    cross_product.abs() / (mag1 * mag2)
}
