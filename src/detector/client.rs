use anyhow::Error;
use ndarray::Array2;

use crate::utils::coordinate::BoundingBox;

/// FaceDetection is the seam to the external face detection models.
///
/// `detect_landmarks` runs the dense landmark model and returns the ordered
/// (N, 2) pixel-coordinate landmark set of the primary face, or `None` when
/// no face is found. `detect_face_box` runs the basic bounding-box detector
/// used by the degraded tier. The pipeline treats an `Err` from either call
/// the same as `None`: it logs the failure and moves to the next tier.
pub trait FaceDetection {
    fn detect_landmarks(
        &self,
        image: &[u8],
    ) -> impl std::future::Future<Output = Result<Option<Array2<f32>>, Error>> + Send;

    fn detect_face_box(
        &self,
        image: &[u8],
    ) -> impl std::future::Future<Output = Result<Option<BoundingBox>, Error>> + Send;
}
