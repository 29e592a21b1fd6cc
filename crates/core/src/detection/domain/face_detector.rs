use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// Domain interface for face detection.
///
/// `&mut self` because backends keep scratch buffers between calls; callers
/// must not rely on any cross-frame state. Box order is backend-defined.
pub trait FaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>>;
}
