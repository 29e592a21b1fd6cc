use crate::classification::domain::classification::Classification;
use crate::shared::frame::Frame;

/// Domain interface for classifying a cropped face image.
pub trait FaceClassifier {
    fn classify(&mut self, face: &Frame) -> Result<Classification, Box<dyn std::error::Error>>;
}
