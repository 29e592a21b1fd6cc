use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// Domain interface for obscuring rectangular regions of a frame.
///
/// Implementations modify the frame in place (`&mut Frame`).
pub trait FrameBlurrer {
    fn blur(
        &self,
        frame: &mut Frame,
        regions: &[BoundingBox],
    ) -> Result<(), Box<dyn std::error::Error>>;
}
