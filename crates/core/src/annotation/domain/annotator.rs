use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// Domain interface for marking a detected face on a frame.
///
/// Implementations draw in place: a rectangle at the box and `label`
/// above it.
pub trait Annotator {
    fn annotate(
        &self,
        frame: &mut Frame,
        bbox: &BoundingBox,
        label: &str,
    ) -> Result<(), Box<dyn std::error::Error>>;
}

/// Baseline-left origin for a label drawn above `bbox`.
///
/// The horizontal shift `min_x / divisor` is a rough centering heuristic
/// that drifts with the box position; it is not exact text centering.
/// Integer division throughout. `divisor` must be non-zero.
pub fn label_origin(bbox: &BoundingBox, text_width: i32, divisor: i32) -> (i32, i32) {
    (
        bbox.min_x + bbox.min_x / divisor - text_width / 2,
        bbox.min_y - 2,
    )
}
