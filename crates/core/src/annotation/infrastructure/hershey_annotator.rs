use opencv::core::{Point, Rect, Scalar};
use opencv::imgproc;

use crate::annotation::domain::annotator::{label_origin, Annotator};
use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;
use crate::shared::mat_bridge;

const FONT_FACE: i32 = imgproc::FONT_HERSHEY_PLAIN;
const FONT_SCALE: f64 = 1.2;
const TEXT_THICKNESS: i32 = 2;
const RECT_THICKNESS: i32 = 3;

/// Draws a blue box and a Hershey-font label with OpenCV.
pub struct HersheyAnnotator {
    label_divisor: i32,
    color: Scalar,
}

impl HersheyAnnotator {
    /// `label_divisor` feeds [`label_origin`]; zero is treated as 1.
    pub fn new(label_divisor: i32) -> Self {
        Self {
            label_divisor: if label_divisor == 0 { 1 } else { label_divisor },
            // Frames are RGB, so blue sits in the third channel.
            color: Scalar::new(0.0, 0.0, 255.0, 0.0),
        }
    }
}

impl Annotator for HersheyAnnotator {
    fn annotate(
        &self,
        frame: &mut Frame,
        bbox: &BoundingBox,
        label: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let rect = Rect::new(bbox.min_x, bbox.min_y, bbox.width(), bbox.height());

        mat_bridge::with_mat_view(frame, |mat| {
            imgproc::rectangle(mat, rect, self.color, RECT_THICKNESS, imgproc::LINE_8, 0)?;

            let mut baseline = 0;
            let size =
                imgproc::get_text_size(label, FONT_FACE, FONT_SCALE, TEXT_THICKNESS, &mut baseline)?;
            let (x, y) = label_origin(bbox, size.width, self.label_divisor);
            imgproc::put_text(
                mat,
                label,
                Point::new(x, y),
                FONT_FACE,
                FONT_SCALE,
                self.color,
                TEXT_THICKNESS,
                imgproc::LINE_8,
                false,
            )
        })?;

        Ok(())
    }
}
