use opencv::core::{Mat, Rect, Size};
use opencv::imgproc;
use opencv::prelude::*;

use crate::blurring::domain::frame_blurrer::FrameBlurrer;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::constants::FACE_BLUR_KERNEL_SIZE;
use crate::shared::frame::Frame;
use crate::shared::mat_bridge;

/// Gaussian-blurs each region's rectangle in place via OpenCV.
///
/// Sigma is derived from the kernel size (OpenCV's sigma=0 convention).
/// Regions are clamped to the frame; anything that clamps to nothing is
/// skipped. The kernel samples the pixels around each box, as an in-place
/// blur of a `Mat` ROI does, while only the box interior is written.
pub struct GaussianRoiBlurrer {
    kernel_size: i32,
}

impl GaussianRoiBlurrer {
    /// `kernel_size` must be positive and odd.
    pub fn new(kernel_size: usize) -> Self {
        debug_assert!(kernel_size % 2 == 1, "kernel size must be odd");
        Self {
            kernel_size: kernel_size as i32,
        }
    }
}

impl Default for GaussianRoiBlurrer {
    fn default() -> Self {
        Self::new(FACE_BLUR_KERNEL_SIZE)
    }
}

impl FrameBlurrer for GaussianRoiBlurrer {
    fn blur(
        &self,
        frame: &mut Frame,
        regions: &[BoundingBox],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let (fw, fh) = (frame.width(), frame.height());
        let ksize = Size::new(self.kernel_size, self.kernel_size);
        let pad = self.kernel_size / 2;

        mat_bridge::with_mat_view(frame, |view| {
            let mut blurred = Mat::default();
            for region in regions {
                let r = region.clamp(fw, fh);
                if r.is_empty() {
                    continue;
                }
                let padded =
                    BoundingBox::new(r.min_x - pad, r.min_y - pad, r.max_x + pad, r.max_y + pad)
                        .clamp(fw, fh);
                let src_rect =
                    Rect::new(padded.min_x, padded.min_y, padded.width(), padded.height());
                let dst_rect = Rect::new(r.min_x, r.min_y, r.width(), r.height());
                // dst_rect relative to the padded source
                let inner = Rect::new(
                    r.min_x - padded.min_x,
                    r.min_y - padded.min_y,
                    r.width(),
                    r.height(),
                );

                let src = Mat::roi(&*view, src_rect)?.try_clone()?;
                imgproc::gaussian_blur_def(&src, &mut blurred, ksize, 0.0)?;
                let mut dst = Mat::roi_mut(&mut *view, dst_rect)?;
                Mat::roi(&blurred, inner)?.copy_to(&mut *dst)?;
            }
            Ok(())
        })?;

        Ok(())
    }
}
