//! Conversions between [`Frame`] and OpenCV `Mat`.
//!
//! Frames are RGB; OpenCV's detectors and highgui expect BGR, so the owned
//! conversion swaps channels. Drawing doesn't care about channel order and
//! works on a borrowed view of the frame buffer instead.

use opencv::core::{Mat, Scalar, CV_8UC3};
use opencv::prelude::*;

use crate::shared::frame::Frame;

fn check_rgb(frame: &Frame) -> opencv::Result<()> {
    if frame.channels() != 3 {
        return Err(opencv::Error::new(
            opencv::core::StsBadArg,
            format!("expected a 3-channel frame, got {}", frame.channels()),
        ));
    }
    Ok(())
}

/// Copies an RGB frame into a freshly allocated BGR `Mat`.
pub fn to_bgr_mat(frame: &Frame) -> opencv::Result<Mat> {
    check_rgb(frame)?;
    let mut mat = Mat::new_rows_cols_with_default(
        frame.height() as i32,
        frame.width() as i32,
        CV_8UC3,
        Scalar::all(0.0),
    )?;
    let dst = mat.data_bytes_mut()?;
    for (out, px) in dst.chunks_exact_mut(3).zip(frame.data().chunks_exact(3)) {
        out[0] = px[2];
        out[1] = px[1];
        out[2] = px[0];
    }
    Ok(mat)
}

/// Runs `f` with a `Mat` header that aliases the frame's pixel buffer.
///
/// Anything `f` draws lands directly in the frame. The header never
/// outlives the call, so the borrow of `frame` covers every access.
pub fn with_mat_view<T>(
    frame: &mut Frame,
    f: impl FnOnce(&mut Mat) -> opencv::Result<T>,
) -> opencv::Result<T> {
    check_rgb(frame)?;
    let rows = frame.height() as i32;
    let cols = frame.width() as i32;
    let data = frame.data_mut();
    // Safety: `data` holds rows * cols * 3 bytes and stays mutably borrowed
    // (and therefore alive and unaliased) until `f` returns.
    let mut view = unsafe {
        Mat::new_rows_cols_with_data_unsafe(
            rows,
            cols,
            CV_8UC3,
            data.as_mut_ptr().cast(),
            opencv::core::Mat_AUTO_STEP,
        )
    }?;
    f(&mut view)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_bgr_mat_swaps_channels() {
        // One red pixel, one blue pixel.
        let frame = Frame::new(vec![255, 0, 0, 0, 0, 255], 2, 1, 3, 0);
        let mat = to_bgr_mat(&frame).unwrap();
        assert_eq!(mat.rows(), 1);
        assert_eq!(mat.cols(), 2);
        assert_eq!(mat.data_bytes().unwrap(), &[0, 0, 255, 255, 0, 0]);
    }

    #[test]
    fn test_to_bgr_mat_rejects_grayscale() {
        let frame = Frame::new(vec![0; 4], 2, 2, 1, 0);
        assert!(to_bgr_mat(&frame).is_err());
    }

    #[test]
    fn test_view_writes_through_to_frame() {
        let mut frame = Frame::new(vec![0; 2 * 2 * 3], 2, 2, 3, 0);
        with_mat_view(&mut frame, |mat| {
            mat.data_bytes_mut()?[0] = 42;
            Ok(())
        })
        .unwrap();
        assert_eq!(frame.data()[0], 42);
    }
}
