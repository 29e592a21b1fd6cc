use ndarray::ArrayView3;

use crate::shared::bounding_box::BoundingBox;

/// A single decoded video frame: contiguous RGB bytes in row-major order.
///
/// Conversion to library-specific layouts (BGR `Mat`, NCHW tensors) happens
/// at the infrastructure boundary only.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// True for frames a decoder hands back without pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }

    /// Copies the pixels under `bbox` into a new frame.
    ///
    /// The box is clamped to the frame first; `None` when nothing is left.
    pub fn crop(&self, bbox: &BoundingBox) -> Option<Frame> {
        let clamped = bbox.clamp(self.width, self.height);
        if clamped.is_empty() {
            return None;
        }

        let channels = self.channels as usize;
        let fw = self.width as usize;
        let x = clamped.min_x as usize;
        let y = clamped.min_y as usize;
        let w = clamped.width() as usize;
        let h = clamped.height() as usize;

        let mut data = Vec::with_capacity(w * h * channels);
        for row in y..y + h {
            let start = (row * fw + x) * channels;
            data.extend_from_slice(&self.data[start..start + w * channels]);
        }
        Some(Frame::new(data, w as u32, h as u32, self.channels, self.index))
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
