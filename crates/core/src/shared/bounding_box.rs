/// A detected face rectangle in frame pixel coordinates.
///
/// `min` corners are inclusive, `max` corners exclusive, so
/// `width = max_x - min_x`. Boxes carry no identity across frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> i32 {
        (self.max_x - self.min_x).max(0)
    }

    pub fn height(&self) -> i32 {
        (self.max_y - self.min_y).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Intersects the box with a `frame_width` x `frame_height` frame.
    ///
    /// A box lying entirely outside the frame comes back empty.
    pub fn clamp(&self, frame_width: u32, frame_height: u32) -> BoundingBox {
        let fw = frame_width as i32;
        let fh = frame_height as i32;
        let min_x = self.min_x.clamp(0, fw);
        let min_y = self.min_y.clamp(0, fh);
        BoundingBox {
            min_x,
            min_y,
            max_x: self.max_x.clamp(min_x, fw),
            max_y: self.max_y.clamp(min_y, fh),
        }
    }
}
