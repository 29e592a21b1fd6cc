use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

/// Reads frames from a video file.
///
/// Implementations handle codec and container details; pipelines only see
/// [`Frame`] and [`VideoMetadata`]. The end of `frames()` is the end of
/// the stream.
pub trait VideoReader {
    /// Opens a video file and returns its metadata.
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>>;

    /// Returns a lazy iterator over frames in decode order.
    ///
    /// A per-frame `Err` reports a frame that failed to decode; it does not
    /// end the stream.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    /// Releases any resources held by the reader. Safe to call repeatedly.
    fn close(&mut self);
}
