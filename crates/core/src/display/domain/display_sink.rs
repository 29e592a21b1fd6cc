use crate::shared::frame::Frame;

/// Domain interface for the on-screen output of a pipeline.
pub trait DisplaySink {
    /// Presents a frame.
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Waits up to `timeout_ms` for a key press. `None` when nothing was
    /// pressed. Any key code that comes back means the viewer wants out.
    fn poll_key(&mut self, timeout_ms: i32) -> Result<Option<i32>, Box<dyn std::error::Error>>;
}
