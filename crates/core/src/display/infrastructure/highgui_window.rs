use opencv::highgui;

use crate::display::domain::display_sink::DisplaySink;
use crate::shared::frame::Frame;
use crate::shared::mat_bridge;

/// An OpenCV highgui window.
///
/// The native window is created on the first `show` and destroyed when the
/// value is dropped, so a pipeline that fails before its first frame never
/// opens one.
pub struct HighguiWindow {
    title: String,
    opened: bool,
}

impl HighguiWindow {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            opened: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl DisplaySink for HighguiWindow {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        if !self.opened {
            highgui::named_window(&self.title, highgui::WINDOW_AUTOSIZE)?;
            self.opened = true;
            log::debug!("Opened window '{}'", self.title);
        }
        let mat = mat_bridge::to_bgr_mat(frame)?;
        highgui::imshow(&self.title, &mat)?;
        Ok(())
    }

    fn poll_key(&mut self, timeout_ms: i32) -> Result<Option<i32>, Box<dyn std::error::Error>> {
        let key = highgui::wait_key(timeout_ms)?;
        Ok((key >= 0).then_some(key))
    }
}

impl Drop for HighguiWindow {
    fn drop(&mut self) {
        if self.opened {
            if let Err(e) = highgui::destroy_window(&self.title) {
                log::warn!("Failed to close window '{}': {e}", self.title);
            }
        }
    }
}
