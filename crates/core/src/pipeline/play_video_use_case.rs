use std::path::Path;

use crate::display::domain::display_sink::DisplaySink;
use crate::pipeline::frame_loop::{open_video, run_frame_loop, Termination};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::video::domain::video_reader::VideoReader;

/// Plays a video file in a window, frame by frame, until it ends or a key
/// is pressed.
pub struct PlayVideoUseCase {
    reader: Box<dyn VideoReader>,
    display: Box<dyn DisplaySink>,
    logger: Box<dyn PipelineLogger>,
    key_wait_ms: i32,
}

impl PlayVideoUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        display: Box<dyn DisplaySink>,
        logger: Box<dyn PipelineLogger>,
        key_wait_ms: i32,
    ) -> Self {
        Self {
            reader,
            display,
            logger,
            key_wait_ms,
        }
    }

    pub fn execute(&mut self, path: &Path) -> Result<Termination, Box<dyn std::error::Error>> {
        let metadata = open_video(self.reader.as_mut(), path)?;

        let outcome = run_frame_loop(
            self.reader.as_mut(),
            &metadata,
            self.display.as_mut(),
            self.key_wait_ms,
            self.logger.as_mut(),
            |_, _| Ok(()),
        );

        self.reader.close();
        self.logger.summary();
        outcome
    }
}
