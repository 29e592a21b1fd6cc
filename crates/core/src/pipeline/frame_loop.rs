use std::path::Path;

use crate::display::domain::display_sink::DisplaySink;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::frame::Frame;
use crate::shared::startup_error::StartupError;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_reader::VideoReader;

/// Why a pipeline stopped after it started running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The frame source ran out of frames.
    StreamEnded,
    /// The viewer pressed a key.
    UserQuit,
}

/// Opens the video, turning any reader failure into a startup error.
pub fn open_video(
    reader: &mut dyn VideoReader,
    path: &Path,
) -> Result<VideoMetadata, StartupError> {
    let metadata = reader.open(path).map_err(|e| StartupError::CannotOpen {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    log::info!(
        "Start reading video: {} ({}x{}, {:.2} fps, codec {})",
        path.display(),
        metadata.width,
        metadata.height,
        metadata.fps,
        metadata.codec
    );
    Ok(metadata)
}

/// Read → process → show → poll, until the stream ends or a key is pressed.
///
/// Frames that fail to decode and empty frames are skipped without calling
/// `step`. An error from `step` or the display aborts the loop; the caller
/// still owns the reader and is responsible for closing it.
pub fn run_frame_loop<F>(
    reader: &mut dyn VideoReader,
    metadata: &VideoMetadata,
    display: &mut dyn DisplaySink,
    key_wait_ms: i32,
    logger: &mut dyn PipelineLogger,
    mut step: F,
) -> Result<Termination, Box<dyn std::error::Error>>
where
    F: FnMut(&mut Frame, &mut dyn PipelineLogger) -> Result<(), Box<dyn std::error::Error>>,
{
    let mut shown = 0usize;

    for item in reader.frames() {
        let mut frame = match item {
            Ok(frame) => frame,
            Err(e) => {
                log::warn!("Skipping unreadable frame: {e}");
                continue;
            }
        };
        if frame.is_empty() {
            log::debug!("Skipping empty frame {}", frame.index());
            continue;
        }

        step(&mut frame, &mut *logger)?;
        display.show(&frame)?;
        shown += 1;
        logger.progress(shown, metadata.total_frames);

        if let Some(key) = display.poll_key(key_wait_ms)? {
            if key >= 0 {
                log::info!("Key {key} pressed after {shown} frames, stopping");
                return Ok(Termination::UserQuit);
            }
        }
    }

    log::info!("Video closed after {shown} frames");
    Ok(Termination::StreamEnded)
}
