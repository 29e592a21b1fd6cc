use std::path::Path;

use crate::annotation::domain::annotator::Annotator;
use crate::blurring::domain::frame_blurrer::FrameBlurrer;
use crate::detection::domain::face_detector::FaceDetector;
use crate::display::domain::display_sink::DisplaySink;
use crate::pipeline::frame_loop::{open_video, run_frame_loop, Termination};
use crate::pipeline::pipeline_logger::{time_stage, PipelineLogger};
use crate::shared::constants::HUMAN_LABEL;
use crate::shared::frame::Frame;
use crate::video::domain::video_reader::VideoReader;

/// Per-frame work of the blur pipeline: every detected face gets a
/// rectangle and a "Human" label, then all of them are blurred.
pub struct FaceBlurStep {
    detector: Box<dyn FaceDetector>,
    annotator: Box<dyn Annotator>,
    blurrer: Box<dyn FrameBlurrer>,
}

impl FaceBlurStep {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        annotator: Box<dyn Annotator>,
        blurrer: Box<dyn FrameBlurrer>,
    ) -> Self {
        Self {
            detector,
            annotator,
            blurrer,
        }
    }

    pub fn process(
        &mut self,
        frame: &mut Frame,
        logger: &mut dyn PipelineLogger,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let detector = &mut self.detector;
        let boxes = time_stage(logger, "detect", || detector.detect(frame))?;
        logger.metric("faces", boxes.len() as f64);
        log::debug!("Frame {}: {} faces", frame.index(), boxes.len());

        if boxes.is_empty() {
            return Ok(());
        }

        let annotator = &self.annotator;
        time_stage(logger, "annotate", || {
            boxes
                .iter()
                .try_for_each(|bbox| annotator.annotate(frame, bbox, HUMAN_LABEL))
        })?;

        let blurrer = &self.blurrer;
        time_stage(logger, "blur", || blurrer.blur(frame, &boxes))
    }
}

/// Plays a video with every detected face labelled and blurred.
pub struct BlurFacesUseCase {
    reader: Box<dyn VideoReader>,
    display: Box<dyn DisplaySink>,
    logger: Box<dyn PipelineLogger>,
    step: FaceBlurStep,
    key_wait_ms: i32,
}

impl BlurFacesUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        display: Box<dyn DisplaySink>,
        logger: Box<dyn PipelineLogger>,
        step: FaceBlurStep,
        key_wait_ms: i32,
    ) -> Self {
        Self {
            reader,
            display,
            logger,
            step,
            key_wait_ms,
        }
    }

    pub fn execute(&mut self, path: &Path) -> Result<Termination, Box<dyn std::error::Error>> {
        let metadata = open_video(self.reader.as_mut(), path)?;

        let step = &mut self.step;
        let outcome = run_frame_loop(
            self.reader.as_mut(),
            &metadata,
            self.display.as_mut(),
            self.key_wait_ms,
            self.logger.as_mut(),
            |frame, logger| step.process(frame, logger),
        );

        self.reader.close();
        self.logger.summary();
        outcome
    }
}
