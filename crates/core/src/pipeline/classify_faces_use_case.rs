use std::path::Path;

use crate::annotation::domain::annotator::Annotator;
use crate::classification::domain::face_classifier::FaceClassifier;
use crate::classification::domain::label_catalog::LabelCatalog;
use crate::classification::domain::status::Status;
use crate::detection::domain::face_detector::FaceDetector;
use crate::display::domain::display_sink::DisplaySink;
use crate::pipeline::frame_loop::{open_video, run_frame_loop, Termination};
use crate::pipeline::pipeline_logger::{time_stage, PipelineLogger};
use crate::shared::frame::Frame;
use crate::video::domain::video_reader::VideoReader;

/// Per-frame work of the classify pipeline.
///
/// Faces are annotated with the status carried in from earlier frames
/// before any of this frame's faces are classified, so the drawn label
/// always lags one classification behind.
pub struct FaceClassifyStep {
    detector: Box<dyn FaceDetector>,
    annotator: Box<dyn Annotator>,
    classifier: Box<dyn FaceClassifier>,
    catalog: LabelCatalog,
}

impl FaceClassifyStep {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        annotator: Box<dyn Annotator>,
        classifier: Box<dyn FaceClassifier>,
        catalog: LabelCatalog,
    ) -> Self {
        Self {
            detector,
            annotator,
            classifier,
            catalog,
        }
    }

    /// Processes one frame and returns the status to carry into the next.
    pub fn process_frame(
        &mut self,
        frame: &mut Frame,
        mut status: Status,
        logger: &mut dyn PipelineLogger,
    ) -> Result<Status, Box<dyn std::error::Error>> {
        let detector = &mut self.detector;
        let boxes = time_stage(logger, "detect", || detector.detect(frame))?;
        logger.metric("faces", boxes.len() as f64);
        log::debug!("Frame {}: {} faces", frame.index(), boxes.len());

        if boxes.is_empty() {
            return Ok(status);
        }

        let annotator = &self.annotator;
        time_stage(logger, "annotate", || {
            boxes
                .iter()
                .try_for_each(|bbox| annotator.annotate(frame, bbox, status.as_str()))
        })?;

        for bbox in &boxes {
            let Some(face) = frame.crop(bbox) else {
                log::debug!("Frame {}: face {bbox:?} lies outside the frame", frame.index());
                continue;
            };
            let classifier = &mut self.classifier;
            let classification = time_stage(logger, "classify", || classifier.classify(&face))?;
            status = Status::describe(&classification, &self.catalog);
            log::debug!("Frame {}: {status}", frame.index());
        }

        Ok(status)
    }
}

/// Plays a video, labelling every detected face with the most recent
/// classification result.
pub struct ClassifyFacesUseCase {
    reader: Box<dyn VideoReader>,
    display: Box<dyn DisplaySink>,
    logger: Box<dyn PipelineLogger>,
    step: FaceClassifyStep,
    key_wait_ms: i32,
}

impl ClassifyFacesUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        display: Box<dyn DisplaySink>,
        logger: Box<dyn PipelineLogger>,
        step: FaceClassifyStep,
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
        let mut status = Status::default();
        let outcome = run_frame_loop(
            self.reader.as_mut(),
            &metadata,
            self.display.as_mut(),
            self.key_wait_ms,
            self.logger.as_mut(),
            |frame, logger| {
                let current = std::mem::take(&mut status);
                status = step.process_frame(frame, current, logger)?;
                Ok(())
            },
        );

        self.reader.close();
        self.logger.summary();
        log::info!("Last status: {status}");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::pipeline_logger::{NullPipelineLogger, StdoutPipelineLogger};
    use crate::pipeline::test_support::{
        frame, RecordingAnnotator, ScriptedClassifier, ScriptedDetector, StubDisplay, StubReader,
    };
    use crate::shared::bounding_box::BoundingBox;
    use crate::shared::startup_error::StartupError;

    fn catalog() -> LabelCatalog {
        LabelCatalog::from_lines(["cat", "dog", "bird"])
    }

    fn boxes(n: i32) -> Vec<BoundingBox> {
        (0..n)
            .map(|i| BoundingBox::new(i * 10, 5, i * 10 + 8, 15))
            .collect()
    }

    fn step(
        detections: Vec<Vec<BoundingBox>>,
        indices: Vec<usize>,
    ) -> (
        FaceClassifyStep,
        std::sync::Arc<std::sync::Mutex<Vec<(usize, BoundingBox, String)>>>,
        std::sync::Arc<std::sync::Mutex<Vec<(u32, u32)>>>,
    ) {
        let annotator = RecordingAnnotator::default();
        let annotations = annotator.calls.clone();
        let classifier = ScriptedClassifier::new(indices);
        let crops = classifier.crops.clone();
        let step = FaceClassifyStep::new(
            Box::new(ScriptedDetector::new(detections)),
            Box::new(annotator),
            Box::new(classifier),
            catalog(),
        );
        (step, annotations, crops)
    }

    #[test]
    fn test_no_faces_passes_status_through() {
        let (mut step, annotations, crops) = step(vec![Vec::new()], vec![]);
        let before = Status::default();

        let after = step
            .process_frame(&mut frame(0), before.clone(), &mut NullPipelineLogger)
            .unwrap();

        assert_eq!(after, before);
        assert!(annotations.lock().unwrap().is_empty());
        assert!(crops.lock().unwrap().is_empty());
    }

    #[test]
    fn test_every_face_annotated_with_incoming_status() {
        let (mut step, annotations, crops) = step(vec![boxes(3)], vec![2, 0, 1]);

        let after = step
            .process_frame(&mut frame(0), Status::default(), &mut NullPipelineLogger)
            .unwrap();

        let annotations = annotations.lock().unwrap();
        assert_eq!(annotations.len(), 3);
        assert!(annotations.iter().all(|(_, _, label)| label == "Ready"));
        assert_eq!(crops.lock().unwrap().len(), 3);
        assert_eq!(after.as_str(), "Description: dog, maxVal: 0.5");
    }

    #[test]
    fn test_label_lags_one_frame_behind() {
        let (mut step, annotations, _) = step(vec![boxes(1), boxes(1)], vec![1, 2]);

        let status = step
            .process_frame(&mut frame(0), Status::default(), &mut NullPipelineLogger)
            .unwrap();
        let status = step
            .process_frame(&mut frame(1), status, &mut NullPipelineLogger)
            .unwrap();

        let labels: Vec<String> = annotations
            .lock()
            .unwrap()
            .iter()
            .map(|(_, _, label)| label.clone())
            .collect();
        assert_eq!(labels, vec!["Ready", "Description: dog, maxVal: 0.5"]);
        assert_eq!(status.as_str(), "Description: bird, maxVal: 0.5");
    }

    #[test]
    fn test_out_of_range_index_is_unknown() {
        let (mut step, _, _) = step(vec![boxes(1)], vec![5]);

        let status = step
            .process_frame(&mut frame(0), Status::default(), &mut NullPipelineLogger)
            .unwrap();

        assert_eq!(status.as_str(), "Description: Unknown, maxVal: 0.5");
    }

    #[test]
    fn test_faces_outside_frame_are_annotated_but_not_classified() {
        let mut detections = boxes(2);
        detections.push(BoundingBox::new(500, 500, 540, 540));
        let (mut step, annotations, crops) = step(vec![detections], vec![0, 0]);

        step.process_frame(&mut frame(0), Status::default(), &mut NullPipelineLogger)
            .unwrap();

        assert_eq!(annotations.lock().unwrap().len(), 3);
        assert_eq!(*crops.lock().unwrap(), vec![(8, 10), (8, 10)]);
    }

    #[test]
    fn test_classify_timings_recorded_per_face() {
        let (mut step, _, _) = step(vec![boxes(2)], vec![0, 1]);
        let mut logger = StdoutPipelineLogger::new(10);

        step.process_frame(&mut frame(0), Status::default(), &mut logger)
            .unwrap();

        assert_eq!(logger.timings_for("classify").unwrap().len(), 2);
        assert_eq!(logger.metrics_for("faces").unwrap(), &[2.0]);
    }

    #[test]
    fn test_execute_carries_status_and_closes_reader() {
        let reader = StubReader::frames_ok(3);
        let closed = reader.closed.clone();
        let display = StubDisplay::new();
        let shown = display.shown.clone();
        let (step, annotations, _) = step(vec![boxes(1), Vec::new(), boxes(1)], vec![0, 2]);

        let mut use_case = ClassifyFacesUseCase::new(
            Box::new(reader),
            Box::new(display),
            Box::new(NullPipelineLogger),
            step,
            1,
        );
        let outcome = use_case.execute(Path::new("clip.mp4")).unwrap();

        assert_eq!(outcome, Termination::StreamEnded);
        assert_eq!(*shown.lock().unwrap(), vec![0, 1, 2]);
        let labels: Vec<(usize, String)> = annotations
            .lock()
            .unwrap()
            .iter()
            .map(|(index, _, label)| (*index, label.clone()))
            .collect();
        assert_eq!(
            labels,
            vec![
                (0, "Ready".to_string()),
                (2, "Description: cat, maxVal: 0.5".to_string()),
            ]
        );
        assert!(*closed.lock().unwrap());
    }

    #[test]
    fn test_open_failure_reads_no_frames() {
        let reader = StubReader::failing_open();
        let read = reader.read.clone();
        let (step, _, crops) = step(vec![boxes(1)], vec![0]);

        let mut use_case = ClassifyFacesUseCase::new(
            Box::new(reader),
            Box::new(StubDisplay::new()),
            Box::new(NullPipelineLogger),
            step,
            1,
        );
        let err = use_case.execute(Path::new("missing.mp4")).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<StartupError>(),
            Some(StartupError::CannotOpen { .. })
        ));
        assert_eq!(*read.lock().unwrap(), 0);
        assert!(crops.lock().unwrap().is_empty());
    }
}
