//! Recording stubs for the domain traits, shared by the pipeline tests.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::annotation::domain::annotator::Annotator;
use crate::blurring::domain::frame_blurrer::FrameBlurrer;
use crate::classification::domain::classification::Classification;
use crate::classification::domain::face_classifier::FaceClassifier;
use crate::detection::domain::face_detector::FaceDetector;
use crate::display::domain::display_sink::DisplaySink;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_reader::VideoReader;

type FrameResult = Result<Frame, Box<dyn std::error::Error>>;

pub fn frame(index: usize) -> Frame {
    Frame::new(vec![64; 64 * 48 * 3], 64, 48, 3, index)
}

pub fn metadata() -> VideoMetadata {
    VideoMetadata {
        width: 64,
        height: 48,
        fps: 25.0,
        total_frames: 0,
        codec: "stub".to_string(),
        source_path: None,
    }
}

pub struct StubReader {
    items: Vec<FrameResult>,
    fail_open: bool,
    pub opened: Arc<Mutex<Option<PathBuf>>>,
    pub read: Arc<Mutex<usize>>,
    pub closed: Arc<Mutex<bool>>,
}

impl StubReader {
    pub fn new(items: Vec<FrameResult>) -> Self {
        Self {
            items,
            fail_open: false,
            opened: Arc::new(Mutex::new(None)),
            read: Arc::new(Mutex::new(0)),
            closed: Arc::new(Mutex::new(false)),
        }
    }

    pub fn frames_ok(count: usize) -> Self {
        Self::new((0..count).map(|i| Ok(frame(i))).collect())
    }

    pub fn failing_open() -> Self {
        Self {
            fail_open: true,
            ..Self::frames_ok(3)
        }
    }
}

impl VideoReader for StubReader {
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
        if self.fail_open {
            return Err("no such file".into());
        }
        *self.opened.lock().unwrap() = Some(path.to_path_buf());
        Ok(metadata())
    }

    fn frames(&mut self) -> Box<dyn Iterator<Item = FrameResult> + '_> {
        let read = self.read.clone();
        Box::new(std::mem::take(&mut self.items).into_iter().inspect(move |_| {
            *read.lock().unwrap() += 1;
        }))
    }

    fn close(&mut self) {
        *self.closed.lock().unwrap() = true;
    }
}

pub struct StubDisplay {
    keys: VecDeque<Option<i32>>,
    pub shown: Arc<Mutex<Vec<usize>>>,
}

impl StubDisplay {
    pub fn new() -> Self {
        Self::with_keys(Vec::new())
    }

    /// Key polls answer from `keys` in order, then `None` forever.
    pub fn with_keys(keys: Vec<Option<i32>>) -> Self {
        Self {
            keys: keys.into(),
            shown: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl DisplaySink for StubDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        self.shown.lock().unwrap().push(frame.index());
        Ok(())
    }

    fn poll_key(&mut self, _timeout_ms: i32) -> Result<Option<i32>, Box<dyn std::error::Error>> {
        Ok(self.keys.pop_front().flatten())
    }
}

/// Returns the next scripted box list per call, then nothing.
pub struct ScriptedDetector {
    per_frame: VecDeque<Vec<BoundingBox>>,
    pub calls: Arc<Mutex<usize>>,
}

impl ScriptedDetector {
    pub fn new(per_frame: Vec<Vec<BoundingBox>>) -> Self {
        Self {
            per_frame: per_frame.into(),
            calls: Arc::new(Mutex::new(0)),
        }
    }
}

impl FaceDetector for ScriptedDetector {
    fn detect(&mut self, _frame: &Frame) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.per_frame.pop_front().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct RecordingAnnotator {
    pub calls: Arc<Mutex<Vec<(usize, BoundingBox, String)>>>,
}

impl Annotator for RecordingAnnotator {
    fn annotate(
        &self,
        frame: &mut Frame,
        bbox: &BoundingBox,
        label: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.calls
            .lock()
            .unwrap()
            .push((frame.index(), *bbox, label.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingBlurrer {
    pub calls: Arc<Mutex<Vec<Vec<BoundingBox>>>>,
}

impl FrameBlurrer for RecordingBlurrer {
    fn blur(
        &self,
        _frame: &mut Frame,
        regions: &[BoundingBox],
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.calls.lock().unwrap().push(regions.to_vec());
        Ok(())
    }
}

/// Answers with scripted arg-max indices (confidence 0.5), recording the
/// size of every crop it receives.
pub struct ScriptedClassifier {
    indices: VecDeque<usize>,
    pub crops: Arc<Mutex<Vec<(u32, u32)>>>,
}

impl ScriptedClassifier {
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            indices: indices.into(),
            crops: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FaceClassifier for ScriptedClassifier {
    fn classify(&mut self, face: &Frame) -> Result<Classification, Box<dyn std::error::Error>> {
        self.crops
            .lock()
            .unwrap()
            .push((face.width(), face.height()));
        let index = self.indices.pop_front().ok_or("classifier script exhausted")?;
        Ok(Classification {
            index,
            confidence: 0.5,
        })
    }
}
