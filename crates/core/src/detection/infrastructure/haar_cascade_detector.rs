use std::path::Path;

use opencv::core::{Rect, Size, Vector};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;
use crate::shared::mat_bridge;
use crate::shared::startup_error::StartupError;

/// Image pyramid step between detection scales.
const SCALE_FACTOR: f64 = 1.1;

/// Overlapping hits a candidate needs before it counts as a face.
const MIN_NEIGHBORS: i32 = 3;

/// Face detector backed by an OpenCV Haar cascade XML file.
pub struct HaarCascadeDetector {
    classifier: CascadeClassifier,
    hits: Vector<Rect>,
}

impl HaarCascadeDetector {
    /// Loads a cascade file, rejecting paths that don't parse into a
    /// non-empty classifier.
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let invalid = |reason: String| StartupError::InvalidClassifier {
            path: path.to_path_buf(),
            reason,
        };

        if !path.is_file() {
            return Err(invalid("file not found".to_string()));
        }
        let path_str = path
            .to_str()
            .ok_or_else(|| invalid("path is not valid UTF-8".to_string()))?;

        let mut classifier = CascadeClassifier::default().map_err(|e| invalid(e.to_string()))?;
        let loaded = classifier
            .load(path_str)
            .map_err(|e| invalid(e.to_string()))?;
        let empty = classifier.empty().map_err(|e| invalid(e.to_string()))?;
        if !loaded || empty {
            return Err(invalid("not a cascade classifier".to_string()));
        }

        log::info!("Loaded Haar cascade: {}", path.display());
        Ok(Self {
            classifier,
            hits: Vector::new(),
        })
    }
}

impl FaceDetector for HaarCascadeDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>> {
        let mat = mat_bridge::to_bgr_mat(frame)?;

        self.hits.clear();
        self.classifier.detect_multi_scale(
            &mat,
            &mut self.hits,
            SCALE_FACTOR,
            MIN_NEIGHBORS,
            0,
            Size::new(0, 0),
            Size::new(0, 0),
        )?;

        Ok(self
            .hits
            .iter()
            .map(|r| BoundingBox::from_xywh(r.x, r.y, r.width, r.height))
            .collect())
    }
}
