use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    /// Container-reported frame count; 0 when the container doesn't know.
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}
