use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop a pipeline before its first frame is read.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("error opening video file {}: {}", .path.display(), .reason)]
    CannotOpen { path: PathBuf, reason: String },
    #[error("error reading cascade file {}: {}", .path.display(), .reason)]
    InvalidClassifier { path: PathBuf, reason: String },
    #[error("error reading network model {}: {}", .path.display(), .reason)]
    InvalidModel { path: PathBuf, reason: String },
    #[error("error reading descriptions file {}: {}", .path.display(), .source)]
    CannotRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
