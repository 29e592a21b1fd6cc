use std::fmt;

use crate::classification::domain::classification::Classification;
use crate::classification::domain::label_catalog::LabelCatalog;
use crate::shared::constants::INITIAL_STATUS;

/// Text drawn above faces in the classify pipeline: the description of the
/// most recent classification.
///
/// Owned by the frame loop and threaded through each frame's processing
/// step, so a frame without faces shows whatever the last one produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status(String);

impl Status {
    pub fn describe(classification: &Classification, catalog: &LabelCatalog) -> Self {
        Self(format!(
            "Description: {}, maxVal: {}",
            catalog.describe(classification.index),
            classification.confidence
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Status {
    fn default() -> Self {
        Self(INITIAL_STATUS.to_string())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
