use std::fs;
use std::path::Path;

use crate::shared::constants::UNKNOWN_LABEL;
use crate::shared::startup_error::StartupError;

/// Human-readable class names, indexed by classifier output position.
///
/// Loaded once at startup from a text file with one label per line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelCatalog {
    labels: Vec<String>,
}

impl LabelCatalog {
    /// Reads one label per line. Lines are kept verbatim apart from the
    /// line terminator, so blank lines still occupy an index.
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let text = fs::read_to_string(path).map_err(|source| StartupError::CannotRead {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_lines(text.lines());
        log::info!("Loaded {} labels from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label for a classifier index, or `"Unknown"` when out of range.
    pub fn describe(&self, index: usize) -> &str {
        self.labels
            .get(index)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_LABEL)
    }
}
