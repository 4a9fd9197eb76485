//! Error taxonomy shared by the loader and the renderer.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for every stage of the load → plot → present pipeline.
#[derive(Debug, Error)]
pub enum VizError {
    /// The results file does not exist, cannot be opened, or failed mid-read.
    #[error("cannot read {}: {source}", path.display())]
    DataUnavailable {
        /// Path of the results file.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The results file is missing a column, holds a non-numeric value, or has no rows.
    #[error("malformed data in {}: {reason}", path.display())]
    MalformedData {
        /// Path (or origin label) of the results source.
        path: PathBuf,
        /// Human readable description of the violation.
        reason: String,
    },
    /// No display surface could be reached or the drawing backend failed.
    #[error("no display surface available: {reason}")]
    RenderUnavailable {
        /// Backend-provided description.
        reason: String,
    },
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, VizError>;

/// Coarse classification of a [`VizError`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// See [`VizError::DataUnavailable`].
    DataUnavailable,
    /// See [`VizError::MalformedData`].
    MalformedData,
    /// See [`VizError::RenderUnavailable`].
    RenderUnavailable,
}

/// Pipeline stage that produced an error.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Stage {
    /// Reading and parsing the results table.
    Load,
    /// Building, drawing or presenting the figure.
    Render,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Load => f.write_str("load"),
            Stage::Render => f.write_str("render"),
        }
    }
}

impl VizError {
    pub(crate) fn unavailable(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        VizError::DataUnavailable {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        VizError::MalformedData {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    pub(crate) fn render(reason: impl fmt::Display) -> Self {
        VizError::RenderUnavailable {
            reason: reason.to_string(),
        }
    }

    /// Returns the variant without its payload.
    pub fn kind(&self) -> ErrorKind {
        match self {
            VizError::DataUnavailable { .. } => ErrorKind::DataUnavailable,
            VizError::MalformedData { .. } => ErrorKind::MalformedData,
            VizError::RenderUnavailable { .. } => ErrorKind::RenderUnavailable,
        }
    }

    /// Returns the stage the error originated from.
    pub fn stage(&self) -> Stage {
        match self.kind() {
            ErrorKind::DataUnavailable | ErrorKind::MalformedData => Stage::Load,
            ErrorKind::RenderUnavailable => Stage::Render,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_follow_kinds() {
        let missing = VizError::unavailable(
            "results.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(missing.kind(), ErrorKind::DataUnavailable);
        assert_eq!(missing.stage(), Stage::Load);

        let bad = VizError::malformed("results.csv", "column 'raw' not found");
        assert_eq!(bad.stage(), Stage::Load);
        assert_eq!(
            bad.to_string(),
            "malformed data in results.csv: column 'raw' not found"
        );

        let headless = VizError::render("no X11 display");
        assert_eq!(headless.kind(), ErrorKind::RenderUnavailable);
        assert_eq!(headless.stage(), Stage::Render);
        assert_eq!(headless.stage().to_string(), "render");
    }
}
