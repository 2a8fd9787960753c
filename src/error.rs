//! Crate-level error types.

use std::fmt;

use crate::batch::{IndexError, ScanError};
use crate::compile::ValidationError;
use crate::emit::ExecutionError;
use crate::source::ResolutionError;

/// Errors produced by the pdbrender crate.
///
/// Each variant names the stage that failed; the wrapped error carries the
/// offending value (and, for execution failures, the renderer's raw
/// diagnostics).
#[derive(Debug)]
pub enum RenderError {
    /// A required field was invalid; no file or process work was done.
    Validation(ValidationError),
    /// The structure reference could not be turned into a local file.
    Resolution(ResolutionError),
    /// The renderer failed, timed out or produced no image.
    Execution(ExecutionError),
    /// Folder scan for batch input failed.
    Scan(ScanError),
    /// Batch selection index out of range.
    Index(IndexError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML request parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "validation failed: {e}"),
            Self::Resolution(e) => {
                write!(f, "source resolution failed: {e}")
            }
            Self::Execution(e) => write!(f, "renderer execution failed: {e}"),
            Self::Scan(e) => write!(f, "batch scan failed: {e}"),
            Self::Index(e) => write!(f, "batch selection failed: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "request parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Resolution(e) => Some(e),
            Self::Execution(e) => Some(e),
            Self::Scan(e) => Some(e),
            Self::Index(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::OptionsParse(_) => None,
        }
    }
}

impl From<ValidationError> for RenderError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<ResolutionError> for RenderError {
    fn from(e: ResolutionError) -> Self {
        Self::Resolution(e)
    }
}

impl From<ExecutionError> for RenderError {
    fn from(e: ExecutionError) -> Self {
        Self::Execution(e)
    }
}

impl From<ScanError> for RenderError {
    fn from(e: ScanError) -> Self {
        Self::Scan(e)
    }
}

impl From<IndexError> for RenderError {
    fn from(e: IndexError) -> Self {
        Self::Index(e)
    }
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
