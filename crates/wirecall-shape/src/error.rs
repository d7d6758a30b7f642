use crate::path::FieldPath;

/// A payload failed validation against a shape.
///
/// Carries the location of the first violation and a human-readable
/// reason. The path uses JSON-Pointer-style segments (`/tags/2`); the
/// root of the payload renders as `/`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid input at '{path}': {reason}")]
pub struct ShapeError {
    /// Location of the offending value within the payload.
    pub path: FieldPath,
    /// What was wrong with the value found there.
    pub reason: String,
}

impl ShapeError {
    pub(crate) fn new(path: FieldPath, reason: impl Into<String>) -> Self {
        Self {
            path,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShapeError>;
