//! Label error types.

use crate::label::LabelKind;

/// Errors raised by label decoding and the label index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// Label is not present in the index
    KeyNotFound { label: String },
    /// Label does not decode as the expected label type
    TypeMismatch { expected: LabelKind, found: String },
    /// Position is outside `0..len`
    PositionOutOfRange { position: usize, len: usize },
}

impl LabelError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            LabelError::KeyNotFound { .. } => "LABEL_NOT_FOUND",
            LabelError::TypeMismatch { .. } => "LABEL_TYPE_MISMATCH",
            LabelError::PositionOutOfRange { .. } => "LABEL_POSITION_OUT_OF_RANGE",
        }
    }
}

impl std::fmt::Display for LabelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelError::KeyNotFound { label } => {
                write!(f, "[{}] Label {} does not exist", self.code(), label)
            }
            LabelError::TypeMismatch { expected, found } => write!(
                f,
                "[{}] Expected a {} label, found {}",
                self.code(),
                expected.as_str(),
                found
            ),
            LabelError::PositionOutOfRange { position, len } => write!(
                f,
                "[{}] Position {} is out of range for {} variables",
                self.code(),
                position,
                len
            ),
        }
    }
}

impl std::error::Error for LabelError {}
