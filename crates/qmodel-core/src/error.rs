//! Model error types.

use qmodel_labels::{LabelError, LabelKind};

/// Errors that can occur during model operations
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Quadratic interaction with two equal endpoints
    SelfLoop { label: String },
    /// Label does not match the model's label type
    LabelTypeMismatch { expected: LabelKind, found: String },
    /// Unknown label or interaction
    KeyNotFound { key: String },
    /// Array or matrix shape does not match the model
    Shape { expected: usize, found: usize },
    /// Sample is missing a model variable
    IncompleteAssignment { missing: String },
    /// Malformed call arguments
    InvalidArgument { reason: String },
    /// Unsupported or malformed serialized document
    Schema { reason: String },
}

impl ModelError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::SelfLoop { .. } => "INTERACTION_SELF_LOOP",
            ModelError::LabelTypeMismatch { .. } => "LABEL_TYPE_MISMATCH",
            ModelError::KeyNotFound { .. } => "KEY_NOT_FOUND",
            ModelError::Shape { .. } => "SHAPE_MISMATCH",
            ModelError::IncompleteAssignment { .. } => "SAMPLE_INCOMPLETE",
            ModelError::InvalidArgument { .. } => "ARGUMENT_INVALID",
            ModelError::Schema { .. } => "SCHEMA_INVALID",
        }
    }

    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        ModelError::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub(crate) fn schema(reason: impl Into<String>) -> Self {
        ModelError::Schema {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::SelfLoop { label } => write!(
                f,
                "[{}] Interaction ({}, {}) is a self-loop",
                self.code(),
                label,
                label
            ),
            ModelError::LabelTypeMismatch { expected, found } => write!(
                f,
                "[{}] Expected {} labels, found {}",
                self.code(),
                expected.as_str(),
                found
            ),
            ModelError::KeyNotFound { key } => {
                write!(f, "[{}] Key {} does not exist", self.code(), key)
            }
            ModelError::Shape { expected, found } => write!(
                f,
                "[{}] Expected length {}, found {}",
                self.code(),
                expected,
                found
            ),
            ModelError::IncompleteAssignment { missing } => write!(
                f,
                "[{}] Sample has no value for variable {}",
                self.code(),
                missing
            ),
            ModelError::InvalidArgument { reason } => {
                write!(f, "[{}] Invalid argument: {}", self.code(), reason)
            }
            ModelError::Schema { reason } => {
                write!(f, "[{}] Invalid serialized model: {}", self.code(), reason)
            }
        }
    }
}

impl std::error::Error for ModelError {}

impl From<LabelError> for ModelError {
    fn from(err: LabelError) -> Self {
        match err {
            LabelError::KeyNotFound { label } => ModelError::KeyNotFound { key: label },
            LabelError::TypeMismatch { expected, found } => {
                ModelError::LabelTypeMismatch { expected, found }
            }
            LabelError::PositionOutOfRange { position, len } => ModelError::Shape {
                expected: len,
                found: position + 1,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ModelError;
    use qmodel_labels::{LabelError, LabelKind};

    #[test]
    fn display_prefixes_code() {
        let err = ModelError::SelfLoop {
            label: "3".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "[INTERACTION_SELF_LOOP] Interaction (3, 3) is a self-loop"
        );
    }

    #[test]
    fn label_errors_convert() {
        let err: ModelError = LabelError::TypeMismatch {
            expected: LabelKind::Int,
            found: "\"a\"".to_string(),
        }
        .into();
        assert_eq!(err.code(), "LABEL_TYPE_MISMATCH");

        let err: ModelError = LabelError::KeyNotFound {
            label: "7".to_string(),
        }
        .into();
        assert_eq!(
            err,
            ModelError::KeyNotFound {
                key: "7".to_string()
            }
        );
    }
}
