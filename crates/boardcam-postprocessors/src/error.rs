//! Error types for postprocessing.

use thiserror::Error;

/// Errors raised while emitting G-code.
///
/// Any of these aborts code generation for the whole job; the postprocessor
/// layer never substitutes a guessed value for a missing required field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PostprocessorError {
    /// A required context field is absent.
    #[error("Missing required parameter: {param}")]
    MissingParameter {
        /// Name of the missing field.
        param: &'static str,
    },

    /// No dialect is registered under this name.
    #[error("Unknown postprocessor: {name}")]
    UnknownPostprocessor {
        /// The requested dialect name.
        name: String,
    },
}

/// Result type alias for postprocessor operations.
pub type PostprocessorResult<T> = Result<T, PostprocessorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PostprocessorError::MissingParameter {
            param: "z_depthpercut",
        };
        assert_eq!(err.to_string(), "Missing required parameter: z_depthpercut");

        let err = PostprocessorError::UnknownPostprocessor {
            name: "mach3".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown postprocessor: mach3");
    }
}
