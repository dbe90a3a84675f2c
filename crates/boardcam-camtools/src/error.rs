//! Error types for CAM tool operations.

use boardcam_geometry::GeometryError;
use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CamToolError {
    /// The named source object does not exist in the collection.
    #[error("Could not retrieve object: {name}")]
    ObjectNotFound {
        /// The name that failed to resolve.
        name: String,
    },

    /// An object with this name is already registered.
    #[error("An object named '{name}' already exists")]
    DuplicateName {
        /// The conflicting name.
        name: String,
    },

    /// Cutouts reject multi-geometry objects; they must be converted to
    /// single-geometry first.
    #[error("Cutout operation cannot be done on a multi-geometry object: {name}")]
    MultiGeometry {
        /// The rejected object.
        name: String,
    },

    /// A user-entered value failed to parse, even after the comma-decimal
    /// fallback.
    #[error("{field} value is missing or wrong format: '{input}'")]
    InvalidValue {
        /// The parameter that failed to parse.
        field: &'static str,
        /// The raw input as the user typed it.
        input: String,
    },

    /// Tool diameter must be strictly positive.
    #[error("Tool diameter must be a positive value, got {value}")]
    NonPositiveToolDia {
        /// The rejected diameter.
        value: f64,
    },

    /// The gap layout selector is not in the allowed set for the chosen
    /// algorithm.
    #[error("Gaps value can be only one of: {allowed}, got '{value}'")]
    UnknownGapLayout {
        /// The rejected selector.
        value: String,
        /// The allowed selectors for the algorithm.
        allowed: &'static str,
    },

    /// A geometry operation failed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;
