//! Error types for geometry operations.

use thiserror::Error;

/// Errors produced by geometry operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The shape set contains no geometry to operate on.
    #[error("geometry is empty")]
    EmptyGeometry,

    /// The input collapses to fewer dimensions than the operation needs.
    #[error("degenerate geometry: {reason}")]
    Degenerate {
        /// What made the input degenerate.
        reason: String,
    },

    /// The clip region handed to a boolean difference is unusable.
    #[error("invalid clip region: {reason}")]
    InvalidClipRegion {
        /// What made the clip region invalid.
        reason: String,
    },
}

/// Result type alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
