//! Error types shared across BoardCAM crates.

use thiserror::Error;

/// A user-entered numeric value could not be parsed, even after the
/// comma-decimal fallback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid numeric value: '{input}'")]
pub struct NumericParseError {
    /// The raw input as the user typed it.
    pub input: String,
}
