//! Machine unit system and user input parsing.
//!
//! Handles the MM/IN unit declaration carried through toolpath export and
//! the parsing of numeric values typed by the user. Locales that use a comma
//! as the decimal separator are supported by retrying the parse with the
//! comma replaced by a point; this is a documented fallback, not an error.

use crate::error::NumericParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Machine coordinate units (millimeters or inches)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Units {
    /// Millimeters (metric)
    MM,
    /// Inches (imperial)
    IN,
}

impl Units {
    /// Convert a value from one unit to another.
    ///
    /// Returns the original value when the units are the same.
    pub fn convert(value: f64, from: Units, to: Units) -> f64 {
        match (from, to) {
            (Units::MM, Units::IN) => value / 25.4,
            (Units::IN, Units::MM) => value * 25.4,
            _ => value,
        }
    }
}

impl Default for Units {
    fn default() -> Self {
        Self::MM
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Units::MM => write!(f, "mm"),
            Units::IN => write!(f, "in"),
        }
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "metric" => Ok(Units::MM),
            "in" | "inch" | "imperial" => Ok(Units::IN),
            _ => Err(format!("Unknown unit system: {}", s)),
        }
    }
}

/// Parse a user-entered numeric value.
///
/// The input is trimmed and parsed as `f64`. On failure the parse is retried
/// with any comma replaced by a decimal point, so `"1,5"` parses to `1.5`.
/// Only when both attempts fail is an error returned, carrying the raw
/// input for the user-facing message.
pub fn parse_user_float(input: &str) -> Result<f64, NumericParseError> {
    let trimmed = input.trim();
    if let Ok(value) = trimmed.parse::<f64>() {
        return Ok(value);
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| NumericParseError {
            input: input.to_string(),
        })
}
