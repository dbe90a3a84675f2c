//! # BoardCAM Core
//!
//! Core types shared by every BoardCAM crate:
//! - Machine unit system (MM, IN) and conversions
//! - Parsing of user-entered numeric values (with comma-decimal fallback)
//! - Leveled user-facing messages and the sink they are delivered through

pub mod error;
pub mod message;
pub mod units;

pub use error::NumericParseError;
pub use message::{Message, MessageLevel, MessageLog, MessageSink};
pub use units::{parse_user_float, Units};
