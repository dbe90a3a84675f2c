//! User-facing messages.
//!
//! The core never writes to a UI. Operations report progress and failures as
//! leveled messages through a [`MessageSink`]; the application shell decides
//! how to surface them. [`MessageLog`] is a collecting sink for tests and
//! headless use.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageLevel {
    /// Operation completed as requested.
    Success,
    /// Input problem; nothing was changed, the user should correct and retry.
    Warning,
    /// Operation failed.
    Error,
}

impl fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageLevel::Success => write!(f, "success"),
            MessageLevel::Warning => write!(f, "warning"),
            MessageLevel::Error => write!(f, "error"),
        }
    }
}

/// A leveled message with a free-text payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub level: MessageLevel,
    pub text: String,
}

/// Sink for user-facing messages.
pub trait MessageSink {
    fn emit(&self, level: MessageLevel, text: &str);
}

/// A sink that collects messages in memory.
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Mutex<Vec<Message>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all messages emitted so far.
    pub fn messages(&self) -> Vec<Message> {
        self.messages.lock().unwrap().clone()
    }

    /// The most recent message, if any.
    pub fn last(&self) -> Option<Message> {
        self.messages.lock().unwrap().last().cloned()
    }
}

impl MessageSink for MessageLog {
    fn emit(&self, level: MessageLevel, text: &str) {
        self.messages.lock().unwrap().push(Message {
            level,
            text: text.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_collects_in_order() {
        let log = MessageLog::new();
        log.emit(MessageLevel::Warning, "margin value is missing");
        log.emit(MessageLevel::Success, "cutout finished");

        let messages = log.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].level, MessageLevel::Warning);
        assert_eq!(log.last().unwrap().text, "cutout finished");
    }

    #[test]
    fn test_level_display() {
        assert_eq!(MessageLevel::Success.to_string(), "success");
        assert_eq!(MessageLevel::Warning.to_string(), "warning");
        assert_eq!(MessageLevel::Error.to_string(), "error");
    }
}
