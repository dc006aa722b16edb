// Layer 1: Standard library imports
use std::fmt::{self, Display};

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Layer 3: Internal module imports
use crate::message::Category;

/// The terminal error envelope.
///
/// An `ErrorEvent` is an ordinary message of category [`Category::Error`]:
/// it is yielded to the caller like any other message, and the dispatch
/// terminates right after (no further jobs run). It is never thrown.
///
/// User actors may emit this type directly, or declare richer error
/// messages of their own with `error MyError;` in
/// [`messages!`](crate::messages) — any error-category message terminates
/// the dispatch the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEvent {
    /// Transport-agnostic status code; 500 for wrapped internal faults.
    pub status_code: u16,

    /// Human-readable description.
    pub message: String,

    /// Optional machine-readable domain code.
    pub semantic_code: Option<i64>,

    /// Optional structured detail payload.
    pub details: Option<Value>,
}

impl ErrorEvent {
    /// Create an error envelope with a status code and message.
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            semantic_code: None,
            details: None,
        }
    }

    /// Shorthand for an internal fault (status 500).
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(500, message)
    }

    /// Attach a domain-specific code.
    pub fn with_semantic_code(mut self, code: i64) -> Self {
        self.semantic_code = Some(code);
        self
    }

    /// Attach a structured detail payload.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl Display for ErrorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status_code, self.message)
    }
}

crate::__declare_message!(ErrorEvent, Category::Error);
