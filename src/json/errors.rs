//! JSON decode errors
//!
//! Error codes:
//! - SQLJSON_JSON_SYNTAX
//! - SQLJSON_JSON_TYPE_MISMATCH

use std::fmt;

use serde_json::error::Category;
use serde_json::Value;
use thiserror::Error;

use crate::nullable::ScalarKind;

/// Result type for JSON decode operations
pub type JsonResult<T> = Result<T, DecodeError>;

/// Kind of a syntactically valid JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    /// Classifies a parsed JSON value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonKind::Null,
            Value::Bool(_) => JsonKind::Bool,
            Value::Number(_) => JsonKind::Number,
            Value::String(_) => JsonKind::String,
            Value::Array(_) => JsonKind::Array,
            Value::Object(_) => JsonKind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JsonKind::Null => "null",
            JsonKind::Bool => "bool",
            JsonKind::Number => "number",
            JsonKind::String => "string",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failure of a decode-from-text operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Input is not well-formed JSON (includes empty input)
    #[error("syntax error at line {line} column {column}: {reason}")]
    Syntax {
        line: usize,
        column: usize,
        reason: String,
    },

    /// Input is well-formed JSON of the wrong kind
    #[error("cannot decode {actual} into value of type {expected}")]
    TypeMismatch {
        actual: JsonKind,
        expected: ScalarKind,
    },
}

impl DecodeError {
    /// Creates a type mismatch error
    pub fn type_mismatch(actual: JsonKind, expected: ScalarKind) -> Self {
        DecodeError::TypeMismatch { actual, expected }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            DecodeError::Syntax { .. } => "SQLJSON_JSON_SYNTAX",
            DecodeError::TypeMismatch { .. } => "SQLJSON_JSON_TYPE_MISMATCH",
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, DecodeError::Syntax { .. })
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, DecodeError::TypeMismatch { .. })
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        let reason = match err.classify() {
            Category::Eof => "unexpected end of input".to_string(),
            // serde_json appends the position to its message; it is kept separately here
            _ => {
                let message = err.to_string();
                match message.rsplit_once(" at line ") {
                    Some((reason, _)) => reason.to_string(),
                    None => message,
                }
            }
        };
        DecodeError::Syntax {
            line: err.line(),
            column: err.column(),
            reason,
        }
    }
}
