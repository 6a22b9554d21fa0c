//! Validation error types
//!
//! Error codes:
//! - SQLJSON_VALIDATION_FAILED
//! - SQLJSON_INVALID_RULE
//! - SQLJSON_UNSUPPORTED_TYPE

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A single field that failed one rule
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    field: String,
    tag: String,
    param: Option<String>,
    value: Option<Value>,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        tag: impl Into<String>,
        param: Option<String>,
        value: Option<Value>,
    ) -> Self {
        Self {
            field: field.into(),
            tag: tag.into(),
            param,
            value,
        }
    }

    /// Field name as declared by the struct
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Tag of the rule that failed, e.g. `required` or `min`
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Rule parameter, e.g. `1000` for `min=1000`
    pub fn param(&self) -> Option<&str> {
        self.param.as_deref()
    }

    /// Value the rule was applied to; `None` when absent
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}' failed on the '{}' rule", self.field, self.tag)?;
        if let Some(param) = &self.param {
            write!(f, " ({})", param)?;
        }
        Ok(())
    }
}

/// All field failures of one struct, in declaration order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for ValidationErrors {
    type Output = FieldError;

    fn index(&self, index: usize) -> &FieldError {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

/// Validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// One or more fields failed their rules
    #[error("validation failed: {0}")]
    Failed(ValidationErrors),

    /// A rule tag is unknown, malformed, or does not apply to the field's type
    #[error("invalid rule '{rule}' on field '{field}': {reason}")]
    InvalidRule {
        field: String,
        rule: String,
        reason: String,
    },

    /// The field's type has no registered custom type function and no built-in handling
    #[error("field '{field}' has an unsupported type for rule '{rule}'")]
    UnsupportedType { field: String, rule: String },
}

impl ValidationError {
    pub fn invalid_rule(
        field: impl Into<String>,
        rule: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ValidationError::InvalidRule {
            field: field.into(),
            rule: rule.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::Failed(_) => "SQLJSON_VALIDATION_FAILED",
            ValidationError::InvalidRule { .. } => "SQLJSON_INVALID_RULE",
            ValidationError::UnsupportedType { .. } => "SQLJSON_UNSUPPORTED_TYPE",
        }
    }

    /// Returns the field failures when validation ran to completion
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ValidationError::Failed(errors) => Some(errors),
            _ => None,
        }
    }
}
