//! Scalar kinds that can be wrapped by [`Nullable`](super::Nullable)
//!
//! The set is closed: text, boolean, 64-bit signed integer and
//! 64-bit float. Each kind knows how to convert itself to and from a
//! `serde_json::Value` with strict kind matching.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// The four wrapped scalar kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// UTF-8 text
    String,
    /// Boolean
    Bool,
    /// 64-bit signed integer
    Int64,
    /// 64-bit floating point
    Float64,
}

impl ScalarKind {
    /// Returns the kind name used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Bool => "bool",
            ScalarKind::Int64 => "int64",
            ScalarKind::Float64 => "float64",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

mod private {
    pub trait Sealed {}

    impl Sealed for String {}
    impl Sealed for bool {}
    impl Sealed for i64 {}
    impl Sealed for f64 {}
}

/// A primitive that a [`Nullable`](super::Nullable) can carry.
///
/// `Default` supplies the zero value stored while the wrapper is null.
pub trait Scalar:
    private::Sealed
    + Clone
    + Default
    + PartialEq
    + fmt::Debug
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Kind tag for this scalar
    const KIND: ScalarKind;

    /// Extracts a value of exactly this kind, or `None` on a kind mismatch.
    ///
    /// `null` is not handled here; callers check for it first.
    fn from_json(value: &Value) -> Option<Self>;

    /// Converts to a JSON value. Non-finite floats become `Value::Null`.
    fn to_json(&self) -> Value;
}

impl Scalar for String {
    const KIND: ScalarKind = ScalarKind::String;

    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }

    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Scalar for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    fn from_json(value: &Value) -> Option<Self> {
        value.as_bool()
    }

    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Scalar for i64 {
    const KIND: ScalarKind = ScalarKind::Int64;

    // Fractional numbers and integers beyond i64 range are a mismatch
    fn from_json(value: &Value) -> Option<Self> {
        value.as_i64()
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl Scalar for f64 {
    const KIND: ScalarKind = ScalarKind::Float64;

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}
