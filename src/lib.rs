//! sqljson - Nullable scalar types for SQL, JSON and field validation
//!
//! `NullString`, `NullBool`, `NullInt64` and `NullFloat64` carry an optional
//! value that:
//! - scans from and binds to nullable SQLite columns (`rusqlite`)
//! - encodes to JSON as the bare value or `null`, and decodes strictly
//! - unwraps for rule-tag validation through registered custom type functions

pub mod json;
pub mod nullable;
pub mod observability;
pub mod sql;
pub mod validation;

pub use json::{DecodeError, JsonKind, JsonResult};
pub use nullable::{NullBool, NullFloat64, NullInt64, NullString, Nullable, Scalar, ScalarKind};
