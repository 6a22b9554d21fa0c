//! Custom type functions for the nullable wrappers
//!
//! Each function unwraps a valid wrapper to its bare JSON value and returns
//! `None` for a null wrapper or for a field of any other type. A valid float
//! that is NaN or infinite unwraps to `Some(Value::Null)`: present, but not
//! comparable.

use std::any::Any;

use serde_json::Value;

use crate::nullable::{Nullable, Scalar};

/// Extracts a comparable value from an opaque field, or `None` when absent
pub type CustomTypeFn = fn(&dyn Any) -> Option<Value>;

/// Custom type function for `Nullable<T>`
pub fn nullable_valuer<T: Scalar>(field: &dyn Any) -> Option<Value> {
    field
        .downcast_ref::<Nullable<T>>()
        .and_then(Nullable::as_option)
        .map(Scalar::to_json)
}

pub fn null_string_valuer(field: &dyn Any) -> Option<Value> {
    nullable_valuer::<String>(field)
}

pub fn null_bool_valuer(field: &dyn Any) -> Option<Value> {
    nullable_valuer::<bool>(field)
}

pub fn null_int64_valuer(field: &dyn Any) -> Option<Value> {
    nullable_valuer::<i64>(field)
}

pub fn null_float64_valuer(field: &dyn Any) -> Option<Value> {
    nullable_valuer::<f64>(field)
}
