//! Relational boundary for nullable scalars
//!
//! | Rust type     | SQLite type(s)     |
//! |---------------|--------------------|
//! | `NullString`  | TEXT, NULL         |
//! | `NullBool`    | INTEGER, NULL      |
//! | `NullInt64`   | INTEGER, NULL      |
//! | `NullFloat64` | REAL, INTEGER, NULL|
//!
//! Reading a `NULL` column yields the null state with a zero value. Writing a
//! null wrapper binds `NULL`.

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, Value as SqlValue, ValueRef};

use crate::nullable::{Nullable, Scalar};

impl<T: Scalar + FromSql> FromSql for Nullable<T> {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Null => Ok(Nullable::null()),
            other => T::column_result(other).map(Nullable::new),
        }
    }
}

impl<T: Scalar + ToSql> ToSql for Nullable<T> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self.as_option() {
            Some(v) => v.to_sql(),
            None => Ok(ToSqlOutput::Owned(SqlValue::Null)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nullable::{NullBool, NullFloat64, NullInt64, NullString};
    use rusqlite::types::FromSqlError;

    #[test]
    fn test_null_column_scans_to_null_state() {
        assert_eq!(NullString::column_result(ValueRef::Null).unwrap(), NullString::null());
        assert_eq!(NullBool::column_result(ValueRef::Null).unwrap(), NullBool::null());
        assert_eq!(NullInt64::column_result(ValueRef::Null).unwrap(), NullInt64::null());
        assert_eq!(NullFloat64::column_result(ValueRef::Null).unwrap(), NullFloat64::null());
    }

    #[test]
    fn test_present_column_scans_value() {
        assert_eq!(
            NullString::column_result(ValueRef::Text(b"gmedina@ooyala.com")).unwrap(),
            NullString::from("gmedina@ooyala.com")
        );
        assert_eq!(NullBool::column_result(ValueRef::Integer(1)).unwrap(), NullBool::new(true));
        assert_eq!(NullBool::column_result(ValueRef::Integer(0)).unwrap(), NullBool::new(false));
        assert_eq!(NullInt64::column_result(ValueRef::Integer(1001)).unwrap(), NullInt64::new(1001));
        assert_eq!(NullFloat64::column_result(ValueRef::Real(555.55)).unwrap(), NullFloat64::new(555.55));
    }

    #[test]
    fn test_mismatched_column_is_an_error() {
        assert!(matches!(
            NullInt64::column_result(ValueRef::Text(b"abc")),
            Err(FromSqlError::InvalidType)
        ));
        assert!(matches!(
            NullString::column_result(ValueRef::Integer(3)),
            Err(FromSqlError::InvalidType)
        ));
    }

    #[test]
    fn test_null_wrapper_binds_null() {
        let v = NullInt64::null();
        assert_eq!(v.to_sql().unwrap(), ToSqlOutput::Owned(SqlValue::Null));
    }

    #[test]
    fn test_present_wrapper_binds_native_value() {
        let v = NullInt64::new(7);
        assert_eq!(v.to_sql().unwrap(), ToSqlOutput::Owned(SqlValue::Integer(7)));

        let s = NullString::from("abc");
        assert_eq!(s.to_sql().unwrap(), ToSqlOutput::Borrowed(ValueRef::Text(b"abc")));
    }
}
