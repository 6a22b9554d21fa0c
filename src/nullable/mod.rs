//! Nullable scalar wrapper
//!
//! `Nullable<T>` pairs a scalar value with a validity flag, the same shape a
//! relational driver uses for a nullable column.
//!
//! # Invariant
//!
//! While the wrapper is null its value is `T::default()`. Fields are private
//! and every constructor and `decode_json` enforce this.

mod scalar;

pub use scalar::{Scalar, ScalarKind};

/// An optional scalar value with an explicit validity flag
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Nullable<T: Scalar> {
    value: T,
    valid: bool,
}

/// Nullable UTF-8 text
pub type NullString = Nullable<String>;
/// Nullable boolean
pub type NullBool = Nullable<bool>;
/// Nullable 64-bit signed integer
pub type NullInt64 = Nullable<i64>;
/// Nullable 64-bit float
pub type NullFloat64 = Nullable<f64>;

impl<T: Scalar> Nullable<T> {
    /// Creates a present value
    pub fn new(value: T) -> Self {
        Self { value, valid: true }
    }

    /// Creates a null value
    pub fn null() -> Self {
        Self {
            value: T::default(),
            valid: false,
        }
    }

    /// Creates a value from an explicit pair.
    ///
    /// When `valid` is false the given value is discarded.
    pub fn from_parts(value: T, valid: bool) -> Self {
        if valid {
            Self::new(value)
        } else {
            Self::null()
        }
    }

    /// Returns the wrapped value; the zero value when null
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns true if a value is present
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns true if the value is null
    pub fn is_null(&self) -> bool {
        !self.valid
    }

    /// Returns the scalar kind of this wrapper
    pub fn kind(&self) -> ScalarKind {
        T::KIND
    }

    /// Returns a reference to the value, or `None` when null
    pub fn as_option(&self) -> Option<&T> {
        if self.valid {
            Some(&self.value)
        } else {
            None
        }
    }

    /// Returns a copy of the value, or `None` when null
    pub fn to_option(&self) -> Option<T> {
        self.as_option().cloned()
    }

    pub fn into_option(self) -> Option<T> {
        if self.valid {
            Some(self.value)
        } else {
            None
        }
    }
}

impl<T: Scalar> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::new(v),
            None => Self::null(),
        }
    }
}

impl<T: Scalar> From<Nullable<T>> for Option<T> {
    fn from(value: Nullable<T>) -> Self {
        value.into_option()
    }
}

impl<T: Scalar> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl From<&str> for NullString {
    fn from(value: &str) -> Self {
        Self::new(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_null() {
        let ns = NullString::default();
        assert!(ns.is_null());
        assert_eq!(ns.value(), "");

        let nf = NullFloat64::default();
        assert!(!nf.is_valid());
        assert_eq!(*nf.value(), 0.0);
    }

    #[test]
    fn test_from_parts_discards_value_when_invalid() {
        let ni = NullInt64::from_parts(42, false);
        assert!(ni.is_null());
        assert_eq!(*ni.value(), 0);
        assert_eq!(ni, NullInt64::null());

        let ni = NullInt64::from_parts(42, true);
        assert_eq!(ni, NullInt64::new(42));
    }

    #[test]
    fn test_as_option() {
        assert_eq!(NullString::from("Gabriel").as_option().map(String::as_str), Some("Gabriel"));
        assert_eq!(NullString::null().as_option(), None);
        assert_eq!(NullBool::new(false).as_option(), Some(&false));
        assert_eq!(NullBool::null().as_option(), None);
        assert_eq!(NullInt64::new(0).as_option(), Some(&0));
        assert_eq!(NullFloat64::null().as_option(), None);
    }

    #[test]
    fn test_to_option_is_a_copy() {
        let ns = NullString::from("abc");
        let mut copy = ns.to_option().unwrap();
        copy.push('d');
        assert_eq!(ns.value(), "abc");
    }

    #[test]
    fn test_option_conversions() {
        let nb: NullBool = Some(true).into();
        assert_eq!(nb, NullBool::new(true));

        let nb: NullBool = None.into();
        assert!(nb.is_null());

        let opt: Option<f64> = NullFloat64::new(1.5).into();
        assert_eq!(opt, Some(1.5));

        let opt: Option<f64> = NullFloat64::null().into();
        assert_eq!(opt, None);
    }

    #[test]
    fn test_kind() {
        assert_eq!(NullString::null().kind(), ScalarKind::String);
        assert_eq!(NullBool::null().kind(), ScalarKind::Bool);
        assert_eq!(NullInt64::null().kind(), ScalarKind::Int64);
        assert_eq!(NullFloat64::null().kind(), ScalarKind::Float64);
    }
}
