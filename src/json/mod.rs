//! JSON boundary for nullable scalars
//!
//! A null wrapper encodes as `null` and a present one as its bare value.
//! Decoding accepts `null` or a value of exactly the wrapped kind.
//!
//! Two entry points are provided:
//! - `serde` impls, so wrappers work as fields of any derived struct
//! - `encode_json` / `decode_json`, which report failures as [`DecodeError`]

mod errors;

pub use errors::{DecodeError, JsonKind, JsonResult};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::nullable::{Nullable, Scalar};
use crate::observability::{log_event_with_fields, Event};

impl<T: Scalar> Nullable<T> {
    /// Encodes to JSON text. Never fails.
    pub fn encode_json(&self) -> Vec<u8> {
        self.to_json_value().to_string().into_bytes()
    }

    /// Returns the JSON value: the bare value, or `Value::Null` when null
    pub fn to_json_value(&self) -> Value {
        match self.as_option() {
            Some(v) => v.to_json(),
            None => Value::Null,
        }
    }

    /// Decodes JSON text into this wrapper.
    ///
    /// On error `self` is left untouched.
    pub fn decode_json(&mut self, raw: &[u8]) -> JsonResult<()> {
        match Self::from_json_slice(raw) {
            Ok(decoded) => {
                *self = decoded;
                Ok(())
            }
            Err(err) => Err(Self::rejected(err)),
        }
    }

    fn rejected(err: DecodeError) -> DecodeError {
        log_event_with_fields(
            Event::DecodeRejected,
            &[("kind", T::KIND.as_str()), ("code", err.code())],
        );
        err
    }

    /// Decodes JSON text into a new wrapper
    pub fn from_json_slice(raw: &[u8]) -> JsonResult<Self> {
        let value: Value = serde_json::from_slice(raw)?;
        Self::from_json_value(&value)
    }

    /// Converts an already parsed JSON value
    pub fn from_json_value(value: &Value) -> JsonResult<Self> {
        if value.is_null() {
            return Ok(Self::null());
        }
        T::from_json(value)
            .map(Self::new)
            .ok_or_else(|| DecodeError::type_mismatch(JsonKind::of(value), T::KIND))
    }
}

impl<T: Scalar> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_option() {
            Some(v) => v.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

// Goes through `Option<Value>` so a missing struct field decodes as null
impl<'de, T: Scalar> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<Value>::deserialize(deserializer)? {
            Some(value) => Self::from_json_value(&value)
                .map_err(|err| D::Error::custom(Self::rejected(err))),
            None => Ok(Self::null()),
        }
    }
}
