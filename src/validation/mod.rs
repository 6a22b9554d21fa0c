//! Field validation for structs holding nullable scalars
//!
//! Structs list their fields with rule tags (`required`, `email`, `min=N`,
//! `max=N`, `len=N`). A [`Validator`] reads each field, either through a
//! registered custom type function or through built-in handling of bare
//! primitives, and applies the rules to the extracted value.
//!
//! The nullable wrappers are opaque to the validator until their custom
//! type functions are registered:
//!
//! ```ignore
//! let mut validator = Validator::new();
//! validator.register_nullable_types();
//! validator.validate_struct(&account)?;
//! ```

mod adapters;
mod config;
mod errors;
mod rules;
mod validator;

pub use adapters::{
    null_bool_valuer, null_float64_valuer, null_int64_valuer, null_string_valuer,
    nullable_valuer, CustomTypeFn,
};
pub use config::ValidatorConfig;
pub use errors::{FieldError, ValidationError, ValidationErrors, ValidationResult};
pub use rules::{parse_rules, Limit, Rule, RuleSpec};
pub use validator::{Field, Validate, Validator};
