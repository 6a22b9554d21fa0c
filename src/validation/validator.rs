//! Struct validator
//!
//! Validation semantics:
//! - Fields are checked in declaration order
//! - Per field, the first failing rule is reported
//! - `required` fails only on an absent value; zero values are present
//! - Other rules are skipped for absent values
//! - A value read as JSON `null` (a non-finite float) is present
//! - A registered custom type function decides how a field's value is read
//!
//! Validator does not mutate the struct. Validation is deterministic.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use serde_json::Value;

use super::adapters::{
    null_bool_valuer, null_float64_valuer, null_int64_valuer, null_string_valuer, CustomTypeFn,
};
use super::config::ValidatorConfig;
use super::errors::{FieldError, ValidationError, ValidationErrors, ValidationResult};
use super::rules::{parse_rules, Rule};
use crate::nullable::{NullBool, NullFloat64, NullInt64, NullString};
use crate::observability::{log_event_with_fields, Event};

/// One field of a struct under validation
#[derive(Clone, Copy)]
pub struct Field<'a> {
    name: &'a str,
    value: &'a dyn Any,
    rules: &'a str,
}

impl<'a> Field<'a> {
    pub fn new(name: &'a str, value: &'a dyn Any, rules: &'a str) -> Self {
        Self { name, value, rules }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn value(&self) -> &'a dyn Any {
        self.value
    }

    pub fn rules(&self) -> &'a str {
        self.rules
    }
}

/// A struct whose fields can be validated.
///
/// ```ignore
/// impl Validate for Account {
///     fn fields(&self) -> Vec<Field<'_>> {
///         vec![Field::new("ContactEmail", &self.contact_email, "required,email")]
///     }
/// }
/// ```
pub trait Validate {
    /// Lists fields in declaration order
    fn fields(&self) -> Vec<Field<'_>>;

    /// Name used in log events
    fn struct_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// How a field's value was read
#[derive(Debug, Clone, PartialEq)]
enum Extracted {
    Present(Value),
    Absent,
    /// Neither registered nor built in
    Opaque,
}

impl Extracted {
    fn from_custom(value: Option<Value>) -> Self {
        match value {
            Some(v) => Extracted::Present(v),
            None => Extracted::Absent,
        }
    }
}

macro_rules! extract_builtin {
    ($value:expr, $($ty:ty),+ $(,)?) => {
        $(
            if let Some(v) = $value.downcast_ref::<$ty>() {
                return Extracted::from_custom(Some(Value::from(v.clone())));
            }
            if let Some(v) = $value.downcast_ref::<Option<$ty>>() {
                return Extracted::from_custom(v.clone().map(Value::from));
            }
        )+
    };
}

fn extract_builtin(value: &dyn Any) -> Extracted {
    extract_builtin!(value, String, &'static str, bool, i64, i32, u32, u64, f64, f32);
    Extracted::Opaque
}

/// Rule-tag validator with a custom type registry
pub struct Validator {
    custom_types: HashMap<TypeId, CustomTypeFn>,
    config: ValidatorConfig,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Creates a validator with the default config and no custom types
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            custom_types: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Registers a function that reads values of type `T`.
    ///
    /// A later registration for the same type replaces the earlier one.
    pub fn register_custom_type_fn<T: Any>(&mut self, f: CustomTypeFn) -> &mut Self {
        self.custom_types.insert(TypeId::of::<T>(), f);
        log_event_with_fields(
            Event::AdapterRegistered,
            &[("type", std::any::type_name::<T>())],
        );
        self
    }

    /// Registers the four nullable wrapper functions
    pub fn register_nullable_types(&mut self) -> &mut Self {
        self.register_custom_type_fn::<NullString>(null_string_valuer)
            .register_custom_type_fn::<NullBool>(null_bool_valuer)
            .register_custom_type_fn::<NullInt64>(null_int64_valuer)
            .register_custom_type_fn::<NullFloat64>(null_float64_valuer)
    }

    pub fn has_custom_type<T: Any>(&self) -> bool {
        self.custom_types.contains_key(&TypeId::of::<T>())
    }

    /// Validates every field of a struct.
    ///
    /// # Errors
    ///
    /// - `Failed` with one entry per failing field
    /// - `InvalidRule` if a rule tag is malformed or does not fit the value
    /// - `UnsupportedType` if a non-`required` rule targets an unreadable type
    pub fn validate_struct<S: Validate + ?Sized>(&self, s: &S) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();

        for field in s.fields() {
            if let Some(err) = self.check_field(&field)? {
                errors.push(err);
                if self.config.fail_fast {
                    break;
                }
            }
        }

        if errors.is_empty() {
            return Ok(());
        }

        if self.config.log_failures {
            let failed = errors.len().to_string();
            log_event_with_fields(
                Event::ValidationFailed,
                &[("struct", s.struct_name()), ("failed_fields", failed.as_str())],
            );
        }
        Err(ValidationError::Failed(errors))
    }

    /// Validates a single value against a rule list
    pub fn validate_var(&self, value: &dyn Any, rules: &str) -> ValidationResult<()> {
        match self.check_field(&Field::new("", value, rules))? {
            Some(err) => {
                let mut errors = ValidationErrors::new();
                errors.push(err);
                Err(ValidationError::Failed(errors))
            }
            None => Ok(()),
        }
    }

    /// Returns the first rule the field fails, if any
    fn check_field(&self, field: &Field<'_>) -> ValidationResult<Option<FieldError>> {
        let specs = parse_rules(field.name(), field.rules())?;
        if specs.is_empty() {
            return Ok(None);
        }

        let extracted = self.extract(field.value());

        for spec in &specs {
            let value = match (&spec.rule, &extracted) {
                (Rule::Required, Extracted::Absent) => {
                    return Ok(Some(FieldError::new(field.name(), "required", None, None)));
                }
                (_, Extracted::Absent) | (Rule::Required, _) => continue,
                (_, Extracted::Opaque) => {
                    return Err(ValidationError::UnsupportedType {
                        field: field.name().to_string(),
                        rule: spec.to_string(),
                    });
                }
                (_, Extracted::Present(value)) => value,
            };

            match spec.rule.check(value) {
                Ok(true) => {}
                Ok(false) => {
                    return Ok(Some(FieldError::new(
                        field.name(),
                        spec.rule.tag(),
                        spec.param.clone(),
                        Some(value.clone()),
                    )));
                }
                Err(reason) => {
                    return Err(ValidationError::invalid_rule(
                        field.name(),
                        spec.to_string(),
                        reason,
                    ));
                }
            }
        }

        Ok(None)
    }

    fn extract(&self, value: &dyn Any) -> Extracted {
        match self.custom_types.get(&value.type_id()) {
            Some(f) => Extracted::from_custom(f(value)),
            None => extract_builtin(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Profile {
        name: String,
        nickname: Option<String>,
        age: i32,
        tags: Vec<String>,
    }

    impl Validate for Profile {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field::new("Name", &self.name, "required,min=2"),
                Field::new("Nickname", &self.nickname, "required"),
                Field::new("Age", &self.age, "min=18,max=130"),
                Field::new("Tags", &self.tags, ""),
            ]
        }
    }

    fn profile() -> Profile {
        Profile {
            name: "Ada".into(),
            nickname: Some("ada".into()),
            age: 36,
            tags: vec![],
        }
    }

    #[test]
    fn test_builtin_types_pass() {
        let validator = Validator::new();
        assert!(validator.validate_struct(&profile()).is_ok());
    }

    #[test]
    fn test_builtin_option_none_is_absent() {
        let validator = Validator::new();
        let mut p = profile();
        p.nickname = None;
        p.age = 12;

        let err = validator.validate_struct(&p).unwrap_err();
        let errors = err.field_errors().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field(), "Nickname");
        assert_eq!(errors[0].tag(), "required");
        assert_eq!(errors[1].field(), "Age");
        assert_eq!(errors[1].tag(), "min");
        assert_eq!(errors[1].param(), Some("18"));
        assert_eq!(errors[1].value(), Some(&json!(12)));
    }

    #[test]
    fn test_fail_fast_stops_at_first_field() {
        let validator = Validator::with_config(ValidatorConfig::fail_fast());
        let mut p = profile();
        p.nickname = None;
        p.age = 12;

        let err = validator.validate_struct(&p).unwrap_err();
        assert_eq!(err.field_errors().unwrap().len(), 1);
    }

    #[test]
    fn test_first_failing_rule_per_field() {
        let validator = Validator::new();
        let err = validator.validate_var(&"", "min=1,email").unwrap_err();
        let errors = err.field_errors().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].tag(), "min");
    }

    #[test]
    fn test_opaque_type_passes_required_only() {
        let validator = Validator::new();
        let tags: Vec<String> = vec![];
        assert!(validator.validate_var(&tags, "required").is_ok());

        let err = validator.validate_var(&tags, "min=1").unwrap_err();
        assert_eq!(err.code(), "SQLJSON_UNSUPPORTED_TYPE");
    }

    #[test]
    fn test_custom_type_fn_wins() {
        fn always_absent(_: &dyn Any) -> Option<Value> {
            None
        }

        let mut validator = Validator::new();
        validator.register_custom_type_fn::<i64>(always_absent);
        assert!(validator.has_custom_type::<i64>());

        let err = validator.validate_var(&5i64, "required").unwrap_err();
        assert_eq!(err.field_errors().unwrap()[0].tag(), "required");
    }

    #[test]
    fn test_register_nullable_types() {
        let mut validator = Validator::new();
        assert!(!validator.has_custom_type::<NullString>());
        validator.register_nullable_types();
        assert!(validator.has_custom_type::<NullString>());
        assert!(validator.has_custom_type::<NullBool>());
        assert!(validator.has_custom_type::<NullInt64>());
        assert!(validator.has_custom_type::<NullFloat64>());
    }

    #[test]
    fn test_rule_type_mismatch_is_invalid_rule() {
        let validator = Validator::new();
        let err = validator.validate_var(&true, "min=1").unwrap_err();
        assert_eq!(err.code(), "SQLJSON_INVALID_RULE");
        assert!(err.to_string().contains("min=1"));
    }

    #[test]
    fn test_non_finite_float_is_present() {
        let mut validator = Validator::new();
        validator.register_nullable_types();

        for f in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(validator.validate_var(&NullFloat64::new(f), "required").is_ok());
            assert!(validator.validate_var(&f, "required").is_ok());

            let err = validator.validate_var(&NullFloat64::new(f), "max=1").unwrap_err();
            let errors = err.field_errors().unwrap();
            assert_eq!(errors[0].tag(), "max");
            assert_eq!(errors[0].value(), Some(&Value::Null));
        }
        assert!(validator.validate_var(&NullFloat64::null(), "required").is_err());
    }

    #[test]
    fn test_large_int64_compares_exactly() {
        let mut validator = Validator::new();
        validator.register_nullable_types();

        let err = validator
            .validate_var(&NullInt64::new(9_007_199_254_740_993), "max=9007199254740992")
            .unwrap_err();
        assert_eq!(err.field_errors().unwrap()[0].tag(), "max");
        assert!(validator
            .validate_var(&NullInt64::new(i64::MAX), "min=9223372036854775807")
            .is_ok());
        assert!(validator
            .validate_var(&(i64::MAX - 1), "min=9223372036854775807")
            .is_err());
    }

    #[test]
    fn test_malformed_rule_is_rejected_even_for_absent_values() {
        let validator = Validator::new();
        let none: Option<i64> = None;
        assert!(validator.validate_var(&none, "between=1").is_err());
    }
}
