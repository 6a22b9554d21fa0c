//! Rule tags
//!
//! A field's rules are a comma separated list such as
//! `required,email` or `required,min=1000`.
//!
//! Rules other than `required` only run on present values. Strings are
//! measured by character count, numbers by value. Integer limits compare
//! exactly against integer values; a non-finite float (read as JSON `null`)
//! fails every range rule.

use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use super::errors::{ValidationError, ValidationResult};

// HTML living standard "valid e-mail address"
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("valid email regex"))
}

/// Parameter of a range rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Limit {
    Int(i64),
    Float(f64),
}

impl Limit {
    /// Orders a measured value against this limit.
    ///
    /// `None` means the two are not comparable (NaN).
    fn compare(&self, measured: &Measure) -> Option<Ordering> {
        match (measured, self) {
            (Measure::Int(v), Limit::Int(l)) => Some(v.cmp(l)),
            (Measure::Int(v), Limit::Float(l)) => (*v as f64).partial_cmp(l),
            (Measure::AboveI64(_), Limit::Int(_)) => Some(Ordering::Greater),
            (Measure::AboveI64(v), Limit::Float(l)) => (*v as f64).partial_cmp(l),
            (Measure::Float(v), Limit::Int(l)) => v.partial_cmp(&(*l as f64)),
            (Measure::Float(v), Limit::Float(l)) => v.partial_cmp(l),
        }
    }
}

/// A single parsed rule
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Value must be present
    Required,
    /// String must be an email address
    Email,
    /// Number >= limit, or string length >= limit
    Min(Limit),
    /// Number <= limit, or string length <= limit
    Max(Limit),
    /// Number == limit, or string length == limit
    Len(Limit),
}

impl Rule {
    /// Returns the tag name
    pub fn tag(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Email => "email",
            Rule::Min(_) => "min",
            Rule::Max(_) => "max",
            Rule::Len(_) => "len",
        }
    }

    /// Applies the rule to a present value.
    ///
    /// Returns `Ok(false)` when the value fails the rule and `Err(reason)`
    /// when the rule does not apply to the value's type.
    pub fn check(&self, value: &Value) -> Result<bool, String> {
        match self {
            Rule::Required => Ok(true),
            Rule::Email => match value {
                Value::String(s) => Ok(email_regex().is_match(s)),
                Value::Null => Ok(false),
                other => Err(format!("email does not apply to {}", type_name(other))),
            },
            Rule::Min(limit) => self.compare(value, limit, |o| o != Ordering::Less),
            Rule::Max(limit) => self.compare(value, limit, |o| o != Ordering::Greater),
            Rule::Len(limit) => self.compare(value, limit, |o| o == Ordering::Equal),
        }
    }

    fn compare(
        &self,
        value: &Value,
        limit: &Limit,
        accept: impl Fn(Ordering) -> bool,
    ) -> Result<bool, String> {
        let measured = match value {
            Value::Null => return Ok(false),
            other => Measure::of(self, other)?,
        };
        Ok(limit.compare(&measured).map_or(false, accept))
    }
}

/// A value reduced to something a limit can be compared with
enum Measure {
    Int(i64),
    AboveI64(u64),
    Float(f64),
}

impl Measure {
    fn of(rule: &Rule, value: &Value) -> Result<Self, String> {
        match value {
            Value::String(s) => {
                let count = s.chars().count();
                Ok(i64::try_from(count)
                    .map(Measure::Int)
                    .unwrap_or(Measure::AboveI64(count as u64)))
            }
            Value::Number(n) => {
                if let Some(v) = n.as_i64() {
                    Ok(Measure::Int(v))
                } else if let Some(v) = n.as_u64() {
                    Ok(Measure::AboveI64(v))
                } else {
                    n.as_f64()
                        .map(Measure::Float)
                        .ok_or_else(|| format!("{} cannot compare number {}", rule.tag(), n))
                }
            }
            other => Err(format!("{} does not apply to {}", rule.tag(), type_name(other))),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A parsed rule together with its source parameter text
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSpec {
    pub rule: Rule,
    pub param: Option<String>,
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.param {
            Some(param) => write!(f, "{}={}", self.rule.tag(), param),
            None => write!(f, "{}", self.rule.tag()),
        }
    }
}

/// Parses a rule list for the named field
pub fn parse_rules(field: &str, rules: &str) -> ValidationResult<Vec<RuleSpec>> {
    rules
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| parse_rule(field, part))
        .collect()
}

fn parse_rule(field: &str, part: &str) -> ValidationResult<RuleSpec> {
    let (tag, param) = match part.split_once('=') {
        Some((tag, param)) => (tag.trim(), Some(param.trim())),
        None => (part, None),
    };

    let rule = match (tag, param) {
        ("required", None) => Rule::Required,
        ("email", None) => Rule::Email,
        ("min", Some(p)) => Rule::Min(parse_limit(field, part, p)?),
        ("max", Some(p)) => Rule::Max(parse_limit(field, part, p)?),
        ("len", Some(p)) => Rule::Len(parse_limit(field, part, p)?),
        ("required" | "email", Some(_)) => {
            return Err(ValidationError::invalid_rule(field, part, "rule takes no parameter"))
        }
        ("min" | "max" | "len", None) => {
            return Err(ValidationError::invalid_rule(field, part, "rule requires a parameter"))
        }
        _ => return Err(ValidationError::invalid_rule(field, part, "unknown rule")),
    };

    Ok(RuleSpec {
        rule,
        param: param.map(str::to_owned),
    })
}

fn parse_limit(field: &str, part: &str, param: &str) -> ValidationResult<Limit> {
    if let Ok(limit) = param.parse::<i64>() {
        return Ok(Limit::Int(limit));
    }
    param
        .parse::<f64>()
        .ok()
        .filter(|limit| limit.is_finite())
        .map(Limit::Float)
        .ok_or_else(|| ValidationError::invalid_rule(field, part, "parameter is not a number"))
}
