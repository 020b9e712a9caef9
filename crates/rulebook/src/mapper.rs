//! Value mappers used by rewriting validators.
//!
//! A mapper takes the field's current value and returns its replacement.
//! Mappers are registered by name so that data-only rule files can refer to
//! them (`{"mapper": "lowercase"}`); rules built in code may attach a closure
//! directly.

use crate::value::{is_truthy, to_text};
use regex::Regex;
use serde_json::{json, Value};
use std::sync::{Arc, OnceLock};

/// Shared value transformation.
pub type Mapper = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Wrap a closure as a [`Mapper`].
pub fn mapper<F>(f: F) -> Mapper
where
    F: Fn(Value) -> Value + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Every built-in mapper with its registered name.
pub fn builtin_mappers() -> Vec<(&'static str, Mapper)> {
    vec![
        ("trim", mapper(trim())),
        ("ltrim", mapper(ltrim())),
        ("rtrim", mapper(rtrim())),
        ("lowercase", mapper(lowercase())),
        ("uppercase", mapper(uppercase())),
        ("int", mapper(to_int())),
        ("float", mapper(to_float())),
        ("bool", mapper(to_bool())),
        ("string", mapper(to_string())),
    ]
}

fn map_str(value: Value, f: impl Fn(&str) -> String) -> Value {
    match value {
        Value::String(s) => Value::String(f(&s)),
        other => other,
    }
}

/// Mapper: trim whitespace from both ends of a string
pub fn trim() -> impl Fn(Value) -> Value + Send + Sync + Clone {
    |value: Value| map_str(value, |s| s.trim().to_string())
}

/// Mapper: trim leading whitespace
pub fn ltrim() -> impl Fn(Value) -> Value + Send + Sync + Clone {
    |value: Value| map_str(value, |s| s.trim_start().to_string())
}

/// Mapper: trim trailing whitespace
pub fn rtrim() -> impl Fn(Value) -> Value + Send + Sync + Clone {
    |value: Value| map_str(value, |s| s.trim_end().to_string())
}

/// Mapper: convert string to lowercase
pub fn lowercase() -> impl Fn(Value) -> Value + Send + Sync + Clone {
    |value: Value| map_str(value, str::to_lowercase)
}

/// Mapper: convert string to uppercase
pub fn uppercase() -> impl Fn(Value) -> Value + Send + Sync + Clone {
    |value: Value| map_str(value, str::to_uppercase)
}

static LEADING_NUMBER: OnceLock<Regex> = OnceLock::new();

fn leading_number(s: &str) -> Option<f64> {
    let re = LEADING_NUMBER.get_or_init(|| {
        Regex::new(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?")
            .expect("leading number pattern is valid")
    });
    re.find(s).and_then(|m| m.as_str().trim().parse().ok())
}

fn numeric_prefix(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => leading_number(s).unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        Value::Array(items) if !items.is_empty() => 1.0,
        _ => 0.0,
    }
}

/// Mapper: coerce to an integer, reading the leading number of a string
/// (`"12kg"` becomes `12`, `"abc"` becomes `0`)
pub fn to_int() -> impl Fn(Value) -> Value + Send + Sync + Clone {
    |value: Value| {
        let n = numeric_prefix(&value);
        if n.is_finite() {
            json!(n.trunc() as i64)
        } else {
            json!(0)
        }
    }
}

/// Mapper: coerce to a float, reading the leading number of a string
pub fn to_float() -> impl Fn(Value) -> Value + Send + Sync + Clone {
    |value: Value| {
        let n = numeric_prefix(&value);
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or_else(|| json!(0.0))
    }
}

/// Mapper: coerce to a boolean by truthiness
pub fn to_bool() -> impl Fn(Value) -> Value + Send + Sync + Clone {
    |value: Value| Value::Bool(is_truthy(&value))
}

/// Mapper: coerce to its text rendering
pub fn to_string() -> impl Fn(Value) -> Value + Send + Sync + Clone {
    |value: Value| match value {
        Value::String(_) => value,
        other => Value::String(to_text(&other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === trim family ===

    #[test]
    fn test_trim_removes_whitespace() {
        let f = trim();
        assert_eq!(f(json!("  hello  ")), json!("hello"));
    }

    #[test]
    fn test_trim_whitespace_only_becomes_empty() {
        let f = trim();
        assert_eq!(f(json!("   ")), json!(""));
    }

    #[test]
    fn test_trim_non_string_passthrough() {
        let f = trim();
        assert_eq!(f(json!(42)), json!(42));
        assert_eq!(f(json!(null)), json!(null));
    }

    #[test]
    fn test_ltrim_and_rtrim() {
        assert_eq!(ltrim()(json!("  a  ")), json!("a  "));
        assert_eq!(rtrim()(json!("  a  ")), json!("  a"));
    }

    // === case ===

    #[test]
    fn test_lowercase_converts_string() {
        let f = lowercase();
        assert_eq!(f(json!("Hello@WORLD.com")), json!("hello@world.com"));
    }

    #[test]
    fn test_uppercase_mixed_case() {
        let f = uppercase();
        assert_eq!(f(json!("Hello World")), json!("HELLO WORLD"));
        assert_eq!(f(json!(true)), json!(true));
    }

    // === coercion ===

    #[test]
    fn test_int_coercion() {
        let f = to_int();
        assert_eq!(f(json!("42")), json!(42));
        assert_eq!(f(json!(" 12kg")), json!(12));
        assert_eq!(f(json!("abc")), json!(0));
        assert_eq!(f(json!(3.9)), json!(3));
        assert_eq!(f(json!(true)), json!(1));
        assert_eq!(f(json!(null)), json!(0));
    }

    #[test]
    fn test_float_coercion() {
        let f = to_float();
        assert_eq!(f(json!("1.5kg")), json!(1.5));
        assert_eq!(f(json!(2)), json!(2.0));
        assert_eq!(f(json!("x")), json!(0.0));
    }

    #[test]
    fn test_bool_and_string_coercion() {
        assert_eq!(to_bool()(json!("0")), json!(false));
        assert_eq!(to_bool()(json!("no")), json!(true));
        assert_eq!(to_string()(json!(17)), json!("17"));
        assert_eq!(to_string()(json!(false)), json!(""));
    }

    #[test]
    fn builtin_names_are_unique() {
        let mut names: Vec<_> = builtin_mappers().into_iter().map(|(n, _)| n).collect();
        let count = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), count);
    }
}
