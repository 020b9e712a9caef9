//! Error types for rule sets and the per-field error map.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Structural failure of a rule set.
///
/// These are programmer errors: they abort the whole validation call and the
/// record is left as it was. Ordinary field failures never show up here, they
/// are collected in an [`ErrorMap`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleSetError {
    #[error("invalid rule configuration: {0}")]
    InvalidConfiguration(String),

    #[error("unknown validator kind: {0}")]
    UnknownValidatorKind(String),
}

impl RuleSetError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, RuleSetError>;

/// Messages collected for every field that failed at least one rule.
///
/// Fields appear in the order they were first reported, messages in the order
/// their rules ran. A field with no failures has no entry at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap {
    /// Map of field name to the messages reported for it
    pub fields: IndexMap<String, Vec<String>>,
}

impl ErrorMap {
    /// Create an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message for a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Merge another error map into this one, keeping both orders.
    pub fn merge(&mut self, other: ErrorMap) {
        for (field, messages) in other.fields {
            self.fields.entry(field).or_default().extend(messages);
        }
    }

    /// Check if there are any errors.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get the total number of messages.
    pub fn len(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    /// Get messages for a specific field.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Check whether a field failed.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Get all field names with errors, in report order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    /// Iterate over `(field, messages)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// Convert to Result - Ok if no errors, Err otherwise.
    pub fn into_result(self) -> std::result::Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed: {} error(s)", self.len())
    }
}

impl std::error::Error for ErrorMap {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_map_add_and_get() {
        let mut errors = ErrorMap::new();
        errors.add("email", "Invalid email");
        errors.add("email", "Email is required");
        errors.add("age", "Age out of range");

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("email").unwrap().len(), 2);
        assert_eq!(errors.get("age").unwrap(), ["Age out of range"]);
        assert!(errors.get("name").is_none());
    }

    #[test]
    fn error_map_keeps_report_order() {
        let mut errors = ErrorMap::new();
        errors.add("zeta", "z");
        errors.add("alpha", "a");
        errors.add("zeta", "z2");

        assert_eq!(errors.field_names(), vec!["zeta", "alpha"]);
        assert_eq!(errors.get("zeta").unwrap(), ["z", "z2"]);
    }

    #[test]
    fn error_map_into_result() {
        assert!(ErrorMap::new().into_result().is_ok());

        let mut errors = ErrorMap::new();
        errors.add("field", "message");
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: 1 error(s)");
    }

    #[test]
    fn error_map_merge() {
        let mut first = ErrorMap::new();
        first.add("email", "Invalid");

        let mut second = ErrorMap::new();
        second.add("age", "Out of range");
        second.add("email", "Too long");

        first.merge(second);
        assert_eq!(first.len(), 3);
        assert_eq!(first.get("email").unwrap(), ["Invalid", "Too long"]);
    }

    #[test]
    fn error_map_serializes_as_plain_object() {
        let mut errors = ErrorMap::new();
        errors.add("age", "bad");
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"age":["bad"]}"#);
    }

    #[test]
    fn rule_set_error_display() {
        let err = RuleSetError::UnknownValidatorKind("bogus".into());
        assert_eq!(err.to_string(), "unknown validator kind: bogus");

        let err = RuleSetError::config("rule is wrong");
        assert_eq!(
            err.to_string(),
            "invalid rule configuration: rule is wrong"
        );
    }
}
