//! The rule language.
//!
//! A rule is `[selector, kind, params...]`. The selector names one field or a
//! list of fields, the kind names a registered validator, and the params are
//! merged into that validator's [`Options`].
//!
//! ```json
//! [
//!   [["name", "email"], "required"],
//!   ["email", "trim"],
//!   ["email", "email", {"message": "Bad address: :value"}],
//!   ["age", "number", {"min": 0, "max": 120}]
//! ]
//! ```

use crate::error::{Result, RuleSetError};
use crate::mapper::{mapper, Mapper};
use crate::options::Options;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Field names targeted by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selector {
    One(String),
    Many(Vec<String>),
}

impl Selector {
    /// Field names in declaration order.
    pub fn fields(&self) -> &[String] {
        match self {
            Selector::One(field) => std::slice::from_ref(field),
            Selector::Many(fields) => fields,
        }
    }

    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(field) => Ok(Selector::One(field.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(field) => Ok(field.clone()),
                    other => Err(RuleSetError::config(format!(
                        "field names must be strings, got {other}"
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(Selector::Many),
            other => Err(RuleSetError::config(format!(
                "selector must be a field name or a list of names, got {other}"
            ))),
        }
    }
}

impl From<&str> for Selector {
    fn from(field: &str) -> Self {
        Selector::One(field.to_string())
    }
}

impl From<String> for Selector {
    fn from(field: String) -> Self {
        Selector::One(field)
    }
}

impl From<Vec<String>> for Selector {
    fn from(fields: Vec<String>) -> Self {
        Selector::Many(fields)
    }
}

impl From<Vec<&str>> for Selector {
    fn from(fields: Vec<&str>) -> Self {
        Selector::Many(fields.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Selector {
    fn from(fields: [&str; N]) -> Self {
        Selector::Many(fields.into_iter().map(String::from).collect())
    }
}

/// One declarative rule.
///
/// Rules are usually parsed from data, but can be built in code:
///
/// ```
/// use rulebook::Rule;
/// use serde_json::json;
///
/// let rule = Rule::new("age", "number")
///     .option("min", 0)
///     .option("max", 120)
///     .message("Age must be between 0 and 120");
/// assert_eq!(rule.kind(), "number");
/// ```
#[derive(Clone)]
pub struct Rule {
    selector: Selector,
    kind: String,
    params: Vec<Value>,
    mapper: Option<Mapper>,
}

impl Rule {
    pub fn new(selector: impl Into<Selector>, kind: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            kind: kind.into(),
            params: Vec::new(),
            mapper: None,
        }
    }

    /// Append a raw param.
    pub fn param(mut self, param: impl Into<Value>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Append a single named option.
    pub fn option(self, key: &str, value: impl Into<Value>) -> Self {
        let value: Value = value.into();
        self.param(json!({ key: value }))
    }

    /// Override the message template for this rule.
    pub fn message(self, template: impl Into<String>) -> Self {
        self.option(crate::options::MESSAGE_KEY, template.into())
    }

    /// Attach an in-process mapper, used by the `filter` kind.
    pub fn mapper<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.mapper = Some(mapper(f));
        self
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// The merged options this rule hands to its validator.
    pub fn options(&self) -> Options {
        let mut options = Options::from_params(&self.params);
        if let Some(mapper) = &self.mapper {
            options.set_mapper(mapper.clone());
        }
        options
    }

    /// Parse a rule from its array form.
    pub fn from_value(value: &Value) -> Result<Self> {
        let items = value
            .as_array()
            .ok_or_else(|| RuleSetError::config(format!("rule must be an array, got {value}")))?;

        if items.len() < 2 {
            return Err(RuleSetError::config(format!(
                "rule needs a selector and a kind, got {value}"
            )));
        }

        let selector = Selector::from_value(&items[0])?;
        let kind = items[1]
            .as_str()
            .filter(|kind| !kind.is_empty())
            .ok_or_else(|| {
                RuleSetError::config(format!("validator kind must be a non-empty string, got {}", items[1]))
            })?;

        Ok(Self {
            selector,
            kind: kind.to_string(),
            params: items[2..].to_vec(),
            mapper: None,
        })
    }

    /// Parse a list of rules.
    pub fn parse_list(value: &Value) -> Result<Vec<Self>> {
        value
            .as_array()
            .ok_or_else(|| RuleSetError::config(format!("rules must be an array, got {value}")))?
            .iter()
            .map(Self::from_value)
            .collect()
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("selector", &self.selector)
            .field("kind", &self.kind)
            .field("params", &self.params)
            .field("mapper", &self.mapper.is_some())
            .finish()
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(2 + self.params.len()))?;
        seq.serialize_element(&self.selector)?;
        seq.serialize_element(&self.kind)?;
        for param in &self.params {
            seq.serialize_element(param)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Rule::from_value(&value).map_err(de::Error::custom)
    }
}

/// A rule narrowed to a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub field: String,
    pub kind: String,
    pub options: Options,
}

/// Expand selectors into one rule per field, keeping declaration order.
///
/// An empty field name is rejected here so that nothing runs for a broken
/// rule set.
pub fn expand(rules: &[Rule]) -> Result<Vec<FieldRule>> {
    let mut expanded = Vec::with_capacity(rules.len());

    for rule in rules {
        let options = rule.options();
        for field in rule.selector.fields() {
            if field.is_empty() {
                return Err(RuleSetError::config(format!(
                    "empty field name in '{}' rule",
                    rule.kind
                )));
            }
            expanded.push(FieldRule {
                field: field.clone(),
                kind: rule.kind.clone(),
                options: options.clone(),
            });
        }
    }

    Ok(expanded)
}
