//! Validator configuration merged from a rule's params.

use crate::error::{Result, RuleSetError};
use crate::mapper::Mapper;
use crate::value::{as_number, is_truthy, to_text};
use serde_json::{Map, Value};
use std::fmt;

/// Reserved option holding a message template override.
pub const MESSAGE_KEY: &str = "message";

/// Reserved option naming a registered mapper.
pub const MAPPER_KEY: &str = "mapper";

/// Named options handed to a validator.
///
/// Params are merged in order: a mapping param contributes its keys (later
/// keys win), any other param is stored under its position (`"0"`, `"1"`, ...).
#[derive(Clone, Default)]
pub struct Options {
    values: Map<String, Value>,
    mapper: Option<Mapper>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from a rule's params.
    pub fn from_params(params: &[Value]) -> Self {
        let mut options = Self::new();
        for (index, param) in params.iter().enumerate() {
            options.merge_param(index, param);
        }
        options
    }

    /// Merge one param at the given position.
    pub fn merge_param(&mut self, index: usize, param: &Value) {
        match param {
            Value::Object(map) => {
                for (key, value) in map {
                    self.values.insert(key.clone(), value.clone());
                }
            }
            other => {
                self.values.insert(index.to_string(), other.clone());
            }
        }
    }

    /// Merge another set of options over this one.
    pub fn extend(&mut self, other: Options) {
        self.values.extend(other.values);
        if other.mapper.is_some() {
            self.mapper = other.mapper;
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.mapper.is_none()
    }

    /// Raw option values, in merge order.
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Remove the message override, if any.
    pub fn take_message(&mut self) -> Option<String> {
        match self.values.remove(MESSAGE_KEY)? {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(to_text(&other)),
        }
    }

    /// Numeric option. Null counts as unset; anything non-numeric is a
    /// configuration error.
    pub fn number(&self, key: &str) -> Result<Option<f64>> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => as_number(value).map(Some).ok_or_else(|| {
                RuleSetError::config(format!("option '{key}' must be numeric, got {value}"))
            }),
        }
    }

    /// String option. Null and empty strings count as unset.
    pub fn string(&self, key: &str) -> Result<Option<&str>> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(value) => Err(RuleSetError::config(format!(
                "option '{key}' must be a string, got {value}"
            ))),
        }
    }

    /// Truthiness of an option; unset is false.
    pub fn flag(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(is_truthy)
    }

    pub fn mapper(&self) -> Option<&Mapper> {
        self.mapper.as_ref()
    }

    pub fn set_mapper(&mut self, mapper: Mapper) {
        self.mapper = Some(mapper);
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("values", &self.values)
            .field("mapper", &self.mapper.is_some())
            .finish()
    }
}

impl PartialEq for Options {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values && self.mapper.is_some() == other.mapper.is_some()
    }
}
