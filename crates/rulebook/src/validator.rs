//! The validator capability and its per-field instance.

use crate::error::Result;
use crate::message::{render, DEFAULT_MESSAGE};
use crate::options::Options;
use serde_json::Value;
use std::fmt::Debug;
use std::sync::Arc;

/// Result of running a validator: whether the value passed, and the value the
/// field should hold from now on.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub passed: bool,
    pub value: Value,
}

impl Outcome {
    pub fn new(passed: bool, value: Value) -> Self {
        Self { passed, value }
    }

    pub fn pass(value: Value) -> Self {
        Self::new(true, value)
    }

    pub fn fail(value: Value) -> Self {
        Self::new(false, value)
    }
}

/// A pluggable check or transform, registered under a kind name.
///
/// Implementations are stateless strategies: the same instance serves every
/// field, and per-field state lives in [`FieldCheck`].
///
/// ## Example
///
/// ```
/// use rulebook::{Options, Outcome, Validator};
/// use serde_json::Value;
///
/// #[derive(Debug)]
/// struct Even;
///
/// impl Validator for Even {
///     fn test(&self, value: Value, _options: &Options) -> rulebook::Result<Outcome> {
///         let even = value.as_i64().is_some_and(|n| n % 2 == 0);
///         Ok(Outcome::new(even, value))
///     }
///
///     fn default_message(&self) -> &str {
///         "Field \":key\" must be even"
///     }
/// }
/// ```
pub trait Validator: Debug + Send + Sync {
    /// Check the value and return it, possibly rewritten.
    ///
    /// Returns `Err` only for a misconfigured rule; a value that fails the
    /// check is reported through [`Outcome::passed`].
    fn test(&self, value: Value, options: &Options) -> Result<Outcome>;

    /// Message template used when the rule does not override it.
    fn default_message(&self) -> &str {
        DEFAULT_MESSAGE
    }
}

/// A validator bound to one field, its current value and its rule's options.
///
/// Created fresh for every `(rule, field)` pairing by
/// [`Registry::create`](crate::Registry::create).
#[derive(Debug, Clone)]
pub struct FieldCheck {
    kind: String,
    field: String,
    value: Value,
    options: Options,
    template: String,
    validator: Arc<dyn Validator>,
}

impl FieldCheck {
    pub(crate) fn new(
        kind: impl Into<String>,
        field: impl Into<String>,
        value: Value,
        validator: Arc<dyn Validator>,
    ) -> Self {
        let template = validator.default_message().to_string();
        Self {
            kind: kind.into(),
            field: field.into(),
            value,
            options: Options::new(),
            template,
            validator,
        }
    }

    /// Merge a rule's options; a `message` option replaces the template.
    pub fn configure(&mut self, mut options: Options) {
        if let Some(template) = options.take_message() {
            self.template = template;
        }
        self.options.extend(options);
    }

    /// Run the validator against the bound value.
    pub fn run(&self) -> Result<Outcome> {
        self.validator.test(self.value.clone(), &self.options)
    }

    /// The failure message, rendered with the value this check received.
    pub fn message(&self) -> String {
        render(&self.template, &self.field, &self.value)
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}
