use crate::error::Result;
use crate::message::DEFAULT_MESSAGE;
use crate::options::Options;
use crate::validator::{Outcome, Validator};
use serde_json::Value;
use std::fmt;

/// Type alias for validator functions to reduce complexity.
type TestFn = Box<dyn Fn(Value, &Options) -> Result<Outcome> + Send + Sync>;

/// A validator built from a closure.
///
/// ```
/// use rulebook::{custom::FnValidator, Outcome, Registry, Rule};
/// use serde_json::json;
///
/// let mut registry = Registry::default();
/// registry.register(
///     "even",
///     FnValidator::check(|value, _| value.as_i64().is_some_and(|n| n % 2 == 0))
///         .with_message("Field \":key\" must be even"),
/// );
///
/// let mut record = json!({"count": 3}).as_object().unwrap().clone();
/// let errors = registry.validate(&mut record, &[Rule::new("count", "even")]).unwrap();
/// assert_eq!(errors.get("count").unwrap(), ["Field \"count\" must be even"]);
/// ```
pub struct FnValidator {
    test: TestFn,
    message: String,
}

impl FnValidator {
    /// Wrap a full test function that may rewrite the value.
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(Value, &Options) -> Result<Outcome> + Send + Sync + 'static,
    {
        Self {
            test: Box::new(test),
            message: DEFAULT_MESSAGE.to_string(),
        }
    }

    /// Wrap a pass/fail predicate; the value is never rewritten.
    pub fn check<F>(predicate: F) -> Self
    where
        F: Fn(&Value, &Options) -> bool + Send + Sync + 'static,
    {
        Self::new(move |value, options| {
            let passed = predicate(&value, options);
            Ok(Outcome::new(passed, value))
        })
    }

    /// Wrap a value transformation that always passes.
    pub fn map<F>(mapper: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self::new(move |value, _| Ok(Outcome::pass(mapper(value))))
    }

    /// Set the default message template.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl fmt::Debug for FnValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnValidator")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl Validator for FnValidator {
    fn test(&self, value: Value, options: &Options) -> Result<Outcome> {
        (self.test)(value, options)
    }

    fn default_message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn check_validator() {
        let validator = FnValidator::check(|value, options| {
            let max = options.number("max").ok().flatten().unwrap_or(10.0);
            value.as_f64().is_some_and(|n| n <= max)
        });

        assert!(validator.test(json!(5), &Options::new()).unwrap().passed);
        assert!(!validator.test(json!(11), &Options::new()).unwrap().passed);
        assert_eq!(validator.default_message(), DEFAULT_MESSAGE);
    }

    #[test]
    fn map_validator() {
        let validator = FnValidator::map(|value| json!(format!("<{}>", value.as_str().unwrap_or(""))))
            .with_message("unused");

        let outcome = validator.test(json!("x"), &Options::new()).unwrap();
        assert_eq!(outcome, Outcome::pass(json!("<x>")));
        assert_eq!(validator.default_message(), "unused");
    }
}
