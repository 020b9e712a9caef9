use crate::error::Result;
use crate::message::NUMBER_MESSAGE;
use crate::options::Options;
use crate::validator::{Outcome, Validator};
use crate::value::{as_number, is_float, is_integer, is_numeric};
use serde_json::Value;
use std::fmt;

/// `number`, `integer` and `float`: the value must pass a type test and lie
/// within `[min, max]` (`min` defaults to 0, `max` to `min`).
#[derive(Clone, Copy)]
pub struct Number {
    name: &'static str,
    type_test: fn(&Value) -> bool,
}

impl Number {
    /// Build a numeric validator around a custom type test.
    pub fn with_type_test(name: &'static str, type_test: fn(&Value) -> bool) -> Self {
        Self { name, type_test }
    }

    /// Numbers and numeric strings.
    pub fn any() -> Self {
        Self::with_type_test("number", is_numeric)
    }

    /// Numbers stored as integers.
    pub fn integer() -> Self {
        Self::with_type_test("integer", is_integer)
    }

    /// Numbers stored as floats.
    pub fn float() -> Self {
        Self::with_type_test("float", is_float)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Number").field("name", &self.name).finish_non_exhaustive()
    }
}

impl Validator for Number {
    fn test(&self, value: Value, options: &Options) -> Result<Outcome> {
        let min = options.number("min")?.unwrap_or(0.0);
        let max = options.number("max")?.unwrap_or(min);

        let passed = (self.type_test)(&value)
            && as_number(&value).is_some_and(|n| n >= min && n <= max);

        Ok(Outcome::new(passed, value))
    }

    fn default_message(&self) -> &str {
        NUMBER_MESSAGE
    }
}
