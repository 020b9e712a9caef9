use crate::error::Result;
use crate::message::LENGTH_MESSAGE;
use crate::options::Options;
use crate::validator::{Outcome, Validator};
use serde_json::Value;

/// `string`: the value must be a string of a given length.
///
/// Options: `length` for an exact length, otherwise `min` (default 0) and
/// `max` (default `min`). Length is counted in characters, not bytes, so
/// `"привет"` has length 6 rather than its 12-byte UTF-8 size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringLength;

impl Validator for StringLength {
    fn test(&self, value: Value, options: &Options) -> Result<Outcome> {
        let min = options.number("min")?.unwrap_or(0.0);
        let max = options.number("max")?.unwrap_or(min);
        let length = options.number("length")?;

        let Value::String(s) = &value else {
            return Ok(Outcome::fail(value));
        };

        let len = s.chars().count() as f64;
        let passed = match length {
            Some(exact) => len == exact,
            None => len >= min && len <= max,
        };

        Ok(Outcome::new(passed, value))
    }

    fn default_message(&self) -> &str {
        LENGTH_MESSAGE
    }
}
