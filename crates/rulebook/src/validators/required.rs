use crate::error::Result;
use crate::message::REQUIRED_MESSAGE;
use crate::options::Options;
use crate::validator::{Outcome, Validator};
use crate::value::is_empty;
use serde_json::Value;

/// `required`: the value must not be empty.
///
/// Null, `false`, zero, `""`, `"0"` and empty containers all fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Required;

impl Validator for Required {
    fn test(&self, value: Value, _options: &Options) -> Result<Outcome> {
        Ok(Outcome::new(!is_empty(&value), value))
    }

    fn default_message(&self) -> &str {
        REQUIRED_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(value: Value) -> bool {
        Required.test(value, &Options::new()).unwrap().passed
    }

    #[test]
    fn required_rejects_empty_values() {
        assert!(!check(json!(null)));
        assert!(!check(json!("")));
        assert!(!check(json!("0")));
        assert!(!check(json!(false)));
        assert!(!check(json!(0)));
        assert!(!check(json!([])));
    }

    #[test]
    fn required_accepts_filled_values() {
        assert!(check(json!("value")));
        assert!(check(json!("  ")));
        assert!(check(json!(42)));
        assert!(check(json!(true)));
        assert!(check(json!(["x"])));
    }

    #[test]
    fn required_leaves_value_untouched() {
        let outcome = Required.test(json!("  a "), &Options::new()).unwrap();
        assert_eq!(outcome.value, json!("  a "));
    }
}
