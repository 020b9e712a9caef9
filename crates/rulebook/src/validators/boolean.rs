use crate::error::Result;
use crate::options::Options;
use crate::validator::{Outcome, Validator};
use crate::value::loosely_equal;
use serde_json::Value;

/// `boolean`: the value must loosely equal `trueValue` or `falseValue`
/// (defaults `true` and `false`).
///
/// With the defaults every scalar passes, since any value is loosely equal to
/// one of the two booleans. Set both options to restrict the accepted pair,
/// e.g. `{"trueValue": "Y", "falseValue": "N"}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Boolean;

impl Validator for Boolean {
    fn test(&self, value: Value, options: &Options) -> Result<Outcome> {
        let true_value = options.get("trueValue").cloned().unwrap_or(Value::Bool(true));
        let false_value = options
            .get("falseValue")
            .cloned()
            .unwrap_or(Value::Bool(false));

        let passed = loosely_equal(&value, &true_value) || loosely_equal(&value, &false_value);
        Ok(Outcome::new(passed, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(value: Value, params: &[Value]) -> bool {
        Boolean
            .test(value, &Options::from_params(params))
            .unwrap()
            .passed
    }

    #[test]
    fn boolean_defaults_accept_booleans() {
        assert!(check(json!(true), &[]));
        assert!(check(json!(false), &[]));
        assert!(check(json!(1), &[]));
        assert!(check(json!(""), &[]));
    }

    #[test]
    fn boolean_custom_pair() {
        let params = [json!({"trueValue": "Y", "falseValue": "N"})];
        assert!(check(json!("Y"), &params));
        assert!(check(json!("N"), &params));
        assert!(!check(json!("maybe"), &params));
        assert!(!check(json!(""), &params));
    }

    #[test]
    fn boolean_numeric_pair_compares_loosely() {
        let params = [json!({"trueValue": 1, "falseValue": 0})];
        assert!(check(json!("1"), &params));
        assert!(check(json!(0.0), &params));
        assert!(!check(json!(2), &params));
    }
}
