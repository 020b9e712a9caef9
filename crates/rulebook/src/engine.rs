//! The rule engine: applies a rule list to a record.

use crate::error::{ErrorMap, Result};
use crate::options::Options;
use crate::registry::Registry;
use crate::rule::{expand, Rule};
use crate::value::Record;
use serde_json::Value;
use tracing::{debug, trace};

/// A field rule with its options resolved against the registry.
struct Step<'a> {
    field: &'a str,
    kind: &'a str,
    options: Options,
}

impl Registry {
    /// Validate `record` against `rules`, rewriting values in place.
    ///
    /// The record is reordered so that fields named by rules come first, in
    /// the order the rules first mention them, followed by the remaining
    /// fields in their original order. A mentioned field the record lacks is
    /// added as `""`. Each field runs its rules in declaration order, so a
    /// rewrite from one rule is seen by the next.
    ///
    /// Returns the error map, empty when every check passed. A broken rule
    /// set (unknown kind, malformed options) returns `Err` and leaves
    /// `record` untouched.
    ///
    /// ```
    /// use rulebook::{Registry, Rule};
    /// use serde_json::json;
    ///
    /// let registry = Registry::default();
    /// let mut record = json!({"email": " a@b.com "}).as_object().unwrap().clone();
    /// let rules = [Rule::new("email", "trim"), Rule::new("email", "email")];
    ///
    /// let errors = registry.validate(&mut record, &rules).unwrap();
    /// assert!(errors.is_empty());
    /// assert_eq!(record["email"], "a@b.com");
    /// ```
    pub fn validate(&self, record: &mut Record, rules: &[Rule]) -> Result<ErrorMap> {
        let expanded = expand(rules)?;

        let steps = expanded
            .iter()
            .map(|rule| {
                Ok(Step {
                    field: &rule.field,
                    kind: &rule.kind,
                    options: self.resolve(rule)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            rules = rules.len(),
            checks = steps.len(),
            fields = record.len(),
            "validating record"
        );

        // Rule fields first, in first-mention order, then everything else.
        let mut working = Record::new();
        for step in &steps {
            if !working.contains_key(step.field) {
                let value = record
                    .get(step.field)
                    .cloned()
                    .unwrap_or_else(|| Value::String(String::new()));
                working.insert(step.field.to_string(), value);
            }
        }
        for (field, value) in record.iter() {
            if !working.contains_key(field) {
                working.insert(field.clone(), value.clone());
            }
        }

        let mut errors = ErrorMap::new();
        let fields: Vec<String> = working.keys().cloned().collect();

        for field in &fields {
            for step in steps.iter().filter(|step| step.field == field.as_str()) {
                let value = working.get(field).cloned().unwrap_or(Value::Null);
                let mut check = self.create(step.kind, field, value)?;
                check.configure(step.options.clone());

                let outcome = check.run()?;
                if !outcome.passed {
                    let message = check.message();
                    trace!(field = %field, kind = step.kind, message = %message, "check failed");
                    errors.add(field.as_str(), message);
                }
                working.insert(field.clone(), outcome.value);
            }
        }

        debug!(
            failed_fields = errors.field_names().len(),
            messages = errors.len(),
            "validation finished"
        );

        *record = working;
        Ok(errors)
    }
}

/// Validate with a fresh default registry.
///
/// Shorthand for `Registry::default().validate(record, rules)`; build a
/// [`Registry`] once instead when validating many records.
pub fn validate(record: &mut Record, rules: &[Rule]) -> Result<ErrorMap> {
    Registry::default().validate(record, rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleSetError;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn rewrites_are_seen_by_later_rules() {
        let mut data = record(json!({"name": "  "}));
        let rules = [Rule::new("name", "trim"), Rule::new("name", "required")];

        let errors = validate(&mut data, &rules).unwrap();
        assert_eq!(data["name"], "");
        assert_eq!(
            errors.get("name").unwrap(),
            ["Поле \"name\" было не заполнено"]
        );
    }

    #[test]
    fn missing_fields_are_backfilled_in_mention_order() {
        let mut data = record(json!({"b": "x"}));
        let rules = [Rule::new(["c", "a", "b"], "required")];

        let errors = validate(&mut data, &rules).unwrap();
        let keys: Vec<_> = data.keys().map(String::as_str).collect();
        assert_eq!(keys, ["c", "a", "b"]);
        assert_eq!(data["c"], "");
        assert_eq!(data["b"], "x");
        assert_eq!(errors.field_names(), ["c", "a"]);
    }

    #[test]
    fn fields_run_in_rule_order() {
        let mut data = record(json!({"b": "", "a": ""}));
        let rules = [Rule::new("a", "required"), Rule::new("b", "required")];

        let errors = validate(&mut data, &rules).unwrap();
        assert_eq!(errors.field_names(), ["a", "b"]);
        let keys: Vec<_> = data.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn rule_fields_move_ahead_of_unmentioned_fields() {
        let mut data = record(json!({"keep": 1, "y": ""}));
        let rules = [Rule::new(["x", "y"], "required")];

        let errors = validate(&mut data, &rules).unwrap();
        let keys: Vec<_> = data.keys().map(String::as_str).collect();
        assert_eq!(keys, ["x", "y", "keep"]);
        assert_eq!(data["keep"], 1);
        assert_eq!(errors.field_names(), ["x", "y"]);
    }

    #[test]
    fn unknown_kind_leaves_record_untouched() {
        let mut data = record(json!({"name": "  x  "}));
        let before = data.clone();
        let rules = [Rule::new("name", "trim"), Rule::new("missing", "bogus")];

        let err = validate(&mut data, &rules).unwrap_err();
        assert_eq!(err, RuleSetError::UnknownValidatorKind("bogus".into()));
        assert_eq!(data, before);
    }

    #[test]
    fn config_error_mid_run_leaves_record_untouched() {
        let mut data = record(json!({"code": " 12 "}));
        let before = data.clone();
        let rules = [Rule::new("code", "trim"), Rule::new("code", "match")];

        let err = validate(&mut data, &rules).unwrap_err();
        assert!(matches!(err, RuleSetError::InvalidConfiguration(_)));
        assert_eq!(data, before);
    }

    #[test]
    fn message_uses_value_before_rewrite() {
        let mut registry = Registry::default();
        registry.register(
            "shout",
            crate::custom::FnValidator::new(|value, _| {
                let text = crate::value::to_text(&value).to_uppercase();
                Ok(crate::Outcome::fail(Value::String(text)))
            })
            .with_message(":key was :value"),
        );

        let mut data = record(json!({"word": "hey"}));
        let errors = registry
            .validate(&mut data, &[Rule::new("word", "shout")])
            .unwrap();
        assert_eq!(errors.get("word").unwrap(), ["word was hey"]);
        assert_eq!(data["word"], "HEY");
    }

    #[test]
    fn unmentioned_fields_are_left_alone() {
        let mut data = record(json!({"keep": " x ", "name": " y "}));
        validate(&mut data, &[Rule::new("name", "trim")]).unwrap();
        assert_eq!(data["keep"], " x ");
        assert_eq!(data["name"], "y");
    }
}
