//! Message templates.
//!
//! A template is plain text with two placeholders: `:key` for the field name
//! and `:value` for the value the failing validator received.

use crate::value::to_text;
use serde_json::Value;

/// Fallback template for validators that do not define their own.
pub const DEFAULT_MESSAGE: &str = "Поле \":key\" имело неверный формат";

pub const REQUIRED_MESSAGE: &str = "Поле \":key\" было не заполнено";

pub const LENGTH_MESSAGE: &str = "Поле \":key\" имело не верную длину";

pub const NUMBER_MESSAGE: &str = "Поле \":key\" имело неверное значение";

const KEY_PLACEHOLDER: &str = ":key";
const VALUE_PLACEHOLDER: &str = ":value";

/// Render a template for a field and value.
///
/// Substitution is a single left-to-right pass, so a field name or value that
/// itself contains `:key` or `:value` is inserted verbatim.
pub fn render(template: &str, key: &str, value: &Value) -> String {
    let value = to_text(value);
    let mut out = String::with_capacity(template.len() + key.len() + value.len());
    let mut rest = template;

    while let Some(idx) = rest.find(':') {
        out.push_str(&rest[..idx]);
        let tail = &rest[idx..];
        if let Some(after) = tail.strip_prefix(VALUE_PLACEHOLDER) {
            out.push_str(&value);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(KEY_PLACEHOLDER) {
            out.push_str(key);
            rest = after;
        } else {
            out.push(':');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}
