//! Built-in validators.
//!
//! Related kinds share one implementation with a swapped strategy:
//! `number`/`integer`/`float` differ only in their type test, `match`/`phone`
//! in their default pattern, `filter_var`/`email`/`ip`/`url` in their format
//! filter, and `filter`/`trim` in their default mapper.

mod boolean;
mod filter;
mod format;
mod number;
mod pattern;
mod required;
mod string;

pub use boolean::Boolean;
pub use filter::Filter;
pub use format::{Format, FormatFilter};
pub use number::Number;
pub use pattern::{compile_pattern, Pattern, PHONE_PATTERN};
pub use required::Required;
pub use string::StringLength;

use crate::validator::Validator;
use std::sync::Arc;

fn entry(kind: &'static str, validator: impl Validator + 'static) -> (&'static str, Arc<dyn Validator>) {
    (kind, Arc::new(validator))
}

/// Every built-in validator with its kind name.
pub fn builtin_validators() -> Vec<(&'static str, Arc<dyn Validator>)> {
    vec![
        entry("required", Required),
        entry("boolean", Boolean),
        entry("string", StringLength),
        entry("number", Number::any()),
        entry("integer", Number::integer()),
        entry("float", Number::float()),
        entry("match", Pattern::new()),
        entry("phone", Pattern::phone()),
        entry("filter_var", Format::new(FormatFilter::Default)),
        entry("email", Format::new(FormatFilter::Email)),
        entry("ip", Format::new(FormatFilter::Ip)),
        entry("url", Format::new(FormatFilter::Url)),
        entry("filter", Filter::new()),
        entry("trim", Filter::trim()),
    ]
}
