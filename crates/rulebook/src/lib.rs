//! # Rulebook
//!
//! Declarative validation for loosely typed records. A record is an ordered
//! map of field names to JSON values; a rule list says which validator kind
//! runs on which fields, with what options. Validators can also rewrite the
//! value they check, so trimming or type coercion happens in the same pass.
//!
//! ## Example
//!
//! ```rust
//! use rulebook::prelude::*;
//! use serde_json::json;
//!
//! let rules: Vec<Rule> = serde_json::from_value(json!([
//!     [["name", "email"], "required"],
//!     ["email", "trim"],
//!     ["email", "email"],
//!     ["age", "number", {"min": 0, "max": 120}]
//! ]))
//! .unwrap();
//!
//! let mut record = json!({"name": "Ann", "email": " ann@example.com ", "age": 200})
//!     .as_object()
//!     .unwrap()
//!     .clone();
//!
//! let errors = Registry::default().validate(&mut record, &rules).unwrap();
//!
//! assert_eq!(record["email"], "ann@example.com");
//! assert_eq!(errors.field_names(), ["age"]);
//! assert_eq!(errors.get("age").unwrap(), ["Поле \"age\" имело неверное значение"]);
//! ```
//!
//! ## Built-in kinds
//!
//! - `required` - value is not empty (`""`, `"0"`, `0`, `false`, null, `[]`)
//! - `boolean` - value loosely equals `trueValue` or `falseValue`
//! - `string` - string length within `min`/`max`, or exactly `length`
//! - `number`, `integer`, `float` - numeric type and `min`/`max` range
//! - `match`, `phone` - regex match, negated with `not`
//! - `filter_var`, `email`, `ip`, `url` - format filters
//! - `filter`, `trim` - rewrite the value through a mapper
//!
//! ## Message templates
//!
//! Messages may use `:key` (the field name) and `:value` (the value the
//! failing validator received). Any rule can override its message with a
//! `message` option.

pub mod custom;
mod engine;
mod error;
pub mod mapper;
mod message;
mod options;
mod registry;
mod rule;
mod validator;
pub mod validators;
pub mod value;

pub use engine::validate;
pub use error::{ErrorMap, Result, RuleSetError};
pub use mapper::Mapper;
pub use message::{render, DEFAULT_MESSAGE, LENGTH_MESSAGE, NUMBER_MESSAGE, REQUIRED_MESSAGE};
pub use options::{Options, MAPPER_KEY, MESSAGE_KEY};
pub use registry::Registry;
pub use rule::{expand, FieldRule, Rule, Selector};
pub use validator::{FieldCheck, Outcome, Validator};
pub use value::Record;

/// Prelude module for validation
pub mod prelude {
    pub use crate::custom::FnValidator;
    pub use crate::engine::validate;
    pub use crate::error::{ErrorMap, RuleSetError};
    pub use crate::options::Options;
    pub use crate::registry::Registry;
    pub use crate::rule::{Rule, Selector};
    pub use crate::validator::{Outcome, Validator};
    pub use crate::value::Record;
}
