use crate::error::Result;
use crate::mapper::{self, Mapper};
use crate::options::Options;
use crate::validator::{Outcome, Validator};
use serde_json::Value;
use std::fmt;

/// `filter` and `trim`: always pass, replacing the value with `mapper(value)`.
///
/// The mapper comes from the rule (a closure, or a registered name under the
/// `mapper` option) and falls back to the kind's default. With neither, the
/// value is left as it was.
#[derive(Clone, Default)]
pub struct Filter {
    default_mapper: Option<Mapper>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mapper(mapper: Mapper) -> Self {
        Self {
            default_mapper: Some(mapper),
        }
    }

    pub fn trim() -> Self {
        Self::with_mapper(mapper::mapper(mapper::trim()))
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("default_mapper", &self.default_mapper.is_some())
            .finish()
    }
}

impl Validator for Filter {
    fn test(&self, value: Value, options: &Options) -> Result<Outcome> {
        let value = match options.mapper().or(self.default_mapper.as_ref()) {
            Some(mapper) => mapper(value),
            None => value,
        };
        Ok(Outcome::pass(value))
    }
}
