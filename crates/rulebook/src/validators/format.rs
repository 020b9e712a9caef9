use crate::error::{Result, RuleSetError};
use crate::options::Options;
use crate::validator::{Outcome, Validator};
use crate::value::parse_numeric;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::OnceLock;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static INT_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        // RFC 5322 simplified, with a dotted domain
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$"
        ).unwrap()
    })
}

fn int_regex() -> &'static Regex {
    INT_REGEX.get_or_init(|| Regex::new(r"^[+-]?(?:0|[1-9]\d*)$").unwrap())
}

/// A named format predicate, selected by the `flags` option of `filter_var`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatFilter {
    /// Any scalar passes; arrays and objects do not
    Default,
    Email,
    /// IPv4 or IPv6 address
    Ip,
    /// Absolute URL with a scheme
    Url,
    Int,
    Float,
    /// `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`, or an empty string
    Bool,
}

impl FormatFilter {
    pub const ALL: [FormatFilter; 7] = [
        FormatFilter::Default,
        FormatFilter::Email,
        FormatFilter::Ip,
        FormatFilter::Url,
        FormatFilter::Int,
        FormatFilter::Float,
        FormatFilter::Bool,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FormatFilter::Default => "default",
            FormatFilter::Email => "email",
            FormatFilter::Ip => "ip",
            FormatFilter::Url => "url",
            FormatFilter::Int => "int",
            FormatFilter::Float => "float",
            FormatFilter::Bool => "bool",
        }
    }

    /// Whether the value passes this filter.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FormatFilter::Default => !matches!(value, Value::Array(_) | Value::Object(_)),
            FormatFilter::Email => value.as_str().is_some_and(|s| email_regex().is_match(s)),
            FormatFilter::Ip => value.as_str().is_some_and(|s| IpAddr::from_str(s).is_ok()),
            FormatFilter::Url => value.as_str().is_some_and(is_url),
            FormatFilter::Int => match value {
                Value::Number(n) => n.is_i64() || n.is_u64(),
                Value::String(s) => {
                    let s = s.trim();
                    int_regex().is_match(s) && s.parse::<i64>().is_ok()
                }
                Value::Bool(b) => *b,
                _ => false,
            },
            FormatFilter::Float => match value {
                Value::Number(_) => true,
                Value::String(s) => parse_numeric(s).is_some(),
                Value::Bool(b) => *b,
                _ => false,
            },
            FormatFilter::Bool => match value {
                Value::Bool(_) => true,
                Value::Number(n) => matches!(n.as_f64(), Some(f) if f == 0.0 || f == 1.0),
                Value::String(s) => matches!(
                    s.trim().to_ascii_lowercase().as_str(),
                    "" | "1" | "0" | "true" | "false" | "yes" | "no" | "on" | "off"
                ),
                _ => false,
            },
        }
    }
}

fn is_url(s: &str) -> bool {
    !s.is_empty() && !s.chars().any(char::is_whitespace) && url::Url::parse(s).is_ok()
}

impl FromStr for FormatFilter {
    type Err = RuleSetError;

    fn from_str(s: &str) -> Result<Self> {
        FormatFilter::ALL
            .into_iter()
            .find(|filter| filter.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| RuleSetError::config(format!("unknown format filter '{s}'")))
    }
}

impl fmt::Display for FormatFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `filter_var`, `email`, `ip` and `url`: the value must pass a format filter.
///
/// The filter comes from the `flags` option, falling back to the kind's
/// preset. A value that passes the filter passes the rule; the value itself
/// is never rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    preset: FormatFilter,
}

impl Format {
    pub fn new(preset: FormatFilter) -> Self {
        Self { preset }
    }

    pub fn preset(&self) -> FormatFilter {
        self.preset
    }
}

impl Validator for Format {
    fn test(&self, value: Value, options: &Options) -> Result<Outcome> {
        let filter = match options.string("flags")? {
            Some(name) => name.parse()?,
            None => self.preset,
        };
        Ok(Outcome::new(filter.accepts(&value), value))
    }
}
