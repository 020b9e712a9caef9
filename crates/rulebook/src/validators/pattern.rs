use crate::error::{Result, RuleSetError};
use crate::options::Options;
use crate::validator::{Outcome, Validator};
use crate::value::to_text;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Default pattern of the `phone` kind: an optional `+7`/`8` trunk prefix,
/// a 3-6 digit area code with or without parentheses, then the number.
pub const PHONE_PATTERN: &str = r"(\+7|8)[ ]?(\(\d{3,6}\)|\d{3,6})[ ]?\d{1,10}-?\d{1,10}";

static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();

fn phone_regex() -> &'static Regex {
    PHONE_REGEX.get_or_init(|| Regex::new(PHONE_PATTERN).unwrap())
}

/// `match` and `phone`: the value's text must match a regular expression.
///
/// Options: `pattern` (required unless the kind has a default) and `not` to
/// negate the result. The match is unanchored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pattern {
    default_pattern: Option<&'static str>,
}

impl Pattern {
    /// A pattern validator with no default; rules must supply `pattern`.
    pub fn new() -> Self {
        Self::default()
    }

    /// A pattern validator that falls back to `pattern` when the rule has none.
    pub fn with_default(pattern: &'static str) -> Self {
        Self {
            default_pattern: Some(pattern),
        }
    }

    pub fn phone() -> Self {
        Self::with_default(PHONE_PATTERN)
    }

    fn is_match(&self, options: &Options, subject: &str) -> Result<bool> {
        match (options.string("pattern")?, self.default_pattern) {
            (Some(pattern), _) => Ok(compile_pattern(pattern)?.is_match(subject)),
            (None, Some(PHONE_PATTERN)) => Ok(phone_regex().is_match(subject)),
            (None, Some(pattern)) => Ok(compile_pattern(pattern)?.is_match(subject)),
            (None, None) => Err(RuleSetError::config("pattern is empty")),
        }
    }
}

impl Validator for Pattern {
    fn test(&self, value: Value, options: &Options) -> Result<Outcome> {
        let matched = self.is_match(options, &to_text(&value))?;
        let passed = matched != options.flag("not");
        Ok(Outcome::new(passed, value))
    }
}

/// Compile a pattern written either bare (`^\d+$`) or between delimiters with
/// trailing modifiers (`/^ab+$/i`).
///
/// Supported modifiers are `i`, `m`, `s` and `x`; `u` is accepted and ignored
/// since matching is always Unicode-aware. Text that only looks delimited,
/// such as `/api/v1`, is compiled as written.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    let source = match split_delimited(pattern) {
        Some((body, flags)) if flags.is_empty() => body.to_string(),
        Some((body, flags)) => format!("(?{flags}){body}"),
        None => pattern.to_string(),
    };

    Regex::new(&source)
        .map_err(|e| RuleSetError::config(format!("invalid pattern {pattern:?}: {e}")))
}

fn split_delimited(pattern: &str) -> Option<(&str, String)> {
    let delimiter = pattern.chars().next()?;
    if !matches!(delimiter, '/' | '#' | '~' | '!' | '@' | '%' | '`' | ';') {
        return None;
    }

    let end = pattern.rfind(delimiter).filter(|&end| end > 0)?;
    let modifiers = &pattern[end + delimiter.len_utf8()..];

    let mut flags = String::new();
    for modifier in modifiers.chars() {
        match modifier {
            'i' | 'm' | 's' | 'x' => {
                if !flags.contains(modifier) {
                    flags.push(modifier);
                }
            }
            'u' => {}
            _ => return None,
        }
    }

    Some((&pattern[delimiter.len_utf8()..end], flags))
}
