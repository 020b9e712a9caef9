//! Environment configuration.
//!
//! Settings are read from `RULEBOOK_*` variables, after loading an optional
//! `.env` file from the working directory. Command-line flags take precedence
//! over anything set here.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;

/// Prefix shared by every environment setting.
pub const ENV_PREFIX: &str = "RULEBOOK_";

/// Log filter used when neither `RULEBOOK_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// How `check` and `kinds` print their results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// A single JSON document
    Json,
}

/// Settings loaded from the environment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// `RULEBOOK_FORMAT`
    #[serde(default)]
    pub format: Option<OutputFormat>,

    /// `RULEBOOK_LOG`, an `EnvFilter` directive
    #[serde(default)]
    pub log: Option<String>,
}

impl Settings {
    /// Load settings from `RULEBOOK_*` variables.
    pub fn from_env() -> Result<Self> {
        envy::prefixed(ENV_PREFIX)
            .from_env::<Settings>()
            .context("failed to read RULEBOOK_* environment settings")
    }

    /// The output format, with a flag value taking precedence.
    pub fn format(&self, flag: Option<OutputFormat>) -> OutputFormat {
        flag.or(self.format).unwrap_or_default()
    }

    /// The log filter directive: `RULEBOOK_LOG`, then `RUST_LOG`, then `warn`.
    pub fn log_filter(&self) -> String {
        self.log
            .clone()
            .filter(|filter| !filter.trim().is_empty())
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
    }
}

/// Load environment variables from `.env` in the working directory, if any.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_environment() {
        let settings = Settings {
            format: Some(OutputFormat::Json),
            log: None,
        };
        assert_eq!(settings.format(None), OutputFormat::Json);
        assert_eq!(settings.format(Some(OutputFormat::Text)), OutputFormat::Text);
        assert_eq!(Settings::default().format(None), OutputFormat::Text);
    }

    #[test]
    fn explicit_log_filter_wins() {
        let settings = Settings {
            format: None,
            log: Some("rulebook=trace".into()),
        };
        assert_eq!(settings.log_filter(), "rulebook=trace");
    }

    #[test]
    fn format_deserializes_lowercase() {
        let format: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, OutputFormat::Json);
        assert!(serde_json::from_str::<OutputFormat>("\"yaml\"").is_err());
    }
}
