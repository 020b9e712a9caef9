//! Check command: validate one record file against a rules file

use crate::config::{OutputFormat, Settings};
use anyhow::{bail, Context, Result};
use clap::Args;
use console::{style, Emoji};
use rulebook::{ErrorMap, Record, Registry, Rule};
use serde::Deserialize;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

static CHECK: Emoji<'_, '_> = Emoji("✅ ", "+ ");
static ERROR: Emoji<'_, '_> = Emoji("❌ ", "x ");

/// Arguments for the `check` command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSON file holding the record (an object)
    #[arg(long, value_name = "FILE")]
    pub record: PathBuf,

    /// Rules file: a JSON array of rules, or TOML with a top-level `rules` array
    #[arg(long, value_name = "FILE")]
    pub rules: PathBuf,

    /// Output format [env: RULEBOOK_FORMAT]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the rewritten record to this file
    #[arg(short, long, value_name = "FILE")]
    pub write: Option<PathBuf>,
}

#[derive(Deserialize)]
struct RulesFile {
    rules: Vec<Rule>,
}

/// Run the check. Returns whether the record passed every rule.
pub fn check(args: CheckArgs, settings: &Settings) -> Result<bool> {
    let mut record = load_record(&args.record)?;
    let rules = load_rules(&args.rules)?;
    debug!(record = %args.record.display(), rules = rules.len(), "loaded inputs");

    let errors = Registry::default()
        .validate(&mut record, &rules)
        .with_context(|| format!("rules in {} are invalid", args.rules.display()))?;
    let valid = errors.is_empty();
    info!(valid, messages = errors.len(), "record checked");

    if let Some(path) = &args.write {
        let content = serde_json::to_string_pretty(&record)?;
        fs::write(path, content + "\n")
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    match settings.format(args.format) {
        OutputFormat::Text => print_text(&errors),
        OutputFormat::Json => print_json(&record, &errors)?,
    }

    Ok(valid)
}

/// Load a record from a JSON file holding an object.
pub fn load_record(path: &Path) -> Result<Record> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read record {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("record {} is not valid JSON", path.display()))?;

    match value {
        Value::Object(record) => Ok(record),
        other => bail!(
            "record {} must be a JSON object, got {}",
            path.display(),
            kind_of(&other)
        ),
    }
}

/// Load rules from a `.toml` file or a JSON file.
pub fn load_rules(path: &Path) -> Result<Vec<Rule>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read rules {}", path.display()))?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        let file: RulesFile = toml::from_str(&content)
            .with_context(|| format!("failed to parse rules {}", path.display()))?;
        Ok(file.rules)
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse rules {}", path.display()))
    }
}

fn print_text(errors: &ErrorMap) {
    if errors.is_empty() {
        println!("{} {}", CHECK, style("Record is valid").green());
        return;
    }

    for (field, messages) in errors.iter() {
        for message in messages {
            println!("{} {}: {}", ERROR, style(field).bold(), message);
        }
    }
    println!();
    println!(
        "{}",
        style(format!(
            "{} message(s) across {} field(s)",
            errors.len(),
            errors.field_names().len()
        ))
        .red()
    );
}

fn print_json(record: &Record, errors: &ErrorMap) -> Result<()> {
    let report = json!({
        "valid": errors.is_empty(),
        "record": record,
        "errors": errors,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
