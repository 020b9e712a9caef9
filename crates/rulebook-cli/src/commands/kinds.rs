//! Kinds command: list what the default registry provides

use crate::config::{OutputFormat, Settings};
use anyhow::Result;
use clap::Args;
use console::style;
use rulebook::Registry;
use serde_json::json;

/// Arguments for the `kinds` command
#[derive(Args, Debug)]
pub struct KindsArgs {
    /// Output format [env: RULEBOOK_FORMAT]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

pub fn kinds(args: KindsArgs, settings: &Settings) -> Result<()> {
    let registry = Registry::default();

    match settings.format(args.format) {
        OutputFormat::Text => {
            println!("{}", style("Validator kinds:").bold());
            for kind in registry.kinds() {
                println!("  {}", kind);
            }
            println!();
            println!("{}", style("Mappers:").bold());
            for name in registry.mapper_names() {
                println!("  {}", name);
            }
        }
        OutputFormat::Json => {
            let listing = json!({
                "kinds": registry.kinds(),
                "mappers": registry.mapper_names(),
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
    }

    Ok(())
}
