//! CLI argument parsing

use crate::commands::{self, CheckArgs, KindsArgs};
use crate::config::Settings;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Rulebook - validate records against declarative rule files
#[derive(Parser, Debug)]
#[command(name = "rulebook")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a JSON record against a rules file
    Check(CheckArgs),

    /// List registered validator kinds and mappers
    Kinds(KindsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self, settings: &Settings) -> anyhow::Result<ExitCode> {
        match self.command {
            Commands::Check(args) => {
                let valid = commands::check(args, settings)?;
                Ok(if valid {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(commands::INVALID_EXIT_CODE)
                })
            }
            Commands::Kinds(args) => {
                commands::kinds(args, settings)?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
