//! `rulebook` command-line tool.

mod cli;
mod commands;
mod config;

use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Exit status for usage, I/O and rule-set errors.
const FAILURE_EXIT_CODE: u8 = 2;

fn main() -> ExitCode {
    config::load_dotenv();
    let cli = cli::Cli::parse();

    let result = config::Settings::from_env().and_then(|settings| {
        init_tracing(&settings.log_filter());
        cli.execute(&settings)
    });

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", style("error:").red().bold(), err);
            ExitCode::from(FAILURE_EXIT_CODE)
        }
    }
}

fn init_tracing(filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
