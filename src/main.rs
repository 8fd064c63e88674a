mod cli;
mod command_ext;
mod commands;
mod config;
mod context;
mod dockerfile;
mod driver;
mod engine;
mod error;
mod resolve;
mod tags;
mod util;
mod vars;

pub use vars::*;

use clap::Parser;
use cli::cli_config::ConfigCommands;
use cli::CliCommands;
use log::LevelFilter;
use std::process::ExitCode;

#[allow(unused_imports)]
pub mod prelude {
    pub use crate::context::Context;
    pub use anyhow::{anyhow, Context as _, Result};
}

/// Level from LOG_LEVEL env var if valid, otherwise from the verbosity flag
fn log_level(verbose: u8) -> LevelFilter {
    if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
        if let Ok(level) = level.parse::<LevelFilter>() {
            return level;
        }
    }

    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    // logs go to stderr, stdout is for the orchestrator
    if let Err(err) = simple_logger::SimpleLogger::new()
        .with_level(log_level(args.verbose))
        .init()
    {
        eprintln!("Failed to initialize logger: {err}");
    }

    match command(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        },
    }
}

fn command(args: &cli::Cli) -> anyhow::Result<()> {
    let ctx = context::Context::new(args.dry_run, args.engine.clone())?;

    match &args.cmd {
        CliCommands::Build(x) => commands::build_image(&ctx, x),
        CliCommands::Dockerfile(x) => commands::write_dockerfile(&ctx, x),
        CliCommands::Publish(x) => commands::publish_image(&ctx, x),
        CliCommands::Config(subcmd) => match subcmd {
            ConfigCommands::Inspect(x) => commands::inspect_config(&ctx, x),
            ConfigCommands::Options => { commands::show_config_options(); Ok(()) },
        },
        CliCommands::Completion(x) => commands::shell_completion_generation(x),
    }
}
