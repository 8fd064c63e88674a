use clap::{Subcommand, Args};
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct CmdConfigInspectArgs {
    /// Path to the config file
    pub path: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Inspect a config, can be used to check if syntax is correct
    Inspect(CmdConfigInspectArgs),

    /// Show all options useable in a config
    Options,
}
