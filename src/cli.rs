pub mod cli_config;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const FULL_VERSION: &str = crate::FULL_VERSION;

/// Turns project configuration into a Dockerfile, then builds and publishes the image
#[derive(Parser, Debug)]
#[command(author, version = FULL_VERSION, about, long_about = None)]
pub struct Cli {
    /// Explicitly set container engine to use
    #[arg(long, env = crate::ENV_ENGINE)]
    pub engine: Option<String>,

    /// Just print engine commands that would've been ran, do not execute
    #[arg(long)]
    pub dry_run: bool,

    /// Increase verbosity, can be repeated
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: CliCommands,
}

/// Values the orchestrator knows about the project
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project name, defaults to the name of the root directory
    #[arg(long)]
    pub project_name: Option<String>,

    /// Project type, only "img" and "srv" can be built
    #[arg(long)]
    pub project_type: Option<String>,

    /// Project root, the Dockerfile is written and built here (defaults to current dir)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Directory whose contents are copied to /usr/local/include/ (relative to root)
    #[arg(long)]
    pub inc: Option<PathBuf>,

    /// Directory whose contents are copied to /usr/local/lib/ (relative to root)
    #[arg(long)]
    pub lib: Option<PathBuf>,

    /// Directory whose contents are copied to /usr/local/bin/ (relative to root)
    #[arg(long)]
    pub bin: Option<PathBuf>,

    /// Config file (defaults to dockplan.toml in the root, if it exists)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub credentials: CredentialArgs,
}

#[derive(Args, Debug, Clone)]
pub struct CredentialArgs {
    /// Registry username, overrides the config file
    #[arg(long, env = crate::ENV_USERNAME)]
    pub username: Option<String>,

    /// Registry password, overrides the config file
    #[arg(long, env = crate::ENV_PASSWORD, hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CmdPublishArgs {
    /// Image to push, overrides the config file
    #[arg(long)]
    pub image_name: Option<String>,

    /// Config file (defaults to dockplan.toml in the current dir, if it exists)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub credentials: CredentialArgs,
}

#[derive(Args, Debug, Clone)]
pub struct CmdDockerfileArgs {
    /// Print the Dockerfile instead of writing it into the root
    #[arg(long)]
    pub stdout: bool,

    #[command(flatten)]
    pub project: ProjectArgs,
}

#[derive(Args, Debug, Clone)]
pub struct CmdCompletionArgs {
    /// Generate completion for this shell, otherwise detected from $SHELL
    pub shell: Option<clap_complete::Shell>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommands {
    /// Write the Dockerfile, build the image and push it when credentials are set
    Build(ProjectArgs),

    /// Only write the Dockerfile
    Dockerfile(CmdDockerfileArgs),

    /// Login and push all tags of an already built image
    Publish(CmdPublishArgs),

    /// Inspect configs or list config options
    #[command(subcommand)]
    Config(cli_config::ConfigCommands),

    /// Generate shell completion
    Completion(CmdCompletionArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_build() {
        let cli = Cli::try_parse_from([
            "dockplan", "--dry-run", "-vv", "build",
            "--project-name", "app",
            "--bin", "out/bin",
            "--username", "u",
        ]).unwrap();

        assert!(cli.dry_run);
        assert_eq!(cli.verbose, 2);

        match cli.cmd {
            CliCommands::Build(args) => {
                assert_eq!(args.project_name.as_deref(), Some("app"));
                assert_eq!(args.bin, Some(PathBuf::from("out/bin")));
                assert_eq!(args.credentials.username.as_deref(), Some("u"));
            },
            x => panic!("unexpected command {:?}", x),
        }
    }
}
