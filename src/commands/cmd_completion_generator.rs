use crate::cli::CmdCompletionArgs;
use crate::prelude::*;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::Write;

fn gen(shell: Shell, buf: &mut dyn Write) {
    let mut cmd = crate::cli::Cli::command();
    generate(shell, &mut cmd, crate::APP_NAME, buf);
}

fn detect_shell() -> Result<Shell> {
    let shell = std::env::var("SHELL").unwrap_or_default();

    if shell.ends_with("/fish") {
        Ok(Shell::Fish)
    } else if shell.ends_with("/bash") {
        Ok(Shell::Bash)
    } else if shell.ends_with("/zsh") {
        Ok(Shell::Zsh)
    } else {
        Err(anyhow!("This shell is unsupported, if this is a mistake set the shell explicitly using the argument"))
    }
}

/// Generates basic completion scripts by `clap_complete`
pub fn shell_completion_generation(cli_args: &CmdCompletionArgs) -> Result<()> {
    // use requested shell or detect automatically
    let shell = match cli_args.shell {
        Some(shell) => shell,
        None => detect_shell()?,
    };

    gen(shell, &mut std::io::stdout());

    Ok(())
}
