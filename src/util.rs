use crate::command_ext::command_extensions::*;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Check whether executable exists in PATH
pub fn executable_in_path(cmd: &str) -> bool {
    let output = Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {}", cmd))
        .output();

    match output {
        Ok(output) => {
            log::trace!("Looking up {cmd:?} in PATH: {}", output.status);
            output.status.success()
        },
        Err(err) => {
            log::debug!("Could not look up {cmd:?} in PATH: {err}");
            false
        },
    }
}

/// Expands environ vars and `~` in a value
pub fn expand(value: &str) -> Result<String> {
    Ok(
        shellexpand::full(value)
            .with_context(|| format!("while expanding {:?}", value))?
            .to_string()
    )
}

pub fn expand_opt(value: Option<String>) -> Result<Option<String>> {
    value.map(|x| expand(&x)).transpose()
}

pub fn expand_path(value: Option<PathBuf>) -> Result<Option<PathBuf>> {
    value.map(|x| expand(&x.to_string_lossy()).map(PathBuf::from)).transpose()
}
