use crate::error::{BuildError, Result};
use std::process::{Command, ExitStatus, Output};

#[allow(unused_imports)]
pub mod command_extensions {
    pub use super::{CommandExt, CommandOutputExt};
    pub use std::process::Command;
}

/// Simple extension trait to get a consistent exit code out of a process
pub trait CommandOutputExt {
    /// Equal to `1` in case of signal termination (or any exit code larger than 255)
    fn get_code(&self) -> u8;
}

impl CommandOutputExt for ExitStatus {
    fn get_code(&self) -> u8 {
        // the unwrap_or(1) s are cause even if conversion fails it still failed just termination
        // by signal is larger than 255 that u8 exit code on unix allows
        TryInto::<u8>::try_into(self.code().unwrap_or(1)).unwrap_or(1)
    }
}

impl CommandOutputExt for Output {
    fn get_code(&self) -> u8 {
        self.status.get_code()
    }
}

pub trait CommandExt {
    /// Returns the command with all the arguments as a `String`
    fn get_full_command(&self) -> String;

    /// Command in readable and copy-able format, one quoted argument per line
    fn get_escaped_command(&self) -> String;

    /// Runs with inherited stdio, logs the command and status, fails on non-zero exit
    ///
    /// `display` is what ends up in logs and errors, so secrets can be masked
    fn log_status_checked(&mut self, display: &str) -> Result<ExitStatus>;
}

impl CommandExt for Command {
    fn get_full_command(&self) -> String {
        format!(
            "{} {}",
            self.get_program().to_string_lossy(),
            self.get_args()
                .collect::<Vec<_>>()
                .join(std::ffi::OsStr::new(" "))
                .to_string_lossy(),
        )
    }

    fn get_escaped_command(&self) -> String {
        let mut text = format!("(CMD) {:?}", self.get_program().to_string_lossy());

        for arg in self.get_args() {
            // continuation goes in front so the last line has none
            text.push_str(&format!(" \\\n      {:?}", arg.to_string_lossy()));
        }

        text
    }

    fn log_status_checked(&mut self, display: &str) -> Result<ExitStatus> {
        log::debug!("Command {:?}", display);

        let status = self.status();

        match status {
            Ok(status) if status.success() => {
                log::debug!("Command {:?} (status)\n  STATUS: {:?}", display, status);

                Ok(status)
            },
            Ok(status) => Err(BuildError::Subprocess {
                command: display.to_string(),
                reason: format!("exit with error code {}", status.get_code()),
            }),
            Err(err) => Err(BuildError::Subprocess {
                command: display.to_string(),
                reason: format!("could not execute: {}", err),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_command() {
        let mut cmd = Command::new("docker");
        cmd.args(["build", "-t", "app:1", "."]);

        assert_eq!(cmd.get_full_command(), "docker build -t app:1 .");
    }

    #[test]
    fn escaped_command() {
        let mut cmd = Command::new("docker");
        cmd.args(["push", "-a", "app"]);

        assert_eq!(
            cmd.get_escaped_command(),
            "(CMD) \"docker\" \\\n      \"push\" \\\n      \"-a\" \\\n      \"app\""
        );
    }

    #[cfg(unix)]
    #[test]
    fn failing_status() {
        let result = Command::new("sh")
            .args(["-c", "exit 3"])
            .log_status_checked("sh -c 'exit 3'");

        match result {
            Err(BuildError::Subprocess { command, reason }) => {
                assert_eq!(command, "sh -c 'exit 3'");
                assert!(reason.contains('3'), "{reason}");
            },
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn missing_program() {
        let result = Command::new("surely-this-program-does-not-exist-anywhere")
            .log_status_checked("missing");

        assert!(matches!(result, Err(BuildError::Subprocess { .. })));
    }
}
