//! Container engine invocations

use crate::command_ext::command_extensions::*;
use crate::error::Result;
use std::fmt::Display;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    Docker,
    Podman,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engine {
    /// Path to the engine, can also be name in PATH
    pub path: String,

    /// See `EngineKind`
    pub kind: EngineKind,
}

impl Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{:?}", self.kind).to_lowercase())
    }
}

impl Engine {
    /// Detects engine kind from the executable name, anything not podman is
    /// treated as docker compatible
    pub fn detect(path: &str) -> Self {
        let name = Path::new(path)
            .file_name()
            .map(|x| x.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let kind = if name.contains("podman") {
            EngineKind::Podman
        } else {
            EngineKind::Docker
        };

        Self { path: path.to_string(), kind }
    }

    /// Finds first available engine, prioritizes docker
    pub fn find_available_engine() -> Option<Self> {
        crate::KNOWN_ENGINES
            .iter()
            .find(|x| crate::util::executable_in_path(x))
            .map(|x| Self::detect(x))
    }

    pub fn command(&self) -> Command {
        Command::new(&self.path)
    }

    /// Registry login, credentials are passed as arguments
    pub fn login(&self, username: &str, password: &str) -> Invocation {
        let mut cmd = self.command();
        cmd.args(["login".to_string(), format!("-u={}", username), format!("-p={}", password)]);

        Invocation::with_secret(cmd, password)
    }

    /// Builds the Dockerfile in `root` tagging the image with every tag at once
    pub fn build(&self, root: &Path, image_name: &str, tags: &[String]) -> Invocation {
        let mut cmd = self.command();
        cmd.current_dir(root);
        cmd.arg("build");

        for tag in tags {
            cmd.args(["-t".to_string(), format!("{}:{}", image_name, tag)]);
        }

        cmd.arg(".");

        Invocation::new(cmd)
    }

    /// Pushes all tags of the image
    pub fn push(&self, image_name: &str) -> Invocation {
        let mut cmd = self.command();
        cmd.args(["push", "-a", image_name]);

        Invocation::new(cmd)
    }
}

/// Engine command ready to be executed or printed
#[derive(Debug)]
pub struct Invocation {
    command: Command,
    secret: Option<String>,
}

impl Invocation {
    pub fn new(command: Command) -> Self {
        Self { command, secret: None }
    }

    pub fn with_secret(command: Command, secret: &str) -> Self {
        Self {
            command,
            secret: Some(secret.to_string()).filter(|x| !x.is_empty()),
        }
    }

    fn mask(&self, text: String) -> String {
        match &self.secret {
            Some(secret) => text.replace(secret.as_str(), "***"),
            None => text,
        }
    }

    /// Full command line, secret masked
    pub fn display(&self) -> String {
        self.mask(self.command.get_full_command())
    }

    /// Raw arguments, secret included
    pub fn args(&self) -> Vec<String> {
        self.command.get_args().map(|x| x.to_string_lossy().to_string()).collect()
    }

    /// Blocks until the engine exits, with `dry_run` only prints the command
    pub fn run(mut self, dry_run: bool) -> Result<()> {
        if dry_run {
            println!("{}", self.mask(self.command.get_escaped_command()));

            return Ok(());
        }

        let display = self.display();
        self.command.log_status_checked(&display)?;

        Ok(())
    }
}
