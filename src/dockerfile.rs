//! Dockerfile synthesis
//!
//! The assembler runs every emitter in a fixed order against an append-only
//! [`DockerfileDraft`]. Emitters never look at what others wrote, so the order
//! below is the only thing deciding the layout of the file:
//!
//! 1. preliminary stages for combined images
//! 2. build stage `FROM <base> as build` and the combined image copies
//! 3. include, lib and bin trees
//! 4. environment
//! 5. OS packages, then emi groups
//! 6. network, filesystem and explicit launch scripts
//! 7. raw `also` lines
//! 8. `FROM scratch` stage copying the build stage, entrypoint and cmd

mod directives;
mod launch;
mod packages;
mod stages;
mod tree;

pub use launch::LaunchStaging;

use crate::error::{BuildError, Result};
use crate::resolve::BuildConfiguration;
use std::fmt::Display;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Single Dockerfile line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    From { image: String, stage: Option<String> },
    Copy { from: Option<String>, src: String, dst: String },
    Run(String),
    Env(String),
    Entrypoint(String),
    Cmd(String),

    /// Written verbatim, nothing is validated
    Raw(String),
}

impl Instruction {
    pub fn run(cmd: impl Into<String>) -> Self {
        Self::Run(cmd.into())
    }

    pub fn copy(src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self::Copy { from: None, src: src.into(), dst: dst.into() }
    }

    pub fn copy_from(stage: impl Into<String>, src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self::Copy { from: Some(stage.into()), src: src.into(), dst: dst.into() }
    }
}

/// Renders a single element exec form array, `["value"]`
fn exec_form(value: &str) -> String {
    // a JSON string literal is exactly what the exec form expects
    let quoted = serde_json::to_string(value).unwrap_or_else(|_| format!("{:?}", value));
    format!("[{}]", quoted)
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::From { image, stage: Some(stage) } => write!(f, "FROM {image} as {stage}"),
            Self::From { image, stage: None } => write!(f, "FROM {image}"),
            Self::Copy { from: Some(from), src, dst } => write!(f, "COPY --from={from} {src} {dst}"),
            Self::Copy { from: None, src, dst } => write!(f, "COPY {src} {dst}"),
            Self::Run(cmd) => write!(f, "RUN {cmd}"),
            Self::Env(decl) => write!(f, "ENV {decl}"),
            Self::Entrypoint(cmd) => write!(f, "ENTRYPOINT {}", exec_form(cmd)),
            Self::Cmd(cmd) => write!(f, "CMD {}", exec_form(cmd)),
            Self::Raw(line) => f.write_str(line),
        }
    }
}

/// Append-only instruction stream, one instruction per line
pub struct DockerfileDraft<W: Write> {
    out: W,

    /// Used for error reporting only
    path: PathBuf,
}

impl<W: Write> DockerfileDraft<W> {
    pub fn new(out: W, path: impl Into<PathBuf>) -> Self {
        Self { out, path: path.into() }
    }

    pub fn emit(&mut self, instruction: Instruction) -> Result<()> {
        log::trace!("Emitting {:?}", instruction);

        writeln!(self.out, "{}", instruction)
            .map_err(|err| BuildError::fs(&self.path, err))
    }

    pub fn emit_all(&mut self, instructions: impl IntoIterator<Item = Instruction>) -> Result<()> {
        for instruction in instructions {
            self.emit(instruction)?;
        }

        Ok(())
    }

    /// Flushes and hands back the writer, nothing can be emitted afterwards
    pub fn seal(mut self) -> Result<W> {
        self.out.flush()
            .map_err(|err| BuildError::fs(&self.path, err))?;

        Ok(self.out)
    }
}

/// Runs all emitters in order
pub fn assemble<W: Write>(
    config: &BuildConfiguration,
    draft: &mut DockerfileDraft<W>,
    staging: &LaunchStaging,
) -> Result<()> {
    stages::emit_combo_stages(&config.combine_images, draft)?;
    stages::emit_build_stage(&config.base_image, draft)?;
    stages::emit_combo_copies(&config.combine_images, draft)?;

    tree::emit_trees(config, draft)?;

    directives::emit_environment(&config.environment, draft)?;

    if let Some(os) = config.target_os {
        packages::emit_packages(os, &config.packages, draft)?;
    }
    packages::emit_install_groups(&config.install_groups, draft)?;

    launch::emit_networks(&config.networks, staging, draft)?;
    launch::emit_filesystems(&config.filesystems, staging, draft)?;
    launch::emit_launch_scripts(&config.launch_scripts, staging, draft)?;

    directives::emit_raw(&config.extra_directives, draft)?;

    stages::emit_finalize_stage(draft)?;
    directives::emit_entry(config.entrypoint.as_deref(), config.command.as_deref(), draft)?;

    Ok(())
}

/// Writes `Dockerfile` into the project root, returns its path
///
/// A failure halfway leaves a partial file behind, the build that follows
/// will reject it
pub fn write_dockerfile(config: &BuildConfiguration) -> Result<PathBuf> {
    let path = config.root.join(crate::DOCKERFILE_NAME);
    let file = std::fs::File::create(&path)
        .map_err(|err| BuildError::fs(&path, err))?;

    let mut draft = DockerfileDraft::new(BufWriter::new(file), &path);
    let result = assemble(config, &mut draft, &LaunchStaging::new(&config.root));

    // seal regardless of the outcome
    let sealed = draft.seal();
    result?;
    sealed?;

    log::info!("Wrote {:?}", path);

    Ok(path)
}

/// Synthesizes into memory, used for previews and tests
pub fn render(config: &BuildConfiguration, staging: &LaunchStaging) -> Result<String> {
    let mut draft = DockerfileDraft::new(Vec::new(), Path::new(crate::DOCKERFILE_NAME));
    assemble(config, &mut draft, staging)?;

    Ok(String::from_utf8_lossy(&draft.seal()?).to_string())
}
