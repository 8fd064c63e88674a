//! Embedding of the include, lib and bin trees

use super::{DockerfileDraft, Instruction};
use crate::error::{BuildError, Result};
use crate::resolve::BuildConfiguration;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const INCLUDE_TARGET: &str = "/usr/local/include/";
pub const LIB_TARGET: &str = "/usr/local/lib/";
pub const BIN_TARGET: &str = "/usr/local/bin/";

/// Path as seen from the build context (the project root)
fn context_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

/// Copies contents of `source` into `target` instead of `source` itself
///
/// Files land directly in `target`, directories in `target/<name>` so they
/// are not flattened
pub fn emit_tree<W: Write>(root: &Path, source: &Path, target: &str, draft: &mut DockerfileDraft<W>) -> Result<()> {
    let source = if source.is_absolute() {
        source.to_path_buf()
    } else {
        root.join(source)
    };

    let mut entries = std::fs::read_dir(&source)
        .and_then(|dir| dir.map(|entry| entry.map(|x| x.path())).collect::<std::io::Result<Vec<PathBuf>>>())
        .map_err(|err| BuildError::fs(&source, err))?;

    // read_dir order is platform dependant
    entries.sort();

    for entry in entries {
        let src = context_path(root, &entry);

        if entry.is_dir() {
            let name = entry.file_name()
                .map(|x| x.to_string_lossy().to_string())
                .unwrap_or_default();

            draft.emit(Instruction::copy(src, format!("{}{}", target, name)))?;
        } else if entry.is_file() {
            draft.emit(Instruction::copy(src, target))?;
        } else {
            log::debug!("Skipping {:?}, neither a file nor a directory", entry);
        }
    }

    Ok(())
}

pub fn emit_trees<W: Write>(config: &BuildConfiguration, draft: &mut DockerfileDraft<W>) -> Result<()> {
    if let Some(inc) = &config.inc_path {
        emit_tree(&config.root, inc, INCLUDE_TARGET, draft)?;
    }

    if let Some(lib) = &config.lib_path {
        emit_tree(&config.root, lib, LIB_TARGET, draft)?;
    }

    if let Some(bin) = &config.bin_path {
        emit_tree(&config.root, bin, BIN_TARGET, draft)?;
        draft.emit(Instruction::run(format!("chmod +x {}*", BIN_TARGET)))?;
    }

    Ok(())
}
