//! Scripts executed from the launch directory when the container starts
//!
//! Every script is staged on the host under the project root and copied into
//! the image, so it works on bases without a shell.

use super::{DockerfileDraft, Instruction};
use crate::config::{FilesystemEntry, NetworkEntry, OptionValue};
use crate::error::{BuildError, Result};
use crate::RcloneDefault;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Host side of the launch directory
#[derive(Debug, Clone)]
pub struct LaunchStaging {
    root: PathBuf,
}

impl LaunchStaging {
    pub fn new(root: &Path) -> Self {
        Self { root: root.to_path_buf() }
    }

    pub fn host_dir(&self) -> PathBuf {
        self.root.join(crate::LAUNCH_STAGING_DIR)
    }

    /// Writes the script and returns the `COPY` placing it into the image
    pub fn stage(&self, file_name: &str, content: &str) -> Result<Instruction> {
        let dir = self.host_dir();
        std::fs::create_dir_all(&dir)
            .map_err(|err| BuildError::fs(&dir, err))?;

        let path = dir.join(file_name);
        log::debug!("Staging launch script {:?}", path);

        let mut content = content.to_string();
        if !content.ends_with('\n') {
            content.push('\n');
        }

        std::fs::write(&path, content)
            .map_err(|err| BuildError::fs(&path, err))?;

        // COPY keeps the mode, the scripts are executed directly
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
                .map_err(|err| BuildError::fs(&path, err))?;
        }

        Ok(Instruction::copy(
            format!("{}/{}", crate::LAUNCH_STAGING_DIR, file_name),
            format!("{}/{}", crate::LAUNCH_DIR, file_name),
        ))
    }
}

/// `[<order>_]<kind>_<name>`, order `0` means no prefix
///
/// The prefix is not padded, launch scripts run in lexical order so `10` sorts before `9`
pub fn script_name(order: u32, kind: &str, name: &str) -> String {
    if order == 0 {
        format!("{kind}_{name}")
    } else {
        format!("{order}_{kind}_{name}")
    }
}

pub fn emit_networks<W: Write>(networks: &[NetworkEntry], staging: &LaunchStaging, draft: &mut DockerfileDraft<W>) -> Result<()> {
    for network in networks {
        let file_name = script_name(network.order, "network", &network.name);
        let content = format!("{} {}", crate::NETWORK_JOIN_COMMAND, network.name);

        draft.emit(staging.stage(&file_name, &content)?)?;
    }

    Ok(())
}

/// Defaults overlaid with the options given by the filesystem entry
pub fn filesystem_options(overrides: &BTreeMap<String, OptionValue>) -> BTreeMap<String, OptionValue> {
    let mut options: BTreeMap<String, OptionValue> = crate::RCLONE_DEFAULT_OPTIONS
        .iter()
        .map(|(key, value)| {
            let value = match value {
                RcloneDefault::Flag(x) => OptionValue::Flag(*x),
                RcloneDefault::Value(x) => OptionValue::Text(x.to_string()),
            };

            (key.to_string(), value)
        })
        .collect();

    options.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));

    options
}

/// Booleans become bare flags or are left out, everything else is `--key=value`
fn render_options(options: &BTreeMap<String, OptionValue>) -> Vec<String> {
    options
        .iter()
        .filter_map(|(key, value)| match value {
            OptionValue::Flag(true) => Some(format!("--{key}")),
            OptionValue::Flag(false) => None,
            OptionValue::Integer(x) => Some(format!("--{key}={x}")),
            OptionValue::Text(x) => Some(format!("--{key}={x}")),
        })
        .collect()
}

pub fn mount_command(filesystem: &FilesystemEntry) -> String {
    let options = render_options(&filesystem_options(&filesystem.options));

    format!(
        "mkdir -p {mount} && {rclone} {name}: {mount} {options}",
        mount = filesystem.mount,
        rclone = crate::RCLONE_COMMAND,
        name = filesystem.name,
        options = options.join(" "),
    )
    .trim_end()
    .to_string()
}

pub fn emit_filesystems<W: Write>(filesystems: &[FilesystemEntry], staging: &LaunchStaging, draft: &mut DockerfileDraft<W>) -> Result<()> {
    for filesystem in filesystems {
        let file_name = script_name(filesystem.order, "filesystem", &filesystem.name);

        draft.emit(staging.stage(&file_name, &mount_command(filesystem))?)?;
    }

    Ok(())
}

/// Explicit scripts, named after their key
pub fn emit_launch_scripts<W: Write>(scripts: &BTreeMap<String, String>, staging: &LaunchStaging, draft: &mut DockerfileDraft<W>) -> Result<()> {
    for (name, content) in scripts {
        draft.emit(staging.stage(name, content)?)?;
    }

    Ok(())
}
