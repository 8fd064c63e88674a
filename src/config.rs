//! Contains everything related to the build configuration file

mod v1;
pub use v1::{ConfigV1, FilesystemEntry, NetworkEntry, OptionValue};

/// Latest config struct
pub type Config = ConfigV1;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "version")]
pub enum ConfigFile {
    #[serde(rename = "1")]
    V1(ConfigV1),
}

impl From<ConfigFile> for Config {
    fn from(value: ConfigFile) -> Self {
        match value {
            ConfigFile::V1(x) => x,
        }
    }
}

impl ConfigFile {
    pub fn config_from_str(input: &str) -> Result<Config> {
        Ok(toml::from_str::<ConfigFile>(input)?.into())
    }

    pub fn config_from_json(input: &str) -> Result<Config> {
        Ok(serde_json::from_str::<ConfigFile>(input)?.into())
    }

    /// Parses config as JSON if the extension is `.json`, TOML otherwise
    pub fn config_from_file(file: &Path) -> Result<Config> {
        let file_contents = std::fs::read_to_string(file)
            .with_context(|| format!("while reading config file {:?}", file))?;

        let is_json = file.extension().is_some_and(|x| x == "json");

        let config = if is_json {
            Self::config_from_json(&file_contents)
        } else {
            Self::config_from_str(&file_contents)
        };

        config.with_context(|| format!("while parsing config file {:?}", file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn from_str() {
        let cfg_text = r#"
version = "1"
base_image = "alpine"
image_os = "alpine"
install = [ "curl" ]
entrypoint = "/app"
"#;

        let result = ConfigFile::config_from_str(cfg_text);
        assert!(result.is_ok(), "result is err: {}", result.unwrap_err());

        assert_eq!(
            result.unwrap(),
            Config {
                base_image: Some("alpine".into()),
                image_os: Some("alpine".into()),
                install: vec!["curl".into()],
                entrypoint: Some("/app".into()),

                ..Default::default()
            }
        );
    }

    #[test]
    fn from_str_launch_entries() {
        let cfg_text = r#"
version = "1"

[[networks]]
name = "abcdef"
order = 10

[[filesystems]]
name = "remote"
mount = "/mnt/remote"
options = { allow-other = true, buffer-size = "128M", transfers = 4 }
"#;

        let config = ConfigFile::config_from_str(cfg_text).unwrap();

        assert_eq!(config.networks, vec![NetworkEntry { name: "abcdef".into(), order: 10 }]);
        assert_eq!(
            config.filesystems,
            vec![FilesystemEntry {
                name: "remote".into(),
                mount: "/mnt/remote".into(),
                options: BTreeMap::from([
                    ("allow-other".to_string(), OptionValue::Flag(true)),
                    ("buffer-size".to_string(), OptionValue::Text("128M".into())),
                    ("transfers".to_string(), OptionValue::Integer(4)),
                ]),
                order: 0,
            }]
        );
    }

    #[test]
    fn from_json() {
        let cfg_text = r#"{
            "version": "1",
            "docker_username": "someone",
            "emi": { "tools": ["git", "make"] }
        }"#;

        let config = ConfigFile::config_from_json(cfg_text).unwrap();
        assert_eq!(config.docker_username.as_deref(), Some("someone"));
        assert_eq!(config.emi.get("tools"), Some(&vec!["git".to_string(), "make".to_string()]));
    }

    #[test]
    fn from_file_by_extension() {
        let tempdir = tempfile::tempdir().unwrap();

        let json = tempdir.path().join("config.json");
        std::fs::write(&json, r#"{ "version": "1", "tags": ["latest"] }"#).unwrap();
        assert_eq!(ConfigFile::config_from_file(&json).unwrap().tags, vec!["latest".to_string()]);

        let toml = tempdir.path().join("dockplan.toml");
        std::fs::write(&toml, "version = \"1\"\ntags = [ \"latest\" ]\n").unwrap();
        assert_eq!(ConfigFile::config_from_file(&toml).unwrap().tags, vec!["latest".to_string()]);

        assert!(ConfigFile::config_from_file(&tempdir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let cfg_text = r#"
version = "1"
imgae_os = "debian"
"#;

        assert!(ConfigFile::config_from_str(cfg_text).is_err());
    }

    #[test]
    fn unknown_version_is_rejected() {
        assert!(ConfigFile::config_from_str("version = \"0\"\n").is_err());
    }
}
