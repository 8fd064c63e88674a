//! Configuration version 1

use code_docs::{code_docs_struct, DocumentedStruct};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Network joined at container start
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkEntry {
    pub name: String,

    /// Prefix of the launch script name, `0` means no prefix
    #[serde(default)]
    pub order: u32,
}

/// Value of a single mount option
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Integer(i64),
    Text(String),
}

/// Remote filesystem mounted at container start
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FilesystemEntry {
    /// Remote name as known to rclone
    pub name: String,

    /// Mount point inside the container
    pub mount: String,

    /// Overrides for the default mount options
    #[serde(default)]
    pub options: BTreeMap<String, OptionValue>,

    /// Prefix of the launch script name, `0` means no prefix
    #[serde(default)]
    pub order: u32,
}

// save all the fields and docs so they can be printed as always up-to-date documentation
code_docs_struct! {
    /// Image build configuration of a single project
    #[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
    #[serde(deny_unknown_fields)]
    pub struct ConfigV1 {
        /// Registry username, when set together with password the image is pushed
        ///
        /// Environ vars are expanded
        #[serde(default)]
        pub docker_username: Option<String>,

        /// Registry password
        ///
        /// Environ vars are expanded
        #[serde(default)]
        pub docker_password: Option<String>,

        /// Base image of the build stage (defaults to "scratch")
        #[serde(default)]
        pub base_image: Option<String>,

        /// Images whose whole filesystem is copied into the build stage, in order
        #[serde(default)]
        pub combine: Vec<String>,

        /// OS packages to install, requires `image_os`
        #[serde(default)]
        pub install: Vec<String>,

        /// Operating system of the base image, either "debian" or "alpine"
        #[serde(default)]
        pub image_os: Option<String>,

        /// Package groups installed with emi (label, packages)
        #[serde(default)]
        pub emi: BTreeMap<String, Vec<String>>,

        /// Explicit image name, otherwise "<username>/<project>" or "<project>"
        #[serde(default)]
        pub image_name: Option<String>,

        /// Environment declarations in KEY=VALUE form (defaults to a TZ entry)
        #[serde(default)]
        pub env: Option<Vec<String>>,

        /// Image entrypoint
        #[serde(default)]
        pub entrypoint: Option<String>,

        /// Image command
        #[serde(default)]
        pub cmd: Option<String>,

        /// Scripts placed in the launch directory (file name, content)
        #[serde(default)]
        pub launch: BTreeMap<String, String>,

        /// Raw Dockerfile lines appended as-is
        #[serde(default)]
        pub also: Vec<String>,

        /// Tags added next to the generated timestamp tag
        #[serde(default)]
        pub tags: Vec<String>,

        /// Remote filesystems mounted on start
        #[serde(default)]
        pub filesystems: Vec<FilesystemEntry>,

        /// Networks joined on start
        #[serde(default)]
        pub networks: Vec<NetworkEntry>,
    }
}
