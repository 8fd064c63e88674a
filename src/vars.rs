//! File containing constants

/// Prefix env var name with proper prefix
#[macro_export]
macro_rules! ENV_VAR_PREFIX {
    ($($args:literal),*) => {
        concat!(env!("CARGO_PKG_NAME_UPPERCASE"), "_", $($args),*)
    };
}

pub const FULL_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "-", env!("VERGEN_GIT_SHA"));

pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Set log level from the environ
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

/// Container engine to use
pub const ENV_ENGINE: &str = ENV_VAR_PREFIX!("ENGINE");

/// Registry username
pub const ENV_USERNAME: &str = ENV_VAR_PREFIX!("USERNAME");

/// Registry password
pub const ENV_PASSWORD: &str = ENV_VAR_PREFIX!("PASSWORD");

/// Engines tried in order when none is set explicitly
pub const KNOWN_ENGINES: [&str; 2] = ["docker", "podman"];

/// Name of the generated artifact, always placed in the project root
pub const DOCKERFILE_NAME: &str = "Dockerfile";

/// Config file looked up in the project root when none is given
pub const DEFAULT_CONFIG_FILE: &str = "dockplan.toml";

/// Where launch scripts live inside the image, executed in lexical order on start
pub const LAUNCH_DIR: &str = "/launch.d";

/// Host directory, relative to project root, where launch scripts are staged before `COPY`
pub const LAUNCH_STAGING_DIR: &str = ".dockplan/launch.d";

/// Base image of the build stage when none is configured
pub const DEFAULT_BASE_IMAGE: &str = "scratch";

/// Environment set when `env` is not configured
pub const DEFAULT_ENV: &str = "TZ=\"America/Los_Angeles\"";

/// Name of the primary build stage
pub const BUILD_STAGE: &str = "build";

/// Prefix of stages created for each combined image
pub const COMBO_STAGE_PREFIX: &str = "combo";

/// Project types the build command accepts
pub const SUPPORTED_PROJECT_TYPES: [&str; 2] = ["img", "srv"];

/// Command used by network launch scripts
pub const NETWORK_JOIN_COMMAND: &str = "zerotier-cli join";

/// Package installer invoked for each `emi` group
pub const EMI_COMMAND: &str = "emi";

/// Directories the package installer leaves behind
pub const EMI_CLEANUP_PATHS: [&str; 2] = ["/tmp/*", "/var/cache/emi"];

/// Remote mount tool used by filesystem launch scripts
pub const RCLONE_COMMAND: &str = "rclone mount";

/// Options every filesystem mount starts from, overridable per filesystem
pub const RCLONE_DEFAULT_OPTIONS: [(&str, RcloneDefault); 8] = [
    ("buffer-size", RcloneDefault::Value("64M")),
    ("config", RcloneDefault::Value("/root/.config/rclone/rclone.conf")),
    ("dir-cache-time", RcloneDefault::Value("1m")),
    ("vfs-read-chunk-size", RcloneDefault::Value("32M")),
    ("vfs-read-chunk-size-limit", RcloneDefault::Value("1G")),
    ("fast-list", RcloneDefault::Flag(true)),
    ("syslog", RcloneDefault::Flag(true)),
    ("allow-other", RcloneDefault::Flag(false)),
];

/// Default value of an rclone option
#[derive(Debug, Clone, Copy)]
pub enum RcloneDefault {
    Flag(bool),
    Value(&'static str),
}
