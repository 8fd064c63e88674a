//! Turns the raw configuration plus orchestrator inputs into a validated `BuildConfiguration`

use crate::config::{Config, FilesystemEntry, NetworkEntry};
use crate::error::{BuildError, Result};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::PathBuf;

/// Operating system of the build stage, decides package manager syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOs {
    Debian,
    Alpine,
}

impl TargetOs {
    pub const SUPPORTED: [&'static str; 2] = ["debian", "alpine"];
}

impl TryFrom<&str> for TargetOs {
    type Error = BuildError;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "debian" => Ok(Self::Debian),
            "alpine" => Ok(Self::Alpine),
            _ => Err(BuildError::config(format!(
                "Image os {:?} is not supported at this time, please use one of {:?}",
                value,
                Self::SUPPORTED
            ))),
        }
    }
}

impl Display for TargetOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

/// Registry credentials, either half may be missing
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    /// Both username and password are present and non-empty
    pub fn complete(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => Some((user, pass)),
            _ => None,
        }
    }
}

// never print the password
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Values supplied by the orchestrator rather than the config file
#[derive(Debug, Clone, Default)]
pub struct ProjectInputs {
    pub project_name: Option<String>,
    pub project_type: Option<String>,

    /// Project root, all relative paths are resolved against it
    pub root: PathBuf,

    pub inc_path: Option<PathBuf>,
    pub lib_path: Option<PathBuf>,
    pub bin_path: Option<PathBuf>,

    /// Take precedence over the config file
    pub credentials: Credentials,
}

/// Validated configuration of one build invocation, read-only after resolution
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfiguration {
    pub project_name: String,
    pub root: PathBuf,
    pub inc_path: Option<PathBuf>,
    pub lib_path: Option<PathBuf>,
    pub bin_path: Option<PathBuf>,
    pub credentials: Credentials,
    pub base_image: String,
    pub combine_images: Vec<String>,
    pub target_os: Option<TargetOs>,
    pub packages: Vec<String>,
    pub install_groups: BTreeMap<String, Vec<String>>,
    pub environment: Vec<String>,
    pub launch_scripts: BTreeMap<String, String>,
    pub networks: Vec<NetworkEntry>,
    pub filesystems: Vec<FilesystemEntry>,
    pub extra_directives: Vec<String>,
    pub image_name: String,
    pub tags: Vec<String>,
    pub entrypoint: Option<String>,
    pub command: Option<String>,
}

impl BuildConfiguration {
    /// Login (and push) only happens with a complete set of credentials
    pub fn should_login(&self) -> bool {
        self.credentials.complete().is_some()
    }
}

/// What the publish command needs, all of it mandatory
#[derive(Debug, Clone, PartialEq)]
pub struct PublishConfiguration {
    pub image_name: String,
    pub credentials: Credentials,
}

/// Empty strings count as unset
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|x| !x.is_empty())
}

/// Command line credentials win over the config file
fn merge_credentials(config: &Config, overrides: &Credentials) -> Credentials {
    Credentials {
        username: non_empty(overrides.username.clone())
            .or_else(|| non_empty(config.docker_username.clone())),
        password: non_empty(overrides.password.clone())
            .or_else(|| non_empty(config.docker_password.clone())),
    }
}

/// Explicit name, then `<username>/<project>`, then bare project name
pub fn resolve_image_name(explicit: Option<&str>, username: Option<&str>, project_name: &str) -> String {
    match (explicit, username) {
        (Some(name), _) if !name.is_empty() => name.to_string(),
        (_, Some(user)) if !user.is_empty() => format!("{}/{}", user, project_name),
        _ => project_name.to_string(),
    }
}

/// Launch scripts are named after user values, those must stay inside the launch directory
fn check_script_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') || name.contains(char::is_whitespace) {
        return Err(BuildError::config(format!("Invalid {} name {:?}", kind, name)));
    }

    Ok(())
}

/// Validates config and fills in defaults
pub fn resolve(config: Config, inputs: ProjectInputs) -> Result<BuildConfiguration> {
    let project_name = match non_empty(inputs.project_name.clone()) {
        Some(x) => x,
        None => inputs.root
            .file_name()
            .map(|x| x.to_string_lossy().to_string())
            .filter(|x| !x.is_empty())
            .ok_or_else(|| BuildError::config("Project name is not set and cannot be derived from the root path"))?,
    };

    if let Some(project_type) = inputs.project_type.as_deref() {
        if !crate::SUPPORTED_PROJECT_TYPES.contains(&project_type) {
            return Err(BuildError::config(format!(
                "Project type {:?} cannot be built into an image, supported types are {:?}",
                project_type,
                crate::SUPPORTED_PROJECT_TYPES
            )));
        }
    }

    let target_os = config.image_os
        .as_deref()
        .map(TargetOs::try_from)
        .transpose()?;

    if !config.install.is_empty() && target_os.is_none() {
        return Err(BuildError::config("You must specify \"image_os\" if you wish to install packages"));
    }

    for network in &config.networks {
        check_script_name("network", &network.name)?;
    }

    for filesystem in &config.filesystems {
        check_script_name("filesystem", &filesystem.name)?;
    }

    for name in config.launch.keys() {
        check_script_name("launch script", name)?;
    }

    let credentials = merge_credentials(&config, &inputs.credentials);

    let image_name = resolve_image_name(
        config.image_name.as_deref(),
        credentials.username.as_deref(),
        &project_name,
    );

    log::debug!("Resolved image name {image_name:?} for project {project_name:?}");

    Ok(BuildConfiguration {
        project_name,
        root: inputs.root,
        inc_path: inputs.inc_path,
        lib_path: inputs.lib_path,
        bin_path: inputs.bin_path,
        credentials,
        base_image: non_empty(config.base_image).unwrap_or_else(|| crate::DEFAULT_BASE_IMAGE.to_string()),
        combine_images: config.combine,
        target_os,
        packages: config.install,
        install_groups: config.emi,
        environment: config.env.unwrap_or_else(|| vec![crate::DEFAULT_ENV.to_string()]),
        launch_scripts: config.launch,
        networks: config.networks,
        filesystems: config.filesystems,
        extra_directives: config.also,
        image_name,
        tags: config.tags,
        entrypoint: config.entrypoint,
        command: config.cmd,
    })
}

/// Publishing needs an explicit image name and full credentials
pub fn resolve_publish(config: &Config, image_name: Option<String>, credentials: &Credentials) -> Result<PublishConfiguration> {
    let image_name = non_empty(image_name)
        .or_else(|| non_empty(config.image_name.clone()))
        .ok_or_else(|| BuildError::config("Publishing requires \"image_name\""))?;

    let credentials = merge_credentials(config, credentials);

    if credentials.username.is_none() {
        return Err(BuildError::config("Publishing requires \"docker_username\""));
    }

    if credentials.password.is_none() {
        return Err(BuildError::config("Publishing requires \"docker_password\""));
    }

    Ok(PublishConfiguration { image_name, credentials })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> ProjectInputs {
        ProjectInputs {
            project_name: Some("app".into()),
            root: PathBuf::from("/srv/app"),
            ..Default::default()
        }
    }

    fn creds(username: Option<&str>, password: Option<&str>) -> Credentials {
        Credentials {
            username: username.map(String::from),
            password: password.map(String::from),
        }
    }

    #[test]
    fn defaults() {
        let config = resolve(Config::default(), inputs()).unwrap();

        assert_eq!(config.base_image, "scratch");
        assert_eq!(config.environment, vec!["TZ=\"America/Los_Angeles\"".to_string()]);
        assert_eq!(config.image_name, "app");
        assert_eq!(config.target_os, None);
        assert!(!config.should_login());
    }

    #[test]
    fn packages_require_os() {
        let config = Config {
            install: vec!["curl".into()],
            ..Default::default()
        };

        let result = resolve(config, inputs());
        assert!(matches!(result, Err(BuildError::Configuration(_))), "{:?}", result);
    }

    #[test]
    fn unsupported_os() {
        for os in ["ubuntu", "Debian", "", "fedora"] {
            let config = Config {
                image_os: Some(os.into()),
                ..Default::default()
            };

            let result = resolve(config, inputs());
            assert!(matches!(result, Err(BuildError::Configuration(_))), "{os:?} -> {:?}", result);
        }
    }

    #[test]
    fn supported_os() {
        let config = Config {
            image_os: Some("debian".into()),
            install: vec!["curl".into()],
            ..Default::default()
        };

        assert_eq!(resolve(config, inputs()).unwrap().target_os, Some(TargetOs::Debian));
    }

    #[test]
    fn image_name_precedence() {
        assert_eq!(resolve_image_name(Some("x"), Some("u"), "app"), "x");
        assert_eq!(resolve_image_name(Some("x"), None, "app"), "x");
        assert_eq!(resolve_image_name(None, Some("u"), "app"), "u/app");
        assert_eq!(resolve_image_name(None, None, "app"), "app");
        assert_eq!(resolve_image_name(Some(""), Some(""), "app"), "app");
    }

    #[test]
    fn image_name_from_username() {
        let config = Config {
            docker_username: Some("u".into()),
            ..Default::default()
        };

        let resolved = resolve(config, inputs()).unwrap();
        assert_eq!(resolved.image_name, "u/app");
        assert!(!resolved.should_login());
    }

    #[test]
    fn login_requires_both_credentials() {
        let cases = [
            (Some("u"), Some("p"), true),
            (Some("u"), None, false),
            (None, Some("p"), false),
            (Some("u"), Some(""), false),
            (Some(""), Some("p"), false),
            (None, None, false),
        ];

        for (user, pass, expected) in cases {
            let config = Config {
                docker_username: user.map(String::from),
                docker_password: pass.map(String::from),
                ..Default::default()
            };

            assert_eq!(resolve(config, inputs()).unwrap().should_login(), expected, "{user:?} {pass:?}");
        }
    }

    #[test]
    fn cli_credentials_override_file() {
        let config = Config {
            docker_username: Some("file".into()),
            ..Default::default()
        };

        let inputs = ProjectInputs {
            credentials: creds(Some("cli"), Some("secret")),
            ..inputs()
        };

        let resolved = resolve(config, inputs).unwrap();
        assert_eq!(resolved.image_name, "cli/app");
        assert!(resolved.should_login());
    }

    #[test]
    fn project_type() {
        let mut inputs = inputs();
        inputs.project_type = Some("lib".into());
        assert!(resolve(Config::default(), inputs.clone()).is_err());

        inputs.project_type = Some("srv".into());
        assert!(resolve(Config::default(), inputs).is_ok());
    }

    #[test]
    fn project_name_from_root() {
        let inputs = ProjectInputs {
            root: PathBuf::from("/work/website"),
            ..Default::default()
        };

        assert_eq!(resolve(Config::default(), inputs).unwrap().image_name, "website");
    }

    #[test]
    fn explicit_empty_env_is_kept() {
        let config = Config {
            env: Some(vec![]),
            ..Default::default()
        };

        assert!(resolve(config, inputs()).unwrap().environment.is_empty());
    }

    #[test]
    fn script_names_are_checked() {
        let config = Config {
            launch: [("../escape".to_string(), "true".to_string())].into(),
            ..Default::default()
        };
        assert!(resolve(config, inputs()).is_err());

        let config = Config {
            networks: vec![NetworkEntry { name: "".into(), order: 0 }],
            ..Default::default()
        };
        assert!(resolve(config, inputs()).is_err());

        let config = Config {
            filesystems: vec![FilesystemEntry { name: "a b".into(), mount: "/mnt".into(), ..Default::default() }],
            ..Default::default()
        };
        assert!(resolve(config, inputs()).is_err());
    }

    #[test]
    fn publish_requires_everything() {
        let config = Config::default();

        assert!(resolve_publish(&config, None, &creds(Some("u"), Some("p"))).is_err());
        assert!(resolve_publish(&config, Some("img".into()), &creds(None, Some("p"))).is_err());
        assert!(resolve_publish(&config, Some("img".into()), &creds(Some("u"), None)).is_err());

        let publish = resolve_publish(&config, Some("img".into()), &creds(Some("u"), Some("p"))).unwrap();
        assert_eq!(publish.image_name, "img");
    }

    #[test]
    fn credentials_debug_hides_password() {
        let text = format!("{:?}", creds(Some("u"), Some("hunter2")));
        assert!(!text.contains("hunter2"));
    }
}
