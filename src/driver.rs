//! Build and publish pipelines
//!
//! Everything runs sequentially and blocks on the engine, a hung engine hangs
//! the build.

use crate::dockerfile;
use crate::engine::Engine;
use crate::error::Result;
use crate::resolve::{BuildConfiguration, PublishConfiguration};
use crate::tags::TagSource;
use std::path::PathBuf;

/// Outcome of a finished build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub image_name: String,

    /// Generated tag first, then the configured ones
    pub tags: Vec<String>,

    pub dockerfile: PathBuf,
    pub logged_in: bool,
    pub pushed: bool,
}

impl BuildReport {
    /// Engine failures are returned as errors, so a report always means success
    pub fn succeeded(&self) -> bool {
        true
    }

    /// `<name>:<tag>` for every tag
    pub fn references(&self) -> Vec<String> {
        self.tags.iter().map(|x| format!("{}:{}", self.image_name, x)).collect()
    }
}

pub struct BuildDriver<'a> {
    engine: &'a Engine,
    tag_source: &'a dyn TagSource,
    dry_run: bool,
}

impl<'a> BuildDriver<'a> {
    pub fn new(engine: &'a Engine, tag_source: &'a dyn TagSource, dry_run: bool) -> Self {
        Self { engine, tag_source, dry_run }
    }

    /// Synthesize, login, build and push when credentials allow it
    pub fn build(&self, config: &BuildConfiguration) -> Result<BuildReport> {
        let dockerfile = dockerfile::write_dockerfile(config)?;

        let mut tags = vec![self.tag_source.next_tag()];
        tags.extend(config.tags.iter().cloned());

        let credentials = config.credentials.complete();

        if let Some((username, password)) = credentials {
            log::info!("Logging in as {:?}", username);
            self.engine.login(username, password).run(self.dry_run)?;
        } else {
            log::info!("No complete credentials, the image will not be pushed");
        }

        log::info!("Building {} with tags {:?} using {}", config.image_name, tags, self.engine);
        self.engine.build(&config.root, &config.image_name, &tags).run(self.dry_run)?;

        if credentials.is_some() {
            log::info!("Pushing {}", config.image_name);
            self.engine.push(&config.image_name).run(self.dry_run)?;
        }

        Ok(BuildReport {
            image_name: config.image_name.clone(),
            tags,
            dockerfile,
            logged_in: credentials.is_some(),
            pushed: credentials.is_some(),
        })
    }
}

/// Login and push every tag of an already built image
pub fn publish(config: &PublishConfiguration, engine: &Engine, dry_run: bool) -> Result<()> {
    let username = config.credentials.username.as_deref().unwrap_or_default();
    let password = config.credentials.password.as_deref().unwrap_or_default();

    log::info!("Publishing {} as {:?}", config.image_name, username);

    engine.login(username, password).run(dry_run)?;
    engine.push(&config.image_name).run(dry_run)
}
