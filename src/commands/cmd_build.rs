use crate::cli::{CmdDockerfileArgs, ProjectArgs};
use crate::config::{Config, ConfigFile};
use crate::dockerfile::LaunchStaging;
use crate::driver::BuildDriver;
use crate::prelude::*;
use crate::resolve::{resolve, BuildConfiguration, Credentials, ProjectInputs};
use crate::tags::TimestampTags;
use crate::util;
use std::path::{Path, PathBuf};

/// Loads explicit config file, or the default one in root if it exists
pub(super) fn load_config(ctx: &Context, explicit: Option<PathBuf>, root: &Path) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => ConfigFile::config_from_file(&ctx.absolute(path))?,
        None => {
            let path = root.join(crate::DEFAULT_CONFIG_FILE);

            if path.exists() {
                ConfigFile::config_from_file(&path)?
            } else {
                log::debug!("No config file at {:?}, using defaults", path);
                Config::default()
            }
        },
    };

    config.docker_username = util::expand_opt(config.docker_username)?;
    config.docker_password = util::expand_opt(config.docker_password)?;

    Ok(config)
}

fn load_project(ctx: &Context, args: &ProjectArgs) -> Result<BuildConfiguration> {
    let root = match util::expand_path(args.root.clone())? {
        Some(root) => ctx.absolute(root),
        None => ctx.cwd.clone(),
    };

    let config = load_config(ctx, args.config.clone(), &root)?;

    let inputs = ProjectInputs {
        project_name: args.project_name.clone(),
        project_type: args.project_type.clone(),
        inc_path: util::expand_path(args.inc.clone())?,
        lib_path: util::expand_path(args.lib.clone())?,
        bin_path: util::expand_path(args.bin.clone())?,
        credentials: Credentials {
            username: args.credentials.username.clone(),
            password: args.credentials.password.clone(),
        },
        root,
    };

    let config = resolve(config, inputs)?;
    log::debug!("{:#?}", config);

    Ok(config)
}

/// Synthesizes the Dockerfile without touching the engine
pub fn write_dockerfile(ctx: &Context, args: &CmdDockerfileArgs) -> Result<()> {
    let config = load_project(ctx, &args.project)?;

    if args.stdout {
        let staging = LaunchStaging::new(&config.root);
        print!("{}", crate::dockerfile::render(&config, &staging)?);
    } else {
        let path = crate::dockerfile::write_dockerfile(&config)?;
        println!("{}", path.display());
    }

    Ok(())
}

pub fn build_image(ctx: &Context, args: &ProjectArgs) -> Result<()> {
    let config = load_project(ctx, args)?;
    let engine = ctx.engine()?;

    let report = BuildDriver::new(&engine, &TimestampTags, ctx.dry_run)
        .build(&config)
        .with_context(|| format!("while building image {:?}", config.image_name))?;

    if !report.succeeded() {
        return Err(anyhow!("Image {:?} was not built", report.image_name));
    }

    log::info!("Built image from {:?}", report.dockerfile);

    // what the orchestrator picks up
    for reference in report.references() {
        println!("{}", reference);
    }

    Ok(())
}
