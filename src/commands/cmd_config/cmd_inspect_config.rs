use crate::cli::cli_config::CmdConfigInspectArgs;
use crate::config::ConfigFile;
use crate::resolve::{resolve, ProjectInputs};
use crate::prelude::*;

/// Parses and resolves config, project is assumed to be the directory of the file
pub fn inspect_config(ctx: &Context, cli_args: &CmdConfigInspectArgs) -> Result<()> {
    let path = ctx.absolute(cli_args.path.clone());
    let config = ConfigFile::config_from_file(&path)?;

    println!("{:#?}", config);

    let inputs = ProjectInputs {
        root: path.parent().map(|x| x.to_path_buf()).unwrap_or_else(|| ctx.cwd.clone()),
        ..Default::default()
    };

    let resolved = resolve(config, inputs)
        .with_context(|| format!("while resolving config file {:?}", path))?;

    println!("{:#?}", resolved);

    Ok(())
}
