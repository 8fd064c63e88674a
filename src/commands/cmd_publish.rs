use crate::cli::CmdPublishArgs;
use crate::prelude::*;
use crate::resolve::{resolve_publish, Credentials};

pub fn publish_image(ctx: &Context, args: &CmdPublishArgs) -> Result<()> {
    let config = super::cmd_build::load_config(ctx, args.config.clone(), &ctx.cwd)?;

    let credentials = Credentials {
        username: args.credentials.username.clone(),
        password: args.credentials.password.clone(),
    };

    let publish = resolve_publish(&config, args.image_name.clone(), &credentials)?;
    let engine = ctx.engine()?;

    crate::driver::publish(&publish, &engine, ctx.dry_run)
        .with_context(|| format!("while publishing image {:?}", publish.image_name))?;

    Ok(())
}
