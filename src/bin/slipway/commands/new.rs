//! `slipway new` command

use anyhow::Result;

use crate::cli::NewArgs;
use slipway::ops::new_project;

pub fn execute(args: NewArgs) -> Result<()> {
    new_project(&args.name, args.path.as_deref())?;
    eprintln!("    Created package `{}`", args.name);
    Ok(())
}
