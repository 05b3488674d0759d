//! `slipway init` command

use anyhow::Result;

use crate::cli::InitArgs;
use slipway::ops::init_project;

pub fn execute(args: InitArgs) -> Result<()> {
    let dir = match args.path {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    init_project(&dir, args.name.as_deref())?;
    eprintln!("    Initialized recipe in {}", dir.display());
    Ok(())
}
