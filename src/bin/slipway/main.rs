//! Slipway CLI - a recipe-driven dependency and build pipeline for CMake packages

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("slipway=debug")
    } else {
        EnvFilter::new("slipway=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        Commands::New(args) => commands::new::execute(args),
        Commands::Init(args) => commands::init::execute(args),
        Commands::Graph(args) => commands::graph::execute(args, cli.store),
        Commands::Install(args) => commands::install::execute(args, cli.store),
        Commands::Build(args) => commands::build::execute(args, cli.store),
        Commands::Create(args) => commands::create::execute(args, cli.store),
        Commands::Clean(args) => commands::clean::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
