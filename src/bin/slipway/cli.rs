//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Slipway - a recipe-driven dependency and build pipeline for CMake packages
#[derive(Parser)]
#[command(name = "slipway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Artifact store root (overrides SLIPWAY_STORE)
    #[arg(long, global = true, env = "SLIPWAY_STORE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new package with a recipe skeleton
    New(NewArgs),

    /// Initialize a recipe in an existing directory
    Init(InitArgs),

    /// Resolve and display the dependency graph
    Graph(GraphArgs),

    /// Resolve dependencies and generate toolchain artifacts
    Install(PipelineArgs),

    /// Resolve, generate, and compile
    Build(PipelineArgs),

    /// Run the full pipeline and deposit the package into the store
    Create(PipelineArgs),

    /// Remove the build directory
    Clean(CleanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct NewArgs {
    /// Package name
    pub name: String,

    /// Directory to create the package in (defaults to name)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct InitArgs {
    /// Package name (defaults to directory name)
    #[arg(long)]
    pub name: Option<String>,

    /// Directory to initialize (defaults to current directory)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct GraphArgs {
    /// Output format: tree or json
    #[arg(long, default_value = "tree")]
    pub format: String,
}

/// Shared arguments for install/build/create.
#[derive(Args)]
pub struct PipelineArgs {
    /// Build type (debug, release, relwithdebinfo, minsizerel)
    #[arg(long, default_value = "release")]
    pub build_type: String,

    /// Override a recipe option, e.g. -o shared=true
    #[arg(short = 'o', long = "option")]
    pub options: Vec<String>,
}

#[derive(Args)]
pub struct CleanArgs {}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
