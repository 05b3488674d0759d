//! High-level operations.
//!
//! This module implements the pipeline phases behind the Slipway commands.
//! Phase order is fixed: resolve -> generate -> build -> package, each
//! phase consuming the previous phase's output. Any phase error aborts the
//! pipeline; the CLI surfaces the originating phase through the error
//! context chain.

pub mod export;
pub mod package;
pub mod slipway_build;
pub mod slipway_create;
pub mod slipway_install;
pub mod slipway_new;

pub use export::export_sources;
pub use package::{package, PackageError};
pub use slipway_build::{build, BuildOutcome};
pub use slipway_create::{create, CreateOutcome};
pub use slipway_install::{install, Installation, InstallOptions};
pub use slipway_new::{init_project, new_project};
