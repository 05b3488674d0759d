//! Slipway - a recipe-driven dependency resolver and CMake build pipeline
//!
//! This crate provides the core library functionality for Slipway,
//! including pinned dependency resolution, toolchain generation, and
//! build/package orchestration.

pub mod builder;
pub mod core;
pub mod ops;
pub mod resolver;
pub mod store;
pub mod util;

/// Test utilities and fixtures for Slipway unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides stub artifact stores and recipe fixtures.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    layout::BuildLayout, options::Options, package_id::PackageId, recipe::Recipe,
    requirement::Requirement, settings::Settings,
};

pub use crate::resolver::ResolvedGraph;
pub use crate::store::{ArtifactStore, DirStore};
