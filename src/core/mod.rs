//! Core data structures for Slipway.
//!
//! This module contains the foundational types used throughout Slipway:
//! - Interned package identity (PackageId)
//! - The build configuration descriptor (Recipe) and its requirements
//! - Settings axes and binary-shape options
//! - The build directory layout

pub mod layout;
pub mod options;
pub mod package_id;
pub mod recipe;
pub mod requirement;
pub mod settings;
pub mod version;

pub use layout::BuildLayout;
pub use options::Options;
pub use package_id::PackageId;
pub use recipe::{Recipe, RECIPE_FILE_NAME};
pub use requirement::{Requirement, RequirementSpec};
pub use settings::{Arch, BuildType, Compiler, Os, Settings, SettingsAxis};
