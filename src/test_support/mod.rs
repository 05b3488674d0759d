//! Test utilities and fixtures for Slipway unit tests.

pub mod fixtures;
pub mod stores;

pub use fixtures::seed_recipe_project;
pub use stores::StubStore;
