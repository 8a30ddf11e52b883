//! # Brandcast Config
//!
//! YAML configuration with `BRANDCAST_*` environment overrides and
//! validation for the forecast pipeline, analytics, chart, and both hosts.

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use schema::*;
