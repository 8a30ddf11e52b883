//! # Brandcast Common
//!
//! Shared types, errors, and logging for the Brandcast workspace.
//!
//! This crate provides the foundational types used by the forecast,
//! analytics, graph, and host crates.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{BrandcastError, Result};
pub use logging::{init_logging, LoggingConfig};
pub use types::*;
