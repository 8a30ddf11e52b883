//! # Brandcast Engine
//!
//! The analysis routine both dashboards call: run the forecast, compute
//! insights from the event log and build the trend chart, returning one
//! [`BrandReport`] per request.

pub mod engine;
pub mod report;

pub use engine::BrandEngine;
pub use report::{BrandReport, InsightsStatus};
