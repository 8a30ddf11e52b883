//! # Brandcast Web
//!
//! Single-page dashboard: a form to pick a brand and an optional
//! competitor, and a result section with the next-day forecast, best
//! posting day, sentiment mix and the engagement trend chart.

pub mod error;
pub mod page;
pub mod server;

pub use error::WebError;
pub use page::{PageContext, Templates};
pub use server::{build_router, serve, AppState};
