//! # Brandcast Analytics
//!
//! Per-brand statistics over the global event log: the weekday with the
//! highest mean engagement and the sentiment mix of the most recent posts.

pub mod events;
pub mod insights;

pub use events::{parse_timestamp, Event, EventLog};
pub use insights::{best_day, sentiment_mix, Analytics, BrandInsights, EventAnalytics, SentimentMix};
