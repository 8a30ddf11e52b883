//! Test utilities and shared fixtures for the Brandcast workspace.
//!
//! Builds throwaway artifact directories with daily tables and event logs
//! shaped like the real exports, so every crate can exercise its loaders
//! against files on disk.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests once per process.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Write `<brand>_data.csv` with a single `engagement_rate` column.
pub fn write_daily_csv(dir: &Path, brand: &str, values: &[f64]) -> PathBuf {
    let mut content = String::from("engagement_rate\n");
    for value in values {
        let _ = writeln!(content, "{value}");
    }
    let path = dir.join(format!("{brand}_data.csv"));
    std::fs::write(&path, content).expect("Failed to write daily table");
    path
}

/// A single row of the global event log.
#[derive(Debug, Clone)]
pub struct EventFixture {
    pub brand: &'static str,
    pub timestamp: &'static str,
    pub day_of_week: &'static str,
    pub sentiment: &'static str,
    pub engagement_rate: Option<f64>,
}

impl EventFixture {
    pub fn new(brand: &'static str, day_of_week: &'static str, sentiment: &'static str, rate: f64) -> Self {
        Self {
            brand,
            timestamp: "2024-03-04 10:15:00",
            day_of_week,
            sentiment,
            engagement_rate: Some(rate),
        }
    }
}

/// Write an event log CSV with the columns of the social-media export,
/// including a couple of columns the loaders are expected to ignore.
pub fn write_event_log(path: &Path, events: &[EventFixture]) {
    let mut content = String::from(
        "post_id,brand_name,timestamp,day_of_week,platform,sentiment_label,engagement_rate\n",
    );
    for (i, event) in events.iter().enumerate() {
        let rate = event
            .engagement_rate
            .map(|r| r.to_string())
            .unwrap_or_default();
        let _ = writeln!(
            content,
            "{i},{},{},{},Instagram,{},{rate}",
            event.brand, event.timestamp, event.day_of_week, event.sentiment
        );
    }
    std::fs::write(path, content).expect("Failed to write event log");
}

/// `count` events for `brand` cycling through the given weekdays.
pub fn uniform_events(
    brand: &'static str,
    count: usize,
    sentiment: &'static str,
    days: &[&'static str],
) -> Vec<EventFixture> {
    (0..count)
        .map(|i| EventFixture::new(brand, days[i % days.len()], sentiment, 0.1))
        .collect()
}

/// A gently rising daily series with a weekly wobble.
pub fn rising_series(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| 0.05 + i as f64 * 0.001 + ((i % 7) as f64) * 0.0005)
        .collect()
}
