//! Structured logging infrastructure for Brandcast

use std::path::Path;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

type InitResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "brandcast_engine=trace")
    pub level: String,
    /// Whether to emit JSON lines
    pub json_format: bool,
    /// Whether to enable pretty formatting with colors
    pub pretty_format: bool,
    /// Optional file path for log output
    pub file_path: Option<String>,
    /// Whether to include span open/close events in the output
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            pretty_format: false,
            file_path: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

impl LoggingConfig {
    /// Build the env filter, preferring `RUST_LOG` over the configured level.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }

    fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

fn open_log_file(path: impl AsRef<Path>) -> std::io::Result<std::fs::File> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
}

/// Initialize the tracing subscriber with the given configuration
pub fn init_logging(config: LoggingConfig) -> InitResult {
    let registry = tracing_subscriber::registry().with(config.env_filter());
    let span_events = config.span_events();

    if config.json_format {
        let layer = fmt::layer()
            .json()
            .with_span_events(span_events)
            .with_target(config.include_targets);

        if let Some(file_path) = config.file_path {
            registry
                .with(layer.with_writer(open_log_file(file_path)?))
                .try_init()?;
        } else {
            registry.with(layer).try_init()?;
        }
    } else if config.pretty_format {
        let layer = fmt::layer()
            .pretty()
            .with_span_events(span_events)
            .with_target(config.include_targets);

        if let Some(file_path) = config.file_path {
            registry
                .with(layer.with_ansi(false).with_writer(open_log_file(file_path)?))
                .try_init()?;
        } else {
            registry.with(layer).try_init()?;
        }
    } else {
        let layer = fmt::layer()
            .compact()
            .with_span_events(span_events)
            .with_target(config.include_targets);

        if let Some(file_path) = config.file_path {
            registry
                .with(layer.with_ansi(false).with_writer(open_log_file(file_path)?))
                .try_init()?;
        } else {
            registry.with(layer).try_init()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json_format);
        assert!(!config.pretty_format);
        assert!(config.file_path.is_none());
        assert!(!config.include_spans);
        assert!(config.include_targets);
    }

    #[test]
    fn test_span_events_follow_flag() {
        let mut config = LoggingConfig::default();
        assert!(config.span_events() == FmtSpan::NONE);
        config.include_spans = true;
        assert!(config.span_events() == FmtSpan::NEW | FmtSpan::CLOSE);
    }

    #[test]
    fn test_invalid_level_falls_back() {
        let config = LoggingConfig {
            level: "not a [valid filter".to_string(),
            ..LoggingConfig::default()
        };
        // Must not panic whatever RUST_LOG holds.
        let _ = config.env_filter();
    }
}
