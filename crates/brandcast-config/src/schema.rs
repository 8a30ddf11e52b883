//! Configuration schema definitions using serde with validation attributes.

use brandcast_common::{Brand, BrandcastError, LoggingConfig, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// Main configuration structure for Brandcast.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Brands offered by both dashboards, in display order.
    #[validate(length(min = 1, message = "At least one brand must be configured"))]
    pub brands: Vec<String>,

    /// Where per-brand artifacts and the event log live.
    #[validate]
    pub artifacts: ArtifactsConfig,

    /// Forecast pipeline settings.
    #[validate]
    pub forecast: ForecastConfig,

    /// Analytics aggregator settings.
    #[validate]
    pub analytics: AnalyticsConfig,

    /// Trend chart settings.
    #[validate]
    pub chart: ChartConfig,

    /// Web dashboard settings.
    #[validate]
    pub web: WebConfig,

    /// Terminal dashboard settings.
    #[validate]
    pub desktop: DesktopConfig,

    /// Logging settings.
    #[validate]
    pub logging: LoggingSettings,
}

/// Artifact layout. Patterns use `{brand}` as the brand placeholder.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Directory holding the model, manifest, and data files.
    pub dir: PathBuf,

    /// Model weights file name pattern.
    #[validate(regex(
        path = "crate::validation::BRAND_PLACEHOLDER_REGEX",
        message = "Model pattern must contain {brand}"
    ))]
    pub model_pattern: String,

    /// Model manifest file name pattern.
    #[validate(regex(
        path = "crate::validation::BRAND_PLACEHOLDER_REGEX",
        message = "Manifest pattern must contain {brand}"
    ))]
    pub manifest_pattern: String,

    /// Daily table file name pattern.
    #[validate(regex(
        path = "crate::validation::BRAND_PLACEHOLDER_REGEX",
        message = "Data pattern must contain {brand}"
    ))]
    pub data_pattern: String,

    /// Global event log file name, relative to `dir` unless absolute.
    #[validate(length(min = 1, message = "Dataset file cannot be empty"))]
    pub dataset_file: String,
}

/// Forecast pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ForecastConfig {
    /// Number of trailing days fed to the model.
    #[validate(range(min = 1, max = 365, message = "Lookback must be between 1 and 365 days"))]
    pub lookback_days: usize,

    /// Column of the daily table that is forecast.
    #[validate(length(min = 1, message = "Target column cannot be empty"))]
    pub target_column: String,
}

/// Analytics aggregator configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Number of most recent events used for the sentiment mix.
    #[validate(range(min = 1, max = 100000, message = "Sentiment window must be between 1 and 100000"))]
    pub sentiment_window: usize,
}

/// Trend chart configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChartConfig {
    /// Number of trailing points plotted per series.
    #[validate(range(min = 2, max = 10000, message = "Chart window must be between 2 and 10000 points"))]
    pub window: usize,

    /// Image width in pixels
    #[validate(range(min = 200, max = 4000, message = "Width must be between 200 and 4000 pixels"))]
    pub width: u32,

    /// Image height in pixels
    #[validate(range(min = 150, max = 4000, message = "Height must be between 150 and 4000 pixels"))]
    pub height: u32,

    #[validate(regex(
        path = "crate::validation::HEX_COLOR_REGEX",
        message = "Background color must be valid hex color"
    ))]
    pub background_color: String,

    #[validate(regex(
        path = "crate::validation::HEX_COLOR_REGEX",
        message = "Primary color must be valid hex color"
    ))]
    pub primary_color: String,

    #[validate(regex(
        path = "crate::validation::HEX_COLOR_REGEX",
        message = "Forecast color must be valid hex color"
    ))]
    pub forecast_color: String,

    #[validate(regex(
        path = "crate::validation::HEX_COLOR_REGEX",
        message = "Competitor color must be valid hex color"
    ))]
    pub competitor_color: String,

    /// Whether to draw grid lines
    pub show_grid: bool,

    /// Whether to draw captions, axis labels, and the legend.
    pub show_labels: bool,

    /// TrueType font used for chart text. Text is skipped when no font loads.
    pub font_path: Option<PathBuf>,
}

/// Web dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct WebConfig {
    /// Socket address the HTTP server binds to.
    #[validate(length(min = 1, message = "Bind address cannot be empty"))]
    pub bind_addr: String,
}

/// Terminal dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DesktopConfig {
    /// Event poll interval in milliseconds.
    #[validate(range(min = 10, max = 5000, message = "Tick rate must be between 10 and 5000 ms"))]
    pub tick_rate_ms: u64,

    /// Log file; the terminal itself is owned by the UI.
    #[validate(length(min = 1, message = "Desktop log file cannot be empty"))]
    pub log_file: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub level: String,
    pub json_format: bool,
    pub pretty_format: bool,
    pub file_path: Option<String>,
}

impl Config {
    /// Configured brands as validated identifiers.
    pub fn brand_list(&self) -> Result<Vec<Brand>> {
        self.brands.iter().map(|name| Brand::new(name.as_str())).collect()
    }

    /// Resolves a user-supplied brand name against the configured list.
    pub fn resolve_brand(&self, name: &str) -> Result<Brand> {
        let brand = Brand::new(name)?;
        if self.brands.iter().any(|b| b.trim() == brand.as_str()) {
            Ok(brand)
        } else {
            Err(BrandcastError::validation_field(
                format!("unknown brand '{brand}'"),
                "brand",
            ))
        }
    }

    /// Resolves the optional competitor field; the `"None"` sentinel means none.
    pub fn resolve_competitor(&self, name: Option<&str>) -> Result<Option<Brand>> {
        match Brand::parse_competitor(name)? {
            Some(brand) => self.resolve_brand(brand.as_str()).map(Some),
            None => Ok(None),
        }
    }
}

impl ArtifactsConfig {
    fn expand(&self, pattern: &str, brand: &Brand) -> PathBuf {
        self.dir.join(pattern.replace("{brand}", brand.as_str()))
    }

    /// Path of the brand's model weights.
    pub fn model_path(&self, brand: &Brand) -> PathBuf {
        self.expand(&self.model_pattern, brand)
    }

    /// Path of the brand's model manifest.
    pub fn manifest_path(&self, brand: &Brand) -> PathBuf {
        self.expand(&self.manifest_pattern, brand)
    }

    /// Path of the brand's daily table.
    pub fn data_path(&self, brand: &Brand) -> PathBuf {
        self.expand(&self.data_pattern, brand)
    }

    /// Path of the global event log.
    pub fn dataset_path(&self) -> PathBuf {
        self.dir.join(&self.dataset_file)
    }
}

impl LoggingSettings {
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            json_format: self.json_format,
            pretty_format: self.pretty_format,
            file_path: self.file_path.clone(),
            ..LoggingConfig::default()
        }
    }
}
