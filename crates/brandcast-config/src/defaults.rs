//! Default configuration values.

use crate::schema::*;
use std::path::PathBuf;

pub const DEFAULT_BRANDS: [&str; 4] = ["Nike", "Google", "Apple", "Adidas"];
pub const DEFAULT_LOOKBACK_DAYS: usize = 14;
pub const DEFAULT_SENTIMENT_WINDOW: usize = 100;
pub const DEFAULT_CHART_WINDOW: usize = 45;
pub const DEFAULT_DATASET_FILE: &str = "Social Media Engagement Dataset.csv";
pub const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

impl Default for Config {
    fn default() -> Self {
        Self {
            brands: DEFAULT_BRANDS.iter().map(|b| b.to_string()).collect(),
            artifacts: ArtifactsConfig::default(),
            forecast: ForecastConfig::default(),
            analytics: AnalyticsConfig::default(),
            chart: ChartConfig::default(),
            web: WebConfig::default(),
            desktop: DesktopConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            model_pattern: "{brand}_model.safetensors".to_string(),
            manifest_pattern: "{brand}_model.json".to_string(),
            data_pattern: "{brand}_data.csv".to_string(),
            dataset_file: DEFAULT_DATASET_FILE.to_string(),
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            target_column: "engagement_rate".to_string(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            sentiment_window: DEFAULT_SENTIMENT_WINDOW,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_CHART_WINDOW,
            width: 1000,
            height: 500,
            background_color: "#FFFFFF".to_string(),
            primary_color: "#0984e3".to_string(),
            forecast_color: "#00cec9".to_string(),
            competitor_color: "#fab1a0".to_string(),
            show_grid: true,
            show_labels: true,
            font_path: Some(PathBuf::from(DEFAULT_FONT_PATH)),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_string(),
        }
    }
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            log_file: "brandcast-desktop.log".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            pretty_format: false,
            file_path: None,
        }
    }
}
