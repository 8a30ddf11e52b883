//! What a host receives for one brand.

use brandcast_analytics::BrandInsights;
use brandcast_common::Brand;
use brandcast_forecast::{Forecast, ForecastOutcome};
use brandcast_graphs::TrendChart;
use serde::Serialize;

/// Insights, or why there are none.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InsightsStatus {
    Ready(BrandInsights),
    Unavailable { reason: String },
}

impl InsightsStatus {
    pub fn insights(&self) -> Option<&BrandInsights> {
        match self {
            Self::Ready(insights) => Some(insights),
            Self::Unavailable { .. } => None,
        }
    }
}

/// Result of [`crate::BrandEngine::analyze`] or [`crate::BrandEngine::overview`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandReport {
    pub brand: Brand,
    pub competitor: Option<Brand>,
    /// `None` for an overview, which skips inference.
    pub forecast: Option<ForecastOutcome>,
    pub insights: InsightsStatus,
    /// `None` when the brand has no daily table.
    pub chart: Option<TrendChart>,
}

impl BrandReport {
    pub fn prediction(&self) -> Option<&Forecast> {
        self.forecast.as_ref().and_then(ForecastOutcome::forecast)
    }

    /// Predicted value with `decimals` places, if there is one.
    pub fn prediction_text(&self, decimals: usize) -> Option<String> {
        self.prediction().map(|f| f.formatted(decimals))
    }

    pub fn best_day(&self) -> Option<&str> {
        self.insights.insights().and_then(|i| i.best_day.as_deref())
    }
}
