//! Orchestrates forecast, insights and chart for one brand.

use crate::report::{BrandReport, InsightsStatus};
use brandcast_analytics::{Analytics, EventAnalytics, EventLog};
use brandcast_common::{Brand, BrandcastError, Result};
use brandcast_config::Config;
use brandcast_forecast::{BrandArtifacts, ForecastOutcome, Forecaster, LstmForecaster};
use brandcast_graphs::TrendChart;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Shared analysis routine behind both dashboards.
///
/// The engine is immutable once built and can be shared behind an `Arc`.
pub struct BrandEngine {
    config: Config,
    forecaster: Box<dyn Forecaster>,
    analytics: Option<Box<dyn Analytics>>,
}

impl std::fmt::Debug for BrandEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrandEngine")
            .field("brands", &self.config.brands)
            .field("forecaster", &self.forecaster.name())
            .field("event_log_loaded", &self.analytics.is_some())
            .finish()
    }
}

impl BrandEngine {
    /// Builds an engine from explicit parts. `analytics` is `None` when the
    /// event log is unavailable.
    pub fn new(
        config: Config,
        forecaster: Box<dyn Forecaster>,
        analytics: Option<Box<dyn Analytics>>,
    ) -> Self {
        Self {
            config,
            forecaster,
            analytics,
        }
    }

    /// Builds the default engine: LSTM forecaster and the event log named by
    /// the configuration. A missing event log only disables insights.
    pub fn from_config(config: Config) -> Result<Self> {
        let dataset = config.artifacts.dataset_path();
        let analytics: Option<Box<dyn Analytics>> = match EventLog::load(&dataset) {
            Ok(log) => Some(Box::new(EventAnalytics::from_config(Arc::new(log), &config))),
            Err(err) if err.is_absence() => {
                warn!("Event log {} not found, insights disabled", dataset.display());
                None
            }
            Err(err) => return Err(err),
        };
        let forecaster = Box::new(LstmForecaster::from_config(&config));

        info!(
            "Engine ready for {} brands (event log loaded: {})",
            config.brands.len(),
            analytics.is_some()
        );
        Ok(Self::new(config, forecaster, analytics))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn event_log_loaded(&self) -> bool {
        self.analytics.is_some()
    }

    /// Full analysis: forecast, insights and a chart with the forecast marker.
    #[instrument(skip(self), fields(brand = %brand))]
    pub fn analyze(&self, brand: &Brand, competitor: Option<&Brand>) -> Result<BrandReport> {
        let forecast = self.forecaster.predict(brand)?;
        let predicted = forecast.forecast().map(|f| f.predicted);
        if let ForecastOutcome::NotAvailable { missing } = &forecast {
            info!("No forecast for {}, missing {:?}", brand, missing);
        }

        Ok(BrandReport {
            brand: brand.clone(),
            competitor: competitor.cloned(),
            insights: self.insights(brand)?,
            chart: self.chart(brand, predicted, competitor)?,
            forecast: Some(forecast),
        })
    }

    /// Insights and chart without running the model.
    #[instrument(skip(self), fields(brand = %brand))]
    pub fn overview(&self, brand: &Brand, competitor: Option<&Brand>) -> Result<BrandReport> {
        Ok(BrandReport {
            brand: brand.clone(),
            competitor: competitor.cloned(),
            forecast: None,
            insights: self.insights(brand)?,
            chart: self.chart(brand, None, competitor)?,
        })
    }

    /// Insights for `brand`; absence of data is a status, not an error.
    pub fn insights(&self, brand: &Brand) -> Result<InsightsStatus> {
        let Some(analytics) = &self.analytics else {
            return Ok(InsightsStatus::Unavailable {
                reason: "event log not loaded".to_string(),
            });
        };
        match analytics.insights(brand) {
            Ok(insights) => Ok(InsightsStatus::Ready(insights)),
            Err(BrandcastError::NoData { .. }) => Ok(InsightsStatus::Unavailable {
                reason: format!("no events for {brand}"),
            }),
            Err(err) => Err(err),
        }
    }

    /// Trend chart for `brand`, or `None` without a daily table. A
    /// competitor without a daily table is left off the chart.
    pub fn chart(
        &self,
        brand: &Brand,
        predicted: Option<f64>,
        competitor: Option<&Brand>,
    ) -> Result<Option<TrendChart>> {
        let Some(primary) = self.target_column(brand)? else {
            return Ok(None);
        };
        let competitor_values = match competitor {
            Some(comp) => self.target_column(comp)?.map(|values| (comp, values)),
            None => None,
        };

        Ok(Some(TrendChart::build(
            &self.config.chart,
            brand,
            &primary,
            predicted,
            competitor_values
                .as_ref()
                .map(|(comp, values)| (*comp, values.as_slice())),
        )))
    }

    fn target_column(&self, brand: &Brand) -> Result<Option<Vec<f64>>> {
        let artifacts = BrandArtifacts::resolve(&self.config.artifacts, brand);
        let series = match artifacts.load_series() {
            Ok(series) => series,
            Err(err) if err.is_absence() => return Ok(None),
            Err(err) => return Err(err),
        };
        let column = &self.config.forecast.target_column;
        series.column(column).map(Some).ok_or_else(|| {
            BrandcastError::dataset(format!(
                "daily table {} has no '{}' column",
                artifacts.data.display(),
                column
            ))
        })
    }
}
