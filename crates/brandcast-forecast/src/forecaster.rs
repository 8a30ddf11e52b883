//! Next-day engagement forecasts.

use crate::artifacts::BrandArtifacts;
use crate::model::{ModelManifest, SequenceModel};
use crate::scaler::MinMaxScaler;
use brandcast_common::{Brand, BrandcastError, Result, TrendDirection};
use brandcast_config::{ArtifactsConfig, Config};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

/// A prediction for the day after the last row of the daily table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub brand: Brand,
    pub predicted: f64,
    pub last_observed: f64,
    pub trend: TrendDirection,
}

impl Forecast {
    pub fn new(brand: Brand, predicted: f64, last_observed: f64) -> Self {
        Self {
            brand,
            predicted,
            last_observed,
            trend: TrendDirection::classify(predicted, last_observed),
        }
    }

    /// Predicted value with a fixed number of decimals.
    pub fn formatted(&self, decimals: usize) -> String {
        format!("{:.*}", decimals, self.predicted)
    }
}

/// Result of a forecast request. Missing artifacts are not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastOutcome {
    Predicted(Forecast),
    NotAvailable { missing: Vec<PathBuf> },
}

impl ForecastOutcome {
    pub fn forecast(&self) -> Option<&Forecast> {
        match self {
            Self::Predicted(forecast) => Some(forecast),
            Self::NotAvailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Predicted(_))
    }
}

/// Something that can forecast a brand's next engagement value.
pub trait Forecaster: Send + Sync {
    fn predict(&self, brand: &Brand) -> Result<ForecastOutcome>;

    /// Name used in logs.
    fn name(&self) -> &str;
}

/// Loads the brand's LSTM and daily table on every call and runs one
/// forward pass over the trailing lookback window.
#[derive(Debug, Clone)]
pub struct LstmForecaster {
    artifacts: ArtifactsConfig,
    lookback: usize,
    target_column: String,
}

impl LstmForecaster {
    pub fn new(artifacts: ArtifactsConfig, lookback: usize, target_column: impl Into<String>) -> Self {
        Self {
            artifacts,
            lookback,
            target_column: target_column.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.artifacts.clone(),
            config.forecast.lookback_days,
            config.forecast.target_column.clone(),
        )
    }

    fn run(&self, artifacts: &BrandArtifacts) -> Result<Forecast> {
        let series = artifacts.load_series()?;
        let target = series.column_index(&self.target_column).ok_or_else(|| {
            BrandcastError::inference(format!(
                "daily table {} has no '{}' column",
                artifacts.data.display(),
                self.target_column
            ))
        })?;
        let last_observed = series
            .last(&self.target_column)
            .ok_or_else(|| BrandcastError::inference("daily table has no rows"))?;

        let manifest = ModelManifest::load_or_default(&artifacts.manifest)?;
        if manifest.input_features != series.n_features() {
            return Err(BrandcastError::inference(format!(
                "model expects {} features, daily table has {}",
                manifest.input_features,
                series.n_features()
            )));
        }

        let scaler = match &manifest.scaler {
            Some(params) => {
                debug!("Using persisted scaler parameters");
                MinMaxScaler::from_params(params.clone())?
            }
            None => MinMaxScaler::fit(series.rows())?,
        };

        if series.len() < self.lookback {
            return Err(BrandcastError::inference(format!(
                "need {} rows for the lookback window, daily table has {}",
                self.lookback,
                series.len()
            )));
        }
        let window = scaler.transform(&series.rows()[series.len() - self.lookback..])?;

        let model = SequenceModel::load(&artifacts.weights, &manifest)?;
        let scaled = model.predict(&window)?;
        let predicted = scaler.inverse_value(target, scaled)?;

        Ok(Forecast::new(artifacts.brand.clone(), predicted, last_observed))
    }
}

impl Forecaster for LstmForecaster {
    #[instrument(skip(self), fields(brand = %brand))]
    fn predict(&self, brand: &Brand) -> Result<ForecastOutcome> {
        let artifacts = BrandArtifacts::resolve(&self.artifacts, brand);
        let missing = artifacts.missing();
        if !missing.is_empty() {
            debug!("Artifacts missing for {}: {:?}", brand, missing);
            return Ok(ForecastOutcome::NotAvailable { missing });
        }

        let forecast = self.run(&artifacts).map_err(|err| match err {
            BrandcastError::Inference { .. } => err,
            other => BrandcastError::inference_with_source(
                format!("forecast for {brand} failed: {other}"),
                other,
            ),
        })?;

        info!(
            "Forecast for {}: {:.4} ({}, last {:.4})",
            brand, forecast.predicted, forecast.trend, forecast.last_observed
        );
        Ok(ForecastOutcome::Predicted(forecast))
    }

    fn name(&self) -> &str {
        "lstm"
    }
}
