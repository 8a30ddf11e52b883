//! # Brandcast Forecast
//!
//! Loads a brand's daily table and pre-trained sequence model, scales the
//! table into [0, 1], runs one forward pass over the trailing lookback
//! window, and classifies the predicted value against the last observation.

pub mod artifacts;
pub mod forecaster;
pub mod model;
pub mod scaler;
pub mod series;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use artifacts::BrandArtifacts;
pub use forecaster::{Forecast, ForecastOutcome, Forecaster, LstmForecaster};
pub use model::{ModelManifest, SequenceModel};
pub use scaler::{MinMaxScaler, ScalerParams};
pub use series::DailySeries;
