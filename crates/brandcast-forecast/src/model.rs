//! Stacked LSTM regressor loaded from safetensors.

use crate::scaler::ScalerParams;
use brandcast_common::{BrandcastError, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::rnn::{lstm, LSTMConfig, LSTM, RNN};
use candle_nn::{linear, Linear, Module, VarBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const DEFAULT_HIDDEN_SIZE: usize = 50;

/// Sidecar describing the network shape and, optionally, the scaler the
/// model was trained with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelManifest {
    pub input_features: usize,
    pub hidden_sizes: Vec<usize>,
    pub scaler: Option<ScalerParams>,
}

impl Default for ModelManifest {
    fn default() -> Self {
        Self {
            input_features: 1,
            hidden_sizes: vec![DEFAULT_HIDDEN_SIZE],
            scaler: None,
        }
    }
}

impl ModelManifest {
    /// Reads the manifest, falling back to the single-feature default when
    /// the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No manifest at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let manifest: Self = serde_json::from_str(&content)?;
        if manifest.input_features == 0 || manifest.hidden_sizes.is_empty() {
            return Err(BrandcastError::inference(format!(
                "manifest {} describes an empty network",
                path.display()
            )));
        }
        Ok(manifest)
    }
}

fn candle_error(context: &'static str) -> impl Fn(candle_core::Error) -> BrandcastError {
    move |err| BrandcastError::inference_with_source(context, err)
}

/// LSTM layers feeding a one-unit dense head. Intermediate layers hand
/// their full sequence to the next; the head sees the last hidden state.
#[derive(Debug)]
pub struct SequenceModel {
    layers: Vec<LSTM>,
    head: Linear,
    input_features: usize,
    device: Device,
}

impl SequenceModel {
    pub fn load(weights: &Path, manifest: &ModelManifest) -> Result<Self> {
        let bytes = std::fs::read(weights)?;
        let device = Device::Cpu;
        let vb = VarBuilder::from_buffered_safetensors(bytes, DType::F32, &device)
            .map_err(candle_error("failed to read model weights"))?;
        Self::from_var_builder(vb, manifest, device)
    }

    fn from_var_builder(vb: VarBuilder, manifest: &ModelManifest, device: Device) -> Result<Self> {
        let mut layers = Vec::with_capacity(manifest.hidden_sizes.len());
        let mut in_dim = manifest.input_features;
        for (i, &hidden) in manifest.hidden_sizes.iter().enumerate() {
            let layer = lstm(in_dim, hidden, LSTMConfig::default(), vb.pp(format!("lstm.{i}")))
                .map_err(candle_error("LSTM weights do not match the manifest"))?;
            layers.push(layer);
            in_dim = hidden;
        }
        let head = linear(in_dim, 1, vb.pp("dense"))
            .map_err(candle_error("dense head weights do not match the manifest"))?;

        Ok(Self {
            layers,
            head,
            input_features: manifest.input_features,
            device,
        })
    }

    /// One forward pass over a `(steps, features)` window, returning the
    /// scaled scalar output.
    pub fn predict(&self, window: &[Vec<f64>]) -> Result<f64> {
        let steps = window.len();
        if steps == 0 {
            return Err(BrandcastError::inference("empty input window"));
        }
        if let Some(row) = window.iter().find(|r| r.len() != self.input_features) {
            return Err(BrandcastError::inference(format!(
                "input window has {} features, model expects {}",
                row.len(),
                self.input_features
            )));
        }

        let flat: Vec<f32> = window.iter().flatten().map(|&v| v as f32).collect();
        let mut x = Tensor::from_vec(flat, (1, steps, self.input_features), &self.device)
            .map_err(candle_error("failed to build input tensor"))?;

        let mut last_hidden = None;
        for layer in &self.layers {
            let states = layer.seq(&x).map_err(candle_error("LSTM forward pass failed"))?;
            x = layer
                .states_to_tensor(&states)
                .map_err(candle_error("LSTM forward pass failed"))?;
            last_hidden = states.last().map(|state| state.h().clone());
        }
        let hidden = last_hidden.ok_or_else(|| BrandcastError::inference("model has no LSTM layers"))?;

        let output = self
            .head
            .forward(&hidden)
            .and_then(|t| t.flatten_all())
            .and_then(|t| t.to_vec1::<f32>())
            .map_err(candle_error("dense head forward pass failed"))?;

        output
            .first()
            .map(|&v| f64::from(v))
            .ok_or_else(|| BrandcastError::inference("model produced no output"))
    }
}
