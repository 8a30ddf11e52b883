//! Model fixtures for tests.
//!
//! With all-zero LSTM weights the hidden state stays zero, so the network
//! output is exactly the dense bias. That makes forecasts predictable: a
//! bias `b` on a refit scaler predicts `min + b * (max - min)`.
//!
//! [`write_unit_lstm_model`] writes real, non-zero weights for stacks of
//! one-unit layers, small enough to recompute by hand.

use candle_core::{DType, Device, Tensor};
use std::collections::HashMap;
use std::path::Path;

/// Write a safetensors file for a stacked LSTM whose output is `bias`.
pub fn write_constant_model(path: &Path, input_features: usize, hidden_sizes: &[usize], bias: f32) {
    let device = Device::Cpu;
    let zeros = |shape: (usize, usize)| {
        Tensor::zeros(shape, DType::F32, &device).expect("Failed to allocate tensor")
    };

    let mut tensors = HashMap::new();
    let mut in_dim = input_features;
    for (i, &hidden) in hidden_sizes.iter().enumerate() {
        let prefix = format!("lstm.{i}");
        tensors.insert(format!("{prefix}.weight_ih_l0"), zeros((4 * hidden, in_dim)));
        tensors.insert(format!("{prefix}.weight_hh_l0"), zeros((4 * hidden, hidden)));
        tensors.insert(
            format!("{prefix}.bias_ih_l0"),
            Tensor::zeros(4 * hidden, DType::F32, &device).expect("Failed to allocate tensor"),
        );
        tensors.insert(
            format!("{prefix}.bias_hh_l0"),
            Tensor::zeros(4 * hidden, DType::F32, &device).expect("Failed to allocate tensor"),
        );
        in_dim = hidden;
    }
    tensors.insert("dense.weight".to_string(), zeros((1, in_dim)));
    tensors.insert(
        "dense.bias".to_string(),
        Tensor::new(&[bias], &device).expect("Failed to allocate tensor"),
    );

    candle_core::safetensors::save(&tensors, path).expect("Failed to write model weights");
}

/// Write `<brand>_model.safetensors` with a single 50-unit layer.
pub fn write_default_model(dir: &Path, brand: &str, bias: f32) {
    write_constant_model(&dir.join(format!("{brand}_model.safetensors")), 1, &[50], bias);
}

/// Gate parameters of a one-unit LSTM layer over one input, in input,
/// forget, cell, output order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitLstm {
    pub weight_ih: [f32; 4],
    pub weight_hh: [f32; 4],
    pub bias_ih: [f32; 4],
    pub bias_hh: [f32; 4],
}

/// Two layers with distinct values on every gate.
pub fn sample_unit_layers() -> [UnitLstm; 2] {
    [
        UnitLstm {
            weight_ih: [0.5, -0.3, 0.8, 0.2],
            weight_hh: [0.1, 0.4, -0.6, 0.3],
            bias_ih: [0.05, 0.2, -0.1, 0.0],
            bias_hh: [0.0, 0.1, 0.05, -0.15],
        },
        UnitLstm {
            weight_ih: [-0.4, 0.7, 0.9, -0.2],
            weight_hh: [0.3, -0.2, 0.5, 0.6],
            bias_ih: [0.1, 0.0, 0.2, 0.1],
            bias_hh: [-0.05, 0.3, 0.0, 0.05],
        },
    ]
}

/// Write a stack of one-unit layers with a dense head
/// `dense_weight * h + dense_bias`.
pub fn write_unit_lstm_model(path: &Path, layers: &[UnitLstm], dense_weight: f32, dense_bias: f32) {
    let device = Device::Cpu;
    let gates = |values: &[f32; 4], shape: &[usize]| {
        Tensor::from_slice(values, shape, &device).expect("Failed to allocate tensor")
    };

    let mut tensors = HashMap::new();
    for (i, layer) in layers.iter().enumerate() {
        let prefix = format!("lstm.{i}");
        tensors.insert(format!("{prefix}.weight_ih_l0"), gates(&layer.weight_ih, &[4, 1]));
        tensors.insert(format!("{prefix}.weight_hh_l0"), gates(&layer.weight_hh, &[4, 1]));
        tensors.insert(format!("{prefix}.bias_ih_l0"), gates(&layer.bias_ih, &[4]));
        tensors.insert(format!("{prefix}.bias_hh_l0"), gates(&layer.bias_hh, &[4]));
    }
    tensors.insert(
        "dense.weight".to_string(),
        Tensor::from_slice(&[dense_weight], (1, 1), &device).expect("Failed to allocate tensor"),
    );
    tensors.insert(
        "dense.bias".to_string(),
        Tensor::new(&[dense_bias], &device).expect("Failed to allocate tensor"),
    );

    candle_core::safetensors::save(&tensors, path).expect("Failed to write model weights");
}
