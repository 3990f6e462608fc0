//! Backend type aliases and device management
//!
//! The predictor trains on an autodiff-enabled NdArray backend; inference
//! runs on its inner backend via `valid()`. A 5-input network has no use
//! for a GPU.

use burn::backend::{
    Autodiff,
    ndarray::{NdArray, NdArrayDevice},
};

/// Backend used by the predictor (with autodiff, for `fit`)
pub type TrainingBackend = Autodiff<NdArray<f32>>;

/// Get the default device for computation (CPU)
pub fn default_device() -> NdArrayDevice {
    NdArrayDevice::default()
}
