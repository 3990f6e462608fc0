//! Feed-forward move network
//!
//! # Architecture
//!
//! ```text
//! Input: [batch, 5]
//!   ↓ Linear(5 → 256)
//!   ↓ Linear(256 → 512)
//!   ↓ Linear(512 → 256)
//!   ↓ Linear(256 → 3) → per-move scores (left, forward, right)
//! ```
//!
//! Layers are plain fully-connected with no activation, dropout or
//! normalisation in between; the predicted move is the argmax of the scores.
//!
//! # Example
//!
//! ```rust
//! use neural_snake::agent::{MoveNetworkConfig, PredictorConfig};
//! use burn::backend::ndarray::NdArrayDevice;
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//!
//! type Backend = NdArray<f32>;
//!
//! let device = NdArrayDevice::default();
//! let network = MoveNetworkConfig::from(&PredictorConfig::default()).init::<Backend>(&device);
//!
//! let features = Tensor::zeros([4, 5], &device);
//! let scores = network.forward(features);
//! assert_eq!(scores.dims(), [4, 3]);
//! ```

use burn::{
    module::Module,
    nn::{Linear, LinearConfig},
    tensor::{Tensor, backend::Backend},
};

use super::config::PredictorConfig;

/// Layer widths for the move network
#[derive(Debug, Clone)]
pub struct MoveNetworkConfig {
    pub input_size: usize,
    pub hidden_sizes: [usize; 3],
    pub num_moves: usize,
}

impl MoveNetworkConfig {
    /// Initialize the network from this configuration
    pub fn init<B: Backend>(&self, device: &B::Device) -> MoveNetwork<B> {
        let [h1, h2, h3] = self.hidden_sizes;
        MoveNetwork {
            input: LinearConfig::new(self.input_size, h1).init(device),
            hidden1: LinearConfig::new(h1, h2).init(device),
            hidden2: LinearConfig::new(h2, h3).init(device),
            output: LinearConfig::new(h3, self.num_moves).init(device),
        }
    }
}

impl From<&PredictorConfig> for MoveNetworkConfig {
    fn from(config: &PredictorConfig) -> Self {
        Self {
            input_size: config.input_size,
            hidden_sizes: config.hidden_sizes,
            num_moves: config.num_moves,
        }
    }
}

/// Four-layer feed-forward network scoring the three relative moves
#[derive(Module, Debug)]
pub struct MoveNetwork<B: Backend> {
    input: Linear<B>,
    hidden1: Linear<B>,
    hidden2: Linear<B>,
    output: Linear<B>,
}

impl<B: Backend> MoveNetwork<B> {
    /// Forward pass: `[batch, 5]` features to `[batch, 3]` move scores
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.input.forward(features);
        let x = self.hidden1.forward(x);
        let x = self.hidden2.forward(x);
        self.output.forward(x)
    }
}
