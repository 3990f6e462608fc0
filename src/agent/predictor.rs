//! Online move predictor
//!
//! Wraps the [`MoveNetwork`] with an Adam optimizer and exposes the two
//! operations the episode loop needs: greedy `predict` and a single-sample
//! `fit` step against a one-hot target with mean-squared-error loss.
//!
//! Every tensor built for a call is owned by that call. The autodiff graph
//! recorded by `fit` is consumed by `backward` and the gradients by the
//! optimizer step, so nothing outlives the call no matter how many
//! episodes are replayed.

use anyhow::{Context, Result};
use burn::{
    module::AutodiffModule,
    nn::loss::{MseLoss, Reduction},
    optim::{Adam, AdamConfig, GradientsParams, Optimizer, adaptor::OptimizerAdaptor},
    tensor::{ElementConversion, Tensor, TensorData, backend::AutodiffBackend},
};

use super::config::PredictorConfig;
use super::features::FeatureVector;
use super::network::{MoveNetwork, MoveNetworkConfig};
use crate::game::RelativeMove;

/// Move predictor trained incrementally from hindsight labels
///
/// # Example
///
/// ```rust
/// use neural_snake::agent::{FeatureVector, Predictor, PredictorConfig, TrainingBackend, default_device};
/// use neural_snake::game::RelativeMove;
///
/// let mut predictor =
///     Predictor::<TrainingBackend>::new(PredictorConfig::default(), default_device()).unwrap();
/// let features = FeatureVector::default();
///
/// let loss = predictor.fit(&features, RelativeMove::Forward);
/// assert!(loss.is_finite());
/// let _move = predictor.predict(&features);
/// ```
pub struct Predictor<B: AutodiffBackend> {
    network: MoveNetwork<B>,
    optim: OptimizerAdaptor<Adam, MoveNetwork<B>, B>,
    config: PredictorConfig,
    device: B::Device,
    fit_steps: usize,
}

impl<B: AutodiffBackend> Predictor<B> {
    /// Create a predictor with freshly initialised weights
    pub fn new(config: PredictorConfig, device: B::Device) -> Result<Self> {
        config
            .validate()
            .map_err(anyhow::Error::msg)
            .context("Invalid predictor configuration")?;

        let network = MoveNetworkConfig::from(&config).init::<B>(&device);
        let optim = AdamConfig::new().init();

        Ok(Self {
            network,
            optim,
            config,
            device,
            fit_steps: 0,
        })
    }

    /// Raw per-move scores for `features`, in `RelativeMove` index order
    pub fn scores(&self, features: &FeatureVector) -> [f32; 3] {
        let network = self.network.valid();
        let input = features.to_tensor::<B::InnerBackend>(&self.device);
        let data = network.forward(input).into_data();

        let mut scores = [0.0; 3];
        for (slot, value) in scores.iter_mut().zip(data.iter::<f32>()) {
            *slot = value;
        }
        scores
    }

    /// Greedy move for `features`; ties go to the lowest move index
    pub fn predict(&self, features: &FeatureVector) -> RelativeMove {
        let scores = self.scores(features);
        let mut best = 0;
        for (idx, &score) in scores.iter().enumerate().skip(1) {
            if score > scores[best] {
                best = idx;
            }
        }
        RelativeMove::from_index(best).unwrap_or(RelativeMove::Forward)
    }

    /// One Adam step on a batch of one; returns the loss before the step
    pub fn fit(&mut self, features: &FeatureVector, label: RelativeMove) -> f32 {
        let input = features.to_tensor::<B>(&self.device);
        let target = Tensor::<B, 2>::from_data(
            TensorData::new(label.one_hot().to_vec(), [1, self.config.num_moves]),
            &self.device,
        );

        let scores = self.network.forward(input);
        let loss = MseLoss::new().forward(scores, target, Reduction::Mean);
        let loss_value = loss.clone().into_scalar().elem::<f32>();

        let grads = GradientsParams::from_grads(loss.backward(), &self.network);
        self.network = self
            .optim
            .step(self.config.learning_rate, self.network.clone(), grads);
        self.fit_steps += 1;

        loss_value
    }

    /// Number of `fit` calls made over the predictor's lifetime
    pub fn fit_steps(&self) -> usize {
        self.fit_steps
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }
}
