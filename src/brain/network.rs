//! Feed-forward policy network consumed through [`DecisionFunction`]
//!
//! # Architecture
//!
//! ```text
//! Input: [batch, 4]  (forward, right, left, bearing)
//!   ↓ Linear(4 → hidden) + tanh
//!   ↓ Linear(hidden → 3)
//! Output: [batch, 3] (straight, turn right, turn left)
//! ```
//!
//! # Example
//!
//! ```rust
//! use snake_arena::brain::{default_device, InferenceBackend, PolicyNetworkConfig};
//! use burn::tensor::Tensor;
//!
//! let device = default_device();
//! let network = PolicyNetworkConfig::default().init::<InferenceBackend>(&device);
//! let outputs = network.forward(Tensor::zeros([2, 4], &device));
//! assert_eq!(outputs.dims(), [2, 3]);
//! ```

use burn::{
    module::Module,
    nn::{Linear, LinearConfig},
    tensor::{backend::Backend, Tensor, TensorData},
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::control::{DecisionFunction, Features, FEATURE_COUNT};

/// Layer sizes of a [`PolicyNetwork`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyNetworkConfig {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
}

impl PolicyNetworkConfig {
    pub fn new(hidden_size: usize) -> Self {
        Self {
            input_size: FEATURE_COUNT,
            hidden_size,
            output_size: 3,
        }
    }

    /// Build a network with freshly initialized weights
    pub fn init<B: Backend>(&self, device: &B::Device) -> PolicyNetwork<B> {
        PolicyNetwork {
            hidden: LinearConfig::new(self.input_size, self.hidden_size).init(device),
            output: LinearConfig::new(self.hidden_size, self.output_size).init(device),
        }
    }
}

impl Default for PolicyNetworkConfig {
    fn default() -> Self {
        Self::new(8)
    }
}

#[derive(Module, Debug)]
pub struct PolicyNetwork<B: Backend> {
    hidden: Linear<B>,
    output: Linear<B>,
}

impl<B: Backend> PolicyNetwork<B> {
    /// `[batch, input_size]` to `[batch, output_size]` action scores
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.hidden.forward(features).tanh();
        self.output.forward(x)
    }
}

/// A [`PolicyNetwork`] bound to a device, usable as a decision function
#[derive(Debug)]
pub struct NetworkPolicy<B: Backend> {
    network: PolicyNetwork<B>,
    device: B::Device,
}

impl<B: Backend> NetworkPolicy<B> {
    pub fn new(network: PolicyNetwork<B>, device: B::Device) -> Self {
        Self { network, device }
    }

    pub fn network(&self) -> &PolicyNetwork<B> {
        &self.network
    }
}

impl<B: Backend> DecisionFunction for NetworkPolicy<B> {
    fn activate(&mut self, features: &Features) -> Vec<f32> {
        let data = TensorData::new(features.to_vec(), [1, FEATURE_COUNT]);
        let input = Tensor::<B, 2>::from_data(data, &self.device);
        match self.network.forward(input).into_data().to_vec::<f32>() {
            Ok(outputs) => outputs,
            Err(err) => {
                // An empty output surfaces as InvalidState in the controller
                warn!(?err, "policy network produced unreadable output");
                Vec::new()
            }
        }
    }
}
