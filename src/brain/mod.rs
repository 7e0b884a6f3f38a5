//! Neural decision functions built on burn
//!
//! Provides:
//! - `PolicyNetwork`, a 4 → hidden → 3 feed-forward module
//! - `NetworkPolicy`, which adapts a network to the `DecisionFunction` boundary
//! - saving and loading networks with a JSON metadata sidecar

pub mod backend;
pub mod network;
pub mod persistence;

pub use backend::{default_device, InferenceBackend};
pub use network::{NetworkPolicy, PolicyNetwork, PolicyNetworkConfig};
pub use persistence::{load_network, save_network, ModelMetadata};
