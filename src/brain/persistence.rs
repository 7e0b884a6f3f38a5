//! Saving and loading policy networks
//!
//! A network is stored as two files:
//! - `<path>.mpk`: weights, written by burn's named MessagePack recorder
//! - `<path>.meta.json`: layer sizes and the crate version that wrote it

use anyhow::{Context, Result};
use burn::{
    module::Module,
    record::{FullPrecisionSettings, NamedMpkFileRecorder, Recorder},
    tensor::backend::Backend,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{PolicyNetwork, PolicyNetworkConfig};

/// Metadata saved with the weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub network: PolicyNetworkConfig,
    pub version: String,
}

impl ModelMetadata {
    pub fn new(network: PolicyNetworkConfig) -> Self {
        Self {
            network,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

fn meta_path(path: &Path) -> PathBuf {
    path.with_extension("meta.json")
}

/// Save a network and its metadata, creating parent directories as needed
pub fn save_network<B: Backend>(
    network: &PolicyNetwork<B>,
    config: PolicyNetworkConfig,
    path: &Path,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    let record = network.clone().into_record();
    let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
    recorder
        .record(record, path.to_path_buf())
        .context("Failed to save network weights")?;

    let meta_path = meta_path(path);
    let meta_json = serde_json::to_string_pretty(&ModelMetadata::new(config))
        .context("Failed to serialize metadata")?;
    std::fs::write(&meta_path, meta_json)
        .with_context(|| format!("Failed to write metadata to {:?}", meta_path))?;

    debug!(path = ?path, "saved policy network");
    Ok(())
}

/// Load a network saved by [`save_network`]
///
/// `path` is the same path given to `save_network`, without extensions.
pub fn load_network<B: Backend>(
    path: &Path,
    device: &B::Device,
) -> Result<(PolicyNetwork<B>, ModelMetadata)> {
    let meta_path = meta_path(path);
    let meta_json = std::fs::read_to_string(&meta_path)
        .with_context(|| format!("Failed to read metadata from {:?}", meta_path))?;
    let metadata: ModelMetadata =
        serde_json::from_str(&meta_json).context("Failed to deserialize metadata")?;

    let network = metadata.network.init::<B>(device);
    let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
    let record = recorder
        .load(path.to_path_buf(), device)
        .with_context(|| format!("Failed to load network weights from {:?}", path))?;

    debug!(path = ?path, version = %metadata.version, "loaded policy network");
    Ok((network.load_record(record), metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::{default_device, InferenceBackend, NetworkPolicy};
    use crate::control::DecisionFunction;
    use tempfile::TempDir;

    #[test]
    fn test_metadata_serialization() {
        let metadata = ModelMetadata::new(PolicyNetworkConfig::new(12));
        let json = serde_json::to_string(&metadata).unwrap();
        let deserialized: ModelMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.network.hidden_size, 12);
        assert_eq!(deserialized.network.input_size, 4);
        assert_eq!(deserialized.network.output_size, 3);
    }

    #[test]
    fn test_save_and_load_preserves_outputs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("models").join("policy");
        let device = default_device();
        let config = PolicyNetworkConfig::new(6);
        let network = config.init::<InferenceBackend>(&device);

        save_network(&network, config, &path).unwrap();
        assert!(path.with_extension("meta.json").exists());

        let (loaded, metadata) = load_network::<InferenceBackend>(&path, &device).unwrap();
        assert_eq!(metadata.network, config);

        let features = [1.0, 0.0, 1.0, -0.25];
        let mut original = NetworkPolicy::new(network, device.clone());
        let mut restored = NetworkPolicy::new(loaded, device);
        let a = original.activate(&features);
        let b = restored.activate(&features);
        assert_eq!(a.len(), 3);
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_load_missing_model_fails() {
        let dir = TempDir::new().unwrap();
        let result = load_network::<InferenceBackend>(&dir.path().join("absent"), &default_device());
        assert!(result.is_err());
    }
}
