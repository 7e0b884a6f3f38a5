//! Backend type alias and device helper for running policy networks
//!
//! Networks here are tiny (four inputs, a handful of hidden units), so the
//! CPU NdArray backend is all that is needed.

use burn::backend::ndarray::{NdArray, NdArrayDevice};

/// Backend used to evaluate policy networks
pub type InferenceBackend = NdArray<f32>;

/// Get the default device for computation
pub fn default_device() -> NdArrayDevice {
    NdArrayDevice::default()
}
