//! Forward pass through a fixed 2 -> 3 -> 2 -> 1 feed-forward network with
//! series-approximated activations.

pub mod config;
pub mod matrix;
pub mod neural;
pub mod prelude;
pub mod viz;

pub use config::NetworkConfig;
pub use neural::{
    activations::{Activation, Activations},
    engine::{NeuronEngine, Switch},
    layer::{DeepLayer, InputLayer, Layer, LayerData, OutputLayer},
    NeuralNetwork,
};
pub use prelude::{Error, Result};
