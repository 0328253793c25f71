pub mod activations;
pub mod engine;
pub mod layer;
pub mod registry;

use std::fmt;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    config::NetworkConfig,
    prelude::*,
    viz::{NetworkReport, Visualizer},
};

use self::{
    activations::Activations,
    engine::NeuronEngine,
    layer::{DeepLayer, InputLayer, Layer, LayerData, OutputLayer},
    registry::LayerRegistry,
};

pub const INPUT_LAYER: &str = "input_layer";
pub const DEEP_LAYER_FIRST: &str = "deep_layer_first";
pub const DEEP_LAYER_SECOND: &str = "deep_layer_second";
pub const OUTPUT_LAYER: &str = "output_layer";

/// Network with the fixed 2 -> 3 -> 2 -> 1 topology.
#[derive(Debug, Clone)]
pub struct NeuralNetwork {
    input: Vec<f64>,
    layers: LayerRegistry,
    engine: NeuronEngine,
}

impl NeuralNetwork {
    /// Validates raw input and creates an empty network.
    pub fn new(input: &Value, config: NetworkConfig) -> Result<Self> {
        let input = Self::validate_input_dataset(input)?;
        Ok(Self::from_vec(input, config))
    }

    pub fn from_vec(input: Vec<f64>, config: NetworkConfig) -> Self {
        Self {
            input,
            layers: LayerRegistry::new(),
            engine: NeuronEngine::new(&config),
        }
    }

    /// Accepts a JSON array of numbers. Booleans are not numbers.
    pub fn validate_input_dataset(input: &Value) -> Result<Vec<f64>> {
        let items = input
            .as_array()
            .ok_or_else(|| Error::InvalidArgument(format!("value {input} must be a list")))?;
        items
            .iter()
            .map(|item| item.as_f64())
            .collect::<Option<Vec<f64>>>()
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "all elements of {input} must be integers or real numbers"
                ))
            })
    }

    pub fn input(&self) -> &[f64] {
        &self.input
    }

    /// Output of `layer`, computed with this network's random source.
    pub fn propagate(&mut self, layer: &Layer) -> Result<LayerData> {
        layer.layer_dataset(&mut self.engine)
    }

    pub fn add_layer(&mut self, name: &str, layer: Layer) {
        info!("Adding layer \"{name}\" to the network");
        self.layers.insert(name, layer);
    }

    pub fn remove_layer(&mut self, name: &str) {
        if self.layers.remove(name).is_some() {
            info!("Removed layer \"{name}\" from the network");
        } else {
            warn!("Layer \"{name}\" not found for removal");
        }
    }

    pub fn get_layer(&self, name: &str) -> Option<&Layer> {
        self.layers.get(name)
    }

    pub fn get_layer_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.layers.get_mut(name)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.names().collect()
    }

    /// Builds and registers the four layers of the fixed topology, each fed
    /// with the previous layer's output.
    pub fn build_neural_network(&mut self) -> Result<()> {
        info!("Building neural network");

        let input_layer = Layer::from(InputLayer::new(
            self.input.clone(),
            Activations::Linear,
            Activations::Linear,
            &mut self.engine,
        ));
        debug!("Input layer created: {input_layer}");
        let data = self.propagate(&input_layer)?.into_vec();
        self.add_layer(INPUT_LAYER, input_layer);

        let deep_layer_first =
            Layer::from(DeepLayer::new(data, 3, Activations::Tanh, &mut self.engine));
        debug!("First deep layer created: {deep_layer_first}");
        let data = self.propagate(&deep_layer_first)?.into_vec();
        self.add_layer(DEEP_LAYER_FIRST, deep_layer_first);

        let deep_layer_second =
            Layer::from(DeepLayer::new(data, 2, Activations::Tanh, &mut self.engine));
        debug!("Second deep layer created: {deep_layer_second}");
        let data = self.propagate(&deep_layer_second)?.into_vec();
        self.add_layer(DEEP_LAYER_SECOND, deep_layer_second);

        let output_layer = Layer::from(OutputLayer::new(
            data,
            Activations::Sigmoid,
            &mut self.engine,
        ));
        debug!("Output layer created: {output_layer}");
        self.add_layer(OUTPUT_LAYER, output_layer);

        info!("Neural network built");
        Ok(())
    }

    /// Final scalar of a built network.
    pub fn forward(&mut self) -> Result<f64> {
        let layer = self
            .layers
            .get(OUTPUT_LAYER)
            .ok_or_else(|| Error::LayerNotFound(OUTPUT_LAYER.to_string()))?;
        let data = layer.layer_dataset(&mut self.engine)?;
        data.as_scalar().ok_or(Error::DimensionMismatch {
            expected: 1,
            actual: data.len(),
        })
    }

    /// Redraws the weights and bias of one registered layer.
    pub fn reset_layer(&mut self, name: &str) -> Result<()> {
        let layer = self
            .layers
            .get_mut(name)
            .ok_or_else(|| Error::LayerNotFound(name.to_string()))?;
        layer.reset(&mut self.engine);
        info!("Reset layer \"{name}\"");
        Ok(())
    }

    /// Recomputes every registered layer's output. Layers are not modified.
    pub fn report(&mut self) -> Result<NetworkReport> {
        let mut layers = Vec::with_capacity(self.layers.len());
        for (name, layer) in self.layers.iter() {
            layers.push((name.to_string(), layer.layer_dataset(&mut self.engine)?));
        }
        Ok(NetworkReport {
            class_name: "NeuralNetwork".to_string(),
            input: self.input.clone(),
            layers,
        })
    }

    pub fn visualize(&mut self, viz: &mut impl Visualizer) -> Result<()> {
        let report = self.report()?;
        viz.render(&report)?;
        Ok(())
    }
}

impl fmt::Display for NeuralNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NeuralNetwork(input={:?}, layers={:?}, test_mode={})",
            self.input,
            self.layer_names(),
            self.engine.is_test_mode()
        )
    }
}
