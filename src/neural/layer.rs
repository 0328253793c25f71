use std::{fmt, sync::Arc};

use tracing::debug;

use super::{
    activations::Activation,
    engine::{NeuronEngine, Switch},
};
use crate::{matrix::Matrix2, prelude::*};

/// Neuron count of every input layer.
pub const INPUT_NEURONS: usize = 2;

/// What a layer publishes to the next stage.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerData {
    Vector(Vec<f64>),
    Scalar(f64),
}

impl LayerData {
    /// Values as a vector; a scalar becomes a one-element vector.
    pub fn into_vec(self) -> Vec<f64> {
        match self {
            LayerData::Vector(values) => values,
            LayerData::Scalar(value) => vec![value],
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            LayerData::Scalar(value) => Some(*value),
            LayerData::Vector(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            LayerData::Vector(values) => values.len(),
            LayerData::Scalar(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for LayerData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerData::Vector(values) => write!(f, "{values:?}"),
            LayerData::Scalar(value) => write!(f, "{value}"),
        }
    }
}

/// First stage: two neurons, each with its own activation.
#[derive(Debug, Clone)]
pub struct InputLayer {
    input: Vec<f64>,
    weights: Matrix2<f64>,
    bias: f64,
    switch: Switch,
    activation_first: Arc<dyn Activation>,
    activation_second: Arc<dyn Activation>,
}

impl InputLayer {
    pub fn new(
        input: Vec<f64>,
        activation_first: impl Activation + 'static,
        activation_second: impl Activation + 'static,
        engine: &mut NeuronEngine,
    ) -> Self {
        Self::build(
            input,
            Arc::new(activation_first),
            Arc::new(activation_second),
            engine,
        )
    }

    fn build(
        input: Vec<f64>,
        activation_first: Arc<dyn Activation>,
        activation_second: Arc<dyn Activation>,
        engine: &mut NeuronEngine,
    ) -> Self {
        engine.reseed();
        let weights = engine.initialize_weights(input.len(), INPUT_NEURONS);
        let bias = engine.draw_bias();
        Self {
            input,
            weights,
            bias,
            switch: Switch::PerNeuron(vec![true; INPUT_NEURONS]),
            activation_first,
            activation_second,
        }
    }

    /// Redraws weights and bias, keeping input and activations.
    pub fn reset(&mut self, engine: &mut NeuronEngine) {
        *self = Self::build(
            std::mem::take(&mut self.input),
            self.activation_first.clone(),
            self.activation_second.clone(),
            engine,
        );
    }

    pub fn layer_dataset(&self, engine: &mut NeuronEngine) -> Result<Vec<f64>> {
        let values = engine.compute_layer_outputs(
            &self.input,
            INPUT_NEURONS,
            &self.weights,
            self.bias,
            &self.switch,
        )?;
        debug!("{self}");
        Ok(vec![
            self.activation_first.call(values[0]),
            self.activation_second.call(values[1]),
        ])
    }

    pub fn input(&self) -> &[f64] {
        &self.input
    }

    pub fn weights(&self) -> &Matrix2<f64> {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }
}

impl fmt::Display for InputLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "InputLayer(inputs={}, neurons={INPUT_NEURONS}, bias={}, activations={}/{})",
            self.input.len(),
            self.bias,
            self.activation_first.name(),
            self.activation_second.name()
        )
    }
}

/// Hidden stage with a configurable neuron count and one shared activation.
/// Every neuron adds the bias.
#[derive(Debug, Clone)]
pub struct DeepLayer {
    input: Vec<f64>,
    neuron_number: usize,
    weights: Matrix2<f64>,
    bias: f64,
    activation: Arc<dyn Activation>,
}

impl DeepLayer {
    pub fn new(
        input: Vec<f64>,
        neuron_number: usize,
        activation: impl Activation + 'static,
        engine: &mut NeuronEngine,
    ) -> Self {
        Self::build(input, neuron_number, Arc::new(activation), engine)
    }

    fn build(
        input: Vec<f64>,
        neuron_number: usize,
        activation: Arc<dyn Activation>,
        engine: &mut NeuronEngine,
    ) -> Self {
        engine.reseed();
        let weights = engine.initialize_weights(input.len(), neuron_number);
        let bias = engine.draw_bias();
        Self {
            input,
            neuron_number,
            weights,
            bias,
            activation,
        }
    }

    pub fn reset(&mut self, engine: &mut NeuronEngine) {
        *self = Self::build(
            std::mem::take(&mut self.input),
            self.neuron_number,
            self.activation.clone(),
            engine,
        );
    }

    pub fn layer_dataset(&self, engine: &mut NeuronEngine) -> Result<Vec<f64>> {
        let values = engine.compute_layer_outputs(
            &self.input,
            self.neuron_number,
            &self.weights,
            self.bias,
            &Switch::Uniform(true),
        )?;
        debug!("{self}");
        Ok(values.into_iter().map(|v| self.activation.call(v)).collect())
    }

    pub fn input(&self) -> &[f64] {
        &self.input
    }

    pub fn neuron_number(&self) -> usize {
        self.neuron_number
    }

    pub fn weights(&self) -> &Matrix2<f64> {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }
}

impl fmt::Display for DeepLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DeepLayer(inputs={}, neurons={}, bias={}, activation={})",
            self.input.len(),
            self.neuron_number,
            self.bias,
            self.activation.name()
        )
    }
}

/// Last stage: sums its input and applies one activation.
///
/// The bias is drawn like any other layer's but takes no part in the output.
#[derive(Debug, Clone)]
pub struct OutputLayer {
    input: Vec<f64>,
    bias: f64,
    activation: Arc<dyn Activation>,
}

impl OutputLayer {
    pub fn new(
        input: Vec<f64>,
        activation: impl Activation + 'static,
        engine: &mut NeuronEngine,
    ) -> Self {
        Self::build(input, Arc::new(activation), engine)
    }

    fn build(input: Vec<f64>, activation: Arc<dyn Activation>, engine: &mut NeuronEngine) -> Self {
        engine.reseed();
        let bias = engine.draw_bias();
        Self {
            input,
            bias,
            activation,
        }
    }

    pub fn reset(&mut self, engine: &mut NeuronEngine) {
        *self = Self::build(
            std::mem::take(&mut self.input),
            self.activation.clone(),
            engine,
        );
    }

    pub fn layer_dataset(&self) -> f64 {
        self.activation.call(self.input.iter().sum())
    }

    pub fn input(&self) -> &[f64] {
        &self.input
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }
}

impl fmt::Display for OutputLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OutputLayer(inputs={}, bias={}, activation={})",
            self.input.len(),
            self.bias,
            self.activation.name()
        )
    }
}

#[derive(Debug, Clone)]
pub enum Layer {
    Input(InputLayer),
    Deep(DeepLayer),
    Output(OutputLayer),
}

impl Layer {
    /// Produces this layer's output from its stored input.
    pub fn layer_dataset(&self, engine: &mut NeuronEngine) -> Result<LayerData> {
        match self {
            Layer::Input(layer) => layer.layer_dataset(engine).map(LayerData::Vector),
            Layer::Deep(layer) => layer.layer_dataset(engine).map(LayerData::Vector),
            Layer::Output(layer) => Ok(LayerData::Scalar(layer.layer_dataset())),
        }
    }

    pub fn reset(&mut self, engine: &mut NeuronEngine) {
        match self {
            Layer::Input(layer) => layer.reset(engine),
            Layer::Deep(layer) => layer.reset(engine),
            Layer::Output(layer) => layer.reset(engine),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Layer::Input(_) => "InputLayer",
            Layer::Deep(_) => "DeepLayer",
            Layer::Output(_) => "OutputLayer",
        }
    }

    pub fn neuron_number(&self) -> usize {
        match self {
            Layer::Input(_) => INPUT_NEURONS,
            Layer::Deep(layer) => layer.neuron_number(),
            Layer::Output(_) => 1,
        }
    }

    pub fn input(&self) -> &[f64] {
        match self {
            Layer::Input(layer) => layer.input(),
            Layer::Deep(layer) => layer.input(),
            Layer::Output(layer) => layer.input(),
        }
    }

    /// `None` for the output layer, which has no weights.
    pub fn weights(&self) -> Option<&Matrix2<f64>> {
        match self {
            Layer::Input(layer) => Some(layer.weights()),
            Layer::Deep(layer) => Some(layer.weights()),
            Layer::Output(_) => None,
        }
    }

    pub fn bias(&self) -> f64 {
        match self {
            Layer::Input(layer) => layer.bias(),
            Layer::Deep(layer) => layer.bias(),
            Layer::Output(layer) => layer.bias(),
        }
    }
}

impl From<InputLayer> for Layer {
    fn from(layer: InputLayer) -> Self {
        Layer::Input(layer)
    }
}

impl From<DeepLayer> for Layer {
    fn from(layer: DeepLayer) -> Self {
        Layer::Deep(layer)
    }
}

impl From<OutputLayer> for Layer {
    fn from(layer: OutputLayer) -> Self {
        Layer::Output(layer)
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Input(layer) => fmt::Display::fmt(layer, f),
            Layer::Deep(layer) => fmt::Display::fmt(layer, f),
            Layer::Output(layer) => fmt::Display::fmt(layer, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::NetworkConfig, neural::activations::Activations};
    use approx::assert_abs_diff_eq;

    fn test_engine() -> NeuronEngine {
        NeuronEngine::new(&NetworkConfig::test_mode())
    }

    fn random_engine() -> NeuronEngine {
        NeuronEngine::new(&NetworkConfig::new())
    }

    #[test]
    fn output_lengths() {
        let mut engine = random_engine();
        for input in [vec![1.0], vec![1.0, 2.5, -3.0], vec![0.5; 7]] {
            let input_layer =
                InputLayer::new(input, Activations::Linear, Activations::Linear, &mut engine);
            let first = input_layer.layer_dataset(&mut engine).unwrap();
            assert_eq!(first.len(), 2);

            let deep = DeepLayer::new(first, 3, Activations::Tanh, &mut engine);
            let second = deep.layer_dataset(&mut engine).unwrap();
            assert_eq!(second.len(), 3);

            let output = Layer::from(OutputLayer::new(second, Activations::Sigmoid, &mut engine));
            let data = output.layer_dataset(&mut engine).unwrap();
            assert!(data.as_scalar().is_some());
        }
    }

    #[test]
    fn input_layer_is_reproducible_in_test_mode() {
        let mut engine = test_engine();
        let a = InputLayer::new(
            vec![1.0, 2.0],
            Activations::Linear,
            Activations::Linear,
            &mut engine,
        );
        let b = InputLayer::new(
            vec![1.0, 2.0],
            Activations::Linear,
            Activations::Linear,
            &mut engine,
        );

        assert_eq!(a.weights(), b.weights());
        assert_eq!(a.bias(), b.bias());
        assert_eq!(
            a.layer_dataset(&mut engine).unwrap(),
            b.layer_dataset(&mut engine).unwrap()
        );
    }

    #[test]
    fn reseed_correlates_consecutive_layers() {
        let mut engine = test_engine();
        let input = InputLayer::new(
            vec![1.0, 2.0],
            Activations::Linear,
            Activations::Linear,
            &mut engine,
        );
        let deep = DeepLayer::new(vec![0.1, 0.2], 3, Activations::Tanh, &mut engine);

        // both start from the same seed, so the deep layer's leading rows
        // repeat the input layer's weights and its third row starts with the
        // input layer's bias
        assert_eq!(deep.weights().row(0), input.weights().row(0));
        assert_eq!(deep.weights().row(1), input.weights().row(1));
        assert_eq!(deep.weights()[(2, 0)], input.bias());
    }

    #[test]
    fn input_layer_applies_each_activation() {
        let mut engine = test_engine();
        let layer = InputLayer::new(
            vec![3.0, -4.0],
            Activations::ReLU,
            Activations::Linear,
            &mut engine,
        );

        let raw = engine
            .compute_layer_outputs(layer.input(), 2, layer.weights(), layer.bias(), &true.into())
            .unwrap();
        let out = layer.layer_dataset(&mut engine).unwrap();

        assert_eq!(out, vec![raw[0].max(0.0), raw[1]]);
    }

    #[test]
    fn deep_layer_always_adds_bias() {
        let mut engine = test_engine();
        let layer = DeepLayer::new(vec![1.0, 1.0], 2, Activations::Linear, &mut engine);

        let out = layer.layer_dataset(&mut engine).unwrap();

        for (n, value) in out.iter().enumerate() {
            let row = layer.weights().row(n).unwrap();
            let expected: f64 = row.iter().map(|w| w + layer.bias()).sum();
            assert_abs_diff_eq!(*value, expected, epsilon = 1e-15);
        }
    }

    #[test]
    fn output_layer_sums_then_activates() {
        let mut engine = random_engine();
        let layer = OutputLayer::new(vec![0.25, -0.25, 1.0], Activations::Linear, &mut engine);
        assert_eq!(layer.layer_dataset(), 1.0);

        let layer = OutputLayer::new(vec![0.5, -0.5], Activations::Sigmoid, &mut engine);
        assert_eq!(layer.layer_dataset(), 0.5);
    }

    #[test]
    fn repeated_queries_are_identical() {
        let mut engine = random_engine();
        let deep = DeepLayer::new(vec![1.0, -2.0, 3.0], 4, Activations::Tanh, &mut engine);
        let layer = Layer::from(deep);

        let first = layer.layer_dataset(&mut engine).unwrap();
        let second = layer.layer_dataset(&mut engine).unwrap();

        assert_eq!(first, second);
        assert_eq!(layer.neuron_number(), 4);
        assert_eq!(layer.kind(), "DeepLayer");
    }

    #[test]
    fn reset_redraws_parameters() {
        let mut engine = random_engine();
        let deep = DeepLayer::new(vec![1.0, 2.0], 3, Activations::Tanh, &mut engine);
        let mut layer = Layer::from(deep);
        let before = layer.weights().cloned();

        layer.reset(&mut engine);

        assert_eq!(layer.input(), &[1.0, 2.0]);
        assert_eq!(layer.neuron_number(), 3);
        assert_ne!(layer.weights().cloned(), before);
    }

    #[test]
    fn reset_in_test_mode_reproduces_parameters() {
        let mut engine = test_engine();
        let mut layer = Layer::from(InputLayer::new(
            vec![1.0, 2.0],
            Activations::Linear,
            Activations::Linear,
            &mut engine,
        ));
        let weights = layer.weights().cloned();
        let bias = layer.bias();

        layer.reset(&mut engine);

        assert_eq!(layer.weights().cloned(), weights);
        assert_eq!(layer.bias(), bias);
        assert!(layer.to_string().starts_with("InputLayer(inputs=2"));
    }
}
