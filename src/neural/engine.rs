use std::ops::RangeInclusive;

use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::Value;
use tracing::{debug, info};

use crate::{config::NetworkConfig, matrix::Matrix2, prelude::*};

/// Per-neuron choice between adding and subtracting the layer bias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Switch {
    /// One flag broadcast to every neuron.
    Uniform(bool),
    /// One flag per neuron, used as given.
    PerNeuron(Vec<bool>),
}

impl From<bool> for Switch {
    fn from(value: bool) -> Self {
        Switch::Uniform(value)
    }
}

impl From<Vec<bool>> for Switch {
    fn from(value: Vec<bool>) -> Self {
        Switch::PerNeuron(value)
    }
}

impl TryFrom<&Value> for Switch {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Bool(flag) => Ok(Switch::Uniform(*flag)),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_bool().ok_or_else(|| {
                        Error::InvalidArgument(format!("switch flag {item} must be a boolean"))
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(Switch::PerNeuron),
            other => Err(Error::InvalidArgument(format!(
                "switch {other} must be a boolean or a list of booleans"
            ))),
        }
    }
}

/// Random source and accumulation rule shared by the layers of one network.
///
/// In test mode the generator is put back to the configured seed before every
/// sampling group, so two layers built back to back draw the same leading
/// values.
#[derive(Debug, Clone)]
pub struct NeuronEngine {
    rng: ChaCha8Rng,
    test_seed: Option<u64>,
    init_range: RangeInclusive<f64>,
}

impl NeuronEngine {
    pub fn new(config: &NetworkConfig) -> Self {
        let rng = match config.test_seed() {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            rng,
            test_seed: config.test_seed(),
            init_range: config.init_range(),
        }
    }

    pub fn is_test_mode(&self) -> bool {
        self.test_seed.is_some()
    }

    /// Resets the generator to the test seed. No-op outside test mode.
    pub fn reseed(&mut self) {
        if let Some(seed) = self.test_seed {
            debug!("Reseeding random source with {seed}");
            self.rng = ChaCha8Rng::seed_from_u64(seed);
        }
    }

    fn die(&self) -> Uniform<f64> {
        Uniform::from(self.init_range.clone())
    }

    /// Draws a `neuron_number x input_size` weight matrix, one row per neuron.
    pub fn initialize_weights(&mut self, input_size: usize, neuron_number: usize) -> Matrix2<f64> {
        self.reseed();
        info!("Generating weights for input size {input_size} and {neuron_number} neurons");
        let die = self.die();
        let rng = &mut self.rng;
        Matrix2::from_fn(neuron_number, input_size, |_, _| die.sample(&mut *rng))
    }

    /// Draws the next value from the current generator state.
    pub fn draw_bias(&mut self) -> f64 {
        let die = self.die();
        die.sample(&mut self.rng)
    }

    /// Expands a switch into one flag per neuron. Per-neuron lists pass
    /// through unchanged, whatever their length.
    pub fn normalize_switch(switch: &Switch, neuron_number: usize) -> Vec<bool> {
        match switch {
            Switch::Uniform(flag) => {
                info!("Broadcasting switch {flag} to {neuron_number} neurons");
                vec![*flag; neuron_number]
            }
            Switch::PerNeuron(flags) => {
                info!("Using per-neuron switch {flags:?}");
                flags.clone()
            }
        }
    }

    /// Same as [`NeuronEngine::normalize_switch`] for an untyped value.
    pub fn normalize_switch_value(value: &Value, neuron_number: usize) -> Result<Vec<bool>> {
        let switch = Switch::try_from(value)?;
        Ok(Self::normalize_switch(&switch, neuron_number))
    }

    /// Pre-activation value of every neuron in a layer.
    ///
    /// The bias is added to (switch on) or subtracted from (switch off) each
    /// `input * weight` product before the products are summed, so a neuron
    /// with `k` inputs carries the bias `k` times.
    pub fn compute_layer_outputs(
        &mut self,
        input: &[f64],
        neuron_number: usize,
        weights: &Matrix2<f64>,
        bias: f64,
        switch: &Switch,
    ) -> Result<Vec<f64>> {
        self.reseed();
        info!("Computing {neuron_number} neurons with bias={bias}");
        let switch_list = Self::normalize_switch(switch, neuron_number);
        if switch_list.len() < neuron_number {
            return Err(Error::DimensionMismatch {
                expected: neuron_number,
                actual: switch_list.len(),
            });
        }
        if weights.rows() < neuron_number {
            return Err(Error::DimensionMismatch {
                expected: neuron_number,
                actual: weights.rows(),
            });
        }

        let result: Vec<f64> = weights
            .iter_rows()
            .zip(switch_list)
            .take(neuron_number)
            .map(|(row, add_bias)| {
                input
                    .iter()
                    .zip(row)
                    .map(|(i, w)| if add_bias { i * w + bias } else { i * w - bias })
                    .sum::<f64>()
            })
            .collect();

        info!("Computed neuron values: {result:?}");
        Ok(result)
    }
}
