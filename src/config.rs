use std::ops::RangeInclusive;

use crate::prelude::*;

/// Seed used when test mode is switched on without an explicit seed.
pub const DEFAULT_TEST_SEED: u64 = 0;

/// Range every weight and bias is drawn from.
pub const DEFAULT_INIT_RANGE: RangeInclusive<f64> = -0.01..=0.01;

/// Settings shared by every layer a network builds.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    test_seed: Option<u64>,
    init_range: RangeInclusive<f64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            test_seed: None,
            init_range: DEFAULT_INIT_RANGE,
        }
    }
}

impl NetworkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic configuration: the random source is reset to
    /// `DEFAULT_TEST_SEED` before every sampling group.
    pub fn test_mode() -> Self {
        Self::default().with_test_seed(DEFAULT_TEST_SEED)
    }

    pub fn with_test_seed(mut self, seed: u64) -> Self {
        self.test_seed = Some(seed);
        self
    }

    /// Fails unless both bounds are finite and `start <= end`.
    pub fn with_init_range(mut self, range: RangeInclusive<f64>) -> Result<Self> {
        let (low, high) = (*range.start(), *range.end());
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(Error::InvalidArgument(format!(
                "init range {low}..={high} must be finite and ordered"
            )));
        }
        self.init_range = range;
        Ok(self)
    }

    pub fn test_seed(&self) -> Option<u64> {
        self.test_seed
    }

    pub fn init_range(&self) -> RangeInclusive<f64> {
        self.init_range.clone()
    }

    pub fn is_test_mode(&self) -> bool {
        self.test_seed.is_some()
    }
}
