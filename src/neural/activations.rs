use std::fmt::Debug;

/// Number of terms in the exponential series used by `sigmoid` and `tanh`.
pub const SERIES_DEPTH: u32 = 10;

pub trait Activation: Debug + Send + Sync {
    /// Returns activation function at x
    fn call(&self, x: f64) -> f64;
    /// Short name shown in layer descriptors.
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activations {
    Linear,
    ReLU,
    Sigmoid,
    Tanh,
}

impl Activation for Activations {
    fn call(&self, x: f64) -> f64 {
        use Activations::*;
        match self {
            Linear => linear(x),
            ReLU => relu(x),
            Sigmoid => sigmoid(x),
            Tanh => tanh(x),
        }
    }

    fn name(&self) -> &str {
        use Activations::*;
        match self {
            Linear => "linear",
            ReLU => "relu",
            Sigmoid => "sigmoid",
            Tanh => "tanh",
        }
    }
}

pub fn linear(x: f64) -> f64 {
    x
}

pub fn relu(x: f64) -> f64 {
    x.max(0.0)
}

/// Ten-term exponential series of `x` in Horner form, innermost term first.
fn series_exp(x: f64) -> f64 {
    let mut exp = 1.0;
    for i in (1..=SERIES_DEPTH).rev() {
        exp = 1.0 + x * exp / i as f64;
    }
    exp
}

/// `1 / (1 + exp)` where `exp` is the ten-term series of `e^x`.
///
/// The series is evaluated for `+x`, so the curve falls as `x` grows.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + series_exp(x))
}

/// Hyperbolic tangent from two ten-term series of `e^{2x}` and `e^{-2x}`.
pub fn tanh(x: f64) -> f64 {
    let e_pos_2x = series_exp(2.0 * x);
    let e_neg_2x = series_exp(-2.0 * x);
    (e_pos_2x - e_neg_2x) / (e_pos_2x + e_neg_2x)
}

/// Moves `x` away from zero by `bias`.
pub fn solution(x: f64, bias: f64) -> f64 {
    if x > 0.0 {
        x + bias
    } else {
        x - bias
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn linear_and_relu() {
        for x in [-5.0, -0.25, 0.0, 0.25, 5.0] {
            assert_eq!(linear(x), x);
        }
        assert_eq!(relu(-5.0), 0.0);
        assert_eq!(relu(5.0), 5.0);
        assert_eq!(relu(0.0), 0.0);
    }

    #[test]
    fn sigmoid_at_zero_is_one_half() {
        assert_eq!(sigmoid(0.0), 0.5);
    }

    #[test]
    fn tanh_at_zero_is_zero() {
        assert_eq!(tanh(0.0), 0.0);
    }

    #[test]
    fn sigmoid_follows_positive_exponent_series() {
        for x in [-1.0f64, -0.5, 0.1, 0.5, 1.0] {
            assert_abs_diff_eq!(sigmoid(x), 1.0 / (1.0 + x.exp()), epsilon = 1e-6);
        }
    }

    #[test]
    fn series_truncation_is_observable() {
        // the ten-term series drifts from the true exponential far from zero
        let x = 8.0f64;
        assert!((sigmoid(x) - 1.0 / (1.0 + x.exp())).abs() > 1e-6);
    }

    #[test]
    fn tanh_matches_closed_form_near_zero() {
        for x in [-0.5f64, -0.1, 0.1, 0.25, 0.5] {
            assert_abs_diff_eq!(tanh(x), x.tanh(), epsilon = 1e-6);
        }
        assert_abs_diff_eq!(tanh(0.3), -tanh(-0.3), epsilon = 1e-12);
    }

    #[test]
    fn solution_moves_away_from_zero() {
        assert_eq!(solution(2.0, 0.5), 2.5);
        assert_eq!(solution(-2.0, 0.5), -2.5);
        assert_eq!(solution(0.0, 0.5), -0.5);
    }

    #[test]
    fn enum_dispatch() {
        assert_eq!(Activations::Sigmoid.call(0.0), 0.5);
        assert_eq!(Activations::ReLU.call(-3.0), 0.0);
        assert_eq!(Activations::Linear.call(1.5), 1.5);
        assert_eq!(Activations::Tanh.call(0.0), 0.0);
        assert_eq!(Activations::Tanh.name(), "tanh");
    }
}
