//! Activation function types.

use serde_derive::{Deserialize, Serialize};

/// [Activation function](https://en.wikipedia.org/wiki/Activation_function)
/// types.
///
/// Both supported functions have derivatives that can be written purely in
/// terms of their own output, which lets the backward pass work from the
/// stored node activations alone.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activator {
    /// Logistic sigmoid, `1 / (1 + e^-x)`
    #[default]
    Logistic,
    /// Hyperbolic tan function
    TanH,
}

impl Activator {
    /// Evaluates `f(x)` for the selected the activation function.
    pub fn f(self, x: f64) -> f64 {
        match self {
            Activator::Logistic => 1.0 / (1.0 + (-x).exp()),
            Activator::TanH => x.tanh(),
        }
    }

    /// Evaluates the derivative `f'(x)`, where `x = f^{-1}(y)`.
    ///
    /// Note that this function takes in the *output* of the activation
    /// function, rather than the input. This is an optimization that means we
    /// don't have to store the intermediate results before activation.
    pub fn fprime(self, y: f64) -> f64 {
        match self {
            Activator::Logistic => y * (1.0 - y),
            // Same as `y * (1/y - y)`, but defined at y = 0.
            Activator::TanH => 1.0 - y * y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn logistic_values() {
        assert_relative_eq!(Activator::Logistic.f(0.0), 0.5);
        assert!(Activator::Logistic.f(50.0) > 0.999);
        assert!(Activator::Logistic.f(-50.0) < 0.001);
    }

    #[test]
    fn tanh_values() {
        assert_relative_eq!(Activator::TanH.f(0.0), 0.0);
        assert_relative_eq!(Activator::TanH.f(0.5), 0.5f64.tanh());
        assert_relative_eq!(Activator::TanH.f(-2.0), -(2.0f64.tanh()));
    }

    #[test]
    fn logistic_derivative_from_output() {
        for &y in &[0.01, 0.2, 0.5, 0.73, 0.99] {
            assert_relative_eq!(Activator::Logistic.fprime(y), y * (1.0 - y));
        }
        // Matches the derivative computed from the pre-activation value.
        let x = 0.3;
        let y = Activator::Logistic.f(x);
        let numeric = (Activator::Logistic.f(x + 1e-6) - Activator::Logistic.f(x - 1e-6)) / 2e-6;
        assert_relative_eq!(Activator::Logistic.fprime(y), numeric, epsilon = 1e-8);
    }

    #[test]
    fn tanh_derivative_from_output() {
        for &y in &[-0.99, -0.5, -0.1, 0.25, 0.6, 0.95] {
            assert_relative_eq!(Activator::TanH.fprime(y), y * (1.0 / y - y), epsilon = 1e-12);
            assert_relative_eq!(Activator::TanH.fprime(y), 1.0 - y * y);
        }
        assert_relative_eq!(Activator::TanH.fprime(0.0), 1.0);
    }

    #[test]
    fn names_in_config() {
        let parsed: Activator = serde_json::from_str("\"tanh\"").unwrap();
        assert_eq!(parsed, Activator::TanH);
        assert_eq!(serde_json::to_string(&Activator::Logistic).unwrap(), "\"logistic\"");
    }
}
