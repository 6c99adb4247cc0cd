//! Network construction parameters.

use crate::activator::Activator;
use crate::error::ConstructionError;
use crate::layout::Layout;

use serde_derive::{Deserialize, Serialize};

/// Everything needed to build a `NeuralNet`.
///
/// Hyperparameters can be read from JSON, with the layout in its text form:
///
/// ```
/// # use perceptron::hyperparams::Hyperparams;
/// # use perceptron::activator::Activator;
/// let params = Hyperparams::from_json(r#"{
///     "layout": "784;392;10",
///     "activator": "tanh",
///     "learning_rate": 0.001
/// }"#).unwrap();
/// assert_eq!(params.layout.sizes(), &[784, 392, 10]);
/// assert_eq!(params.activator, Activator::TanH);
/// assert_eq!(params.seed, None);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hyperparams {
    /// The number of nodes in each layer.
    pub layout: Layout,
    /// The activation function used by every non-input node.
    #[serde(default)]
    pub activator: Activator,
    /// The gradient descent step size.
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    /// Seeds weight initialization. Left unset, weights are drawn from the
    /// thread-local generator.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_learning_rate() -> f64 {
    0.1
}

impl Hyperparams {
    /// Creates hyperparameters for `layout` with the defaults:
    ///
    /// * A logistic activation function.
    /// * A learning rate of 0.1.
    /// * No fixed seed.
    pub fn new(layout: Layout) -> Self {
        Hyperparams {
            layout,
            activator: Activator::default(),
            learning_rate: default_learning_rate(),
            seed: None,
        }
    }

    /// Sets the activation function.
    pub fn activator(mut self, activator: Activator) -> Self {
        self.activator = activator;
        self
    }

    /// Sets the learning rate to use during gradient descent.
    pub fn learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = rate;
        self
    }

    /// Fixes the seed used to initialize weights and biases.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parses hyperparameters from a JSON document.
    ///
    /// An invalid layout is reported as a JSON error carrying the layout's
    /// `ConstructionError` message.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Checks the values that the layout type can't enforce by itself.
    pub(crate) fn validate(&self) -> Result<(), ConstructionError> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ConstructionError::InvalidLearningRate(self.learning_rate));
        }
        Ok(())
    }
}
