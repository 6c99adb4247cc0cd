//! A [Feedforward neural network]
//! (https://en.wikipedia.org/wiki/Feedforward_neural_network).
//!
//! # Example
//!
//! Let's teach a small network to tell two points apart:
//!
//! ```
//! # use perceptron::feed_forward::*;
//! let params = Hyperparams::new("2;3;1".parse().unwrap())
//!     .activator(Activator::Logistic)
//!     .learning_rate(0.5)
//!     .seed(42);
//! let mut network = NeuralNet::new(&params).unwrap();
//!
//! for _ in 0..3000 {
//!     network.train(&[0.0, 1.0], &[1.0]).unwrap();
//!     network.train(&[1.0, 0.0], &[0.0]).unwrap();
//! }
//!
//! let mut output = [0.0];
//! network.query(&[0.0, 1.0], &mut output).unwrap();
//! assert!(output[0] > 0.9);
//! network.query(&[1.0, 0.0], &mut output).unwrap();
//! assert!(output[0] < 0.1);
//! ```

pub use crate::activator::Activator;
pub use crate::error::{ConstructionError, ShapeMismatch, VectorKind};
pub use crate::hyperparams::Hyperparams;
pub use crate::layout::Layout;

use crate::layer::Layer;
use crate::matrix::WeightMatrix;
use crate::utils::{Back, Front};

use itertools::izip;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// A fully connected feedforward neural network trained one sample at a
/// time.
///
/// Every call to `train` or `query` overwrites the per-node activations, so
/// both take `&mut self`. Share a network between threads behind a `Mutex`.
#[derive(Clone, Debug)]
pub struct NeuralNet {
    layers: Vec<Layer>,
    /// `weights[p]` connects `layers[p]` to `layers[p + 1]`.
    weights: Vec<WeightMatrix>,
    activator: Activator,
    learning_rate: f64,
}

impl NeuralNet {
    /// Creates a new, untrained neural network.
    ///
    /// Weights are seeded from `params.seed` when it is set, so the same
    /// parameters always build the same network.
    pub fn new(params: &Hyperparams) -> Result<Self, ConstructionError> {
        match params.seed {
            Some(seed) => NeuralNet::with_rng(params, &mut ChaCha12Rng::seed_from_u64(seed)),
            None => NeuralNet::with_rng(params, &mut rand::rng()),
        }
    }

    /// Creates a new, untrained neural network, drawing the initial weights
    /// and biases from `rng`.
    ///
    /// Every bias of a non-input node, and every weight feeding it, is drawn
    /// uniformly from `[-1/sqrt(n), 1/sqrt(n)]` where `n` is the size of the
    /// preceding layer. Biases are drawn first, layer by layer, then the
    /// weights.
    pub fn with_rng<R>(params: &Hyperparams, rng: &mut R) -> Result<Self, ConstructionError>
    where
        R: Rng + ?Sized,
    {
        params.validate()?;
        let sizes = params.layout.sizes();

        let mut layers = Vec::new();
        layers.try_reserve_exact(sizes.len())?;
        layers.push(Layer::zeros(sizes[0])?);
        for pair in sizes.windows(2) {
            layers.push(Layer::random(rng, pair[1], pair[0])?);
        }

        let mut weights = Vec::new();
        weights.try_reserve_exact(sizes.len() - 1)?;
        for pair in sizes.windows(2) {
            weights.push(WeightMatrix::random(rng, pair[0], pair[1])?);
        }

        debug!(
            "created network {} ({:?}, learning rate {}, {} weights)",
            params.layout,
            params.activator,
            params.learning_rate,
            weights.iter().map(WeightMatrix::len).sum::<usize>()
        );
        Ok(NeuralNet {
            layers,
            weights,
            activator: params.activator,
            learning_rate: params.learning_rate,
        })
    }

    /// Returns the size of the input layer to the network.
    pub fn input_len(&self) -> usize {
        self.layers.front().len()
    }

    /// Returns the size of the output layer from the network.
    pub fn output_len(&self) -> usize {
        self.layers.back().len()
    }

    /// Returns the number of nodes in each layer, input layer first.
    pub fn layer_sizes(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::len).collect()
    }

    pub fn activator(&self) -> Activator {
        self.activator
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Returns the layer at depth `layer`, or `None` if out of range.
    pub fn layer(&self, layer: usize) -> Option<&Layer> {
        self.layers.get(layer)
    }

    /// Returns the weights connecting `layer` to `layer + 1`.
    pub fn weights(&self, layer: usize) -> Option<&WeightMatrix> {
        self.weights.get(layer)
    }

    /// Returns the output layer activations from the most recent forward
    /// pass.
    pub fn outputs(&self) -> impl Iterator<Item = f64> + '_ {
        self.layers.back().nodes().iter().map(|n| n.out)
    }

    /// Trains the network on a single example, applying the weight update
    /// immediately.
    ///
    /// Both vectors are checked before anything is touched; on a mismatch the
    /// network is left unchanged.
    pub fn train(&mut self, feature: &[f64], target: &[f64]) -> Result<(), ShapeMismatch> {
        ShapeMismatch::check(VectorKind::Feature, self.input_len(), feature.len())?;
        ShapeMismatch::check(VectorKind::Target, self.output_len(), target.len())?;
        self.feed_forward(feature);
        self.back_propagate(target);
        Ok(())
    }

    /// Feeds `feature` through the network and writes the output layer into
    /// `output`.
    pub fn query(&mut self, feature: &[f64], output: &mut [f64]) -> Result<(), ShapeMismatch> {
        ShapeMismatch::check(VectorKind::Feature, self.input_len(), feature.len())?;
        ShapeMismatch::check(VectorKind::Output, self.output_len(), output.len())?;
        self.feed_forward(feature);
        for (o, node) in izip!(output.iter_mut(), self.layers.back().nodes()) {
            *o = node.out;
        }
        Ok(())
    }

    /// Feeds the provided `feature` through the network, returning the output
    /// layer.
    pub fn run(&mut self, feature: &[f64]) -> Result<Vec<f64>, ShapeMismatch> {
        let mut output = vec![0.0; self.output_len()];
        self.query(feature, &mut output)?;
        Ok(output)
    }

    /// Computes every node's output from `feature`, one layer at a time.
    fn feed_forward(&mut self, feature: &[f64]) {
        for (node, &x) in izip!(self.layers.mut_front().nodes_mut(), feature) {
            node.out = x;
        }
        let activator = self.activator;
        for (p, weights) in self.weights.iter().enumerate() {
            let (prev, next) = adjacent_layers(&mut self.layers, p);
            for (j, node) in next.nodes_mut().iter_mut().enumerate() {
                let mut sum = 0.0;
                for (upstream, w) in izip!(prev.nodes(), weights.column(j)) {
                    sum += upstream.out * w;
                }
                node.out = activator.f(sum + node.bias);
            }
        }
    }

    /// Feeds the provided `target` back through the network, updating every
    /// weight and bias in place.
    ///
    /// Minimizes `E = 1/2 * sum((t - o)^2)`. Must follow a forward pass over
    /// the matching input, since it reads the stored activations.
    fn back_propagate(&mut self, target: &[f64]) {
        let activator = self.activator;
        let rate = self.learning_rate;

        for (node, &t) in izip!(self.layers.mut_back().nodes_mut(), target) {
            node.delta = node.out - t;
        }

        // Walk from the output edge back to the input edge. A layer's deltas
        // are final before the edge below it reads them.
        for p in (0..self.weights.len()).rev() {
            let (prev, next) = adjacent_layers(&mut self.layers, p);
            let weights = &mut self.weights[p];
            for (i, upstream) in prev.nodes_mut().iter_mut().enumerate() {
                let mut delta = 0.0;
                for (j, downstream) in next.nodes().iter().enumerate() {
                    let w = weights.get_mut(i, j);
                    delta += *w * downstream.delta;
                    *w -= rate * downstream.delta * activator.fprime(downstream.out) * upstream.out;
                }
                // The input layer never holds a delta.
                if p > 0 {
                    upstream.delta = delta;
                }
            }
        }

        for layer in self.layers.iter_mut().skip(1) {
            for node in layer.nodes_mut() {
                node.bias -= rate * node.delta * activator.fprime(node.out);
            }
        }
    }
}

/// Splits out the layer at depth `p` and the one after it.
fn adjacent_layers(layers: &mut [Layer], p: usize) -> (&mut Layer, &mut Layer) {
    let (before, after) = layers[p..].split_at_mut(1);
    (&mut before[0], &mut after[0])
}
