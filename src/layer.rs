use crate::error::ConstructionError;
use crate::matrix::fan_in_bound;

use rand::Rng;

/// A single neuron's state.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Node {
    /// The activated output from the most recent forward pass.
    pub out: f64,
    /// The error signal from the most recent backward pass.
    pub delta: f64,
    pub bias: f64,
}

/// An ordered group of nodes at one depth of the network.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    nodes: Vec<Node>,
}

impl Layer {
    /// Allocates a layer of `len` zeroed nodes.
    ///
    /// This is how the input layer is built; its biases are never used.
    pub(crate) fn zeros(len: usize) -> Result<Self, ConstructionError> {
        let mut nodes = Vec::new();
        nodes.try_reserve_exact(len)?;
        nodes.resize(len, Node::default());
        Ok(Layer { nodes })
    }

    /// Allocates a layer of `len` nodes fed by a layer of `fan_in` nodes,
    /// with biases drawn uniformly from `[-1/sqrt(fan_in), 1/sqrt(fan_in)]`.
    pub(crate) fn random<R>(rng: &mut R, len: usize, fan_in: usize) -> Result<Self, ConstructionError>
    where
        R: Rng + ?Sized,
    {
        let mut layer = Layer::zeros(len)?;
        let bound = fan_in_bound(fan_in);
        for node in &mut layer.nodes {
            node.bias = rng.random_range(-bound..=bound);
        }
        Ok(layer)
    }

    /// Returns the number of nodes in the layer.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }
}
