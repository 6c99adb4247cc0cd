//! A multilayer perceptron with arbitrary layer topology, trained online with
//! backpropagation.

pub mod activator;
pub mod error;
pub mod feed_forward;
pub mod hyperparams;
pub mod layer;
pub mod layout;
pub mod matrix;
pub mod trainer;
pub mod utils;

pub use crate::error::Error;
pub use crate::feed_forward::NeuralNet;
