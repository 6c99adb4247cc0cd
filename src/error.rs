//! Error types returned by network construction and by training and
//! querying.

use std::collections::TryReserveError;
use std::error;
use std::fmt;

/// Failure to build a network from its hyperparameters.
///
/// No network is produced when this is returned.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstructionError {
    /// The layout specification holds no layers at all.
    EmptyLayout,
    /// A network needs at least an input and an output layer.
    TooFewLayers(usize),
    /// The layout contains an empty token, such as `"2;;1"`.
    EmptyLayer { index: usize },
    /// A layer size is not an integer.
    InvalidLayerSize { index: usize, token: String },
    /// A layer size is zero or negative.
    ZeroLayerSize { index: usize },
    /// The learning rate is not a finite, positive number.
    InvalidLearningRate(f64),
    /// A weight matrix would hold more weights than fit in memory.
    WeightCountOverflow { inputs: usize, outputs: usize },
    /// Layer or weight storage could not be allocated.
    Allocation(TryReserveError),
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConstructionError::EmptyLayout => write!(f, "empty network layout"),
            ConstructionError::TooFewLayers(n) => {
                write!(f, "network layout needs at least 2 layers, got {}", n)
            }
            ConstructionError::EmptyLayer { index } => {
                write!(f, "layer {} has no size", index)
            }
            ConstructionError::InvalidLayerSize { index, token } => {
                write!(f, "layer {} size {:?} is not an integer", index, token)
            }
            ConstructionError::ZeroLayerSize { index } => {
                write!(f, "layer {} must have at least one node", index)
            }
            ConstructionError::InvalidLearningRate(rate) => {
                write!(f, "invalid learning rate {}", rate)
            }
            ConstructionError::WeightCountOverflow { inputs, outputs } => {
                write!(f, "{} x {} weights overflow the address space", inputs, outputs)
            }
            ConstructionError::Allocation(e) => {
                write!(f, "failed to allocate network storage: {}", e)
            }
        }
    }
}

impl error::Error for ConstructionError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ConstructionError::Allocation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TryReserveError> for ConstructionError {
    fn from(e: TryReserveError) -> Self {
        ConstructionError::Allocation(e)
    }
}

/// Which caller-supplied vector disagreed with the network shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VectorKind {
    /// A feature vector, checked against the input layer.
    Feature,
    /// A training target, checked against the output layer.
    Target,
    /// A query result buffer, checked against the output layer.
    Output,
}

impl fmt::Display for VectorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            VectorKind::Feature => "feature",
            VectorKind::Target => "target",
            VectorKind::Output => "output",
        };
        f.write_str(name)
    }
}

/// A vector length disagreed with the corresponding layer length.
///
/// The network is left exactly as it was before the rejected call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ShapeMismatch {
    pub vector: VectorKind,
    pub expected: usize,
    pub actual: usize,
}

impl ShapeMismatch {
    /// Returns an error unless `actual == expected`.
    pub(crate) fn check(vector: VectorKind, expected: usize, actual: usize) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(ShapeMismatch {
                vector,
                expected,
                actual,
            })
        }
    }
}

impl fmt::Display for ShapeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} vector has length {}, network expects {}",
            self.vector, self.actual, self.expected
        )
    }
}

impl error::Error for ShapeMismatch {}

/// Any error produced by this crate.
#[derive(Debug)]
pub enum Error {
    Construction(ConstructionError),
    ShapeMismatch(ShapeMismatch),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Construction(e) => write!(f, "cannot build network: {}", e),
            Error::ShapeMismatch(e) => e.fmt(f),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Construction(e) => Some(e),
            Error::ShapeMismatch(e) => Some(e),
        }
    }
}

impl From<ConstructionError> for Error {
    fn from(e: ConstructionError) -> Self {
        Error::Construction(e)
    }
}

impl From<ShapeMismatch> for Error {
    fn from(e: ShapeMismatch) -> Self {
        Error::ShapeMismatch(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_check() {
        assert!(ShapeMismatch::check(VectorKind::Feature, 3, 3).is_ok());
        let err = ShapeMismatch::check(VectorKind::Target, 2, 5).unwrap_err();
        assert_eq!(err.expected, 2);
        assert_eq!(err.actual, 5);
        assert_eq!(err.to_string(), "target vector has length 5, network expects 2");
    }

    #[test]
    fn wrapped_errors_keep_source() {
        let err: Error = ConstructionError::TooFewLayers(1).into();
        assert!(error::Error::source(&err).is_some());
        assert_eq!(
            err.to_string(),
            "cannot build network: network layout needs at least 2 layers, got 1"
        );
    }
}
