//! Network topology descriptions.
//!
//! A layout lists the number of nodes in every layer, input layer first and
//! output layer last. Its text form separates the sizes with semicolons:
//!
//! ```
//! # use perceptron::layout::Layout;
//! let layout: Layout = "784;392;10".parse().unwrap();
//! assert_eq!(layout.sizes(), &[784, 392, 10]);
//! assert_eq!(layout.to_string(), "784;392;10");
//! ```

use crate::error::ConstructionError;

use serde_derive::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// Separates layer sizes in the text form of a layout.
pub const DELIMITER: char = ';';

/// A validated list of layer sizes: at least two layers, none of them empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Layout {
    sizes: Vec<usize>,
}

impl Layout {
    /// Builds a layout from the node count of each layer.
    pub fn new(sizes: &[usize]) -> Result<Self, ConstructionError> {
        if sizes.is_empty() {
            return Err(ConstructionError::EmptyLayout);
        }
        if sizes.len() < 2 {
            return Err(ConstructionError::TooFewLayers(sizes.len()));
        }
        if let Some(index) = sizes.iter().position(|&n| n == 0) {
            return Err(ConstructionError::ZeroLayerSize { index });
        }
        Ok(Layout {
            sizes: sizes.into(),
        })
    }

    /// Returns the node count of every layer.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Returns the number of layers, including input and output.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Always false; a valid layout has at least two layers.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Returns the size of the input layer.
    pub fn input_len(&self) -> usize {
        self.sizes[0]
    }

    /// Returns the size of the output layer.
    pub fn output_len(&self) -> usize {
        self.sizes[self.sizes.len() - 1]
    }
}

impl FromStr for Layout {
    type Err = ConstructionError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        if spec.trim().is_empty() {
            return Err(ConstructionError::EmptyLayout);
        }
        let mut sizes = Vec::new();
        for (index, token) in spec.split(DELIMITER).enumerate() {
            let token = token.trim();
            if token.is_empty() {
                return Err(ConstructionError::EmptyLayer { index });
            }
            let size: i64 = token.parse().map_err(|_| ConstructionError::InvalidLayerSize {
                index,
                token: token.to_owned(),
            })?;
            if size < 1 {
                return Err(ConstructionError::ZeroLayerSize { index });
            }
            let size = usize::try_from(size).map_err(|_| ConstructionError::InvalidLayerSize {
                index,
                token: token.to_owned(),
            })?;
            sizes.push(size);
        }
        Layout::new(&sizes)
    }
}

impl TryFrom<String> for Layout {
    type Error = ConstructionError;

    fn try_from(spec: String) -> Result<Self, Self::Error> {
        spec.parse()
    }
}

impl From<Layout> for String {
    fn from(layout: Layout) -> String {
        layout.to_string()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, size) in self.sizes.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", DELIMITER)?;
            }
            write!(f, "{}", size)?;
        }
        Ok(())
    }
}
