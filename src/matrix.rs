use crate::error::ConstructionError;

use rand::Rng;

/// Dense weights on the edge between two adjacent layers.
///
/// Element `(i, j)` connects node `i` of the upstream layer to node `j` of
/// the downstream layer. Weights are stored column-major, so each
/// downstream node's incoming weights are contiguous.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightMatrix {
    inputs: usize,
    outputs: usize,
    data: Vec<f64>,
}

impl WeightMatrix {
    /// Allocates an `inputs x outputs` matrix with every weight drawn
    /// uniformly from `[-1/sqrt(inputs), 1/sqrt(inputs)]`.
    pub(crate) fn random<R>(rng: &mut R, inputs: usize, outputs: usize) -> Result<Self, ConstructionError>
    where
        R: Rng + ?Sized,
    {
        let len = inputs
            .checked_mul(outputs)
            .ok_or(ConstructionError::WeightCountOverflow { inputs, outputs })?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)?;
        let bound = fan_in_bound(inputs);
        for _ in 0..len {
            data.push(rng.random_range(-bound..=bound));
        }
        Ok(WeightMatrix {
            inputs,
            outputs,
            data,
        })
    }

    /// Returns the size of the upstream layer.
    pub fn inputs(&self) -> usize {
        self.inputs
    }

    /// Returns the size of the downstream layer.
    pub fn outputs(&self) -> usize {
        self.outputs
    }

    /// Returns the total number of weights.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the weight from upstream node `i` to downstream node `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[self.index(i, j)]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, i: usize, j: usize) -> &mut f64 {
        let index = self.index(i, j);
        &mut self.data[index]
    }

    /// Returns every weight feeding downstream node `j`, indexed by upstream
    /// node.
    #[inline]
    pub fn column(&self, j: usize) -> &[f64] {
        let start = self.inputs * j;
        &self.data[start..start + self.inputs]
    }

    /// Returns the raw weights in storage order.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.inputs && j < self.outputs);
        self.inputs * j + i
    }
}

/// Half-width of the initialization range for a node with `fan_in` inputs.
pub(crate) fn fan_in_bound(fan_in: usize) -> f64 {
    1.0 / (fan_in as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    #[test]
    fn shape_and_bounds() {
        let mut rng = ChaCha12Rng::seed_from_u64(3);
        let m = WeightMatrix::random(&mut rng, 4, 3).unwrap();
        assert_eq!(m.inputs(), 4);
        assert_eq!(m.outputs(), 3);
        assert_eq!(m.len(), 12);
        for &w in m.as_slice() {
            assert!(w.abs() <= 0.5);
        }
    }

    #[test]
    fn column_major_layout() {
        let mut rng = ChaCha12Rng::seed_from_u64(11);
        let m = WeightMatrix::random(&mut rng, 3, 2).unwrap();
        assert_eq!(m.column(1), &m.as_slice()[3..6]);
        assert_eq!(m.get(2, 1), m.as_slice()[5]);
        assert_eq!(m.get(1, 0), m.column(0)[1]);
    }

    #[test]
    fn oversized_matrix_is_rejected() {
        let mut rng = ChaCha12Rng::seed_from_u64(2);
        let huge = usize::MAX / 2;
        assert_eq!(
            WeightMatrix::random(&mut rng, huge, 3),
            Err(ConstructionError::WeightCountOverflow {
                inputs: huge,
                outputs: 3,
            })
        );
        assert!(matches!(
            WeightMatrix::random(&mut rng, huge, 1),
            Err(ConstructionError::Allocation(_))
        ));
    }

    #[test]
    fn seeded_is_reproducible() {
        let a = WeightMatrix::random(&mut ChaCha12Rng::seed_from_u64(5), 6, 6).unwrap();
        let b = WeightMatrix::random(&mut ChaCha12Rng::seed_from_u64(5), 6, 6).unwrap();
        let c = WeightMatrix::random(&mut ChaCha12Rng::seed_from_u64(6), 6, 6).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
