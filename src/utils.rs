//! Small numeric helpers for preparing network inputs and reading outputs.

use itertools::izip;

/// A trait that provides easy access to the first element of a slice.
pub(crate) trait Front<T> {
    fn front(&self) -> &T;
    fn mut_front(&mut self) -> &mut T;
}

/// A trait that provides easy access to the last element of a slice.
pub(crate) trait Back<T> {
    fn back(&self) -> &T;
    fn mut_back(&mut self) -> &mut T;
}

impl<T> Front<T> for [T] {
    #[inline(always)]
    fn front(&self) -> &T {
        &self[0]
    }
    #[inline(always)]
    fn mut_front(&mut self) -> &mut T {
        &mut self[0]
    }
}

impl<T> Back<T> for [T] {
    #[inline(always)]
    fn back(&self) -> &T {
        &self[self.len() - 1]
    }
    #[inline(always)]
    fn mut_back(&mut self) -> &mut T {
        let i = self.len() - 1;
        &mut self[i]
    }
}

/// Min-max normalization: maps `x` from `[min_x, max_x]` onto `[a, b]`.
///
/// ```
/// # use perceptron::utils::rescale;
/// assert_eq!(rescale(255.0, 0.0, 255.0, 0.0, 1.0), 1.0);
/// assert_eq!(rescale(5.0, 0.0, 10.0, -1.0, 1.0), 0.0);
/// ```
pub fn rescale(x: f64, min_x: f64, max_x: f64, a: f64, b: f64) -> f64 {
    a + ((x - min_x) * (b - a)) / (max_x - min_x)
}

/// Builds a target vector of length `len` holding `on` at `class` and `off`
/// everywhere else.
///
/// Sigmoid outputs never reach 0 or 1 exactly, so targets like `0.99` and
/// `0.01` are typical. A `class` outside `0..len` marks nothing, leaving
/// every entry at `off`.
pub fn one_hot(len: usize, class: usize, on: f64, off: f64) -> Vec<f64> {
    let mut target = vec![off; len];
    if let Some(t) = target.get_mut(class) {
        *t = on;
    }
    target
}

/// Returns the index of the largest value, preferring the first on ties.
///
/// Returns `None` for an empty slice.
pub fn arg_max(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Squared error loss `1/2 * sum((target - output)^2)`.
pub fn squared_error(output: &[f64], target: &[f64]) -> f64 {
    debug_assert_eq!(output.len(), target.len());
    let mut error = 0.0;
    for (o, t) in izip!(output, target) {
        error += (t - o) * (t - o);
    }
    error / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn front_and_back() {
        let mut v = [1, 2, 3];
        assert_eq!(*v.front(), 1);
        assert_eq!(*v.back(), 3);
        *v.mut_back() = 7;
        *v.mut_front() = 0;
        assert_eq!(v, [0, 2, 7]);
    }

    #[test]
    fn rescale_pixels() {
        assert_relative_eq!(rescale(0.0, 0.0, 255.0, 0.0, 1.0), 0.0);
        assert_relative_eq!(rescale(51.0, 0.0, 255.0, 0.0, 1.0), 0.2);
        assert_relative_eq!(rescale(0.5, 0.0, 1.0, -1.0, 1.0), 0.0);
    }

    #[test]
    fn one_hot_targets() {
        assert_eq!(one_hot(3, 1, 0.99, 0.01), vec![0.01, 0.99, 0.01]);
        assert_eq!(one_hot(2, 5, 1.0, 0.0), vec![0.0, 0.0]);
    }

    #[test]
    fn arg_max_picks_first_largest() {
        assert_eq!(arg_max(&[0.1, 0.7, 0.2]), Some(1));
        assert_eq!(arg_max(&[0.5, 0.5]), Some(0));
        assert_eq!(arg_max(&[]), None);
    }

    #[test]
    fn squared_error_halves_sum() {
        assert_relative_eq!(squared_error(&[0.5, 1.0], &[1.0, 0.0]), 0.625);
        assert_relative_eq!(squared_error(&[0.3], &[0.3]), 0.0);
    }
}
