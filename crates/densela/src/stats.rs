use statrs::statistics::Statistics;

use crate::element::Element;
use crate::math::{Matrix, Vector};

/// Mean of `values` after widening to `f64`, or `None` for an empty input.
pub fn mean_of<T: Element>(values: &[T]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(widen(values).iter().mean())
}

/// Mean and sample standard deviation (Bessel's correction, `n - 1`).
///
/// Returns `None` with fewer than two values, where the sample standard
/// deviation is not defined.
pub fn mean_and_std_dev_of<T: Element>(values: &[T]) -> Option<(f64, f64)> {
    if values.len() < 2 {
        return None;
    }
    let widened = widen(values);
    Some((widened.iter().mean(), widened.iter().std_dev()))
}

fn widen<T: Element>(values: &[T]) -> Vec<f64> {
    values.iter().map(|v| v.as_f64()).collect()
}

impl<T: Element> Matrix<T> {
    /// Mean over all cells.
    pub fn mean(&self) -> Option<f64> {
        mean_of(self.as_slice())
    }

    pub fn mean_and_std_dev(&self) -> Option<(f64, f64)> {
        mean_and_std_dev_of(self.as_slice())
    }
}

impl<T: Element> Vector<T> {
    pub fn mean(&self) -> Option<f64> {
        mean_of(self.as_slice())
    }

    pub fn mean_and_std_dev(&self) -> Option<(f64, f64)> {
        mean_and_std_dev_of(self.as_slice())
    }
}
