//! Determinant by cofactor expansion and inverse by Gauss-Jordan elimination.
//!
//! Both are the direct textbook methods: the determinant is O(n!) and the
//! elimination never reorders rows. A zero pivot met during elimination is
//! logged and the computation carries on, so the result then holds
//! infinities or NaN.
//!
//! Three entry points exist for each algorithm:
//!
//! * `determinant` / `inverse` accept any element type and work on an `f64`
//!   copy.
//! * `determinant_native` / `inverse_native` compute in the element type
//!   itself and fail with [`MatrixError::NotFloat`] for integer types.
//! * `float_determinant` / `float_inverse` are the same computation, limited
//!   to [`FloatElement`] at compile time.
use crate::element::{Element, FloatElement};
use crate::error::{MatrixError, Result};
use crate::math::Matrix;

impl<T: Element> Matrix<T> {
    /// Determinant of the `f64` widening of this matrix.
    pub fn determinant(&self) -> Result<f64> {
        self.to_f64().float_determinant()
    }

    /// Inverse of the `f64` widening of this matrix.
    pub fn inverse(&self) -> Result<Matrix<f64>> {
        self.to_f64().float_inverse()
    }

    /// Determinant computed in `T`; `T` must be a float type.
    pub fn determinant_native(&self) -> Result<T> {
        require_float::<T>()?;
        cofactor_determinant(self)
    }

    /// Inverse computed in `T`; `T` must be a float type.
    pub fn inverse_native(&self) -> Result<Matrix<T>> {
        require_float::<T>()?;
        gauss_jordan(self.clone())
    }
}

impl<F: FloatElement> Matrix<F> {
    pub fn float_determinant(&self) -> Result<F> {
        cofactor_determinant(self)
    }

    pub fn float_inverse(&self) -> Result<Matrix<F>> {
        gauss_jordan(self.clone())
    }
}

fn require_float<T: Element>() -> Result<()> {
    if T::KIND.is_float() {
        Ok(())
    } else {
        Err(MatrixError::NotFloat(T::KIND))
    }
}

fn cofactor_determinant<T: Element>(m: &Matrix<T>) -> Result<T> {
    if !m.is_square() {
        return Err(MatrixError::NonSquare {
            rows: m.nrows(),
            cols: m.ncols(),
        });
    }
    let n = m.nrows();
    if n == 0 {
        return Err(MatrixError::ZeroLength);
    }
    log::debug!("Cofactor expansion of {}x{} matrix", n, n);
    expand(m)
}

/// Laplace expansion along the first row. `m` is square and non-empty.
fn expand<T: Element>(m: &Matrix<T>) -> Result<T> {
    match m.nrows() {
        1 => Ok(m[(0, 0)]),
        2 => Ok(m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)]),
        n => {
            let mut det = T::zero();
            for i in 0..n {
                let term = m[(0, i)] * expand(&m.minor(0, i)?)?;
                det = if i % 2 == 0 { det + term } else { det - term };
            }
            Ok(det)
        }
    }
}

fn gauss_jordan<T: Element>(mut m: Matrix<T>) -> Result<Matrix<T>> {
    let det = match cofactor_determinant(&m) {
        Ok(det) => det,
        Err(err @ (MatrixError::ZeroLength | MatrixError::NonSquare { .. } | MatrixError::NotFloat(_))) => {
            return Err(err)
        }
        Err(other) => return Err(MatrixError::Unexpected(other.to_string())),
    };
    if det == T::zero() {
        return Err(MatrixError::NoInverse);
    }

    let n = m.nrows();
    log::debug!("Gauss-Jordan inverse of {}x{} matrix (det = {})", n, n, det);
    let mut inverse = Matrix::<T>::identity(n);

    for i in 0..n {
        let pivot = m[(i, i)];
        if pivot == T::zero() {
            log::warn!(
                "Zero pivot at row {} during Gauss-Jordan elimination; rows are not reordered",
                i
            );
        }
        let factor = T::one() / pivot;
        for j in 0..n {
            m[(i, j)] = m[(i, j)] * factor;
            inverse[(i, j)] = inverse[(i, j)] * factor;
        }

        for j in (0..n).filter(|&j| j != i) {
            let factor = m[(j, i)];
            for k in 0..n {
                m[(j, k)] = m[(j, k)] - factor * m[(i, k)];
                inverse[(j, k)] = inverse[(j, k)] - factor * inverse[(i, k)];
            }
        }
    }

    Ok(inverse)
}
