use std::fmt;
use std::ops::{Index, IndexMut};

use crate::dispatch::Dispatch;
use crate::element::Element;
use crate::error::{MatrixError, Result};
use crate::math::vector::{dot_slices, Vector};
use crate::ops::{PairOp, ScalarOp};

/// A dense, rectangular, row-major matrix.
///
/// A matrix with no rows always reports zero columns. A matrix with rows but
/// zero columns keeps its row count.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Matrix<T> {
    fn from_parts(rows: usize, cols: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        let cols = if rows == 0 { 0 } else { cols };
        Self { data, rows, cols }
    }

    /// The `0 x 0` matrix.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            rows: 0,
            cols: 0,
        }
    }

    pub fn from_shape_vec(shape: (usize, usize), data: Vec<T>) -> Result<Self> {
        let (rows, cols) = shape;
        if data.len() != rows * cols {
            return Err(MatrixError::Shape {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self::from_parts(rows, cols, data))
    }

    /// Build from nested rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(nrows * ncols);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(MatrixError::Ragged {
                    row: idx,
                    expected: ncols,
                    found: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self::from_parts(nrows, ncols, data))
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the matrix holds no cells (including `n x 0`).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// `0 x 0` counts as square, `n x 0` with `n > 0` does not.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn same_shape<U>(&self, other: &Matrix<U>) -> bool {
        self.shape() == other.shape()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    #[inline]
    fn row_slice(&self, row: usize) -> &[T] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.rows {
            return Err(MatrixError::OutOfBounds {
                index: row,
                len: self.rows,
            });
        }
        Ok(())
    }

    /// Borrow row `row`, or `None` when out of range.
    pub fn row(&self, row: usize) -> Option<&[T]> {
        (row < self.rows).then(|| self.row_slice(row))
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.rows).map(move |r| self.row_slice(r))
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            Some(&self.data[self.offset(row, col)])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if row < self.rows && col < self.cols {
            let idx = self.offset(row, col);
            Some(&mut self.data[idx])
        } else {
            None
        }
    }

    /// Exchange two rows in place.
    pub fn swap_rows(&mut self, row1: usize, row2: usize) -> Result<()> {
        self.check_row(row1)?;
        self.check_row(row2)?;
        if row1 != row2 {
            for col in 0..self.cols {
                let (a, b) = (self.offset(row1, col), self.offset(row2, col));
                self.data.swap(a, b);
            }
        }
        Ok(())
    }
}

impl<T: Element> Matrix<T> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::constant(rows, cols, T::zero())
    }

    pub fn constant(rows: usize, cols: usize, value: T) -> Self {
        Self::from_parts(rows, cols, vec![value; rows * cols])
    }

    /// Fill a `rows x cols` matrix from `input` in row-major order.
    ///
    /// The input is cycled when shorter than the matrix and truncated when
    /// longer. An empty input yields the empty matrix.
    pub fn from_flat_cycled(rows: usize, cols: usize, input: &[T]) -> Self {
        if input.is_empty() {
            return Self::empty();
        }
        let data = (0..rows * cols).map(|k| input[k % input.len()]).collect();
        Self::from_parts(rows, cols, data)
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for k in 0..n {
            m[(k, k)] = T::one();
        }
        m
    }

    /// Set every existing cell to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|v| *v = value);
    }

    /// Owned copy of row `row`.
    pub fn row_vector(&self, row: usize) -> Option<Vector<T>> {
        self.row(row).map(|r| Vector::from_vec(r.to_vec()))
    }

    /// Owned copy of column `col`.
    pub fn column_vector(&self, col: usize) -> Option<Vector<T>> {
        if col >= self.cols {
            return None;
        }
        Some((0..self.rows).map(|r| self[(r, col)]).collect())
    }

    pub fn map<F>(&self, f: F) -> Matrix<T>
    where
        F: Fn(T) -> T + Send + Sync,
    {
        self.map_with(&Dispatch::Sequential, f)
    }

    pub fn par_map<F>(&self, f: F) -> Matrix<T>
    where
        F: Fn(T) -> T + Send + Sync,
    {
        self.map_with(&Dispatch::parallel(), f)
    }

    /// Apply `f` to every cell, returning a new matrix.
    pub fn map_with<F>(&self, dispatch: &Dispatch, f: F) -> Matrix<T>
    where
        F: Fn(T) -> T + Send + Sync,
    {
        let cols = self.cols;
        let src = &self.data;
        let mut out = vec![T::zero(); src.len()];
        dispatch.fill_rows(&mut out, cols, |i, line| {
            let input = &src[i * cols..(i + 1) * cols];
            for (cell, &v) in line.iter_mut().zip(input) {
                *cell = f(v);
            }
        });
        Self::from_parts(self.rows, cols, out)
    }

    pub fn zip<F>(&self, other: &Matrix<T>, f: F) -> Result<Matrix<T>>
    where
        F: Fn(T, T) -> T + Send + Sync,
    {
        self.zip_with(&Dispatch::Sequential, other, f)
    }

    pub fn par_zip<F>(&self, other: &Matrix<T>, f: F) -> Result<Matrix<T>>
    where
        F: Fn(T, T) -> T + Send + Sync,
    {
        self.zip_with(&Dispatch::parallel(), other, f)
    }

    /// Combine two equally shaped matrices cell by cell: `p[i][j] = f(m[i][j], n[i][j])`.
    pub fn zip_with<F>(&self, dispatch: &Dispatch, other: &Matrix<T>, f: F) -> Result<Matrix<T>>
    where
        F: Fn(T, T) -> T + Send + Sync,
    {
        if !self.same_shape(other) {
            return Err(MatrixError::DifferentDimension {
                left: self.shape(),
                right: other.shape(),
            });
        }
        let cols = self.cols;
        let (lhs, rhs) = (&self.data, &other.data);
        let mut out = vec![T::zero(); lhs.len()];
        dispatch.fill_rows(&mut out, cols, |i, line| {
            let range = i * cols..(i + 1) * cols;
            for ((cell, &a), &b) in line.iter_mut().zip(&lhs[range.clone()]).zip(&rhs[range]) {
                *cell = f(a, b);
            }
        });
        Ok(Self::from_parts(self.rows, cols, out))
    }

    pub fn map_row_in_place<F>(&mut self, row: usize, f: F) -> Result<()>
    where
        F: Fn(T) -> T + Send + Sync,
    {
        self.map_row_in_place_with(&Dispatch::Sequential, row, f)
    }

    /// Replace every cell of `row` with `f(cell)`; one unit of work per cell
    /// under the parallel strategy.
    pub fn map_row_in_place_with<F>(&mut self, dispatch: &Dispatch, row: usize, f: F) -> Result<()>
    where
        F: Fn(T) -> T + Send + Sync,
    {
        self.check_row(row)?;
        let start = self.offset(row, 0);
        let end = start + self.cols;
        dispatch.map_in_place(&mut self.data[start..end], f);
        Ok(())
    }

    /// Multiply every cell of `row` by `multiplier` in place.
    pub fn scale_row(&mut self, row: usize, multiplier: T) -> Result<()> {
        self.map_row_in_place(row, move |v| multiplier * v)
    }

    /// First row at or below `row` whose cell in `col` is non-zero.
    pub fn find_pivot(&self, row: usize, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        (row..self.rows).find(|&r| self[(r, col)] != T::zero())
    }

    pub fn scalar_with(&self, dispatch: &Dispatch, op: ScalarOp, x: T) -> Matrix<T> {
        self.map_with(dispatch, move |cell| op.apply(cell, x))
    }

    pub fn add_scalar(&self, x: T) -> Matrix<T> {
        self.scalar_with(&Dispatch::Sequential, ScalarOp::Add, x)
    }

    pub fn sub_scalar(&self, x: T) -> Matrix<T> {
        self.scalar_with(&Dispatch::Sequential, ScalarOp::Subtract, x)
    }

    /// `x - m[i][j]` for every cell.
    pub fn scalar_sub(&self, x: T) -> Matrix<T> {
        self.scalar_with(&Dispatch::Sequential, ScalarOp::SubtractFrom, x)
    }

    pub fn mul_scalar(&self, x: T) -> Matrix<T> {
        self.scalar_with(&Dispatch::Sequential, ScalarOp::Multiply, x)
    }

    pub fn div_scalar(&self, x: T) -> Matrix<T> {
        self.scalar_with(&Dispatch::Sequential, ScalarOp::Divide, x)
    }

    /// `x / m[i][j]` for every cell.
    pub fn scalar_div(&self, x: T) -> Matrix<T> {
        self.scalar_with(&Dispatch::Sequential, ScalarOp::DivideInto, x)
    }

    pub fn combine_with(&self, dispatch: &Dispatch, other: &Matrix<T>, op: PairOp) -> Result<Matrix<T>> {
        self.zip_with(dispatch, other, move |a, b| op.apply(a, b))
    }

    pub fn add(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.combine_with(&Dispatch::Sequential, other, PairOp::Add)
    }

    pub fn sub(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.combine_with(&Dispatch::Sequential, other, PairOp::Subtract)
    }

    /// Elementwise (Hadamard) product.
    pub fn hadamard_mul(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.combine_with(&Dispatch::Sequential, other, PairOp::Multiply)
    }

    /// Elementwise quotient.
    pub fn hadamard_div(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.combine_with(&Dispatch::Sequential, other, PairOp::Divide)
    }

    /// Shape of `self * other`, or `None` when the product is undefined.
    pub fn multiplication_shape<U>(&self, other: &Matrix<U>) -> Option<(usize, usize)> {
        (self.cols == other.rows).then(|| (self.rows, other.cols))
    }

    pub fn multiply(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.multiply_with(&Dispatch::Sequential, other)
    }

    /// Matrix product; cell `(i, j)` is the dot product of row `i` of `self`
    /// and column `j` of `other`.
    pub fn multiply_with(&self, dispatch: &Dispatch, other: &Matrix<T>) -> Result<Matrix<T>> {
        let (rows, cols) =
            self.multiplication_shape(other)
                .ok_or(MatrixError::MultiplicationValidity {
                    left: self.shape(),
                    right: other.shape(),
                })?;
        log::debug!(
            "Multiplying {:?} by {:?} ({} strategy)",
            self.shape(),
            other.shape(),
            dispatch.strategy()
        );

        let columns: Vec<Vector<T>> = (0..cols).filter_map(|j| other.column_vector(j)).collect();
        let mut out = vec![T::zero(); rows * cols];
        dispatch.fill_rows(&mut out, cols, |i, line| {
            let row = self.row_slice(i);
            for (cell, column) in line.iter_mut().zip(&columns) {
                // lengths agree once the shapes have been checked
                *cell = dot_slices(row, column.as_slice()).unwrap_or_else(T::zero);
            }
        });
        Ok(Self::from_parts(rows, cols, out))
    }

    pub fn transpose(&self) -> Matrix<T> {
        self.transpose_with(&Dispatch::Sequential)
    }

    pub fn transpose_with(&self, dispatch: &Dispatch) -> Matrix<T> {
        let (rows, cols) = self.shape();
        let mut out = vec![T::zero(); rows * cols];
        dispatch.fill_rows(&mut out, rows, |j, line| {
            for (i, cell) in line.iter_mut().enumerate() {
                *cell = self[(i, j)];
            }
        });
        Self::from_parts(cols, rows, out)
    }

    /// Copy of the block spanning rows `row_min..=row_max` and columns
    /// `col_min..=col_max`.
    pub fn submatrix(&self, row_min: usize, col_min: usize, row_max: usize, col_max: usize) -> Result<Matrix<T>> {
        check_range(row_min, row_max, self.rows)?;
        check_range(col_min, col_max, self.cols)?;
        let data = (row_min..=row_max)
            .flat_map(|r| self.row_slice(r)[col_min..=col_max].iter().copied())
            .collect();
        Ok(Self::from_parts(
            row_max - row_min + 1,
            col_max - col_min + 1,
            data,
        ))
    }

    /// Copy with row `row` and column `col` removed.
    pub fn minor(&self, row: usize, col: usize) -> Result<Matrix<T>> {
        self.check_row(row)?;
        if col >= self.cols {
            return Err(MatrixError::OutOfBounds {
                index: col,
                len: self.cols,
            });
        }
        let data = self
            .rows_iter()
            .enumerate()
            .filter(|&(r, _)| r != row)
            .flat_map(|(_, line)| {
                line.iter()
                    .enumerate()
                    .filter(move |&(c, _)| c != col)
                    .map(|(_, &v)| v)
            })
            .collect();
        Ok(Self::from_parts(self.rows - 1, self.cols - 1, data))
    }

    /// Lossy widening of every cell to `f64`.
    pub fn to_f64(&self) -> Matrix<f64> {
        Matrix::from_parts(
            self.rows,
            self.cols,
            self.data.iter().map(|v| v.as_f64()).collect(),
        )
    }

    /// True when both matrices share a shape and every pair of cells differs
    /// by strictly less than `sigma` after widening to `f64`.
    pub fn within_tolerance(&self, other: &Matrix<T>, sigma: f64) -> bool {
        self.same_shape(other)
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(&a, &b)| (a.as_f64() - b.as_f64()).abs() < sigma)
    }
}

fn check_range(min: usize, max: usize, len: usize) -> Result<()> {
    if max >= len {
        return Err(MatrixError::OutOfBounds { index: max, len });
    }
    if min > max {
        return Err(MatrixError::OutOfBounds {
            index: min,
            len: max + 1,
        });
    }
    Ok(())
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows_iter() {
            write!(f, "\n|\t")?;
            for value in row {
                write!(f, "{}\t", value)?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}
