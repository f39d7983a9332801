//! Integration tests for multiplication, transpose, submatrix/minor,
//! determinant, inverse and tolerance comparison.

use densela::{Dispatch, ElementKind, Matrix, MatrixError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn reference_3x3() -> Matrix<f64> {
    Matrix::from_rows(vec![
        vec![1.0, 2.0, 3.0],
        vec![4.0, 5.0, 6.0],
        vec![7.0, 8.0, 10.0],
    ])
    .unwrap()
}

fn singular_3x3() -> Matrix<i32> {
    Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]).unwrap()
}

// ---------------------------------------------------------------------------
// Multiplication
// ---------------------------------------------------------------------------

#[test]
fn multiply_small_integers() {
    let a = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    let b = Matrix::from_rows(vec![vec![7, 8], vec![9, 10], vec![11, 12]]).unwrap();
    let p = a.multiply(&b).unwrap();
    assert_eq!(p.shape(), (2, 2));
    assert_eq!(p.as_slice(), &[58, 64, 139, 154]);
}

#[test]
fn multiply_rejects_incompatible_shapes() {
    let a: Matrix<i32> = Matrix::zeros(2, 3);
    let b: Matrix<i32> = Matrix::zeros(2, 3);
    assert!(a.multiplication_shape(&b).is_none());
    assert!(matches!(
        a.multiply(&b),
        Err(MatrixError::MultiplicationValidity {
            left: (2, 3),
            right: (2, 3)
        })
    ));
}

#[test]
fn multiply_by_identity_is_neutral() {
    let mut rng = StdRng::seed_from_u64(5);
    for (rows, cols) in [(1, 1), (3, 4), (6, 2), (10, 10)] {
        let data: Vec<i64> = (0..rows * cols).map(|_| rng.gen_range(-50..50)).collect();
        let a = Matrix::from_shape_vec((rows, cols), data).unwrap();
        assert_eq!(a.multiply(&Matrix::identity(cols)).unwrap(), a);
        assert_eq!(Matrix::identity(rows).multiply(&a).unwrap(), a);
    }
}

#[test]
fn multiply_strategies_agree() {
    let a = Matrix::from_flat_cycled(30, 20, &[1.5, -2.0, 0.25, 3.0]);
    let b = Matrix::from_flat_cycled(20, 25, &[0.5, 1.0, -1.0]);
    let seq = a.multiply(&b).unwrap();
    let par = a.multiply_with(&Dispatch::parallel_with_threshold(0), &b).unwrap();
    assert_eq!(seq, par);
}

#[test]
fn multiply_matches_ndarray() {
    let mut rng = StdRng::seed_from_u64(99);
    let (n, k, m) = (7, 5, 9);
    let lhs: Vec<f64> = (0..n * k).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let rhs: Vec<f64> = (0..k * m).map(|_| rng.gen_range(-1.0..1.0)).collect();

    let ours = Matrix::from_shape_vec((n, k), lhs.clone())
        .unwrap()
        .multiply(&Matrix::from_shape_vec((k, m), rhs.clone()).unwrap())
        .unwrap();
    let reference = ndarray::Array2::from_shape_vec((n, k), lhs)
        .unwrap()
        .dot(&ndarray::Array2::from_shape_vec((k, m), rhs).unwrap());
    let reference = Matrix::from_shape_vec((n, m), reference.iter().copied().collect()).unwrap();

    assert!(ours.within_tolerance(&reference, 1e-12));
}

// ---------------------------------------------------------------------------
// Transpose / submatrix / minor
// ---------------------------------------------------------------------------

#[test]
fn transpose_swaps_axes() {
    let m = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    let t = m.transpose();
    assert_eq!(t.shape(), (3, 2));
    assert_eq!(t.as_slice(), &[1, 4, 2, 5, 3, 6]);
}

#[test]
fn transpose_is_an_involution() {
    let mut rng = StdRng::seed_from_u64(21);
    for (rows, cols) in [(1, 1), (1, 8), (8, 1), (4, 9), (12, 12)] {
        let data: Vec<u16> = (0..rows * cols).map(|_| rng.gen()).collect();
        let m = Matrix::from_shape_vec((rows, cols), data).unwrap();
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(
            m.transpose_with(&Dispatch::parallel_with_threshold(0)),
            m.transpose()
        );
    }
}

#[test]
fn submatrix_is_inclusive_copy() {
    let m = Matrix::from_flat_cycled(4, 4, &(1..=16).collect::<Vec<i32>>());
    let s = m.submatrix(1, 1, 2, 3).unwrap();
    assert_eq!(s.shape(), (2, 3));
    assert_eq!(s.as_slice(), &[6, 7, 8, 10, 11, 12]);
    assert!(matches!(
        m.submatrix(0, 0, 4, 1),
        Err(MatrixError::OutOfBounds { index: 4, len: 4 })
    ));
    assert!(m.submatrix(2, 0, 1, 1).is_err());
}

#[test]
fn minor_drops_row_and_column() {
    let m = reference_3x3();
    let minor = m.minor(0, 1).unwrap();
    assert_eq!(minor.as_slice(), &[4.0, 6.0, 7.0, 10.0]);
    assert!(m.minor(3, 0).is_err());
    assert!(m.minor(0, 3).is_err());
}

// ---------------------------------------------------------------------------
// Determinant
// ---------------------------------------------------------------------------

#[test]
fn determinant_reference_values() {
    assert!((reference_3x3().determinant().unwrap() - -3.0).abs() < 1e-12);
    assert_eq!(singular_3x3().determinant().unwrap(), 0.0);
}

#[test]
fn determinant_of_integer_matrix_via_widening() {
    let m = Matrix::from_rows(vec![vec![2u8, 1], vec![1, 3]]).unwrap();
    assert_eq!(m.determinant().unwrap(), 5.0);
}

#[test]
fn determinant_native_requires_float() {
    let m = Matrix::from_rows(vec![vec![1i32, 2], vec![3, 4]]).unwrap();
    assert!(matches!(
        m.determinant_native(),
        Err(MatrixError::NotFloat(ElementKind::I32))
    ));
    let f = Matrix::from_rows(vec![vec![1.0f32, 2.0], vec![3.0, 4.0]]).unwrap();
    assert_eq!(f.determinant_native().unwrap(), -2.0);
}

#[test]
fn determinant_error_conditions() {
    let non_square: Matrix<f64> = Matrix::zeros(2, 3);
    assert!(matches!(
        non_square.determinant(),
        Err(MatrixError::NonSquare { rows: 2, cols: 3 })
    ));
    let rows_only: Matrix<f64> = Matrix::zeros(3, 0);
    assert!(matches!(
        rows_only.determinant(),
        Err(MatrixError::NonSquare { .. })
    ));
    assert!(matches!(
        Matrix::<f64>::empty().determinant(),
        Err(MatrixError::ZeroLength)
    ));
}

// ---------------------------------------------------------------------------
// Inverse
// ---------------------------------------------------------------------------

#[test]
fn inverse_matches_reference() {
    let expected = Matrix::from_rows(vec![
        vec![-2.0 / 3.0, -4.0 / 3.0, 1.0],
        vec![-2.0 / 3.0, 11.0 / 3.0, -2.0],
        vec![1.0, -2.0, 1.0],
    ])
    .unwrap();
    let inv = reference_3x3().inverse().unwrap();
    assert!(inv.within_tolerance(&expected, 1e-9), "{}", inv);
}

#[test]
fn inverse_times_matrix_is_identity() {
    let m = reference_3x3();
    let product = m.multiply(&m.float_inverse().unwrap()).unwrap();
    assert!(product.within_tolerance(&Matrix::identity(3), 1e-9));
}

#[test]
fn inverse_does_not_modify_receiver() {
    let m = reference_3x3();
    let before = m.clone();
    let _ = m.inverse_native().unwrap();
    assert_eq!(m, before);
}

#[test]
fn inverse_of_singular_fails() {
    assert!(matches!(singular_3x3().inverse(), Err(MatrixError::NoInverse)));
}

#[test]
fn inverse_error_propagation() {
    assert!(matches!(
        Matrix::<f64>::zeros(2, 4).inverse(),
        Err(MatrixError::NonSquare { .. })
    ));
    assert!(matches!(
        Matrix::<f64>::empty().float_inverse(),
        Err(MatrixError::ZeroLength)
    ));
    assert!(matches!(
        Matrix::<i64>::identity(2).inverse_native(),
        Err(MatrixError::NotFloat(ElementKind::I64))
    ));
}

#[test]
fn zero_pivot_is_not_reordered() {
    // non-singular, but the first pivot is zero
    let m = Matrix::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
    assert_eq!(m.determinant().unwrap(), -1.0);
    let inv = m.inverse().unwrap();
    assert!(inv.as_slice().iter().any(|v| !v.is_finite()));
}

// ---------------------------------------------------------------------------
// Tolerance comparison
// ---------------------------------------------------------------------------

#[test]
fn within_tolerance_is_reflexive() {
    let m = reference_3x3();
    for sigma in [1e-15, 1e-3, 1.0] {
        assert!(m.within_tolerance(&m, sigma));
    }
}

#[test]
fn within_tolerance_is_strict() {
    let a = Matrix::from_rows(vec![vec![1.0, 2.0]]).unwrap();
    let b = Matrix::from_rows(vec![vec![1.0, 2.5]]).unwrap();
    assert!(!a.within_tolerance(&b, 0.5));
    assert!(a.within_tolerance(&b, 0.5000001));
    assert!(!a.within_tolerance(&b, 0.1));
}

#[test]
fn within_tolerance_requires_same_shape() {
    let a: Matrix<i32> = Matrix::zeros(2, 2);
    let b: Matrix<i32> = Matrix::zeros(2, 3);
    assert!(!a.within_tolerance(&b, 100.0));
}

#[test]
fn to_f64_widens_every_cell() {
    let m = Matrix::from_rows(vec![vec![255u8, 0], vec![1, 2]]).unwrap();
    assert_eq!(m.to_f64().as_slice(), &[255.0, 0.0, 1.0, 2.0]);
}
