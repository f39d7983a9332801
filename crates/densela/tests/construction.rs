//! Integration tests for Matrix / Vector construction, shape queries and
//! row/column extraction.

use densela::{Matrix, MatrixError, Vector};

// ---------------------------------------------------------------------------
// Factory constructors
// ---------------------------------------------------------------------------

#[test]
fn zeros_has_requested_shape() {
    for (rows, cols) in [(1, 1), (2, 3), (7, 4), (10, 10)] {
        let m: Matrix<i32> = Matrix::zeros(rows, cols);
        assert_eq!(m.shape(), (rows, cols));
        assert!(m.as_slice().iter().all(|&v| v == 0));
    }
}

#[test]
fn zeros_with_zero_columns_keeps_rows() {
    let m: Matrix<u8> = Matrix::zeros(3, 0);
    assert_eq!(m.shape(), (3, 0));
    assert!(m.is_empty());
    assert_ne!(m, Matrix::empty());
}

#[test]
fn zeros_with_zero_rows_is_empty() {
    let m: Matrix<f32> = Matrix::zeros(0, 4);
    assert_eq!(m.shape(), (0, 0));
    assert_eq!(m, Matrix::empty());
}

#[test]
fn flat_input_wraps_around() {
    let m = Matrix::from_flat_cycled(2, 3, &[1, 2, 3, 4]);
    let expected = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 1, 2]]).unwrap();
    assert_eq!(m, expected);
}

#[test]
fn flat_input_truncates_excess() {
    let input: Vec<i64> = (1..=9).collect();
    let m = Matrix::from_flat_cycled(2, 3, &input);
    let expected = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    assert_eq!(m, expected);
}

#[test]
fn flat_input_empty_yields_empty() {
    let m = Matrix::<u16>::from_flat_cycled(4, 4, &[]);
    assert_eq!(m.shape(), (0, 0));
}

#[test]
fn identity_has_unit_diagonal() {
    let m: Matrix<u32> = Matrix::identity(3);
    assert_eq!(m.shape(), (3, 3));
    for i in 0..3 {
        for j in 0..3 {
            assert_eq!(m[(i, j)], if i == j { 1 } else { 0 });
        }
    }
}

#[test]
fn identity_of_zero_is_empty() {
    let m: Matrix<f64> = Matrix::identity(0);
    assert_eq!(m.shape(), (0, 0));
    assert!(m.is_square());
}

#[test]
fn constant_and_fill() {
    let mut m = Matrix::constant(2, 5, 3i8);
    assert!(m.as_slice().iter().all(|&v| v == 3));
    m.fill(-1);
    assert!(m.as_slice().iter().all(|&v| v == -1));

    let mut empty: Matrix<i8> = Matrix::empty();
    empty.fill(9);
    assert!(empty.is_empty());
}

#[test]
fn from_rows_rejects_ragged_input() {
    let result = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
    match result {
        Err(MatrixError::Ragged {
            row,
            expected,
            found,
        }) => {
            assert_eq!((row, expected, found), (1, 2, 1));
        }
        other => panic!("expected Ragged, got {:?}", other),
    }
}

#[test]
fn from_shape_vec_checks_length() {
    assert!(Matrix::from_shape_vec((2, 2), vec![1, 2, 3, 4]).is_ok());
    assert!(matches!(
        Matrix::from_shape_vec((2, 3), vec![1, 2, 3]),
        Err(MatrixError::Shape { rows: 2, cols: 3, len: 3 })
    ));
}

// ---------------------------------------------------------------------------
// Shape queries
// ---------------------------------------------------------------------------

#[test]
fn squareness() {
    assert!(Matrix::<i32>::empty().is_square());
    assert!(Matrix::from_rows(vec![vec![6]]).unwrap().is_square());
    assert!(Matrix::<i32>::identity(50).is_square());
    assert!(!Matrix::<i32>::zeros(5, 0).is_square());
    assert!(!Matrix::from_rows(vec![vec![1, 2]]).unwrap().is_square());
}

#[test]
fn get_is_bounds_checked() {
    let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
    assert_eq!(m.get(1, 0), Some(&3));
    assert_eq!(m.get(2, 0), None);
    assert_eq!(m.get(0, 2), None);
}

// ---------------------------------------------------------------------------
// Row / column extraction
// ---------------------------------------------------------------------------

#[test]
fn row_and_column_out_of_range_are_none() {
    let m = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    assert!(m.row_vector(2).is_none());
    assert!(m.column_vector(3).is_none());
}

#[test]
fn row_and_column_are_copies() {
    let m = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();

    let mut row = m.row_vector(1).unwrap();
    assert_eq!(row.to_vec(), vec![4, 5, 6]);
    row[0] = 100;

    let mut col = m.column_vector(2).unwrap();
    assert_eq!(col.to_vec(), vec![3, 6]);
    col[1] = -1;

    assert_eq!(m[(1, 0)], 4);
    assert_eq!(m[(1, 2)], 6);
}

#[test]
fn display_renders_tab_separated_rows() {
    let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
    assert_eq!(m.to_string(), "\n|\t1\t2\t|\n\n|\t3\t4\t|\n");
    assert_eq!(Vector::from_vec(vec![1, 2, 3]).to_string(), "[1, 2, 3]");
}

// ---------------------------------------------------------------------------
// Vector basics
// ---------------------------------------------------------------------------

#[test]
fn vector_constructors() {
    let z: Vector<f32> = Vector::zeros(4);
    assert_eq!(z.len(), 4);
    assert!(z.iter().all(|&v| v == 0.0));

    let e = Vector::from_elem(3, 42u64);
    assert_eq!(e.to_vec(), vec![42, 42, 42]);

    let c: Vector<i32> = (1..=3).collect();
    assert_eq!(c.as_slice(), &[1, 2, 3]);
    assert!(Vector::<i32>::from_vec(vec![]).is_empty());
}

#[test]
fn vector_dot_requires_equal_lengths() {
    let a = Vector::from_vec(vec![1, 2, 3]);
    let b = Vector::from_vec(vec![4, 5, 6]);
    assert_eq!(a.dot(&b), Some(32));
    assert_eq!(a.dot(&Vector::from_vec(vec![1, 2])), None);
}
