//! densela: generic dense matrix and vector algebra.
//!
//! This crate provides owned `Matrix` and `Vector` containers over a closed
//! set of numeric element types, elementwise arithmetic with sequential or
//! rayon-parallel dispatch, matrix multiplication, transpose, cofactor
//! determinant, Gauss-Jordan inverse, and simple statistics.
//!
//! The algorithms are the direct textbook ones. There is no pivoting, no
//! blocking and no SIMD; element overflow and division by zero follow the
//! element type's native behaviour.
pub mod config;
pub mod dispatch;
pub mod element;
pub mod error;
mod linalg;
pub mod math;
pub mod ops;
pub mod stats;

pub use config::{build_dispatch, DispatchConfig, Strategy};
pub use dispatch::Dispatch;
pub use element::{Element, ElementKind, FloatElement};
pub use error::{MatrixError, Result};
pub use math::{Matrix, Vector};
pub use ops::{PairOp, ScalarOp};
