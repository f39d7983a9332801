//! Dense containers: `Matrix` (2D, row-major) and `Vector` (1D).
//!
//! Both own their storage. Every operation that produces a new container
//! allocates fresh storage; row and column extraction copies.
pub mod matrix;
pub mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
