//! Per-cell arithmetic used by the elementwise operations.
use crate::element::Element;

/// An operation between a cell and a fixed scalar `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarOp {
    /// `cell + x`
    Add,
    /// `cell - x`
    Subtract,
    /// `x - cell`
    SubtractFrom,
    /// `cell * x`
    Multiply,
    /// `cell / x`
    Divide,
    /// `x / cell`
    DivideInto,
}

impl ScalarOp {
    #[inline]
    pub fn apply<T: Element>(self, cell: T, x: T) -> T {
        match self {
            ScalarOp::Add => cell + x,
            ScalarOp::Subtract => cell - x,
            ScalarOp::SubtractFrom => x - cell,
            ScalarOp::Multiply => cell * x,
            ScalarOp::Divide => cell / x,
            ScalarOp::DivideInto => x / cell,
        }
    }
}

/// An operation between corresponding cells of two equally shaped operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl PairOp {
    #[inline]
    pub fn apply<T: Element>(self, a: T, b: T) -> T {
        match self {
            PairOp::Add => a + b,
            PairOp::Subtract => a - b,
            PairOp::Multiply => a * b,
            PairOp::Divide => a / b,
        }
    }
}
