//! The closed set of numeric types a matrix or vector may hold.
//!
//! `Element` is sealed: it is implemented for the twelve primitive integer
//! and float types below and cannot be implemented downstream. Determinant
//! and inverse are written once against these bounds; the float-only entry
//! points either require `FloatElement` at compile time or check
//! `Element::KIND` at run time.
use std::fmt;
use std::str::FromStr;

use num_traits::{AsPrimitive, Num};

mod sealed {
    pub trait Sealed {}
}

/// Runtime tag naming the concrete element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
}

impl ElementKind {
    pub fn is_float(self) -> bool {
        matches!(self, ElementKind::F32 | ElementKind::F64)
    }

    pub fn name(self) -> &'static str {
        match self {
            ElementKind::I8 => "i8",
            ElementKind::I16 => "i16",
            ElementKind::I32 => "i32",
            ElementKind::I64 => "i64",
            ElementKind::Isize => "isize",
            ElementKind::U8 => "u8",
            ElementKind::U16 => "u16",
            ElementKind::U32 => "u32",
            ElementKind::U64 => "u64",
            ElementKind::Usize => "usize",
            ElementKind::F32 => "f32",
            ElementKind::F64 => "f64",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "i8" => Ok(ElementKind::I8),
            "i16" => Ok(ElementKind::I16),
            "i32" => Ok(ElementKind::I32),
            "i64" => Ok(ElementKind::I64),
            "isize" => Ok(ElementKind::Isize),
            "u8" => Ok(ElementKind::U8),
            "u16" => Ok(ElementKind::U16),
            "u32" => Ok(ElementKind::U32),
            "u64" => Ok(ElementKind::U64),
            "usize" => Ok(ElementKind::Usize),
            "f32" => Ok(ElementKind::F32),
            "f64" => Ok(ElementKind::F64),
            _ => Err(format!("Unknown element type: {}", s)),
        }
    }
}

/// A numeric primitive usable as a matrix or vector cell.
///
/// Arithmetic follows the primitive's native semantics: integer overflow and
/// integer division by zero are not intercepted, float division by zero
/// yields infinity or NaN.
pub trait Element:
    sealed::Sealed
    + Num
    + Copy
    + PartialOrd
    + Default
    + fmt::Debug
    + fmt::Display
    + Send
    + Sync
    + AsPrimitive<f64>
    + 'static
{
    const KIND: ElementKind;

    /// Lossy widening to `f64` (an `as` cast).
    #[inline]
    fn as_f64(self) -> f64 {
        self.as_()
    }
}

/// The float-only subset required by determinant, inverse and statistics.
pub trait FloatElement: Element + num_traits::Float {}

macro_rules! impl_element {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Element for $ty {
                const KIND: ElementKind = ElementKind::$kind;
            }
        )*
    };
}

impl_element!(
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
);

impl FloatElement for f32 {}
impl FloatElement for f64 {}
