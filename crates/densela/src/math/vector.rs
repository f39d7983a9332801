use std::fmt;
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};
use std::slice::{Iter, IterMut};

use crate::dispatch::Dispatch;
use crate::element::Element;
use crate::ops::{PairOp, ScalarOp};

/// A fixed-length, owned sequence of elements.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T> Vector<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn from_vec(data: Vec<T>) -> Self {
        Self::new(data)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.data.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.clone()
    }
}

impl<T: Element> Vector<T> {
    pub fn zeros(len: usize) -> Self {
        Vector::from_vec(vec![T::zero(); len])
    }

    pub fn ones(len: usize) -> Self {
        Vector::from_vec(vec![T::one(); len])
    }

    pub fn from_elem(len: usize, value: T) -> Self {
        Vector::from_vec(vec![value; len])
    }

    /// Dot product, or `None` when the lengths differ.
    pub fn dot(&self, other: &Vector<T>) -> Option<T> {
        dot_slices(self.as_slice(), other.as_slice())
    }

    pub fn map<F>(&self, f: F) -> Vector<T>
    where
        F: Fn(T) -> T + Send + Sync,
    {
        self.map_with(&Dispatch::Sequential, f)
    }

    pub fn par_map<F>(&self, f: F) -> Vector<T>
    where
        F: Fn(T) -> T + Send + Sync,
    {
        self.map_with(&Dispatch::parallel(), f)
    }

    pub fn map_with<F>(&self, dispatch: &Dispatch, f: F) -> Vector<T>
    where
        F: Fn(T) -> T + Send + Sync,
    {
        Vector::from_vec(dispatch.map_slice(&self.data, f))
    }

    pub fn scalar_with(&self, dispatch: &Dispatch, op: ScalarOp, x: T) -> Vector<T> {
        self.map_with(dispatch, move |cell| op.apply(cell, x))
    }

    pub fn add_scalar(&self, x: T) -> Vector<T> {
        self.scalar_with(&Dispatch::Sequential, ScalarOp::Add, x)
    }

    pub fn sub_scalar(&self, x: T) -> Vector<T> {
        self.scalar_with(&Dispatch::Sequential, ScalarOp::Subtract, x)
    }

    /// `x - v[i]` for every element.
    pub fn scalar_sub(&self, x: T) -> Vector<T> {
        self.scalar_with(&Dispatch::Sequential, ScalarOp::SubtractFrom, x)
    }

    pub fn mul_scalar(&self, x: T) -> Vector<T> {
        self.scalar_with(&Dispatch::Sequential, ScalarOp::Multiply, x)
    }

    pub fn div_scalar(&self, x: T) -> Vector<T> {
        self.scalar_with(&Dispatch::Sequential, ScalarOp::Divide, x)
    }

    /// `x / v[i]` for every element.
    pub fn scalar_div(&self, x: T) -> Vector<T> {
        self.scalar_with(&Dispatch::Sequential, ScalarOp::DivideInto, x)
    }

    /// Combine two vectors element by element, or `None` when the lengths
    /// differ.
    pub fn zip_with<F>(&self, dispatch: &Dispatch, other: &Vector<T>, f: F) -> Option<Vector<T>>
    where
        F: Fn(T, T) -> T + Send + Sync,
    {
        if self.len() != other.len() {
            return None;
        }
        Some(Vector::from_vec(dispatch.zip_slices(&self.data, &other.data, f)))
    }

    pub fn combine_with(&self, dispatch: &Dispatch, other: &Vector<T>, op: PairOp) -> Option<Vector<T>> {
        self.zip_with(dispatch, other, move |a, b| op.apply(a, b))
    }

    pub fn to_f64(&self) -> Vector<f64> {
        self.data.iter().map(|v| v.as_f64()).collect()
    }
}

pub(crate) fn dot_slices<T: Element>(lhs: &[T], rhs: &[T]) -> Option<T> {
    if lhs.len() != rhs.len() {
        return None;
    }
    Some(
        lhs.iter()
            .zip(rhs.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b),
    )
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(value: Vec<T>) -> Self {
        Vector::from_vec(value)
    }
}

impl<T> From<Vector<T>> for Vec<T> {
    fn from(value: Vector<T>) -> Self {
        value.data
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Vector::from_vec(iter.into_iter().collect())
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl<T: fmt::Display> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, value) in self.data.iter().enumerate() {
            write!(f, "{}", value)?;
            if idx + 1 != self.data.len() {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}
