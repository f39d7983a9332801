//! Sequential and parallel execution of elementwise work.
//!
//! Every elementwise operation in the crate funnels through a `Dispatch`.
//! The parallel strategy fans work out on rayon with one unit per output row
//! (`fill_rows`) or per cell (`map_slice`, `zip_slices`, `map_in_place`). Each
//! unit receives an exclusive `&mut` slice of a pre-allocated output buffer,
//! so units never share a write target and the call returns only after all
//! of them have finished.
use std::sync::Arc;

use rayon::prelude::*;
use rayon::ThreadPool;

use crate::config::Strategy;

/// Cell count below which the parallel strategy runs sequentially.
pub const DEFAULT_MIN_PARALLEL_CELLS: usize = 4096;

#[derive(Debug, Clone)]
pub enum Dispatch {
    /// Single ordered pass over every cell.
    Sequential,
    /// Rayon fan-out, joined before returning.
    Parallel {
        min_cells: usize,
        pool: Option<Arc<ThreadPool>>,
    },
}

impl Default for Dispatch {
    /// Same as `build_dispatch(&DispatchConfig::default())`: parallel on the
    /// global pool with the default threshold.
    fn default() -> Self {
        Dispatch::parallel()
    }
}

impl Dispatch {
    pub fn sequential() -> Self {
        Dispatch::Sequential
    }

    /// Parallel fan-out on the global rayon pool with the default threshold.
    pub fn parallel() -> Self {
        Self::parallel_with_threshold(DEFAULT_MIN_PARALLEL_CELLS)
    }

    /// Parallel fan-out that only kicks in once an input has `min_cells`
    /// cells. A threshold of zero always fans out.
    pub fn parallel_with_threshold(min_cells: usize) -> Self {
        Dispatch::Parallel {
            min_cells,
            pool: None,
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            Dispatch::Sequential => Strategy::Sequential,
            Dispatch::Parallel { .. } => Strategy::Parallel,
        }
    }

    fn fans_out(&self, cells: usize) -> bool {
        match self {
            Dispatch::Sequential => false,
            Dispatch::Parallel { min_cells, .. } => {
                if cells < *min_cells {
                    log::trace!(
                        "{} cells below parallel threshold {}, running sequentially",
                        cells,
                        min_cells
                    );
                    false
                } else {
                    true
                }
            }
        }
    }

    fn run<R, OP>(&self, op: OP) -> R
    where
        R: Send,
        OP: FnOnce() -> R + Send,
    {
        match self {
            Dispatch::Parallel {
                pool: Some(pool), ..
            } => pool.install(op),
            _ => op(),
        }
    }

    /// Hand each `width`-long row of `out` to `f` together with its row
    /// index. Under the parallel strategy every row is its own unit of work.
    pub fn fill_rows<T, F>(&self, out: &mut [T], width: usize, f: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Send + Sync,
    {
        if width == 0 || out.is_empty() {
            return;
        }
        if self.fans_out(out.len()) {
            self.run(|| {
                out.par_chunks_mut(width)
                    .enumerate()
                    .for_each(|(i, row)| f(i, row))
            });
        } else {
            out.chunks_mut(width)
                .enumerate()
                .for_each(|(i, row)| f(i, row));
        }
    }

    /// Apply `f` to every element of `src`, returning a new buffer.
    pub fn map_slice<T, F>(&self, src: &[T], f: F) -> Vec<T>
    where
        T: Copy + Send + Sync,
        F: Fn(T) -> T + Send + Sync,
    {
        if self.fans_out(src.len()) {
            self.run(|| src.par_iter().map(|&x| f(x)).collect())
        } else {
            src.iter().map(|&x| f(x)).collect()
        }
    }

    /// Combine two equally long buffers cell by cell.
    pub fn zip_slices<T, F>(&self, lhs: &[T], rhs: &[T], f: F) -> Vec<T>
    where
        T: Copy + Send + Sync,
        F: Fn(T, T) -> T + Send + Sync,
    {
        debug_assert_eq!(lhs.len(), rhs.len());
        if self.fans_out(lhs.len()) {
            self.run(|| {
                lhs.par_iter()
                    .zip(rhs.par_iter())
                    .map(|(&a, &b)| f(a, b))
                    .collect()
            })
        } else {
            lhs.iter().zip(rhs.iter()).map(|(&a, &b)| f(a, b)).collect()
        }
    }

    /// Replace every element of `data` with `f(element)`.
    pub fn map_in_place<T, F>(&self, data: &mut [T], f: F)
    where
        T: Copy + Send + Sync,
        F: Fn(T) -> T + Send + Sync,
    {
        if self.fans_out(data.len()) {
            self.run(|| data.par_iter_mut().for_each(|x| *x = f(*x)));
        } else {
            data.iter_mut().for_each(|x| *x = f(*x));
        }
    }
}
