use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::dispatch::{Dispatch, DEFAULT_MIN_PARALLEL_CELLS};
use crate::error::Result;

/// Execution strategy for elementwise work.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Sequential,
    #[default]
    Parallel,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Sequential => f.write_str("sequential"),
            Strategy::Parallel => f.write_str("parallel"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" | "seq" => Ok(Strategy::Sequential),
            "parallel" | "par" => Ok(Strategy::Parallel),
            _ => Err(format!(
                "Unknown strategy: {}. Expected one of `sequential` or `parallel`",
                s
            )),
        }
    }
}

/// Central configuration for how elementwise work is dispatched.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DispatchConfig {
    pub strategy: Strategy,

    /// Inputs with fewer cells than this run sequentially even under the
    /// parallel strategy.
    pub min_parallel_cells: usize,

    /// Size of a dedicated rayon pool. `None` uses the global pool.
    pub num_threads: Option<usize>,
}

impl DispatchConfig {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Parallel,
            min_parallel_cells: DEFAULT_MIN_PARALLEL_CELLS,
            num_threads: None,
        }
    }
}

/// Build a `Dispatch` from a `DispatchConfig`.
///
/// A dedicated thread pool is only built for the parallel strategy when
/// `num_threads` is set.
pub fn build_dispatch(config: &DispatchConfig) -> Result<Dispatch> {
    match config.strategy {
        Strategy::Sequential => Ok(Dispatch::Sequential),
        Strategy::Parallel => {
            let pool = match config.num_threads {
                Some(n) => {
                    log::debug!("Building dedicated rayon pool with {} threads", n);
                    let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
                    Some(Arc::new(pool))
                }
                None => None,
            };
            Ok(Dispatch::Parallel {
                min_cells: config.min_parallel_cells,
                pool,
            })
        }
    }
}
