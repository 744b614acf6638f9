//! # pairbench Core
//!
//! Core library for pairbench, a benchmark of naive versus vectorized
//! pairwise Euclidean distance over random 2D points.
//!
//! One run is a linear pipeline: generate points, compute the n x n distance
//! matrix with both computers, record elapsed time and peak traced heap
//! usage, repeat for every configured size, then tabulate and plot.
//!
//! ## Core Types
//!
//! ### Distance computers
//!
//! - [`baseline_pairwise`] - Nested loops over `(x, y)` pairs
//! - [`optimized_pairwise`] - Broadcasted `ndarray` arithmetic
//! - [`Implementation`] - Selects a computer and runs it on fresh points
//!
//! ### Measurement
//!
//! - [`TracingAllocator`] - Global allocator wrapper feeding the tracer
//! - [`MemoryTracer`] / [`TraceSession`] - Scoped peak-memory tracing
//! - [`measure`] - Times and traces one call
//!
//! ### Experiment and reporting
//!
//! - [`BenchConfig`] - Sizes, output paths, shared [`Precision`]
//! - [`run_experiment`] - Sequential sweep producing [`BenchmarkSeries`]
//! - [`ResultsTable`] - CSV, JSON, console table and PNG chart

pub mod config;
pub mod distance;
pub mod driver;
pub mod error;
pub mod measure;
pub mod points;
pub mod report;

// Re-exports for convenient access
pub use config::{BenchConfig, Precision};
pub use distance::{baseline_pairwise, optimized_pairwise, DistanceMatrix, Implementation};
pub use driver::{run_experiment, run_experiment_with_rng, BenchmarkSeries};
pub use error::{Error, Result};
pub use measure::{measure, Measurement, MemoryTracer, TraceSession, TracingAllocator};
pub use points::{pairs_to_array, random_array, random_pairs, Point};
pub use report::{report, ResultRow, ResultsTable};

/// Re-export commonly used types for convenience.
///
/// # Example
///
/// ```rust
/// use pairbench_core::prelude::*;
///
/// let config = BenchConfig::new().with_sizes(vec![8]).with_seed(1);
/// let series = run_experiment(&config).unwrap();
/// let table = ResultsTable::from_series(&series);
/// assert_eq!(table.rows[0].n, 8);
/// ```
pub mod prelude {
    pub use crate::{
        measure, run_experiment, BenchConfig, BenchmarkSeries, DistanceMatrix, Error,
        Implementation, Measurement, MemoryTracer, Precision, Result, ResultsTable,
        TracingAllocator,
    };
}
