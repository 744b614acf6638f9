//! # pairbench
//!
//! **Time and peak-memory comparison of naive and vectorized pairwise
//! Euclidean distance computation.**
//!
//! For each configured problem size `n`, pairbench draws `n` random points in
//! the unit square and computes the full n x n distance matrix twice:
//!
//! | Implementation | Layout | Technique |
//! |----------------|--------|-----------|
//! | **Baseline** | `Vec<(F, F)>` | Nested loops, scalar arithmetic |
//! | **Optimized** | `Array2<F>` of shape (n, 2) | `ndarray` broadcasting |
//!
//! Each call is timed and its peak heap usage traced. The results are written
//! as a CSV table and a PNG line chart, and printed as a console summary.
//!
//! ## Quick Start
//!
//! ```rust
//! use pairbench::prelude::*;
//!
//! let config = BenchConfig::new()
//!     .with_sizes(vec![16, 32])
//!     .with_precision(Precision::F64)
//!     .with_seed(7);
//!
//! let series = run_experiment(&config).unwrap();
//! let table = ResultsTable::from_series(&series);
//!
//! assert_eq!(table.len(), 2);
//! println!("{}", table);
//! ```
//!
//! ## Peak Memory
//!
//! Heap usage is only observed when [`TracingAllocator`] is the global
//! allocator. The `pairbench` binary installs it; library users opt in:
//!
//! ```no_run
//! use pairbench::TracingAllocator;
//!
//! #[global_allocator]
//! static GLOBAL: TracingAllocator = TracingAllocator::system();
//! ```
//!
//! Without it, every peak reads 0 MB and a warning is logged.
//!
//! ## Precision
//!
//! Both computers run at the configured [`Precision`] (`f32` by default) so
//! that the comparison isolates the technique, not the float width.
//!
//! ## Speedup
//!
//! Speedup is `baseline_time / optimized_time`. If the optimized time is
//! exactly zero the ratio is undefined: it is `None` in [`ResultRow`], an
//! empty cell in the CSV, `null` in JSON and `n/a` on the console.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`](crate::Result), which uses
//! the [`Error`] enum for error types.

// Re-export everything from core
pub use pairbench_core::*;
