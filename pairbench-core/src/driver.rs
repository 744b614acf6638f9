//! Experiment driver: sweeps the configured sizes and measures both
//! distance computers at each one.
//!
//! The sweep is strictly sequential. For every size the baseline runs first,
//! then the optimized computer, each inside its own trace session. Any error
//! aborts the remaining sizes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::{BenchConfig, Precision};
use crate::distance::Implementation;
use crate::error::Result;
use crate::measure::{measure, Measurement, MemoryTracer};

/// The four parallel series collected by one sweep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkSeries {
    /// Problem sizes, in measurement order.
    pub sizes: Vec<usize>,
    /// Baseline elapsed seconds per size.
    pub baseline_times: Vec<f64>,
    /// Optimized elapsed seconds per size.
    pub optimized_times: Vec<f64>,
    /// Baseline peak memory (MiB) per size.
    pub baseline_mem: Vec<f64>,
    /// Optimized peak memory (MiB) per size.
    pub optimized_mem: Vec<f64>,
}

impl BenchmarkSeries {
    /// Creates empty series with room for `capacity` sizes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sizes: Vec::with_capacity(capacity),
            baseline_times: Vec::with_capacity(capacity),
            optimized_times: Vec::with_capacity(capacity),
            baseline_mem: Vec::with_capacity(capacity),
            optimized_mem: Vec::with_capacity(capacity),
        }
    }

    /// Appends the pair of measurements taken at size `n`.
    pub fn push(&mut self, n: usize, baseline: Measurement, optimized: Measurement) {
        self.sizes.push(n);
        self.baseline_times.push(baseline.elapsed_seconds());
        self.optimized_times.push(optimized.elapsed_seconds());
        self.baseline_mem.push(baseline.peak_mb());
        self.optimized_mem.push(optimized.peak_mb());
    }

    /// Number of sizes measured.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Returns true if nothing has been measured.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

/// Runs the full sweep described by `config`.
///
/// Points are drawn from a [`StdRng`] seeded with `config.seed` when set,
/// otherwise from OS entropy.
pub fn run_experiment(config: &BenchConfig) -> Result<BenchmarkSeries> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    run_experiment_with_rng(config, &mut rng)
}

/// Runs the full sweep drawing points from `rng`.
pub fn run_experiment_with_rng<R: Rng + ?Sized>(
    config: &BenchConfig,
    rng: &mut R,
) -> Result<BenchmarkSeries> {
    config.validate()?;

    if !MemoryTracer::is_installed() {
        warn!("tracing allocator is not the global allocator, peak memory will read 0 MB");
    }
    info!(
        "measuring {} sizes at {} precision",
        config.sizes.len(),
        config.precision
    );

    let mut series = BenchmarkSeries::with_capacity(config.sizes.len());
    for &n in &config.sizes {
        let baseline = measure_implementation(Implementation::Baseline, n, config.precision, rng)?;
        let optimized =
            measure_implementation(Implementation::Optimized, n, config.precision, rng)?;
        series.push(n, baseline, optimized);
    }
    Ok(series)
}

/// Measures one run of `implementation` over `n` freshly generated points.
///
/// The distance matrix is dropped after the trace session ends.
pub fn measure_implementation<R: Rng + ?Sized>(
    implementation: Implementation,
    n: usize,
    precision: Precision,
    rng: &mut R,
) -> Result<Measurement> {
    info!("Running {} for n={}...", implementation, n);

    let (measurement, side) = match precision {
        Precision::F32 => {
            let (m, matrix) = measure(|| implementation.run::<f32, R>(n, rng))?;
            (m, matrix.len())
        }
        Precision::F64 => {
            let (m, matrix) = measure(|| implementation.run::<f64, R>(n, rng))?;
            (m, matrix.len())
        }
    };
    debug_assert_eq!(side, n);

    debug!(
        implementation = implementation.name(),
        n,
        elapsed_s = measurement.elapsed_seconds(),
        peak_mb = measurement.peak_mb(),
        output_mb = (n * n * precision.byte_width()) as f64 / (1024.0 * 1024.0),
        "measured"
    );
    Ok(measurement)
}
