//! Random point generation.
//!
//! Points are drawn uniformly from the unit square `[0, 1) x [0, 1)` in one of
//! two layouts: a sequence of `(x, y)` pairs walked by the baseline computer,
//! or a contiguous `(n, 2)` array consumed by the optimized computer.

use ndarray::Array2;
use rand::distributions::{Distribution, Standard};
use rand::Rng;

/// A 2D point as an `(x, y)` pair.
pub type Point<F> = (F, F);

/// Generates `n` random points as `(x, y)` pairs.
pub fn random_pairs<F, R>(n: usize, rng: &mut R) -> Vec<Point<F>>
where
    R: Rng + ?Sized,
    Standard: Distribution<F>,
{
    (0..n).map(|_| (rng.gen::<F>(), rng.gen::<F>())).collect()
}

/// Generates `n` random points as a row-major `(n, 2)` array.
pub fn random_array<F, R>(n: usize, rng: &mut R) -> Array2<F>
where
    R: Rng + ?Sized,
    Standard: Distribution<F>,
{
    Array2::from_shape_fn((n, 2), |_| rng.gen::<F>())
}

/// Copies a pair sequence into an `(n, 2)` array, preserving order.
pub fn pairs_to_array<F: Copy>(points: &[Point<F>]) -> Array2<F> {
    Array2::from_shape_fn((points.len(), 2), |(i, axis)| {
        let (x, y) = points[i];
        if axis == 0 {
            x
        } else {
            y
        }
    })
}
