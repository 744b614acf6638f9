//! Pairwise Euclidean distance computers.
//!
//! Two implementations of the same n x n distance matrix:
//!
//! - [`baseline_pairwise`] walks every ordered pair of `(x, y)` points with
//!   scalar arithmetic and builds a nested `Vec<Vec<F>>`.
//! - [`optimized_pairwise`] broadcasts an `(n, 1, 2)` view against a
//!   `(1, n, 2)` view of the point array, squares, reduces over the
//!   coordinate axis and writes square roots into a preallocated buffer.
//!
//! Both are generic over the float type so that a benchmark compares them at
//! the same [`Precision`](crate::config::Precision).

use std::fmt;

use ndarray::{Array2, ArrayView2, Axis, NdFloat, Zip};
use rand::distributions::{Distribution, Standard};
use rand::Rng;

use crate::points::{random_array, random_pairs, Point};

/// The two distance computers under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Implementation {
    /// Nested loops over a pair sequence.
    Baseline,
    /// Broadcasted array arithmetic.
    Optimized,
}

impl Implementation {
    /// Both implementations, in measurement order.
    pub const ALL: [Implementation; 2] = [Implementation::Baseline, Implementation::Optimized];

    /// Short lowercase name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Implementation::Baseline => "baseline",
            Implementation::Optimized => "optimized",
        }
    }

    /// Human-readable label used in chart legends.
    pub fn label(&self) -> &'static str {
        match self {
            Implementation::Baseline => "Baseline (lists)",
            Implementation::Optimized => "Optimized (ndarray)",
        }
    }

    /// Generates `n` fresh points in this implementation's layout and computes
    /// their distance matrix.
    ///
    /// Each call draws its own points, so two calls never share a point set.
    pub fn run<F, R>(&self, n: usize, rng: &mut R) -> DistanceMatrix<F>
    where
        F: NdFloat,
        R: Rng + ?Sized,
        Standard: Distribution<F>,
    {
        match self {
            Implementation::Baseline => {
                let points = random_pairs::<F, R>(n, rng);
                DistanceMatrix::Nested(baseline_pairwise(&points))
            }
            Implementation::Optimized => {
                let points = random_array::<F, R>(n, rng);
                DistanceMatrix::Dense(optimized_pairwise(points.view()))
            }
        }
    }
}

impl fmt::Display for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A computed distance matrix in the layout its implementation produces.
#[derive(Debug, Clone, PartialEq)]
pub enum DistanceMatrix<F> {
    /// Row-of-rows output of the baseline computer.
    Nested(Vec<Vec<F>>),
    /// Contiguous output of the optimized computer.
    Dense(Array2<F>),
}

impl<F: Copy> DistanceMatrix<F> {
    /// Number of points, i.e. the side length of the square matrix.
    pub fn len(&self) -> usize {
        match self {
            DistanceMatrix::Nested(rows) => rows.len(),
            DistanceMatrix::Dense(array) => array.nrows(),
        }
    }

    /// Returns true if the matrix was computed over zero points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns entry `(i, j)`, or `None` if out of bounds.
    pub fn get(&self, i: usize, j: usize) -> Option<F> {
        match self {
            DistanceMatrix::Nested(rows) => rows.get(i).and_then(|row| row.get(j)).copied(),
            DistanceMatrix::Dense(array) => array.get((i, j)).copied(),
        }
    }

    /// Converts into a dense array regardless of the source layout.
    pub fn into_dense(self) -> Array2<F> {
        match self {
            DistanceMatrix::Nested(rows) => {
                let n = rows.len();
                Array2::from_shape_fn((n, n), |(i, j)| rows[i][j])
            }
            DistanceMatrix::Dense(array) => array,
        }
    }
}

/// Computes the Euclidean distance between two points.
///
/// Formula: sqrt((ax - bx)^2 + (ay - by)^2)
#[inline]
pub fn point_distance<F: NdFloat>(a: Point<F>, b: Point<F>) -> F {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Computes the full distance matrix with nested loops and scalar arithmetic.
pub fn baseline_pairwise<F: NdFloat>(points: &[Point<F>]) -> Vec<Vec<F>> {
    let mut distances = Vec::new();
    for &a in points {
        let mut row = Vec::new();
        for &b in points {
            row.push(point_distance(a, b));
        }
        distances.push(row);
    }
    distances
}

/// Computes the full distance matrix with whole-array broadcasting.
///
/// # Panics
///
/// Panics in debug builds if `points` does not have exactly two columns.
pub fn optimized_pairwise<F: NdFloat>(points: ArrayView2<F>) -> Array2<F> {
    debug_assert_eq!(points.ncols(), 2, "points must be an (n, 2) array");

    let n = points.nrows();
    let mut distances = Array2::<F>::zeros((n, n));

    let rows = points.insert_axis(Axis(1)); // (n, 1, 2)
    let cols = points.insert_axis(Axis(0)); // (1, n, 2)
    let diffs = &rows - &cols;
    let squared_sums = (&diffs * &diffs).sum_axis(Axis(2));

    Zip::from(&mut distances)
        .and(&squared_sums)
        .for_each(|d, &s| *d = s.sqrt());
    distances
}
