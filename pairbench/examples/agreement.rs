//! Feeds one point set to both distance computers and reports how far apart
//! their matrices are at each precision.
//!
//! Run with: cargo run --example agreement

use pairbench::distance::{baseline_pairwise, optimized_pairwise};
use pairbench::points::{pairs_to_array, random_pairs};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let mut rng = StdRng::seed_from_u64(2024);

    println!("Baseline vs optimized agreement on shared points\n");
    println!("{:>6}  {:>14}  {:>14}", "n", "max |diff| f64", "max |diff| f32");

    for n in [10, 100, 500] {
        let wide = random_pairs::<f64, _>(n, &mut rng);
        let narrow: Vec<(f32, f32)> = wide.iter().map(|&(x, y)| (x as f32, y as f32)).collect();

        let wide_gap = max_abs_diff(
            &baseline_pairwise(&wide),
            optimized_pairwise(pairs_to_array(&wide).view()).iter().copied(),
        );
        let narrow_gap = max_abs_diff(
            &baseline_pairwise(&narrow)
                .into_iter()
                .map(|row| row.into_iter().map(f64::from).collect())
                .collect::<Vec<Vec<f64>>>(),
            optimized_pairwise(pairs_to_array(&narrow).view())
                .iter()
                .map(|&d| f64::from(d)),
        );

        println!("{:>6}  {:>14.3e}  {:>14.3e}", n, wide_gap, narrow_gap);
    }
}

fn max_abs_diff(nested: &[Vec<f64>], dense: impl Iterator<Item = f64>) -> f64 {
    nested
        .iter()
        .flatten()
        .zip(dense)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max)
}
