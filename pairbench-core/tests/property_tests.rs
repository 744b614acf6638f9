use ndarray::Array2;
use pairbench_core::distance::{baseline_pairwise, optimized_pairwise, point_distance};
use pairbench_core::points::pairs_to_array;
use proptest::prelude::*;

fn unit_points_f64(max: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
    proptest::collection::vec((0.0f64..1.0, 0.0f64..1.0), 1..max)
}

fn unit_points_f32(max: usize) -> impl Strategy<Value = Vec<(f32, f32)>> {
    proptest::collection::vec((0.0f32..1.0, 0.0f32..1.0), 1..max)
}

proptest! {
    #[test]
    fn test_optimized_matches_baseline_f64(points in unit_points_f64(40)) {
        let nested = baseline_pairwise(&points);
        let dense = optimized_pairwise(pairs_to_array(&points).view());

        prop_assert_eq!(dense.dim(), (points.len(), points.len()));
        for (i, row) in nested.iter().enumerate() {
            for (j, &d) in row.iter().enumerate() {
                prop_assert!((d - dense[[i, j]]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_optimized_matches_baseline_f32(points in unit_points_f32(40)) {
        let nested = baseline_pairwise(&points);
        let dense = optimized_pairwise(pairs_to_array(&points).view());

        for (i, row) in nested.iter().enumerate() {
            for (j, &d) in row.iter().enumerate() {
                prop_assert!((d - dense[[i, j]]).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_f32_path_tracks_f64_path(points in unit_points_f64(30)) {
        // Same points at both widths: the gap is bounded by f32 rounding.
        let narrow: Vec<(f32, f32)> = points.iter().map(|&(x, y)| (x as f32, y as f32)).collect();
        let wide = optimized_pairwise(pairs_to_array(&points).view());
        let narrow = optimized_pairwise(pairs_to_array(&narrow).view());

        for (w, n) in wide.iter().zip(narrow.iter()) {
            prop_assert!((w - f64::from(*n)).abs() < 1e-5);
        }
    }

    #[test]
    fn test_baseline_symmetric_zero_diagonal(points in unit_points_f64(40)) {
        let d = baseline_pairwise(&points);
        for i in 0..points.len() {
            prop_assert_eq!(d[i][i], 0.0);
            for j in 0..points.len() {
                prop_assert_eq!(d[i][j], d[j][i]);
            }
        }
    }

    #[test]
    fn test_optimized_symmetric_zero_diagonal(points in unit_points_f32(40)) {
        let d: Array2<f32> = optimized_pairwise(pairs_to_array(&points).view());
        for i in 0..points.len() {
            prop_assert_eq!(d[[i, i]], 0.0);
            for j in 0..points.len() {
                prop_assert_eq!(d[[i, j]], d[[j, i]]);
            }
        }
    }

    #[test]
    fn test_distances_non_negative_and_bounded(points in unit_points_f64(40)) {
        let nested = baseline_pairwise(&points);
        let dense = optimized_pairwise(pairs_to_array(&points).view());

        // Unit square diagonal bounds every distance.
        let bound = 2f64.sqrt() + 1e-12;
        prop_assert!(nested.iter().flatten().all(|&d| (0.0..=bound).contains(&d)));
        prop_assert!(dense.iter().all(|&d| (0.0..=bound).contains(&d)));
    }

    #[test]
    fn test_point_distance_triangle_inequality(
        a in (0.0f64..1.0, 0.0f64..1.0),
        b in (0.0f64..1.0, 0.0f64..1.0),
        c in (0.0f64..1.0, 0.0f64..1.0),
    ) {
        prop_assert!(point_distance(a, c) <= point_distance(a, b) + point_distance(b, c) + 1e-12);
    }
}
