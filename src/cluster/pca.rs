use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::matrix::FeatureMatrix;

const POWER_ITERS: usize = 100;

/// Project the matrix rows onto their top two principal components.
///
/// Used only to place repositories on the 2D scatter chart, so a plain
/// power iteration (with deflation by orthogonalizing the second component
/// against the first) is plenty. Seeded for reproducible charts.
pub fn project_2d(matrix: &FeatureMatrix, seed: u64) -> Vec<(f64, f64)> {
    let rows = &matrix.rows;
    let n = rows.len();
    let dims = matrix.n_packages();
    if n == 0 || dims == 0 {
        return vec![(0.0, 0.0); n];
    }

    let mean = column_means(rows, dims);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let c1 = principal_component(rows, &mean, &[], &mut rng);
    let c2 = principal_component(rows, &mean, &[c1.clone()], &mut rng);

    rows.iter()
        .map(|row| (centered_dot(row, &mean, &c1), centered_dot(row, &mean, &c2)))
        .collect()
}

fn column_means(rows: &[Vec<f64>], dims: usize) -> Vec<f64> {
    let mut mean = vec![0.0; dims];
    for row in rows {
        for (m, x) in mean.iter_mut().zip(row) {
            *m += x;
        }
    }
    for m in &mut mean {
        *m /= rows.len() as f64;
    }
    mean
}

fn centered_dot(row: &[f64], mean: &[f64], v: &[f64]) -> f64 {
    row.iter()
        .zip(mean)
        .zip(v)
        .map(|((x, m), c)| (x - m) * c)
        .sum()
}

/// One component via power iteration on the (implicit) covariance matrix:
/// w = Σᵢ (xᵢ - μ) ((xᵢ - μ) · v), renormalized each step. Never forms the
/// dims × dims covariance.
fn principal_component(
    rows: &[Vec<f64>],
    mean: &[f64],
    previous: &[Vec<f64>],
    rng: &mut ChaCha8Rng,
) -> Vec<f64> {
    let dims = mean.len();
    let mut v: Vec<f64> = (0..dims).map(|_| rng.gen_range(-1.0..1.0)).collect();
    orthogonalize(&mut v, previous);
    if !normalize(&mut v) {
        return vec![0.0; dims];
    }

    for _ in 0..POWER_ITERS {
        let mut w = vec![0.0; dims];
        for row in rows {
            let proj = centered_dot(row, mean, &v);
            for ((wi, x), m) in w.iter_mut().zip(row).zip(mean) {
                *wi += (x - m) * proj;
            }
        }
        orthogonalize(&mut w, previous);
        if !normalize(&mut w) {
            // Degenerate direction (all variance already captured)
            return vec![0.0; dims];
        }
        v = w;
    }

    v
}

fn orthogonalize(v: &mut [f64], previous: &[Vec<f64>]) {
    for p in previous {
        let dot: f64 = v.iter().zip(p).map(|(a, b)| a * b).sum();
        for (vi, pi) in v.iter_mut().zip(p) {
            *vi -= dot * pi;
        }
    }
}

fn normalize(v: &mut [f64]) -> bool {
    let norm: f64 = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm < 1e-12 {
        return false;
    }
    for x in v.iter_mut() {
        *x /= norm;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RepoPackages;

    fn matrix() -> FeatureMatrix {
        let mut mapping = RepoPackages::new();
        mapping.insert("r1".into(), vec!["a".into(), "b".into()]);
        mapping.insert("r2".into(), vec!["a".into(), "b".into()]);
        mapping.insert("r3".into(), vec!["c".into(), "d".into()]);
        FeatureMatrix::build(&mapping)
    }

    #[test]
    fn test_reproducible_projection() {
        let m = matrix();
        assert_eq!(project_2d(&m, 42), project_2d(&m, 42));
    }

    #[test]
    fn test_identical_rows_coincide() {
        let m = matrix();
        let points = project_2d(&m, 42);
        assert_eq!(points.len(), 3);
        let (x1, y1) = points[0];
        let (x2, y2) = points[1];
        assert!((x1 - x2).abs() < 1e-9);
        assert!((y1 - y2).abs() < 1e-9);
        // The distinct row lands elsewhere on the first component
        assert!((points[2].0 - x1).abs() > 1e-6);
    }

    #[test]
    fn test_empty_matrix() {
        let m = FeatureMatrix::build(&RepoPackages::new());
        assert!(project_2d(&m, 42).is_empty());
    }
}
