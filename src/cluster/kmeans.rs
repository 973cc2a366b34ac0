use anyhow::{bail, Result};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::matrix::FeatureMatrix;

const MAX_ITERS: usize = 100;

/// Result of one k-means run.
#[derive(Debug, Clone)]
pub struct KmeansFit {
    /// Cluster label per matrix row, contiguous in `[0, k)`.
    pub labels: Vec<usize>,
    /// Within-cluster sum of squared distances to centroids.
    pub inertia: f64,
}

/// Partition the matrix rows into `k` clusters by iterative relocation.
///
/// Centroids are initialized from `k` distinct rows sampled with a
/// `ChaCha8Rng` seeded from `seed`, so a given (matrix, k, seed) always
/// produces the same labels. `k` outside `[1, rows]` is a configuration
/// error reported before any numeric work.
pub fn fit(matrix: &FeatureMatrix, k: usize, seed: u64) -> Result<KmeansFit> {
    let n = matrix.n_repos();
    if k == 0 {
        bail!("cluster count k must be at least 1");
    }
    if k > n {
        bail!(
            "cluster count k = {} exceeds the number of repositories ({})",
            k,
            n
        );
    }

    let rows = &matrix.rows;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    // Forgy initialization: k distinct rows become the first centroids
    let mut centroids: Vec<Vec<f64>> = rand::seq::index::sample(&mut rng, n, k)
        .iter()
        .map(|i| rows[i].clone())
        .collect();

    let mut labels = vec![0usize; n];

    for _ in 0..MAX_ITERS {
        let mut next: Vec<usize> = rows
            .iter()
            .map(|row| nearest_centroid(row, &centroids))
            .collect();

        fill_empty_clusters(rows, &centroids, &mut next, k);

        let stable = next == labels;
        labels = next;

        centroids = recompute_centroids(rows, &labels, k, &centroids);

        if stable {
            break;
        }
    }

    let inertia = rows
        .iter()
        .zip(&labels)
        .map(|(row, &label)| sq_dist(row, &centroids[label]))
        .sum();

    Ok(KmeansFit { labels, inertia })
}

fn sq_dist(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Index of the closest centroid; ties go to the lowest index.
fn nearest_centroid(row: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (c, centroid) in centroids.iter().enumerate() {
        let dist = sq_dist(row, centroid);
        if dist < best_dist {
            best_dist = dist;
            best = c;
        }
    }
    best
}

/// A cluster can lose all of its points during reassignment. Hand it the
/// point currently farthest from its own centroid, taken from a cluster
/// that can spare one.
fn fill_empty_clusters(
    rows: &[Vec<f64>],
    centroids: &[Vec<f64>],
    labels: &mut [usize],
    k: usize,
) {
    for empty in 0..k {
        let mut counts = vec![0usize; k];
        for &label in labels.iter() {
            counts[label] += 1;
        }
        if counts[empty] > 0 {
            continue;
        }

        let mut farthest: Option<(usize, f64)> = None;
        for (i, row) in rows.iter().enumerate() {
            if counts[labels[i]] <= 1 {
                continue;
            }
            let dist = sq_dist(row, &centroids[labels[i]]);
            if farthest.map_or(true, |(_, d)| dist > d) {
                farthest = Some((i, dist));
            }
        }
        if let Some((i, _)) = farthest {
            labels[i] = empty;
        }
    }
}

fn recompute_centroids(
    rows: &[Vec<f64>],
    labels: &[usize],
    k: usize,
    previous: &[Vec<f64>],
) -> Vec<Vec<f64>> {
    let dims = rows.first().map_or(0, |r| r.len());
    let mut sums = vec![vec![0.0; dims]; k];
    let mut counts = vec![0usize; k];

    for (row, &label) in rows.iter().zip(labels) {
        counts[label] += 1;
        for (s, x) in sums[label].iter_mut().zip(row) {
            *s += x;
        }
    }

    sums.into_iter()
        .zip(counts)
        .enumerate()
        .map(|(c, (sum, count))| {
            if count == 0 {
                previous[c].clone()
            } else {
                sum.into_iter().map(|s| s / count as f64).collect()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RepoPackages;

    fn matrix_from(lists: &[(&str, &[&str])]) -> FeatureMatrix {
        let mut mapping = RepoPackages::new();
        for (repo, pkgs) in lists {
            mapping.insert(
                repo.to_string(),
                pkgs.iter().map(|s| s.to_string()).collect(),
            );
        }
        FeatureMatrix::build(&mapping)
    }

    fn two_group_matrix() -> FeatureMatrix {
        matrix_from(&[
            ("r1", &["a", "b"]),
            ("r2", &["a", "b"]),
            ("r3", &["c"]),
            ("r4", &["c", "d"]),
        ])
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let matrix = two_group_matrix();
        let a = fit(&matrix, 2, 42).unwrap();
        let b = fit(&matrix, 2, 42).unwrap();
        assert_eq!(a.labels, b.labels);
        assert_eq!(a.inertia, b.inertia);
    }

    #[test]
    fn test_labels_are_contiguous_range() {
        let matrix = two_group_matrix();
        let fit = fit(&matrix, 3, 7).unwrap();
        assert_eq!(fit.labels.len(), 4);
        assert!(fit.labels.iter().all(|&l| l < 3));
    }

    #[test]
    fn test_k_equals_one() {
        let matrix = two_group_matrix();
        let fit = fit(&matrix, 1, 0).unwrap();
        assert!(fit.labels.iter().all(|&l| l == 0));
    }

    #[test]
    fn test_k_greater_than_rows_is_rejected() {
        let matrix = two_group_matrix();
        assert!(fit(&matrix, 5, 0).is_err());
        assert!(fit(&matrix, 0, 0).is_err());
    }

    #[test]
    fn test_separates_obvious_groups() {
        let matrix = matrix_from(&[
            ("r1", &["a", "b"]),
            ("r2", &["a", "b"]),
            ("r3", &["c"]),
        ]);
        let fit = fit(&matrix, 2, 42).unwrap();
        // r1 and r2 are identical points; r3 is far from both
        assert_eq!(fit.labels[0], fit.labels[1]);
        assert_ne!(fit.labels[0], fit.labels[2]);
        assert_eq!(fit.inertia, 0.0);
    }

    #[test]
    fn test_k_equals_rows_gives_zero_inertia() {
        let matrix = two_group_matrix();
        let fit = fit(&matrix, 4, 123).unwrap();
        let mut sorted = fit.labels.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3]);
        assert_eq!(fit.inertia, 0.0);
    }
}
