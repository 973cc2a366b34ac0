use anyhow::Result;

use super::kmeans;
use crate::matrix::FeatureMatrix;

/// Inertia for every candidate cluster count in `[1, max_k]`.
///
/// The upper bound is clamped to the repository count, since k cannot
/// exceed the number of points. Each candidate runs with the same seed,
/// so the sequence is identical across runs. The elbow itself is picked
/// by a human looking at the rendered curve, never by this code.
pub fn elbow_curve(matrix: &FeatureMatrix, max_k: usize, seed: u64) -> Result<Vec<(usize, f64)>> {
    let upper = max_k.min(matrix.n_repos());

    (1..=upper)
        .map(|k| kmeans::fit(matrix, k, seed).map(|fit| (k, fit.inertia)))
        .collect()
}
