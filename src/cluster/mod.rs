//! Unsupervised grouping of repositories by dependency profile.
//!
//! - [`kmeans`] — seeded iterative-relocation partitioner.
//! - [`elbow`] — inertia curve over candidate cluster counts.
//! - [`pca`] — 2D projection for the scatter chart.
//! - [`summary`] — per-cluster top-package frequency ranking.

pub mod elbow;
pub mod kmeans;
pub mod pca;
pub mod summary;

#[cfg(test)]
mod tests {
    use crate::cluster::{kmeans, summary};
    use crate::matrix::FeatureMatrix;
    use crate::models::RepoPackages;

    /// The whole numeric pipeline on a tiny hand-checkable input: two
    /// repositories sharing a stack, one outlier, k = 2.
    #[test]
    fn test_three_repo_end_to_end() {
        let mut mapping = RepoPackages::new();
        mapping.insert("r1".into(), vec!["a".into(), "b".into()]);
        mapping.insert("r2".into(), vec!["a".into(), "b".into()]);
        mapping.insert("r3".into(), vec!["c".into()]);

        let matrix = FeatureMatrix::build(&mapping);
        let fit = kmeans::fit(&matrix, 2, 8675309).unwrap();

        // r1 and r2 share a cluster; r3 sits alone
        assert_eq!(fit.labels[0], fit.labels[1]);
        assert_ne!(fit.labels[0], fit.labels[2]);

        let summaries = summary::top_packages(&fit.labels, &matrix.repo_order, &mapping);
        assert_eq!(summaries.len(), 2);

        let ab_cluster = &summaries[&fit.labels[0]];
        assert_eq!(
            ab_cluster,
            &vec![("a".to_string(), 2), ("b".to_string(), 2)]
        );
        let c_cluster = &summaries[&fit.labels[2]];
        assert_eq!(c_cluster, &vec![("c".to_string(), 1)]);
    }
}
