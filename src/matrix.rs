//! Binary repository-by-package feature matrix.

use std::collections::{BTreeSet, HashMap};

use crate::models::RepoPackages;

/// Repositories × vocabulary presence matrix.
///
/// `rows[i][j] == 1.0` iff `vocabulary[j]` appears in `repo_order[i]`'s
/// package list. The vocabulary is lexicographically sorted and the repo
/// order follows the mapping's sorted keys, so rebuilding from the same
/// mapping always yields an identical matrix.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    pub vocabulary: Vec<String>,
    pub repo_order: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    pub fn build(mapping: &RepoPackages) -> FeatureMatrix {
        let vocabulary: Vec<String> = mapping
            .values()
            .flatten()
            .cloned()
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();

        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(j, pkg)| (pkg.as_str(), j))
            .collect();

        let repo_order: Vec<String> = mapping.keys().cloned().collect();

        let rows: Vec<Vec<f64>> = repo_order
            .iter()
            .map(|repo| {
                let mut row = vec![0.0; vocabulary.len()];
                for pkg in &mapping[repo] {
                    // A package outside the vocabulary cannot happen when the
                    // vocabulary came from the same mapping; drop it if it does
                    if let Some(&j) = index.get(pkg.as_str()) {
                        row[j] = 1.0;
                    }
                }
                row
            })
            .collect();

        FeatureMatrix {
            vocabulary,
            repo_order,
            rows,
        }
    }

    pub fn n_repos(&self) -> usize {
        self.rows.len()
    }

    pub fn n_packages(&self) -> usize {
        self.vocabulary.len()
    }
}
