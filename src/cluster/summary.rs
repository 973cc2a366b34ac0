use std::collections::{BTreeMap, HashMap};

use crate::models::RepoPackages;

/// How many packages to report per cluster.
pub const TOP_N: usize = 10;

/// Per-cluster package frequency ranking.
///
/// For each label, member repositories are visited in `repo_order`, their
/// package lists concatenated in place, and frequencies counted. The
/// ranking is descending by frequency; ties keep encounter order during
/// that aggregation (stable sort over the first-seen sequence), which is
/// the crate's fixed, reproducible tie-break. Clusters with no members do
/// not appear in the result.
pub fn top_packages(
    labels: &[usize],
    repo_order: &[String],
    mapping: &RepoPackages,
) -> BTreeMap<usize, Vec<(String, usize)>> {
    let mut summaries = BTreeMap::new();

    let distinct: std::collections::BTreeSet<usize> = labels.iter().copied().collect();

    for label in distinct {
        // Counts in first-encounter order
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for (repo, &repo_label) in repo_order.iter().zip(labels) {
            if repo_label != label {
                continue;
            }
            let Some(packages) = mapping.get(repo) else {
                continue;
            };
            for pkg in packages {
                match index.get(pkg) {
                    Some(&i) => counts[i].1 += 1,
                    None => {
                        index.insert(pkg.clone(), counts.len());
                        counts.push((pkg.clone(), 1));
                    }
                }
            }
        }

        if counts.is_empty() {
            continue;
        }

        // sort_by is stable: equal frequencies keep encounter order
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(TOP_N);
        summaries.insert(label, counts);
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(lists: &[(&str, &[&str])]) -> RepoPackages {
        lists
            .iter()
            .map(|(repo, pkgs)| {
                (
                    repo.to_string(),
                    pkgs.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_hand_computed_ranking() {
        let mapping = mapping(&[
            ("r1", &["a", "b", "c"]),
            ("r2", &["a", "b"]),
            ("r3", &["a"]),
        ]);
        let repo_order: Vec<String> = vec!["r1".into(), "r2".into(), "r3".into()];
        let labels = vec![0, 0, 0];

        let summaries = top_packages(&labels, &repo_order, &mapping);
        assert_eq!(
            summaries[&0],
            vec![
                ("a".to_string(), 3),
                ("b".to_string(), 2),
                ("c".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_tie_break_is_encounter_order() {
        // b and c both occur twice; b is encountered first (r1's list order)
        let mapping = mapping(&[("r1", &["b", "c"]), ("r2", &["c", "b"])]);
        let repo_order: Vec<String> = vec!["r1".into(), "r2".into()];
        let labels = vec![0, 0];

        let summaries = top_packages(&labels, &repo_order, &mapping);
        assert_eq!(
            summaries[&0],
            vec![("b".to_string(), 2), ("c".to_string(), 2)]
        );
    }

    #[test]
    fn test_truncates_to_top_ten() {
        let many: Vec<String> = (0..15).map(|i| format!("pkg{:02}", i)).collect();
        let many_refs: Vec<&str> = many.iter().map(String::as_str).collect();
        let mapping = mapping(&[("r1", &many_refs[..])]);
        let repo_order: Vec<String> = vec!["r1".into()];

        let summaries = top_packages(&[0], &repo_order, &mapping);
        assert_eq!(summaries[&0].len(), TOP_N);
        // All tied at 1: encounter order preserved
        assert_eq!(summaries[&0][0].0, "pkg00");
        assert_eq!(summaries[&0][9].0, "pkg09");
    }

    #[test]
    fn test_clusters_partition_the_packages() {
        let mapping = mapping(&[("r1", &["a"]), ("r2", &["b"])]);
        let repo_order: Vec<String> = vec!["r1".into(), "r2".into()];
        let labels = vec![0, 1];

        let summaries = top_packages(&labels, &repo_order, &mapping);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[&0], vec![("a".to_string(), 1)]);
        assert_eq!(summaries[&1], vec![("b".to_string(), 1)]);
    }
}
