//! Repository aggregation: fetch candidate manifests per repository,
//! normalize them, and union the results into one package list per repo.

use std::time::Duration;

use anyhow::Result;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::github::contents;
use crate::manifest::parser_for;
use crate::models::{ManifestFile, ManifestKind, RepoMeta, RepoPackages, RepoSnapshot};

/// Candidate manifest files, probed in this order for every repository.
pub const CANDIDATE_FILES: [&str; 4] = [
    "requirements.txt",
    "setup.py",
    "setup.cfg",
    "pyproject.toml",
];

/// Fetch whatever candidate manifests a repository has and freeze them
/// into a snapshot. Fetch failures (missing file, network error) silently
/// skip that candidate.
async fn fetch_snapshot(client: &Client, full_name: &str) -> RepoSnapshot {
    let mut files = Vec::new();

    for file_name in CANDIDATE_FILES {
        match contents::fetch(client, full_name, file_name).await {
            Ok(Some(text)) => files.push(ManifestFile {
                kind: ManifestKind::from_file_name(file_name),
                text,
            }),
            Ok(None) | Err(_) => continue,
        }
    }

    RepoSnapshot {
        full_name: full_name.to_string(),
        files,
    }
}

/// Normalize every manifest in a snapshot and union the results,
/// deduplicated in first-encounter order.
pub fn extract_from_snapshot(snapshot: &RepoSnapshot) -> Vec<String> {
    let mut packages: Vec<String> = Vec::new();
    let mut seen: std::collections::HashSet<String> = std::collections::HashSet::new();

    for file in &snapshot.files {
        for pkg in parser_for(file.kind).parse(&file.text) {
            if seen.insert(pkg.clone()) {
                packages.push(pkg);
            }
        }
    }

    packages
}

/// Extract dependencies for every repository, `worker_count` at a time.
///
/// Each task owns one repository: fetch the snapshot, normalize, sleep the
/// courtesy delay. Results merge into the output mapping only after a task
/// fully completes, so the mapping never depends on completion order.
/// Repositories with no detected dependencies are dropped.
pub async fn extract_dependencies(
    client: &Client,
    repos: &[RepoMeta],
    worker_count: usize,
    delay: Duration,
    quiet: bool,
) -> Result<RepoPackages> {
    let pb = if !quiet {
        let pb = ProgressBar::new(repos.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        pb.set_message("extracting dependencies");
        Some(pb)
    } else {
        None
    };

    let results: Vec<(String, Vec<String>)> = stream::iter(repos.iter())
        .map(|repo| {
            let client = client.clone();
            let full_name = repo.full_name.clone();
            let pb = pb.clone();
            async move {
                let snapshot = fetch_snapshot(&client, &full_name).await;
                let packages = extract_from_snapshot(&snapshot);

                // Pace only after a successfully processed repository
                if !packages.is_empty() && !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                if let Some(pb) = &pb {
                    pb.inc(1);
                }

                (full_name, packages)
            }
        })
        .buffer_unordered(worker_count.max(1))
        .collect()
        .await;

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    Ok(merge_results(results))
}

/// Merge completed per-repository results into the output mapping.
/// Repositories with no detected dependencies are excluded entirely
/// rather than kept with an empty entry.
fn merge_results(results: Vec<(String, Vec<String>)>) -> RepoPackages {
    results
        .into_iter()
        .filter(|(_, packages)| !packages.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(full_name: &str, files: Vec<(ManifestKind, &str)>) -> RepoSnapshot {
        RepoSnapshot {
            full_name: full_name.to_string(),
            files: files
                .into_iter()
                .map(|(kind, text)| ManifestFile {
                    kind,
                    text: text.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_union_across_formats_is_deduplicated() {
        let snap = snapshot(
            "acme/demo",
            vec![
                (ManifestKind::Requirements, "requests==2.28\nflask\n"),
                (
                    ManifestKind::Pyproject,
                    "[project]\ndependencies = [\"Flask\", \"numpy\"]\n",
                ),
            ],
        );
        let pkgs = extract_from_snapshot(&snap);
        assert_eq!(pkgs, vec!["requests", "flask", "numpy"]);
    }

    #[test]
    fn test_no_manifests_yields_empty() {
        let snap = snapshot("acme/demo", vec![]);
        assert!(extract_from_snapshot(&snap).is_empty());
    }

    #[test]
    fn test_malformed_file_does_not_poison_others() {
        let snap = snapshot(
            "acme/demo",
            vec![
                (ManifestKind::Pyproject, "[project\nbroken"),
                (ManifestKind::Requirements, "requests\n"),
            ],
        );
        assert_eq!(extract_from_snapshot(&snap), vec!["requests"]);
    }

    #[test]
    fn test_repo_without_dependencies_is_dropped_from_mapping() {
        // Only an unparseable manifest: the repo yields no packages and must
        // be absent from the mapping, not present with an empty list
        let empty = snapshot("acme/empty", vec![(ManifestKind::Pyproject, "[project\nbroken")]);
        let full = snapshot("acme/full", vec![(ManifestKind::Requirements, "requests\n")]);

        let mapping = merge_results(vec![
            (empty.full_name.clone(), extract_from_snapshot(&empty)),
            (full.full_name.clone(), extract_from_snapshot(&full)),
        ]);

        assert!(!mapping.contains_key("acme/empty"));
        assert_eq!(mapping["acme/full"], vec!["requests"]);
        assert_eq!(mapping.len(), 1);
    }
}
