use std::collections::BTreeMap;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use crate::matrix::FeatureMatrix;

/// Render the clustering result to the terminal: a summary box followed by
/// one top-packages table per cluster.
pub fn render(
    matrix: &FeatureMatrix,
    labels: &[usize],
    summaries: &BTreeMap<usize, Vec<(String, usize)>>,
    quiet: bool,
) -> Result<()> {
    let n_repos = matrix.n_repos();
    let n_packages = matrix.n_packages();
    let n_clusters = summaries.len();

    if quiet {
        println!(
            "Repositories: {}  Packages: {}  Clusters: {}",
            n_repos, n_packages, n_clusters
        );
        return Ok(());
    }

    println!("\n {} v{}", "stacklens".bold(), env!("CARGO_PKG_VERSION"));
    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(
        " │  {:<48} │",
        format!("Repositories clustered : {}", n_repos)
    );
    println!(
        " │  {:<48} │",
        format!("Distinct packages      : {}", n_packages)
    );
    println!(
        " │  {:<48} │",
        format!("Clusters               : {}", n_clusters)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    for (&label, top) in summaries {
        let members = labels.iter().filter(|&&l| l == label).count();
        println!(
            " {} Cluster {} — {} repositories:\n",
            "→".cyan(),
            (label + 1).to_string().bold(),
            members
        );
        render_cluster_table(top);
        println!();
    }

    Ok(())
}

fn render_cluster_table(top: &[(String, usize)]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Package").add_attribute(Attribute::Bold),
            Cell::new("Frequency").add_attribute(Attribute::Bold),
        ]);

    for (pkg, freq) in top {
        table.add_row(vec![
            Cell::new(pkg),
            Cell::new(freq.to_string()).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{}", table);
}
