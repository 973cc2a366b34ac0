//! `stacklens` — cluster popular GitHub repositories by their dependency stacks.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and load run config ([`config::load_config`]).
//! 2. Discover popular Python repositories ([`github::search`]), or reload a
//!    saved stage with `--offline`.
//! 3. Fetch and normalize each repository's manifests concurrently
//!    ([`extract`], [`manifest`]); persist the mapping ([`store`]).
//! 4. Build the binary repository × package matrix ([`matrix`]).
//! 5. Render the elbow curve ([`cluster::elbow`]), partition with the chosen
//!    k ([`cluster::kmeans`]), and rank each cluster's packages
//!    ([`cluster::summary`]).
//! 6. Write charts ([`report::charts`]) and the terminal report
//!    ([`report::terminal`]).

mod cli;
mod cluster;
mod config;
mod extract;
mod github;
mod manifest;
mod matrix;
mod models;
mod report;
mod store;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use cli::Cli;
use config::load_config;
use matrix::FeatureMatrix;
use models::RepoPackages;
use store::Store;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let blobs = Store::new(&config.data_dir);

    let mapping: RepoPackages = if cli.offline {
        if !blobs.has(store::STAGE_REPOS) {
            anyhow::bail!(
                "--offline needs a saved repos stage under {} (run a collection pass first)",
                config.data_dir.display()
            );
        }
        blobs.load(store::STAGE_REPOS)?
    } else {
        collect(&cli, &config, &blobs).await?
    };

    if mapping.is_empty() {
        eprintln!("No repositories with detectable dependencies; nothing to cluster");
        std::process::exit(1);
    }

    if cli.collect_only {
        if !cli.quiet {
            eprintln!(
                "{} Collected {} repositories; stopping before clustering",
                "✓".green(),
                mapping.len()
            );
        }
        return Ok(());
    }

    let matrix = FeatureMatrix::build(&mapping);
    if !cli.quiet {
        eprintln!(
            "{} {} repositories, {} distinct packages",
            "→".cyan(),
            matrix.n_repos(),
            matrix.n_packages()
        );
    }

    if config.optimal_k > matrix.n_repos() {
        anyhow::bail!(
            "optimal_k = {} exceeds the number of repositories ({})",
            config.optimal_k,
            matrix.n_repos()
        );
    }

    std::fs::create_dir_all(&config.out_dir)?;

    // Diagnostic elbow curve for picking k by eye
    let curve = cluster::elbow::elbow_curve(&matrix, config.max_k, config.random_seed)?;
    report::charts::elbow_chart(&curve, &config.out_dir.join("elbow.png"))?;

    // Final partition with the configured k
    let fit = cluster::kmeans::fit(&matrix, config.optimal_k, config.random_seed)?;

    let points = cluster::pca::project_2d(&matrix, config.random_seed);
    report::charts::scatter_chart(
        &points,
        &fit.labels,
        config.optimal_k,
        &config.out_dir.join("clusters.png"),
    )?;

    let summaries = cluster::summary::top_packages(&fit.labels, &matrix.repo_order, &mapping);
    report::charts::cluster_bar_charts(&summaries, &config.out_dir)?;
    report::terminal::render(&matrix, &fit.labels, &summaries, cli.quiet)?;

    Ok(())
}

/// The online path: scan GitHub, extract dependencies, persist both stages.
async fn collect(cli: &Cli, config: &config::RunConfig, blobs: &Store) -> Result<RepoPackages> {
    let token = cli
        .token
        .clone()
        .or_else(|| std::env::var("GITHUB_TOKEN").ok());

    if token.is_none() && !cli.quiet {
        eprintln!(
            "{} no GitHub token; running unauthenticated with a small rate limit",
            "!".yellow()
        );
    }

    let client = github::client(token.as_deref())?;

    if !cli.quiet {
        let remaining = github::rate_limit::remaining(&client).await.unwrap_or(0);
        eprintln!("{} {} API queries remaining", "→".cyan(), remaining);
    }

    let raw = github::search::scrape(
        &client,
        config.max_repos,
        config.min_stars,
        config.request_delay(),
        cli.quiet,
    )
    .await?;
    blobs.save(store::STAGE_RAW, &raw)?;

    let mapping = extract::extract_dependencies(
        &client,
        &raw,
        config.worker_count,
        config.request_delay(),
        cli.quiet,
    )
    .await?;
    blobs.save(store::STAGE_REPOS, &mapping)?;

    if !cli.quiet {
        eprintln!(
            "{} Extracted dependencies from {} of {} repositories",
            "✓".green(),
            mapping.len(),
            raw.len()
        );
    }

    Ok(mapping)
}
