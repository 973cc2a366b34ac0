use std::path::PathBuf;

use clap::Parser;

use crate::config::RunConfig;

#[derive(Parser, Debug)]
#[command(
    name = "stacklens",
    about = "Cluster popular GitHub repositories by their dependency stacks",
    version
)]
pub struct Cli {
    /// GitHub API token (falls back to the GITHUB_TOKEN environment variable)
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Config file [default: ./.stacklens/config.toml, fallback ~/.config/stacklens/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip collection; rerun the numeric stages from the saved repos stage
    #[arg(long)]
    pub offline: bool,

    /// Stop after collection and extraction (no clustering)
    #[arg(long)]
    pub collect_only: bool,

    /// Maximum repositories to collect
    #[arg(long, value_name = "N")]
    pub max_repos: Option<usize>,

    /// Minimum star count for collected repositories
    #[arg(long, value_name = "N")]
    pub min_stars: Option<u64>,

    /// Upper bound of the elbow search range
    #[arg(long, value_name = "K")]
    pub max_k: Option<usize>,

    /// Cluster count for the final partition
    #[arg(long, value_name = "K")]
    pub optimal_k: Option<usize>,

    /// Concurrent extraction workers
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Random seed for k-means and the PCA projection
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Courtesy delay between requests, in milliseconds (0 disables)
    #[arg(long, value_name = "MS")]
    pub request_delay: Option<u64>,

    /// Directory for stage snapshots
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory for chart output
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Only print the final summary line
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Fold CLI flags over the file-based configuration.
    pub fn apply_overrides(&self, config: &mut RunConfig) {
        if let Some(v) = self.max_repos {
            config.max_repos = v;
        }
        if let Some(v) = self.min_stars {
            config.min_stars = v;
        }
        if let Some(v) = self.max_k {
            config.max_k = v;
        }
        if let Some(v) = self.optimal_k {
            config.optimal_k = v;
        }
        if let Some(v) = self.workers {
            config.worker_count = v;
        }
        if let Some(v) = self.seed {
            config.random_seed = v;
        }
        if let Some(v) = self.request_delay {
            config.request_delay_ms = v;
        }
        if let Some(v) = &self.data_dir {
            config.data_dir = v.clone();
        }
        if let Some(v) = &self.out_dir {
            config.out_dir = v.clone();
        }
    }
}
