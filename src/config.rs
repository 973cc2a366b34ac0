use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Result};
use serde::Deserialize;

/// Run configuration, deserialized from `.stacklens/config.toml` and then
/// overridden by CLI flags. Passed explicitly into the pipeline; there is
/// no ambient global state.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Collection cap: stop the discovery scan after this many repositories.
    pub max_repos: usize,
    /// Collection filter: minimum star count.
    pub min_stars: u64,
    /// Upper bound of the elbow search range.
    pub max_k: usize,
    /// Cluster count used for the final partition (picked by a human from
    /// the elbow chart).
    pub optimal_k: usize,
    /// Concurrent extraction workers.
    pub worker_count: usize,
    /// Seed for k-means initialization and the PCA projection.
    pub random_seed: u64,
    /// Courtesy pause after each request / processed repository.
    pub request_delay_ms: u64,
    /// Where stage snapshots are persisted.
    pub data_dir: PathBuf,
    /// Where charts are written.
    pub out_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            max_repos: 4000,
            min_stars: 100,
            max_k: 10,
            optimal_k: 5,
            worker_count: 10,
            random_seed: 8675309,
            request_delay_ms: 100,
            data_dir: PathBuf::from("data"),
            out_dir: PathBuf::from("outputs"),
        }
    }
}

impl RunConfig {
    /// Reject configurations the numeric stages cannot work with, before
    /// any collection or clustering starts.
    pub fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            bail!("worker_count must be at least 1");
        }
        if self.optimal_k == 0 {
            bail!("optimal_k must be at least 1");
        }
        if self.max_k == 0 {
            bail!("max_k must be at least 1");
        }
        if self.max_repos == 0 {
            bail!("max_repos must be at least 1");
        }
        Ok(())
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

/// Load the run configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `./.stacklens/config.toml`
/// 3. `~/.config/stacklens/config.toml`
/// 4. Built-in [`RunConfig::default`]
pub fn load_config(config_override: Option<&Path>) -> Result<RunConfig> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&content)?);
    }

    let project_config = Path::new(".stacklens").join("config.toml");
    if project_config.exists() {
        let content = std::fs::read_to_string(&project_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("stacklens").join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(RunConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(RunConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = RunConfig {
            worker_count: 0,
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_k_rejected() {
        let config = RunConfig {
            optimal_k: 0,
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: RunConfig = toml::from_str("optimal_k = 3\nmin_stars = 500\n").unwrap();
        assert_eq!(config.optimal_k, 3);
        assert_eq!(config.min_stars, 500);
        assert_eq!(config.worker_count, RunConfig::default().worker_count);
    }
}
