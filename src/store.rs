//! Stage blob store: JSON snapshots of pipeline stages on disk, so the
//! numeric stages can rerun without re-collecting from the network.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Stage name for the raw repository listing.
pub const STAGE_RAW: &str = "raw";
/// Stage name for the repository → packages mapping.
pub const STAGE_REPOS: &str = "repos";

pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Store {
        Store { dir: dir.into() }
    }

    fn stage_path(&self, stage: &str) -> PathBuf {
        self.dir.join(format!("{}.json", stage))
    }

    pub fn save<T: Serialize>(&self, stage: &str, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create data dir {}", self.dir.display()))?;
        let path = self.stage_path(stage);
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write stage '{}' to {}", stage, path.display()))?;
        Ok(())
    }

    pub fn load<T: DeserializeOwned>(&self, stage: &str) -> Result<T> {
        let path = self.stage_path(stage);
        let content = std::fs::read_to_string(&path).with_context(|| {
            format!(
                "No saved '{}' stage at {} (run a collection pass first)",
                stage,
                path.display()
            )
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn has(&self, stage: &str) -> bool {
        self.stage_path(stage).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RepoPackages;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());

        let mut mapping = RepoPackages::new();
        mapping.insert("acme/demo".into(), vec!["requests".into()]);

        store.save(STAGE_REPOS, &mapping).unwrap();
        assert!(store.has(STAGE_REPOS));

        let loaded: RepoPackages = store.load(STAGE_REPOS).unwrap();
        assert_eq!(loaded, mapping);
    }

    #[test]
    fn test_load_missing_stage_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        assert!(!store.has(STAGE_RAW));
        let result: Result<RepoPackages> = store.load(STAGE_RAW);
        assert!(result.is_err());
    }
}
