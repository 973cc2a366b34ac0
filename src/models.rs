use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Repository metadata as returned by the discovery scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoMeta {
    /// `owner/name`, unique across a run.
    pub full_name: String,
    pub stars: u64,
}

/// The manifest formats we know how to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManifestKind {
    Requirements,
    SetupPy,
    SetupCfg,
    Pyproject,
}

impl ManifestKind {
    /// Map a file name onto its format. Unrecognized names fall back to the
    /// line-oriented requirements format, which is the most lenient.
    pub fn from_file_name(name: &str) -> ManifestKind {
        if name == "setup.py" {
            ManifestKind::SetupPy
        } else if name == "setup.cfg" {
            ManifestKind::SetupCfg
        } else if name.ends_with("pyproject.toml") {
            ManifestKind::Pyproject
        } else {
            ManifestKind::Requirements
        }
    }
}

impl std::fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestKind::Requirements => write!(f, "requirements.txt"),
            ManifestKind::SetupPy => write!(f, "setup.py"),
            ManifestKind::SetupCfg => write!(f, "setup.cfg"),
            ManifestKind::Pyproject => write!(f, "pyproject.toml"),
        }
    }
}

/// One fetched manifest file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestFile {
    pub kind: ManifestKind,
    pub text: String,
}

/// Immutable snapshot of a repository as seen by the extraction stage:
/// its identifier plus whatever manifest files could be fetched. Built once
/// at the GitHub boundary; the core never holds a live API handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSnapshot {
    pub full_name: String,
    pub files: Vec<ManifestFile>,
}

/// Repository → deduplicated package list. Keyed by full name so the
/// mapping (and everything derived from it) is independent of the order
/// in which concurrent extraction tasks complete.
pub type RepoPackages = BTreeMap<String, Vec<String>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_file_name() {
        assert_eq!(
            ManifestKind::from_file_name("setup.py"),
            ManifestKind::SetupPy
        );
        assert_eq!(
            ManifestKind::from_file_name("setup.cfg"),
            ManifestKind::SetupCfg
        );
        assert_eq!(
            ManifestKind::from_file_name("pyproject.toml"),
            ManifestKind::Pyproject
        );
        assert_eq!(
            ManifestKind::from_file_name("requirements.txt"),
            ManifestKind::Requirements
        );
        // Lenient default for anything unrecognized
        assert_eq!(
            ManifestKind::from_file_name("deps.list"),
            ManifestKind::Requirements
        );
    }
}
