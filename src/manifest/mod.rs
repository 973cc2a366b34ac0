//! Dependency normalizer: one parser per manifest format.
//!
//! Each parser takes raw manifest text and returns the package names it
//! declares, lower-cased and stripped of version comparators. Parsers never
//! fail: malformed input yields an empty list so one broken file can't
//! abort a run. Duplicates may remain within the returned list; the
//! aggregator deduplicates.

use crate::models::ManifestKind;

pub mod pyproject;
pub mod requirements;
pub mod setup_cfg;
pub mod setup_py;

pub trait ManifestParser {
    fn parse(&self, text: &str) -> Vec<String>;
}

/// Select the parser for a file role.
pub fn parser_for(kind: ManifestKind) -> &'static dyn ManifestParser {
    match kind {
        ManifestKind::Requirements => &requirements::RequirementsParser,
        ManifestKind::SetupPy => &setup_py::SetupPyParser,
        ManifestKind::SetupCfg => &setup_cfg::SetupCfgParser,
        ManifestKind::Pyproject => &pyproject::PyprojectParser,
    }
}

/// Canonicalize one requirement specifier into a bare package name:
/// truncate at the first version comparator (`<`, `=`, `>`), trim, and
/// lower-case. Returns `None` when nothing is left.
pub(crate) fn normalize_name(spec: &str) -> Option<String> {
    let name = spec
        .split(|c| c == '<' || c == '=' || c == '>')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_comparators() {
        assert_eq!(normalize_name("Requests>=2.28"), Some("requests".into()));
        assert_eq!(normalize_name("numpy==1.24.0"), Some("numpy".into()));
        assert_eq!(normalize_name("Flask"), Some("flask".into()));
        assert_eq!(normalize_name("  pandas < 2 "), Some("pandas".into()));
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_name(""), None);
        assert_eq!(normalize_name("   "), None);
        assert_eq!(normalize_name(">=1.0"), None);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["requests", "flask", "scikit-learn"] {
            let once = normalize_name(raw).unwrap();
            assert_eq!(normalize_name(&once), Some(once.clone()));
        }
    }
}
