use serde::Deserialize;

use super::{normalize_name, ManifestParser};

/// Parser for `pyproject.toml` project-metadata documents.
///
/// Two locations are checked in priority order: the PEP 621
/// `[project].dependencies` list, then the `[tool.poetry.dependencies]`
/// table (whose keys are the package names, minus the `python` version
/// self-reference). A document that fails to parse yields an empty list.
pub struct PyprojectParser;

#[derive(Debug, Deserialize)]
struct Pyproject {
    project: Option<Project>,
    tool: Option<Tool>,
}

#[derive(Debug, Deserialize)]
struct Project {
    dependencies: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct Tool {
    poetry: Option<Poetry>,
}

#[derive(Debug, Deserialize)]
struct Poetry {
    #[serde(default)]
    dependencies: toml::Table,
}

impl ManifestParser for PyprojectParser {
    fn parse(&self, text: &str) -> Vec<String> {
        let doc: Pyproject = match toml::from_str(text) {
            Ok(doc) => doc,
            Err(_) => return Vec::new(),
        };

        if let Some(deps) = doc.project.and_then(|p| p.dependencies) {
            return deps.iter().filter_map(|s| normalize_name(s)).collect();
        }

        if let Some(poetry) = doc.tool.and_then(|t| t.poetry) {
            return poetry
                .dependencies
                .keys()
                .filter_map(|k| normalize_name(k))
                .filter(|name| name != "python")
                .collect();
        }

        Vec::new()
    }
}
