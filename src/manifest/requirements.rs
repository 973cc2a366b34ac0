use super::{normalize_name, ManifestParser};

/// Parser for line-oriented `requirements.txt` files.
///
/// Skips blank lines, `#` comments, and `-` option flags (`-r`, `--index-url`,
/// editable installs). Inline ` #` comments are stripped before the version
/// comparator is cut off.
pub struct RequirementsParser;

impl ManifestParser for RequirementsParser {
    fn parse(&self, text: &str) -> Vec<String> {
        let mut packages = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
                continue;
            }
            // Inline comment: "requests==2.28  # pinned for CVE-xxxx"
            // Any whitespace before the '#' counts, tabs included
            let cut = line.char_indices().find_map(|(idx, c)| {
                (c == '#' && line[..idx].ends_with(char::is_whitespace)).then_some(idx)
            });
            let line = match cut {
                Some(idx) => line[..idx].trim_end(),
                None => line,
            };
            if let Some(name) = normalize_name(line) {
                packages.push(name);
            }
        }

        packages
    }
}
