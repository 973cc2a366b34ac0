use super::{normalize_name, ManifestParser};

/// Parser for INI-style `setup.cfg` files.
///
/// Looks for the `install_requires` key inside the `[options]` section.
/// The value is usually a multi-line block of indented continuation lines,
/// one requirement per line. Missing section or key yields an empty list.
pub struct SetupCfgParser;

impl ManifestParser for SetupCfgParser {
    fn parse(&self, text: &str) -> Vec<String> {
        let mut packages = Vec::new();
        let mut in_options = false;
        let mut in_value = false;

        for line in text.lines() {
            let trimmed = line.trim();

            // Section header ends any pending value block
            if trimmed.starts_with('[') && trimmed.ends_with(']') {
                in_options = trimmed.eq_ignore_ascii_case("[options]");
                in_value = false;
                continue;
            }

            if in_value {
                // Continuation lines are indented; anything flush-left is a
                // new key and ends the block
                if line.starts_with(' ') || line.starts_with('\t') {
                    push_entry(trimmed, &mut packages);
                    continue;
                }
                in_value = false;
            }

            if !in_options || trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            // Key line: "install_requires = value" or "install_requires:"
            if !line.starts_with(' ') && !line.starts_with('\t') {
                if let Some((key, value)) = split_key_value(trimmed) {
                    if key.eq_ignore_ascii_case("install_requires") {
                        push_entry(value.trim(), &mut packages);
                        in_value = true;
                    }
                }
            }
        }

        packages
    }
}

fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let idx = line.find(|c| c == '=' || c == ':')?;
    Some((line[..idx].trim_end(), &line[idx + 1..]))
}

fn push_entry(entry: &str, packages: &mut Vec<String>) {
    if entry.is_empty() || entry.starts_with('#') {
        return;
    }
    if let Some(name) = normalize_name(entry) {
        packages.push(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiline_value() {
        let text = "\
[metadata]
name = demo

[options]
python_requires = >=3.8
install_requires =
    Requests>=2.28
    flask
    numpy==1.24.0

[options.extras_require]
dev =
    pytest
";
        let pkgs = SetupCfgParser.parse(text);
        assert_eq!(pkgs, vec!["requests", "flask", "numpy"]);
    }

    #[test]
    fn test_inline_value() {
        let text = "[options]\ninstall_requires = requests\n";
        assert_eq!(SetupCfgParser.parse(text), vec!["requests"]);
    }

    #[test]
    fn test_missing_key_or_section() {
        assert!(SetupCfgParser.parse("[metadata]\nname = demo\n").is_empty());
        assert!(SetupCfgParser.parse("[options]\nzip_safe = false\n").is_empty());
        assert!(SetupCfgParser.parse("not an ini file at all").is_empty());
    }
}
