use regex::Regex;

use super::{normalize_name, ManifestParser};

/// Parser for `setup.py` build scripts.
///
/// We do not execute the script. Instead the first `install_requires = [...]`
/// assignment is located by pattern search and its bracketed text is parsed
/// as a literal list of quoted strings. Anything that is not such a literal
/// (f-strings, variable references, arithmetic) makes the whole file yield
/// an empty list rather than an error.
pub struct SetupPyParser;

impl ManifestParser for SetupPyParser {
    fn parse(&self, text: &str) -> Vec<String> {
        let re = match Regex::new(r"install_requires\s*=\s*\[([^\]]*)\]") {
            Ok(re) => re,
            Err(_) => return Vec::new(),
        };

        let inner = match re.captures(text) {
            Some(caps) => caps.get(1).map(|m| m.as_str()).unwrap_or(""),
            None => return Vec::new(),
        };

        match parse_string_list(inner) {
            Some(items) => items
                .iter()
                .filter_map(|s| normalize_name(s))
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Parse the interior of a Python list literal containing only quoted
/// strings, commas, and whitespace. Returns `None` for anything else.
fn parse_string_list(inner: &str) -> Option<Vec<String>> {
    let mut items = Vec::new();
    let mut chars = inner.chars().peekable();
    let mut expect_item = true;

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == ',' {
            chars.next();
            expect_item = true;
        } else if c == '"' || c == '\'' {
            if !expect_item {
                return None;
            }
            let quote = c;
            chars.next();
            let mut s = String::new();
            loop {
                match chars.next() {
                    Some(ch) if ch == quote => break,
                    Some(ch) => s.push(ch),
                    None => return None, // unterminated string
                }
            }
            items.push(s);
            expect_item = false;
        } else {
            // Not a string literal: bail on the whole list
            return None;
        }
    }

    Some(items)
}
