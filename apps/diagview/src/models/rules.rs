//! Indexer rules: noise filters and keyword detectors.
//!
//! These values are fixed for one index build. They come from the
//! `[index]` section of `diagview.toml` or fall back to the defaults below,
//! which target `go build -gcflags=-m` style output.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// A labelled pair of keyword lists folded into per-file stats.
pub struct KeywordDetector {
    pub label: String,
    #[serde(default)]
    pub good: Vec<String>,
    #[serde(default)]
    pub bad: Vec<String>,
}

impl KeywordDetector {
    pub fn new(label: &str, good: &[&str], bad: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            good: good.iter().map(|s| s.to_string()).collect(),
            bad: bad.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
/// Configuration handed to `Index::build`.
pub struct IndexConfig {
    /// Lines starting with any of these are dropped before parsing.
    pub ignored_prefixes: Vec<String>,
    /// Lines containing any of these are dropped before parsing.
    pub ignored_substrings: Vec<String>,
    pub detectors: Vec<KeywordDetector>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            // `# pkg/path` banners printed once per package
            ignored_prefixes: vec!["#".to_string()],
            ignored_substrings: vec!["<autogenerated>".to_string()],
            detectors: default_detectors(),
        }
    }
}

impl IndexConfig {
    /// A configuration that keeps every line and counts nothing.
    pub fn permissive() -> Self {
        Self {
            ignored_prefixes: Vec::new(),
            ignored_substrings: Vec::new(),
            detectors: Vec::new(),
        }
    }

    /// True when `line` is dropped by the prefix or substring filters.
    pub fn is_ignored(&self, line: &[u8]) -> bool {
        if self
            .ignored_prefixes
            .iter()
            .any(|p| line.starts_with(p.as_bytes()))
        {
            return true;
        }
        self.ignored_substrings
            .iter()
            .any(|s| contains_bytes(line, s.as_bytes()))
    }
}

pub fn default_detectors() -> Vec<KeywordDetector> {
    vec![
        KeywordDetector::new("inline", &["can inline"], &["cannot inline"]),
        KeywordDetector::new(
            "escape",
            &["does not escape"],
            &["escapes to heap", "moved to heap"],
        ),
        KeywordDetector::new("bounds", &[], &["Found IsInBounds", "Found IsSliceInBounds"]),
        KeywordDetector::new("nil", &[], &["Found NilCheck"]),
    ]
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters_drop_banners_and_autogenerated() {
        let cfg = IndexConfig::default();
        assert!(cfg.is_ignored(b"# example.com/pkg"));
        assert!(cfg.is_ignored(b"<autogenerated>:1: inlining call to x"));
        assert!(!cfg.is_ignored(b"foo.go:10: escapes to heap"));
    }

    #[test]
    fn test_permissive_keeps_everything() {
        let cfg = IndexConfig::permissive();
        assert!(!cfg.is_ignored(b"# example.com/pkg"));
        assert!(cfg.detectors.is_empty());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let cfg: IndexConfig = toml::from_str(r#"ignored_prefixes = ["ok "]"#).unwrap();
        assert_eq!(cfg.ignored_prefixes, vec!["ok ".to_string()]);
        assert_eq!(cfg.ignored_substrings, vec!["<autogenerated>".to_string()]);
        assert_eq!(cfg.detectors.len(), 4);
    }
}
