//! Path → URL lookup table and its file formats.
//!
//! YAML and JSON files hold a list of entries:
//!
//! ```yaml
//! - path: /some-path
//!   url: https://www.some-url.com/demo
//! ```
//!
//! TOML files use an array of `[[redirect]]` tables with the same keys.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RedirectError;

/// One path → URL entry as it appears in a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PathUrl {
    path: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct TomlPathFile {
    #[serde(default)]
    redirect: Vec<PathUrl>,
}

/// Redirects shipped with the server, used beneath any loaded file.
const DEFAULT_REDIRECTS: &[(&str, &str)] = &[
    (
        "/urlshort-godoc",
        "https://godoc.org/github.com/gophercises/urlshort",
    ),
    ("/yaml-godoc", "https://godoc.org/gopkg.in/yaml.v2"),
];

/// A lookup table from request path to destination URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMap {
    entries: HashMap<String, String>,
}

impl PathMap {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// The built-in redirects.
    pub fn defaults() -> Self {
        DEFAULT_REDIRECTS
            .iter()
            .map(|(path, url)| (path.to_string(), url.to_string()))
            .collect()
    }

    /// Parse a YAML list of `path`/`url` entries.
    pub fn from_yaml(content: &str) -> Result<Self, RedirectError> {
        let entries: Vec<PathUrl> = serde_yaml::from_str(content)?;
        Ok(Self::from_entries(entries))
    }

    /// Parse a JSON array of `path`/`url` objects.
    pub fn from_json(content: &str) -> Result<Self, RedirectError> {
        let entries: Vec<PathUrl> = serde_json::from_str(content)?;
        Ok(Self::from_entries(entries))
    }

    /// Parse `[[redirect]]` tables.
    pub fn from_toml(content: &str) -> Result<Self, RedirectError> {
        let file: TomlPathFile = toml::from_str(content)?;
        Ok(Self::from_entries(file.redirect))
    }

    /// Load a path map, picking the format from the file extension.
    pub fn from_file(path: &Path) -> Result<Self, RedirectError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        let parse: fn(&str) -> Result<Self, RedirectError> = match ext.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml,
            Some("json") => Self::from_json,
            Some("toml") => Self::from_toml,
            _ => {
                return Err(RedirectError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let content = std::fs::read_to_string(path).map_err(|source| RedirectError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let map = parse(&content)?;
        tracing::debug!("loaded {} redirect(s) from {}", map.len(), path.display());
        Ok(map)
    }

    // Later entries for the same path win.
    fn from_entries(entries: Vec<PathUrl>) -> Self {
        entries.into_iter().map(|e| (e.path, e.url)).collect()
    }

    /// Destination for a request path, if mapped.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    /// Layer `other` on top of `self`; entries in `other` take precedence.
    pub fn overlay(mut self, other: PathMap) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for PathMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
- path: /urlshort
  url: https://github.com/gophercises/urlshort
- path: /urlshort-final
  url: https://github.com/gophercises/urlshort/tree/solution
"#;

    const JSON: &str = r#"[
  {"path": "/rust", "url": "https://www.rust-lang.org"},
  {"path": "/docs", "url": "https://docs.rs"}
]"#;

    const TOML: &str = r#"
[[redirect]]
path = "/crates"
url = "https://crates.io"
"#;

    #[test]
    fn parse_yaml() {
        let map = PathMap::from_yaml(YAML).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(
            map.lookup("/urlshort"),
            Some("https://github.com/gophercises/urlshort")
        );
        assert_eq!(map.lookup("/missing"), None);
    }

    #[test]
    fn parse_json() {
        let map = PathMap::from_json(JSON).unwrap();
        assert_eq!(map.lookup("/docs"), Some("https://docs.rs"));
    }

    #[test]
    fn parse_toml() {
        let map = PathMap::from_toml(TOML).unwrap();
        assert_eq!(map.lookup("/crates"), Some("https://crates.io"));
        assert!(PathMap::from_toml("").unwrap().is_empty());
    }

    #[test]
    fn invalid_input_is_an_error() {
        assert!(matches!(
            PathMap::from_json("{not json"),
            Err(RedirectError::Json(_))
        ));
        assert!(matches!(
            PathMap::from_yaml("- path: [unclosed"),
            Err(RedirectError::Yaml(_))
        ));
        assert!(matches!(
            PathMap::from_yaml("- path: /only-path"),
            Err(RedirectError::Yaml(_))
        ));
    }

    #[test]
    fn later_duplicates_win() {
        let map = PathMap::from_json(
            r#"[{"path":"/a","url":"https://one"},{"path":"/a","url":"https://two"}]"#,
        )
        .unwrap();
        assert_eq!(map.lookup("/a"), Some("https://two"));
    }

    #[test]
    fn overlay_prefers_top_layer() {
        let top = PathMap::from_json(r#"[{"path":"/yaml-godoc","url":"https://yaml.org"}]"#)
            .unwrap();
        let map = PathMap::defaults().overlay(top);
        assert_eq!(map.lookup("/yaml-godoc"), Some("https://yaml.org"));
        assert_eq!(
            map.lookup("/urlshort-godoc"),
            Some("https://godoc.org/github.com/gophercises/urlshort")
        );
    }

    #[test]
    fn from_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("paths.yml");
        let json = dir.path().join("paths.JSON");
        std::fs::write(&yaml, YAML).unwrap();
        std::fs::write(&json, JSON).unwrap();

        assert_eq!(PathMap::from_file(&yaml).unwrap().len(), 2);
        assert_eq!(PathMap::from_file(&json).unwrap().len(), 2);

        let txt = dir.path().join("paths.txt");
        std::fs::write(&txt, "").unwrap();
        assert!(matches!(
            PathMap::from_file(&txt),
            Err(RedirectError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            PathMap::from_file(&dir.path().join("missing.yaml")),
            Err(RedirectError::Read { .. })
        ));
    }
}
