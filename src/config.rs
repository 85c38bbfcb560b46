//! Configuration to acknowledge user preferences as well as set defaults.
//!
//! Specifically, we try to find a float-toc.toml, and if present we load settings from there.
//! This provides the excluded path prefixes and the file extensions to scan.

use crate::error::{Error, Result};
use facet::Facet;
use std::fs;
use std::path::Path;

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "float-toc.toml";

#[derive(Facet, Clone, Debug, PartialEq, Eq)]
/// User preferences loaded from float-toc.toml or falling back to defaults.
pub struct Config {
    #[facet(default = Vec::new())]
    /// Documents whose path starts with any of these prefixes get no outline, unless their
    /// front matter opts in.
    pub exclude_paths: Vec<String>,
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclude_paths: Vec::new(),
            file_extensions: vec!["md".to_string()],
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from float-toc.toml if present and valid.
    pub fn load() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("ignoring {CONFIG_FILE}: {err}");
                Self::default()
            }
        }
    }

    /// Load configuration from an explicit file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid configuration TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        facet_toml::from_str::<Self>(&contents).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    #[must_use]
    /// Parses the one-prefix-per-line text used by the settings editor.
    ///
    /// Lines are trimmed and blank lines dropped, since an empty prefix would exclude
    /// every document.
    pub fn parse_exclude_paths(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect()
    }

    #[must_use]
    /// Whether `path` falls under one of the excluded prefixes.
    pub fn is_excluded_path(&self, path: &str) -> bool {
        self.exclude_paths
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
