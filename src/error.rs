//! Errors raised while loading configuration and documents.
//!
//! Building outlines and registry bookkeeping never fail; only the edges that touch the
//! filesystem or parse text do.

use std::path::PathBuf;

/// Failures from configuration, front matter, and heading extraction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML for [`crate::config::Config`].
    #[error("invalid configuration in {path}: {message}")]
    Config {
        /// Configuration file that failed.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
    /// The front matter block is not valid YAML.
    #[error("failed to parse front matter: {0}")]
    Frontmatter(#[from] serde_yaml_ng::Error),
    /// The tree-sitter grammar could not be loaded.
    #[error("failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    /// A heading query does not compile against its grammar.
    #[error("invalid heading query: {0}")]
    Query(#[from] tree_sitter::QueryError),
    /// The parser produced no tree.
    #[error("failed to parse document")]
    Parse,
}

/// Result alias for fallible loading operations.
pub type Result<T> = std::result::Result<T, Error>;
