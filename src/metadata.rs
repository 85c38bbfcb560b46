//! Handles and per-document metadata supplied by the host.
//!
//! The host owns documents and panes; the outline only ever sees opaque handles to them
//! and a metadata cache that answers "what are this document's headings and front matter
//! right now".

use crate::error::{Error, Result};
use crate::formats::{extract_headings, Format};
use crate::frontmatter::{parse_frontmatter, Frontmatter};
use crate::heading::HeadingRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
/// Opaque handle to one editor pane.
pub struct PaneId(pub u64);

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pane#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
/// Handle to one document, identified by its vault-relative path.
pub struct DocumentId(String);

impl DocumentId {
    #[must_use]
    /// Wraps a document path.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[must_use]
    /// Path used for exclusion prefix matching.
    pub fn path(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// Snapshot of what the metadata cache knows about a document.
pub struct DocumentMetadata {
    /// Headings in document order.
    #[serde(default)]
    pub headings: Vec<HeadingRecord>,
    /// Front matter key/value data.
    #[serde(default)]
    pub frontmatter: Frontmatter,
}

impl DocumentMetadata {
    #[must_use]
    /// Metadata with headings and no front matter.
    pub fn from_headings(headings: Vec<HeadingRecord>) -> Self {
        Self {
            headings,
            frontmatter: Frontmatter::default(),
        }
    }

    /// Parses a document's text into headings and front matter.
    ///
    /// Headings are located in the body after the front matter block, but their line
    /// numbers refer to the whole document.
    ///
    /// # Errors
    ///
    /// Returns an error if the front matter is malformed or heading extraction fails.
    pub fn parse(text: &str, format: &impl Format) -> Result<Self> {
        let frontmatter = parse_frontmatter(text)?;
        let body = skip_lines(text, frontmatter.body_line_offset);
        let headings = extract_headings(body, format, frontmatter.body_line_offset)?;
        Ok(Self {
            headings,
            frontmatter,
        })
    }
}

fn skip_lines(text: &str, count: u32) -> &str {
    let mut rest = text;
    for _ in 0..count {
        match rest.find('\n') {
            Some(newline) => rest = &rest[newline + 1..],
            None => return "",
        }
    }
    rest
}

/// Reads and parses a document from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_document(path: &Path, format: &impl Format) -> Result<DocumentMetadata> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    DocumentMetadata::parse(&text, format)
}

/// Read access to the host's metadata cache.
pub trait MetadataSource {
    /// Current metadata for `document`, if the host has any.
    fn metadata(&self, document: &DocumentId) -> Option<&DocumentMetadata>;
}

/// Write access for hosts that push metadata updates into the source.
pub trait MetadataSink {
    /// Replaces the metadata stored for `document`.
    fn update(&mut self, document: DocumentId, metadata: DocumentMetadata);
}

#[derive(Debug, Default)]
/// In-memory metadata cache keyed by document.
pub struct MetadataCache {
    entries: HashMap<DocumentId, DocumentMetadata>,
}

impl MetadataCache {
    #[must_use]
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores metadata for a document, returning what it replaces.
    pub fn insert(
        &mut self,
        document: DocumentId,
        metadata: DocumentMetadata,
    ) -> Option<DocumentMetadata> {
        self.entries.insert(document, metadata)
    }

    /// Forgets a document.
    pub fn remove(&mut self, document: &DocumentId) -> Option<DocumentMetadata> {
        self.entries.remove(document)
    }

    #[must_use]
    /// Number of cached documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MetadataSource for MetadataCache {
    fn metadata(&self, document: &DocumentId) -> Option<&DocumentMetadata> {
        self.entries.get(document)
    }
}

impl MetadataSink for MetadataCache {
    fn update(&mut self, document: DocumentId, metadata: DocumentMetadata) {
        self.entries.insert(document, metadata);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::markdown::MarkdownFormat;
    use crate::frontmatter::TocDirective;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_skips_frontmatter_but_keeps_document_lines() {
        let text = "---\nfloat-toc: true\n---\n# Title\n\n## Part\n";
        let metadata = DocumentMetadata::parse(text, &MarkdownFormat).unwrap();

        assert_eq!(metadata.frontmatter.toc_directive(), TocDirective::OptIn);
        assert_eq!(
            metadata.headings,
            vec![
                HeadingRecord::new(1, 3, "Title"),
                HeadingRecord::new(2, 5, "Part"),
            ]
        );
    }

    #[test]
    fn test_skip_lines() {
        assert_eq!(skip_lines("a\nb\nc", 0), "a\nb\nc");
        assert_eq!(skip_lines("a\nb\nc", 2), "c");
        assert_eq!(skip_lines("a\nb", 5), "");
    }

    #[test]
    fn test_load_document_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# Hello\n\n## World").unwrap();

        let metadata = load_document(file.path(), &MarkdownFormat).unwrap();
        assert_eq!(metadata.headings.len(), 2);
        assert_eq!(metadata.headings[1].line, 2);
    }

    #[test]
    fn test_metadata_from_json_defaults_missing_parts() {
        let metadata: DocumentMetadata = serde_json::from_str(
            r#"{"headings": [{"level": 2, "line": 4, "title": "Usage"}]}"#,
        )
        .unwrap();
        assert_eq!(metadata.headings, vec![HeadingRecord::new(2, 4, "Usage")]);
        assert_eq!(metadata.frontmatter, Frontmatter::default());

        let opted_out: DocumentMetadata =
            serde_json::from_str(r#"{"frontmatter": {"values": {"float-toc": false}}}"#).unwrap();
        assert_eq!(opted_out.frontmatter.toc_directive(), TocDirective::OptOut);
    }

    #[test]
    fn test_cache_round_trip() {
        let mut cache = MetadataCache::new();
        let doc = DocumentId::new("notes/a.md");
        assert!(cache.metadata(&doc).is_none());

        cache.insert(doc.clone(), DocumentMetadata::default());
        assert!(cache.metadata(&doc).is_some());
        assert_eq!(cache.len(), 1);

        cache.remove(&doc);
        assert!(cache.is_empty());
    }
}
