//! Flat heading records as reported by the host's metadata cache.
//!
//! A heading record is one heading occurrence in document order. Records carry the
//! document's native nesting depth (`#` is 1, `##` is 2, ...) and are immutable per
//! snapshot: when the document changes the host hands over a fresh list.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// One heading occurrence, positioned by line within its document.
pub struct HeadingRecord {
    /// Native heading depth (1 for `#`).
    pub level: u32,
    /// Zero-based line the heading starts on.
    pub line: u32,
    /// Heading text without markup symbols.
    pub title: String,
}

impl HeadingRecord {
    #[must_use]
    /// Creates a heading record.
    pub fn new(level: u32, line: u32, title: impl Into<String>) -> Self {
        Self {
            level,
            line,
            title: title.into(),
        }
    }
}
