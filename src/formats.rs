//! Heading extraction for different document formats.
//!
//! This module defines the `Format` trait which abstracts over document formats by
//! providing the tree-sitter grammar, the query that finds heading nodes, and the mapping
//! from heading marker nodes to levels. [`extract_headings`] turns a source text into the
//! flat, ordered heading list the outline is built from.

pub mod markdown;

use crate::error::{Error, Result};
use crate::heading::HeadingRecord;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// Grammar-specific knowledge needed to pull headings out of a syntax tree.
pub trait Format {
    /// Grammar used to parse the document.
    fn language(&self) -> tree_sitter::Language;
    /// Query whose captures are whole heading nodes.
    fn heading_query(&self) -> &str;
    /// Level signalled by a marker child of a heading node, if `kind` is a marker.
    fn heading_level(&self, kind: &str) -> Option<u32>;
    /// Whether a child of a heading node of this `kind` holds the heading text.
    fn is_title(&self, kind: &str) -> bool;
    /// Whether headings of this node `kind` may end with a closing `#` sequence.
    fn closes_with_hashes(&self, kind: &str) -> bool;
}

/// Extracts headings from `source` in document order.
///
/// Line numbers are zero-based and shifted by `line_offset`, which lets callers parse a
/// body that follows a stripped front matter block while still reporting document lines.
///
/// # Errors
///
/// Returns an error if the grammar or query cannot be loaded or the parser gives up.
pub fn extract_headings(
    source: &str,
    format: &impl Format,
    line_offset: u32,
) -> Result<Vec<HeadingRecord>> {
    let language = format.language();
    let mut parser = Parser::new();
    parser.set_language(&language)?;
    let tree = parser.parse(source, None).ok_or(Error::Parse)?;
    let query = Query::new(&language, format.heading_query())?;

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());
    let mut headings = Vec::new();
    while let Some(m) = matches.next() {
        for capture in m.captures {
            if let Some(heading) = heading_from_node(capture.node, source, format, line_offset)
            {
                headings.push(heading);
            }
        }
    }

    headings.sort_by_key(|h| h.line);
    headings.dedup_by_key(|h| h.line);
    Ok(headings)
}

fn heading_from_node(
    node: Node<'_>,
    source: &str,
    format: &impl Format,
    line_offset: u32,
) -> Option<HeadingRecord> {
    let mut level = None;
    let mut title = String::new();
    let strip_closing = format.closes_with_hashes(node.kind());

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = format.heading_level(child.kind()) {
            level = Some(found);
        } else if format.is_title(child.kind()) {
            if let Ok(text) = child.utf8_text(source.as_bytes()) {
                title = clean_title(text, strip_closing);
            }
        }
    }

    let row = u32::try_from(node.start_position().row).ok()?;
    Some(HeadingRecord::new(level?, row + line_offset, title))
}

/// Collapses whitespace and, when `strip_closing` is set, drops a closing `#` sequence.
fn clean_title(text: &str, strip_closing: bool) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if !strip_closing {
        return collapsed;
    }
    let stripped = collapsed.trim_end_matches('#');
    if stripped.len() != collapsed.len() && (stripped.is_empty() || stripped.ends_with(' ')) {
        stripped.trim_end().to_string()
    } else {
        collapsed
    }
}

#[cfg(test)]
#[path = "tests/formats.rs"]
mod tests;
