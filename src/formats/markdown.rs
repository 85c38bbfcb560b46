//! Markdown format implementation using tree-sitter-md.
//!
//! This module provides the tree-sitter query for parsing markdown documents and
//! extracting headings in both ATX (`#` prefix) and setext (underline) styles.

use crate::formats::Format;

/// Tree-sitter queries for ATX and setext markdown headings.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn heading_query(&self) -> &'static str {
        "[(atx_heading) (setext_heading)] @heading"
    }

    fn heading_level(&self, kind: &str) -> Option<u32> {
        match kind {
            "atx_h1_marker" | "setext_h1_underline" => Some(1),
            "atx_h2_marker" | "setext_h2_underline" => Some(2),
            "atx_h3_marker" => Some(3),
            "atx_h4_marker" => Some(4),
            "atx_h5_marker" => Some(5),
            "atx_h6_marker" => Some(6),
            _ => None,
        }
    }

    fn is_title(&self, kind: &str) -> bool {
        matches!(kind, "inline" | "paragraph")
    }

    fn closes_with_hashes(&self, kind: &str) -> bool {
        kind == "atx_heading"
    }
}
