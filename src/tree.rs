//! Heading tree construction for the floating outline.
//!
//! The host reports headings as a flat list in document order. [`build`] nests them by
//! level in a single left-to-right pass. Documents are not always well formed, so the
//! builder is tolerant in two specific ways:
//!
//! - A jump to a deeper level nests exactly one step, however large the jump. `#` followed
//!   by `####` makes the `####` node a direct child of the `#` node.
//! - A jump back to a level shallower than every open ancestor while at the top level
//!   starts a new top-level sibling instead of being rejected.
//!
//! The shallowest level present is normalised to depth 1, so a document whose headings all
//! start at `###` renders the same as one starting at `#`.

use crate::heading::HeadingRecord;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Title carried by the synthetic root node.
pub const ROOT_TITLE: &str = "root";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// A node of the outline. The root is synthetic and never displayed.
pub struct TreeNode {
    /// Normalised heading level (0 for the root, 1 for the shallowest level present).
    pub level: u32,
    /// Zero-based line of the heading in its document.
    pub line: u32,
    /// Heading text.
    pub title: String,
    /// Nested headings in document order.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    #[must_use]
    /// Creates a childless node.
    pub fn new(level: u32, line: u32, title: impl Into<String>) -> Self {
        Self {
            level,
            line,
            title: title.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    /// The synthetic root: level 0, line 0, titled `"root"`.
    pub fn root() -> Self {
        Self::new(0, 0, ROOT_TITLE)
    }

    #[must_use]
    /// Number of nodes below this one.
    pub fn len(&self) -> usize {
        self.children.iter().map(|c| 1 + c.len()).sum()
    }

    #[must_use]
    /// Whether this node has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    /// Number of nesting steps below this node (0 for a leaf).
    pub fn depth(&self) -> usize {
        self.children.iter().map(|c| 1 + c.depth()).max().unwrap_or(0)
    }

    #[must_use]
    /// Pre-order walk over the descendants, yielding each node with its tree depth.
    ///
    /// Direct children have depth 1. The node itself is not yielded.
    pub fn iter(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().map(|c| (c, 1)).collect(),
        }
    }

    #[must_use]
    /// The heading whose section contains `line`.
    ///
    /// Pre-order matches document order, so this is the last node starting at or before
    /// `line`. Returns `None` when `line` precedes every heading.
    pub fn find_line(&self, line: u32) -> Option<&TreeNode> {
        self.iter()
            .map(|(node, _)| node)
            .take_while(|node| node.line <= line)
            .last()
    }

    #[must_use]
    /// Draws the descendants as an indented box-drawing outline, one heading per line.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        render_children(&self.children, &mut Vec::new(), &mut out);
        out
    }
}

fn render_children(children: &[TreeNode], open: &mut Vec<bool>, out: &mut String) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i + 1 == children.len();
        for continues in open.iter().copied() {
            out.push_str(if continues { "│   " } else { "    " });
        }
        out.push_str(if is_last { "└── " } else { "├── " });
        let _ = writeln!(out, "{} [{}]", child.title, child.line + 1);

        open.push(!is_last);
        render_children(&child.children, open, out);
        open.pop();
    }
}

/// Pre-order iterator returned by [`TreeNode::iter`].
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<(&'a TreeNode, usize)>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (&'a TreeNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|c| (c, depth + 1)));
        Some((node, depth))
    }
}

#[must_use]
/// Builds the outline tree for a document's headings.
///
/// `headings` must be in document order; this is the host's guarantee and is not checked.
/// The function is pure: rebuilding from the same list gives an equal tree.
pub fn build(headings: &[HeadingRecord]) -> TreeNode {
    let level_offset = headings
        .iter()
        .map(|h| h.level)
        .min()
        .map_or(0, |min| min.saturating_sub(1));

    let mut root = TreeNode::root();
    build_frame(headings, 0, &mut root, true, level_offset);
    root
}

/// Attaches headings from `start` under `parent` and returns the index of the first
/// heading this frame did not consume.
fn build_frame(
    headings: &[HeadingRecord],
    start: usize,
    parent: &mut TreeNode,
    top_level: bool,
    level_offset: u32,
) -> usize {
    let mut current_level: Option<u32> = None;
    let mut index = start;

    while let Some(heading) = headings.get(index) {
        let level = heading.level.saturating_sub(level_offset);
        match current_level {
            Some(current) if level > current => {
                // A sibling exists whenever current_level is set.
                let Some(last) = parent.children.last_mut() else {
                    break;
                };
                index = build_frame(headings, index, last, false, level_offset);
            }
            Some(current) if level < current && !top_level => break,
            _ => {
                parent
                    .children
                    .push(TreeNode::new(level, heading.line, heading.title.clone()));
                current_level = Some(level);
                index += 1;
            }
        }
    }

    index
}

#[cfg(test)]
#[path = "tests/tree.rs"]
mod tests;
