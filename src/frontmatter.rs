//! YAML front matter at the top of a markdown document.
//!
//! Only one key matters to the outline: `float-toc`. Setting it to `false` keeps the panel
//! away from the document, and setting it to `true` shows the panel even when the path sits
//! under an excluded prefix.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Front matter key that opts a document in or out of the outline.
pub const TOC_KEY: &str = "float-toc";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What a document's front matter says about showing the outline.
pub enum TocDirective {
    /// `float-toc: false`.
    OptOut,
    /// `float-toc: true`.
    OptIn,
    /// Key missing or not a boolean.
    Unset,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// Parsed front matter key/value data.
pub struct Frontmatter {
    /// Top-level keys of the YAML mapping. Empty when there is no front matter.
    #[serde(default)]
    pub values: Map<String, Value>,
    /// Number of lines occupied by the block, delimiters included.
    #[serde(default)]
    pub body_line_offset: u32,
}

impl Frontmatter {
    #[cfg(test)]
    /// Front matter holding only the outline directive.
    pub(crate) fn with_directive(show: bool) -> Self {
        let mut values = Map::new();
        values.insert(TOC_KEY.to_string(), Value::Bool(show));
        Self {
            values,
            body_line_offset: 0,
        }
    }

    #[must_use]
    /// Reads the `float-toc` flag.
    pub fn toc_directive(&self) -> TocDirective {
        match self.values.get(TOC_KEY) {
            Some(Value::Bool(false)) => TocDirective::OptOut,
            Some(Value::Bool(true)) => TocDirective::OptIn,
            _ => TocDirective::Unset,
        }
    }
}

/// Parses the front matter block at the start of `text`.
///
/// The block must open with a `---` line on the first line and close with the next `---`
/// line. A missing or unterminated block yields empty front matter. A block whose YAML is
/// not a mapping is treated as empty.
///
/// # Errors
///
/// Returns an error if the block is terminated but its YAML is malformed.
pub fn parse_frontmatter(text: &str) -> Result<Frontmatter> {
    let mut lines = text.lines();
    if lines.next().map(str::trim_end) != Some("---") {
        return Ok(Frontmatter::default());
    }

    let mut yaml = String::new();
    let mut consumed = 1u32;
    let mut closed = false;
    for line in lines {
        consumed += 1;
        if line.trim_end() == "---" {
            closed = true;
            break;
        }
        yaml.push_str(line);
        yaml.push('\n');
    }
    if !closed {
        return Ok(Frontmatter::default());
    }

    let values = if yaml.trim().is_empty() {
        Map::new()
    } else {
        match serde_yaml_ng::from_str::<Value>(&yaml)? {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    };

    Ok(Frontmatter {
        values,
        body_line_offset: consumed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_frontmatter() {
        let fm = parse_frontmatter("# Title\n\nBody").unwrap();
        assert!(fm.values.is_empty());
        assert_eq!(fm.body_line_offset, 0);
        assert_eq!(fm.toc_directive(), TocDirective::Unset);
    }

    #[test]
    fn test_directive_values() {
        let off = parse_frontmatter("---\nfloat-toc: false\n---\n# A").unwrap();
        assert_eq!(off.toc_directive(), TocDirective::OptOut);
        assert_eq!(off.body_line_offset, 3);

        let on = parse_frontmatter("---\ntags: [a, b]\nfloat-toc: true\n---\n").unwrap();
        assert_eq!(on.toc_directive(), TocDirective::OptIn);
        assert_eq!(on.body_line_offset, 4);

        let other = parse_frontmatter("---\nfloat-toc: maybe\n---\n").unwrap();
        assert_eq!(other.toc_directive(), TocDirective::Unset);
    }

    #[test]
    fn test_unterminated_block_is_ignored() {
        let fm = parse_frontmatter("---\nfloat-toc: false\n# Heading").unwrap();
        assert_eq!(fm, Frontmatter::default());
    }

    #[test]
    fn test_empty_block_still_offsets_body() {
        let fm = parse_frontmatter("---\n---\n# Heading").unwrap();
        assert!(fm.values.is_empty());
        assert_eq!(fm.body_line_offset, 2);
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        assert!(parse_frontmatter("---\nkey: [unclosed\n---\n").is_err());
    }
}
