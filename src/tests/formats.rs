use super::{clean_title, extract_headings};
use crate::formats::markdown::MarkdownFormat;
use crate::heading::HeadingRecord;

#[test]
fn test_atx_levels_and_lines() {
    let source = "# One\n\nText\n\n## Two\n\n### Three\n";
    let headings = extract_headings(source, &MarkdownFormat, 0).unwrap();

    assert_eq!(
        headings,
        vec![
            HeadingRecord::new(1, 0, "One"),
            HeadingRecord::new(2, 4, "Two"),
            HeadingRecord::new(3, 6, "Three"),
        ]
    );
}

#[test]
fn test_setext_headings() {
    let source = "Title\n=====\n\nSub\n---\n";
    let headings = extract_headings(source, &MarkdownFormat, 0).unwrap();

    assert_eq!(headings.len(), 2);
    assert_eq!((headings[0].level, headings[0].title.as_str()), (1, "Title"));
    assert_eq!((headings[1].level, headings[1].title.as_str()), (2, "Sub"));
    assert_eq!(headings[1].line, 3);
}

#[test]
fn test_code_fence_hides_hashes() {
    let source = "# Real\n\n```sh\n# comment, not a heading\n```\n\n## Also real\n";
    let headings = extract_headings(source, &MarkdownFormat, 0).unwrap();

    let titles: Vec<_> = headings.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, ["Real", "Also real"]);
}

#[test]
fn test_line_offset_is_applied() {
    let headings = extract_headings("# A\n## B\n", &MarkdownFormat, 5).unwrap();
    let lines: Vec<_> = headings.iter().map(|h| h.line).collect();
    assert_eq!(lines, [5, 6]);
}

#[test]
fn test_no_headings() {
    let headings = extract_headings("just a paragraph\n", &MarkdownFormat, 0).unwrap();
    assert!(headings.is_empty());
}

#[test]
fn test_clean_title() {
    assert_eq!(clean_title("  Spaced   out  ", true), "Spaced out");
    assert_eq!(clean_title("Closed ##", true), "Closed");
    assert_eq!(clean_title("C#", true), "C#");
    assert_eq!(clean_title("Two\nlines", true), "Two lines");
    assert_eq!(clean_title("Kept #", false), "Kept #");
}

#[test]
fn test_closing_hashes_only_stripped_from_atx() {
    let source = "## Closed ##\n\nFoo #\n===\n";
    let headings = extract_headings(source, &MarkdownFormat, 0).unwrap();

    let titles: Vec<_> = headings.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, ["Closed", "Foo #"]);
}
