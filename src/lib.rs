//! float-toc: a floating table of contents for markdown editor panes.
//!
//! The host reports each document's headings as a flat list; [`tree::build`] nests them
//! into an outline, and [`registry::OutlineRegistry`] keeps one outline per pane in step
//! with pane lifecycle events and document edits.

pub mod config;
pub mod error;
pub mod formats;
pub mod frontmatter;
pub mod heading;
pub mod input;
pub mod metadata;
pub mod registry;
pub mod tree;

pub use error::{Error, Result};
