//! Document discovery for the command line.
//!
//! Paths given on the command line may be files or directories. Directories are walked
//! with `ignore`, keeping files whose extension is configured.

use crate::metadata::DocumentId;
use ignore::WalkBuilder;
use std::io;
use std::path::{Path, PathBuf};

/// Directories never worth scanning for notes.
pub const SKIP_DIRS: &[&str] = &[".git", ".obsidian", ".trash", "node_modules", "target"];

/// Expands `paths` into the sorted list of documents to open.
///
/// Files named explicitly are kept whatever their extension. An empty `paths` scans the
/// working directory.
///
/// # Errors
///
/// Returns an error if a path does not exist.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    let paths = if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths
    };

    let mut documents = Vec::new();
    for path in paths {
        if path.is_file() {
            documents.push(path);
        } else if path.is_dir() {
            documents.extend(walk(&path, extensions));
        } else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file or directory: {}", path.display()),
            ));
        }
    }

    documents.sort();
    documents.dedup();
    Ok(documents)
}

fn walk(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
    WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .ignore(false)
        .parents(false)
        .filter_entry(|entry| {
            if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                if let Some(name) = entry.file_name().to_str() {
                    return !SKIP_DIRS.contains(&name);
                }
            }
            true
        })
        .build()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(ignore::DirEntry::into_path)
        .filter(|path| has_extension(path, extensions))
        .collect()
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}

#[must_use]
/// Document handle for a path, using `/` separators and no leading `./`.
pub fn document_id(path: &Path) -> DocumentId {
    let text = path.to_string_lossy().replace('\\', "/");
    DocumentId::new(text.strip_prefix("./").unwrap_or(&text))
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
