// src/filesystem/find.rs
use super::expand_home;
use crate::error::FsError;
use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Any,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindOptions {
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Deepest level searched when recursive; `None` means unlimited.
    pub max_depth: Option<usize>,
    pub kind: EntryKind,
}

impl Default for FindOptions {
    fn default() -> Self {
        FindOptions { recursive: true, max_depth: None, kind: EntryKind::File }
    }
}

/// Finds entries under `root` whose file name matches the glob `pattern`
/// (for example `*.csv` or `report-??.txt`). Results are sorted by path.
pub fn find(root: impl AsRef<Path>, pattern: &str, options: &FindOptions) -> Result<Vec<PathBuf>, FsError> {
    let root = expand_home(root);
    if !root.is_dir() {
        return Err(FsError::NotFound(root));
    }

    let matcher = Pattern::new(pattern).map_err(|e| FsError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    let depth = match (options.recursive, options.max_depth) {
        (false, _) => 1,
        (true, Some(depth)) => depth,
        (true, None) => usize::MAX,
    };

    let mut found = Vec::new();
    for entry in WalkDir::new(&root).min_depth(1).max_depth(depth).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
            match e.into_io_error() {
                Some(io) => FsError::io(path, io),
                None => FsError::io(path, std::io::Error::other("filesystem loop detected")),
            }
        })?;

        let wanted = match options.kind {
            EntryKind::File => entry.file_type().is_file(),
            EntryKind::Directory => entry.file_type().is_dir(),
            EntryKind::Any => true,
        };
        if wanted && matcher.matches(&entry.file_name().to_string_lossy()) {
            found.push(entry.into_path());
        }
    }

    found.sort();
    debug!(root = %root.display(), pattern, matches = found.len(), "Find finished");
    Ok(found)
}
