// src/filesystem/file.rs
use super::expand_home;
use crate::error::FsError;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Name, extension and absolute path of a file, split once at construction.
///
/// The path does not have to exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileDescriptor {
    name: String,
    extension: String,
    path: PathBuf,
}

impl FileDescriptor {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, FsError> {
        let raw = path.as_ref();
        if raw.as_os_str().is_empty() {
            return Err(FsError::EmptyPath);
        }

        let path = full_path(&expand_home(raw))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        Ok(FileDescriptor { name, extension, path })
    }

    /// File name without the extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extension including the leading dot, or an empty string.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name and extension together, as they appear on disk.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.name, self.extension)
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Last modification time, if the file exists and the platform reports one.
    pub fn modified(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        let metadata = std::fs::metadata(&self.path).ok()?;
        metadata.modified().ok().map(chrono::DateTime::<chrono::Utc>::from)
    }
}

impl fmt::Display for FileDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Absolute form of `path` with `.` and `..` resolved lexically.
fn full_path(path: &Path) -> Result<PathBuf, FsError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().map_err(FsError::CurrentDir)?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}
