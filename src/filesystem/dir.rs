// src/filesystem/dir.rs
use crate::error::FsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What a batch deletion does after one directory fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Attempt every directory and report all failures.
    #[default]
    ContinueOnError,
    /// Stop at the first failure. Earlier deletions are not rolled back.
    StopOnFirstError,
}

/// Deletion settings, loadable from JSON.
///
/// ```
/// let options = utilkit::filesystem::DeleteOptions::from_json(r#"{"empty_only": true}"#).unwrap();
/// assert!(options.empty_only);
/// assert!(!options.also_delete_parent);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteOptions {
    /// Only remove directories without entries instead of removing recursively.
    pub empty_only: bool,
    /// Also remove the parent of each deleted directory, under the same policy.
    pub also_delete_parent: bool,
    pub batch_policy: BatchPolicy,
}

impl DeleteOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Outcome of a batch deletion.
#[derive(Debug, Default)]
pub struct DeletionReport {
    /// Every directory actually removed, parents included, in removal order.
    pub deleted: Vec<PathBuf>,
    /// Requested paths that failed, with the reason.
    pub failed: Vec<(PathBuf, FsError)>,
}

impl DeletionReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&Path) + Send + Sync>;

/// Deletes directories and tells subscribers about every directory removed.
///
/// Subscribers run synchronously, in subscription order, before the deleting
/// call returns.
#[derive(Default)]
pub struct DirectoryRemover {
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl fmt::Debug for DirectoryRemover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryRemover")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl DirectoryRemover {
    pub fn new() -> Self {
        DirectoryRemover::default()
    }

    pub fn subscribe(&mut self, callback: impl Fn(&Path) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    pub fn try_delete_directory(&self, path: impl AsRef<Path>, empty_only: bool, also_delete_parent: bool) -> bool {
        let path = path.as_ref();
        match self.delete_directory(path, empty_only, also_delete_parent) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Directory deletion failed");
                false
            }
        }
    }

    /// In `empty_only` mode a parent that still has other entries is left alone.
    pub fn delete_directory(&self, path: impl AsRef<Path>, empty_only: bool, also_delete_parent: bool) -> Result<(), FsError> {
        let mut removed = Vec::new();
        self.delete_tracked(path.as_ref(), empty_only, also_delete_parent, &mut removed)
    }

    pub fn delete_with(&self, path: impl AsRef<Path>, options: &DeleteOptions) -> Result<(), FsError> {
        self.delete_directory(path, options.empty_only, options.also_delete_parent)
    }

    pub fn delete_parent_directory(&self, path: impl AsRef<Path>, empty_only: bool) -> Result<(), FsError> {
        let parent = parent_of(path.as_ref())?;
        self.remove_one(&parent, empty_only)
    }

    pub fn delete_directories<I>(&self, paths: I, empty_only: bool, also_delete_parent: bool) -> DeletionReport
    where
        I: IntoIterator,
        I::Item: AsRef<Path>,
    {
        let options = DeleteOptions {
            empty_only,
            also_delete_parent,
            batch_policy: BatchPolicy::ContinueOnError,
        };
        self.delete_all_with(paths, &options)
    }

    pub fn delete_all_with<I>(&self, paths: I, options: &DeleteOptions) -> DeletionReport
    where
        I: IntoIterator,
        I::Item: AsRef<Path>,
    {
        let mut report = DeletionReport::default();

        for path in paths {
            let path = path.as_ref();
            if let Err(e) = self.delete_tracked(path, options.empty_only, options.also_delete_parent, &mut report.deleted) {
                warn!(path = %path.display(), error = %e, "Directory deletion failed");
                report.failed.push((path.to_path_buf(), e));
                if options.batch_policy == BatchPolicy::StopOnFirstError {
                    break;
                }
            }
        }

        debug!(deleted = report.deleted.len(), failed = report.failed.len(), "Batch deletion finished");
        report
    }

    fn delete_tracked(&self, path: &Path, empty_only: bool, also_delete_parent: bool, removed: &mut Vec<PathBuf>) -> Result<(), FsError> {
        let parent = if also_delete_parent { Some(parent_of(path)?) } else { None };

        self.remove_one(path, empty_only)?;
        removed.push(path.to_path_buf());

        let Some(parent) = parent else {
            return Ok(());
        };
        match self.remove_one(&parent, empty_only) {
            Ok(()) => {
                removed.push(parent);
                Ok(())
            }
            Err(FsError::DirectoryNotEmpty(parent)) => {
                debug!(parent = %parent.display(), "Parent directory not empty, keeping it");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn remove_one(&self, path: &Path, empty_only: bool) -> Result<(), FsError> {
        let metadata = fs::symlink_metadata(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            _ => FsError::io(path, e),
        })?;
        if !metadata.is_dir() {
            return Err(FsError::NotADirectory(path.to_path_buf()));
        }

        let result = if empty_only {
            if !is_empty_dir(path)? {
                return Err(FsError::DirectoryNotEmpty(path.to_path_buf()));
            }
            fs::remove_dir(path)
        } else {
            fs::remove_dir_all(path)
        };
        result.map_err(|e| FsError::io(path, e))?;

        debug!(path = %path.display(), "Deleted directory");
        for (_, subscriber) in &self.subscribers {
            subscriber(path);
        }
        Ok(())
    }
}

fn is_empty_dir(path: &Path) -> Result<bool, FsError> {
    let mut entries = fs::read_dir(path).map_err(|e| FsError::io(path, e))?;
    Ok(entries.next().is_none())
}

fn parent_of(path: &Path) -> Result<PathBuf, FsError> {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .ok_or_else(|| FsError::NoParent(path.to_path_buf()))
}
