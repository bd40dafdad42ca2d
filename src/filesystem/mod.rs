// src/filesystem/mod.rs
pub mod concat;
pub mod dir;
pub mod file;
pub mod find;
pub mod permissions;

pub use concat::{concat_files, concat_to_string};
pub use dir::{BatchPolicy, DeleteOptions, DeletionReport, DirectoryRemover, SubscriptionId};
pub use file::FileDescriptor;
pub use find::{find, EntryKind, FindOptions};
pub use permissions::FilePermissions;

use std::path::{Path, PathBuf};

/// Best-effort guess whether `path` names a file.
///
/// True when the path exists as a file. Paths that do not exist yet are
/// classified by a dot among the 2nd, 3rd or 4th character from the end,
/// so `"out/report.csv"` counts as a file while `"out/reports"` does not.
/// Strings of one character or less rely on existence alone. Never fails:
/// anything that prevents the check yields `false`.
pub fn is_a_file(path: &str) -> bool {
    if file_exists(path) {
        return true;
    }

    if path.chars().count() <= 1 {
        return false;
    }

    path.chars().rev().skip(1).take(3).any(|c| c == '.')
}

pub fn file_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_file()
}

pub fn directory_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_dir()
}

/// Resolves a leading `~` to the user's home directory. Other paths, and
/// `~` when no home directory is known, are returned unchanged.
pub fn expand_home(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_is_a_file_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("existing_file");
        fs::write(&file, "data").unwrap();

        assert!(is_a_file(file.to_str().unwrap()));
    }

    #[test]
    fn test_is_a_file_dot_heuristic() {
        assert!(is_a_file("nonexistent/path/with.dot"));
        assert!(is_a_file("nonexistent/report.csv"));
        assert!(is_a_file("nonexistent/a.rs"));
        assert!(!is_a_file("noextensionnodot"));
        assert!(!is_a_file("nonexistent/archive.tar.json5x"));
    }

    #[test]
    fn test_is_a_file_ignores_trailing_dot() {
        // The last character is never inspected.
        assert!(!is_a_file("nonexistent/trailing."));
    }

    #[test]
    fn test_is_a_file_short_strings() {
        assert!(!is_a_file(""));
        assert!(!is_a_file("."));
        assert!(is_a_file(".x"));
    }

    #[test]
    fn test_is_a_file_existing_directory_without_dot() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("plainfolder");
        fs::create_dir(&sub).unwrap();

        assert!(!is_a_file(sub.to_str().unwrap()));
    }

    #[test]
    fn test_existence_checks() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "").unwrap();

        assert!(file_exists(&file));
        assert!(!directory_exists(&file));
        assert!(directory_exists(dir.path()));
        assert!(!file_exists(dir.path()));
        assert!(!file_exists(dir.path().join("missing.txt")));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/etc/hosts"), PathBuf::from("/etc/hosts"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/notes.md"), home.join("notes.md"));
            assert_eq!(expand_home("~"), home);
        }
    }
}
