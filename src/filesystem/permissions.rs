// src/filesystem/permissions.rs
use crate::error::FsError;
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

/// Read/write/execute flags for owner, group and others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FilePermissions {
    pub user_read: bool,
    pub user_write: bool,
    pub user_execute: bool,
    pub group_read: bool,
    pub group_write: bool,
    pub group_execute: bool,
    pub others_read: bool,
    pub others_write: bool,
    pub others_execute: bool,
}

fn symbolic_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Optional `ls -l` type column, then three rwx triplets. s/t count as executable.
    RE.get_or_init(|| {
        Regex::new(r"^[-dlcbps]?([r-][w-][xsS-])([r-][w-][xsS-])([r-][w-][xtT-])$").expect("valid permission regex")
    })
}

fn octal_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:0o?)?([0-7]{3})$").expect("valid octal regex"))
}

impl FilePermissions {
    pub fn from_mode(mode: u32) -> Self {
        FilePermissions {
            user_read: mode & 0o400 != 0,
            user_write: mode & 0o200 != 0,
            user_execute: mode & 0o100 != 0,
            group_read: mode & 0o040 != 0,
            group_write: mode & 0o020 != 0,
            group_execute: mode & 0o010 != 0,
            others_read: mode & 0o004 != 0,
            others_write: mode & 0o002 != 0,
            others_execute: mode & 0o001 != 0,
        }
    }

    /// The nine permission bits as a Unix mode (`0o755` and so on).
    pub fn mode(&self) -> u32 {
        [
            (self.user_read, 0o400),
            (self.user_write, 0o200),
            (self.user_execute, 0o100),
            (self.group_read, 0o040),
            (self.group_write, 0o020),
            (self.group_execute, 0o010),
            (self.others_read, 0o004),
            (self.others_write, 0o002),
            (self.others_execute, 0o001),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, bit)| bit)
        .sum()
    }

    /// Parses `rwxr-xr-x`, `drwxr-x---` (as printed by `ls -l`), `755`,
    /// `0755` or `0o755`.
    pub fn parse(text: &str) -> Result<Self, FsError> {
        let text = text.trim();

        if let Some(caps) = octal_regex().captures(text) {
            let mode = u32::from_str_radix(&caps[1], 8).map_err(|_| FsError::InvalidPermissions(text.to_string()))?;
            return Ok(FilePermissions::from_mode(mode));
        }

        let caps = symbolic_regex()
            .captures(text)
            .ok_or_else(|| FsError::InvalidPermissions(text.to_string()))?;
        let triplet = |i: usize| {
            let part = caps[i].as_bytes();
            (part[0] == b'r', part[1] == b'w', matches!(part[2], b'x' | b's' | b't'))
        };

        let (user_read, user_write, user_execute) = triplet(1);
        let (group_read, group_write, group_execute) = triplet(2);
        let (others_read, others_write, others_execute) = triplet(3);
        Ok(FilePermissions {
            user_read,
            user_write,
            user_execute,
            group_read,
            group_write,
            group_execute,
            others_read,
            others_write,
            others_execute,
        })
    }

    #[cfg(unix)]
    pub fn of(path: impl AsRef<Path>) -> Result<Self, FsError> {
        use std::os::unix::fs::PermissionsExt;

        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|e| FsError::io(path, e))?;
        Ok(FilePermissions::from_mode(metadata.permissions().mode()))
    }

    #[cfg(unix)]
    pub fn apply(&self, path: impl AsRef<Path>) -> Result<(), FsError> {
        use std::os::unix::fs::PermissionsExt;

        let path = path.as_ref();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(self.mode())).map_err(|e| FsError::io(path, e))
    }
}

impl FromStr for FilePermissions {
    type Err = FsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilePermissions::parse(s)
    }
}

impl fmt::Display for FilePermissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |set: bool, c: char| if set { c } else { '-' };
        write!(
            f,
            "{}{}{}{}{}{}{}{}{}",
            flag(self.user_read, 'r'),
            flag(self.user_write, 'w'),
            flag(self.user_execute, 'x'),
            flag(self.group_read, 'r'),
            flag(self.group_write, 'w'),
            flag(self.group_execute, 'x'),
            flag(self.others_read, 'r'),
            flag(self.others_write, 'w'),
            flag(self.others_execute, 'x'),
        )
    }
}
