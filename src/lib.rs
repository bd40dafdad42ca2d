// src/lib.rs
//! Small utility library: file and directory helpers, a strict key/value map
//! and runtime platform detection.

pub mod collections;
pub mod error;
pub mod filesystem;
pub mod platform;

pub use collections::Map;
pub use error::{FsError, MapError, PlatformError};
pub use filesystem::{is_a_file, DirectoryRemover, FileDescriptor};
pub use platform::{current_platform, Platform, PlatformProvider};
