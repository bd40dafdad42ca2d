// src/platform/mod.rs
//! Detection of the operating system and device family the program runs on.
//!
//! Each supported family has a [`PlatformProvider`]: [`HostPlatformProvider`]
//! for desktop systems and [`AndroidPropertyProvider`] for Android, which also
//! implements [`AndroidPlatformProvider`]. [`current_platform`] picks the one
//! matching the compile target.

pub mod android;
pub mod host;

pub use android::AndroidPropertyProvider;
pub use host::HostPlatformProvider;

use crate::error::PlatformError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformFamily {
    Windows,
    MacOs,
    Linux,
    Android,
    Ios,
    FreeBsd,
    Other,
}

impl PlatformFamily {
    /// The family this binary was compiled for.
    pub fn of_target() -> Self {
        PlatformFamily::from_os_name(std::env::consts::OS)
    }

    /// Maps a `std::env::consts::OS` style name.
    pub fn from_os_name(os: &str) -> Self {
        match os {
            "windows" => PlatformFamily::Windows,
            "macos" => PlatformFamily::MacOs,
            "linux" => PlatformFamily::Linux,
            "android" => PlatformFamily::Android,
            "ios" => PlatformFamily::Ios,
            "freebsd" => PlatformFamily::FreeBsd,
            _ => PlatformFamily::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormFactor {
    Desktop,
    Phone,
    Tablet,
    Tv,
    Watch,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub family: PlatformFamily,
    pub form_factor: FormFactor,
    /// Version as reported by the system, e.g. `22.04` or `14.4.1`.
    pub os_version: Option<String>,
    pub arch: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndroidPlatform {
    pub platform: Platform,
    /// SDK level from `ro.build.version.sdk`.
    pub api_level: Option<u32>,
    /// User-visible release from `ro.build.version.release`, e.g. `14`.
    pub release: Option<String>,
    pub model: Option<String>,
}

#[async_trait]
pub trait PlatformProvider: Send + Sync {
    async fn current_platform(&self) -> Result<Platform, PlatformError>;
}

#[async_trait]
pub trait AndroidPlatformProvider: PlatformProvider {
    async fn current_android_platform(&self) -> Result<AndroidPlatform, PlatformError>;
}

/// The provider for the family this binary was compiled for.
pub fn provider_for_target() -> Box<dyn PlatformProvider> {
    match PlatformFamily::of_target() {
        PlatformFamily::Android => Box::new(AndroidPropertyProvider::new()),
        _ => Box::new(HostPlatformProvider::new()),
    }
}

pub async fn current_platform() -> Result<Platform, PlatformError> {
    provider_for_target().current_platform().await
}

/// Runs `tool` found on `PATH` (or at an explicit path) and returns its trimmed stdout.
pub(crate) async fn run_tool(tool: &str, args: &[&str]) -> Result<String, PlatformError> {
    let program = which::which(tool).map_err(|_| PlatformError::ToolNotFound(tool.to_string()))?;
    let output = Command::new(&program).args(args).output().await?;

    if !output.status.success() {
        return Err(PlatformError::CommandFailed {
            command: tool.to_string(),
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
