// src/platform/host.rs
use super::{run_tool, FormFactor, Platform, PlatformFamily, PlatformProvider};
use crate::error::PlatformError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Detects desktop systems: Linux, macOS, Windows and the BSDs.
#[derive(Debug, Clone)]
pub struct HostPlatformProvider {
    os_release: PathBuf,
}

impl Default for HostPlatformProvider {
    fn default() -> Self {
        HostPlatformProvider { os_release: PathBuf::from("/etc/os-release") }
    }
}

impl HostPlatformProvider {
    pub fn new() -> Self {
        HostPlatformProvider::default()
    }

    /// Reads the Linux release file from `path` instead of `/etc/os-release`.
    pub fn with_os_release(path: impl Into<PathBuf>) -> Self {
        HostPlatformProvider { os_release: path.into() }
    }

    async fn os_version(&self, family: PlatformFamily) -> Option<String> {
        let result = match family {
            PlatformFamily::Linux => read_os_release(&self.os_release).await,
            PlatformFamily::MacOs => run_tool("sw_vers", &["-productVersion"]).await.map(Some),
            PlatformFamily::Windows => run_tool("cmd", &["/C", "ver"]).await.map(|out| parse_windows_ver(&out)),
            PlatformFamily::FreeBsd => run_tool("uname", &["-r"]).await.map(Some),
            _ => Ok(None),
        };

        match result {
            Ok(version) => version.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!(error = %e, "Could not determine OS version");
                None
            }
        }
    }
}

#[async_trait]
impl PlatformProvider for HostPlatformProvider {
    async fn current_platform(&self) -> Result<Platform, PlatformError> {
        let family = PlatformFamily::of_target();
        let form_factor = match family {
            PlatformFamily::Windows | PlatformFamily::MacOs | PlatformFamily::Linux | PlatformFamily::FreeBsd => {
                FormFactor::Desktop
            }
            PlatformFamily::Android | PlatformFamily::Ios => {
                return Err(PlatformError::Unsupported(format!("{family:?} is not a desktop host")));
            }
            PlatformFamily::Other => FormFactor::Unknown,
        };

        let platform = Platform {
            family,
            form_factor,
            os_version: self.os_version(family).await,
            arch: std::env::consts::ARCH.to_string(),
        };
        debug!(?platform, "Detected host platform");
        Ok(platform)
    }
}

/// A missing release file is not an error; some minimal systems ship without one.
async fn read_os_release(path: &Path) -> Result<Option<String>, PlatformError> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => {
            let fields = parse_os_release(&text);
            Ok(fields
                .get("VERSION_ID")
                .or_else(|| fields.get("BUILD_ID"))
                .or_else(|| fields.get("PRETTY_NAME"))
                .cloned())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Parses `KEY=value` lines as found in `/etc/os-release`.
pub fn parse_os_release(text: &str) -> HashMap<String, String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches(|c: char| c == '"' || c == '\'');
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}

/// Pulls `10.0.22631.3155` out of `Microsoft Windows [Version 10.0.22631.3155]`.
fn parse_windows_ver(output: &str) -> Option<String> {
    let start = output.find("Version ")? + "Version ".len();
    let rest = &output[start..];
    let end = rest.find(']').unwrap_or(rest.len());
    Some(rest[..end].trim().to_string())
}
