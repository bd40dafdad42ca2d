// src/platform/android.rs
use super::{run_tool, AndroidPlatform, AndroidPlatformProvider, FormFactor, Platform, PlatformFamily, PlatformProvider};
use crate::error::PlatformError;
use async_trait::async_trait;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

/// Reads Android system properties through the `getprop` tool.
#[derive(Debug, Clone)]
pub struct AndroidPropertyProvider {
    getprop: String,
}

impl Default for AndroidPropertyProvider {
    fn default() -> Self {
        AndroidPropertyProvider { getprop: "getprop".to_string() }
    }
}

impl AndroidPropertyProvider {
    pub fn new() -> Self {
        AndroidPropertyProvider::default()
    }

    /// Uses `tool` (a name on `PATH` or a full path) in place of `getprop`.
    pub fn with_getprop(tool: impl Into<String>) -> Self {
        AndroidPropertyProvider { getprop: tool.into() }
    }

    pub async fn properties(&self) -> Result<HashMap<String, String>, PlatformError> {
        let output = match run_tool(&self.getprop, &[]).await {
            Ok(output) => output,
            Err(PlatformError::ToolNotFound(tool)) => {
                return Err(PlatformError::Unsupported(format!("{tool} is not available, not an Android system")));
            }
            Err(e) => return Err(e),
        };
        Ok(parse_getprop(&output))
    }
}

#[async_trait]
impl PlatformProvider for AndroidPropertyProvider {
    async fn current_platform(&self) -> Result<Platform, PlatformError> {
        Ok(self.current_android_platform().await?.platform)
    }
}

#[async_trait]
impl AndroidPlatformProvider for AndroidPropertyProvider {
    async fn current_android_platform(&self) -> Result<AndroidPlatform, PlatformError> {
        let properties = self.properties().await?;
        let platform = android_platform_from_properties(&properties);
        debug!(?platform, "Detected Android platform");
        Ok(platform)
    }
}

fn getprop_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\[([^\]]+)\]:\s*\[(.*)\]$").expect("valid getprop regex"))
}

/// Parses `[key]: [value]` lines printed by `getprop`.
pub fn parse_getprop(output: &str) -> HashMap<String, String> {
    output
        .lines()
        .filter_map(|line| getprop_line().captures(line.trim()))
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

pub fn android_platform_from_properties(properties: &HashMap<String, String>) -> AndroidPlatform {
    let get = |key: &str| properties.get(key).filter(|v| !v.is_empty()).cloned();

    let release = get("ro.build.version.release");
    let platform = Platform {
        family: PlatformFamily::Android,
        form_factor: form_factor(get("ro.build.characteristics").as_deref()),
        os_version: release.clone(),
        arch: get("ro.product.cpu.abi").unwrap_or_else(|| std::env::consts::ARCH.to_string()),
    };

    AndroidPlatform {
        platform,
        api_level: get("ro.build.version.sdk").and_then(|sdk| sdk.parse().ok()),
        release,
        model: get("ro.product.model"),
    }
}

/// `ro.build.characteristics` is a comma list such as `tablet,nosdcard`.
fn form_factor(characteristics: Option<&str>) -> FormFactor {
    let Some(characteristics) = characteristics else {
        return FormFactor::Phone;
    };
    let has = |tag: &str| characteristics.split(',').any(|c| c.trim() == tag);

    if has("watch") {
        FormFactor::Watch
    } else if has("tv") {
        FormFactor::Tv
    } else if has("tablet") {
        FormFactor::Tablet
    } else {
        FormFactor::Phone
    }
}
