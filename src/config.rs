//! User configuration.
//!
//! Read from `config.toml` in the platform config directory
//! (`~/.config/permalink/config.toml` on Linux and macOS), then overridden by
//! `PERMALINK_*` environment variables. Command-line flags are applied on top
//! by the binary.
//!
//! ```toml
//! max-depth = 40
//! copy = true
//!
//! [clipboard]
//! command = "wl-copy"
//! args = ["--primary"]
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context;
use etcetera::base_strategy::{BaseStrategy, choose_base_strategy};
use serde::Deserialize;

use crate::git::{DEFAULT_MAX_DEPTH, SearchLimits};
use crate::styling::{eprintln, warning_message};

/// Config path given with `--config`
static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Set the config path from the command line. Call once, before loading.
pub fn set_config_path(path: PathBuf) {
    CONFIG_PATH.set(path).ok();
}

/// Where the user config lives: `--config`, then `PERMALINK_CONFIG_PATH`,
/// then the platform config directory.
pub fn get_config_path() -> Option<PathBuf> {
    if let Some(path) = CONFIG_PATH.get() {
        return Some(path.clone());
    }

    if let Ok(path) = std::env::var("PERMALINK_CONFIG_PATH") {
        return Some(PathBuf::from(path));
    }

    // XDG on Linux and macOS, %APPDATA% on Windows
    let strategy = choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("permalink").join("config.toml"))
}

/// Clipboard override. Without a command, a platform tool is detected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClipboardConfig {
    pub command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UserConfig {
    /// How far the published-commit search may walk from `HEAD`.
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// Copy the link to the clipboard after printing it.
    #[serde(default)]
    pub copy: Option<bool>,

    #[serde(default)]
    pub clipboard: ClipboardConfig,

    /// Captures unknown fields for warnings
    #[serde(flatten)]
    pub unknown: HashMap<String, toml::Value>,
}

impl UserConfig {
    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match get_config_path() {
            Some(path) => Self::load_from_path(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Read `path`. A missing file gives the defaults.
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        let mut unknown: Vec<_> = config.unknown.keys().collect();
        unknown.sort();
        for key in unknown {
            eprintln!(
                "{}",
                warning_message(format!(
                    "Unknown key {key} in {} will be ignored",
                    path.display()
                ))
            );
        }
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Apply `PERMALINK_MAX_DEPTH` and `PERMALINK_COPY` from `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(value) = lookup("PERMALINK_MAX_DEPTH") {
            let depth = value
                .trim()
                .parse()
                .with_context(|| format!("PERMALINK_MAX_DEPTH is not a number: {value}"))?;
            self.max_depth = Some(depth);
        }
        if let Some(value) = lookup("PERMALINK_COPY") {
            self.copy = Some(parse_bool(&value).with_context(|| {
                format!("PERMALINK_COPY must be true or false, got: {value}")
            })?);
        }
        Ok(())
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }

    pub fn copy(&self) -> bool {
        self.copy.unwrap_or(true)
    }

    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            max_depth: self.max_depth(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
