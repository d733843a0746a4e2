//! # Style Configuration
//!
//! Settings for loading and applying stylesheets, read from code, environment
//! variables or a TOML file.
//!
//! ## Environment Variables
//!
//! - `SWATCH_STYLESHEET`: name of the stylesheet used when nothing else resolves
//! - `SWATCH_STYLESHEET_FILE`: file name of the writable stylesheet copy
//! - `SWATCH_CACHE_DIR`: directory holding the writable copy
//! - `SWATCH_MEMO_TTL_MS`: memo window of JSON stylesheets, in milliseconds
//! - `SWATCH_DIAGNOSTICS`: `1`/`true` to flag components with unknown style names
//! - `SWATCH_STYLE_CONFIG`: TOML file loaded before the variables above
//!
//! ## Configuration File Format
//!
//! ```toml
//! [style]
//! default_stylesheet = "Default"
//! stylesheet_file = "stylesheet.json"
//! cache_dir = "/var/cache/app"
//! memo_ttl_ms = 2500
//! diagnostics = false
//! unresolved_properties = "skip"
//! ```
//!
//! Every key is optional.
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//! use swatch_theme::config::StyleConfig;
//!
//! let config = StyleConfig::new()
//!     .with_default_stylesheet("Dark")
//!     .with_memo_ttl(Duration::from_secs(2));
//!
//! assert_eq!(config.default_stylesheet.as_deref(), Some("Dark"));
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{StyleError, StyleResult};
use crate::json::UnresolvedPolicy;
use crate::source::DEFAULT_MEMO_TTL;

/// Default file name of the writable stylesheet copy.
pub const DEFAULT_STYLESHEET_FILE: &str = "stylesheet.json";

/// Settings for stylesheet loading and application.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    /// Stylesheet used when a component has none and no theme is active.
    pub default_stylesheet: Option<String>,
    /// File name of the writable stylesheet copy.
    pub stylesheet_file: String,
    /// Directory of the writable copy. [None] uses the per-user cache directory.
    pub cache_dir: Option<PathBuf>,
    /// Memo window of JSON stylesheets.
    pub memo_ttl: Duration,
    /// Whether components with unknown style names are flagged.
    pub diagnostics: bool,
    /// What happens to document properties no binding resolves.
    pub unresolved_policy: UnresolvedPolicy,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    style: StyleSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StyleSection {
    default_stylesheet: Option<String>,
    stylesheet_file: Option<String>,
    cache_dir: Option<PathBuf>,
    memo_ttl_ms: Option<u64>,
    diagnostics: Option<bool>,
    unresolved_properties: Option<UnresolvedPolicy>,
}

impl StyleConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self {
            default_stylesheet: None,
            stylesheet_file: DEFAULT_STYLESHEET_FILE.to_string(),
            cache_dir: None,
            memo_ttl: DEFAULT_MEMO_TTL,
            diagnostics: false,
            unresolved_policy: UnresolvedPolicy::Fail,
        }
    }

    /// Create a configuration from the environment, falling back to defaults.
    ///
    /// A file named by `SWATCH_STYLE_CONFIG` is read first; the other variables
    /// override what it sets. Unparseable values are ignored with a warning.
    pub fn from_env_or_default() -> Self {
        let mut config = Self::new();

        if let Ok(path) = env::var("SWATCH_STYLE_CONFIG") {
            match Self::from_file(&path) {
                Ok(file_config) => config = file_config,
                Err(e) => log::warn!("Ignoring style config: {}", e),
            }
        }

        if let Ok(name) = env::var("SWATCH_STYLESHEET") {
            config.default_stylesheet = Some(name);
        }
        if let Ok(file) = env::var("SWATCH_STYLESHEET_FILE") {
            config.stylesheet_file = file;
        }
        if let Ok(dir) = env::var("SWATCH_CACHE_DIR") {
            config.cache_dir = Some(PathBuf::from(dir));
        }
        if let Ok(ttl) = env::var("SWATCH_MEMO_TTL_MS") {
            match ttl.trim().parse::<u64>() {
                Ok(ms) => config.memo_ttl = Duration::from_millis(ms),
                Err(_) => log::warn!("Ignoring SWATCH_MEMO_TTL_MS={:?}: not a number", ttl),
            }
        }
        if let Ok(flag) = env::var("SWATCH_DIAGNOSTICS") {
            config.diagnostics = parse_flag(&flag);
        }

        config
    }

    /// Load a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> StyleResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::parse_toml(&content).map_err(|details| StyleError::config_parse(path, details))
    }

    /// Load a configuration from TOML content.
    pub fn from_toml(content: &str) -> StyleResult<Self> {
        Self::parse_toml(content).map_err(|details| StyleError::config_parse("<inline>", details))
    }

    fn parse_toml(content: &str) -> Result<Self, String> {
        let file: ConfigFile = toml::from_str(content).map_err(|e| e.to_string())?;
        let section = file.style;
        let defaults = Self::new();

        Ok(Self {
            default_stylesheet: section.default_stylesheet,
            stylesheet_file: section.stylesheet_file.unwrap_or(defaults.stylesheet_file),
            cache_dir: section.cache_dir,
            memo_ttl: section
                .memo_ttl_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.memo_ttl),
            diagnostics: section.diagnostics.unwrap_or(defaults.diagnostics),
            unresolved_policy: section
                .unresolved_properties
                .unwrap_or(defaults.unresolved_policy),
        })
    }

    /// Set the stylesheet used when nothing else resolves.
    pub fn with_default_stylesheet(mut self, name: impl Into<String>) -> Self {
        self.default_stylesheet = Some(name.into());
        self
    }

    /// Set the file name of the writable stylesheet copy.
    pub fn with_stylesheet_file(mut self, file: impl Into<String>) -> Self {
        self.stylesheet_file = file.into();
        self
    }

    /// Set the directory of the writable stylesheet copy.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Set the memo window of JSON stylesheets.
    pub fn with_memo_ttl(mut self, ttl: Duration) -> Self {
        self.memo_ttl = ttl;
        self
    }

    /// Enable or disable flagging of unknown style names.
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// Set what happens to document properties no binding resolves.
    pub fn with_unresolved_policy(mut self, policy: UnresolvedPolicy) -> Self {
        self.unresolved_policy = policy;
        self
    }

    /// Overlay the explicitly set values of `other` onto this configuration.
    ///
    /// Optional settings are taken from `other` when it has them; the rest are
    /// taken from `other` when they differ from the defaults.
    pub fn merge(mut self, other: StyleConfig) -> Self {
        let defaults = Self::new();
        if other.default_stylesheet.is_some() {
            self.default_stylesheet = other.default_stylesheet;
        }
        if other.cache_dir.is_some() {
            self.cache_dir = other.cache_dir;
        }
        if other.stylesheet_file != defaults.stylesheet_file {
            self.stylesheet_file = other.stylesheet_file;
        }
        if other.memo_ttl != defaults.memo_ttl {
            self.memo_ttl = other.memo_ttl;
        }
        if other.diagnostics != defaults.diagnostics {
            self.diagnostics = other.diagnostics;
        }
        if other.unresolved_policy != defaults.unresolved_policy {
            self.unresolved_policy = other.unresolved_policy;
        }
        self
    }

    /// The directory of the writable stylesheet copy.
    pub fn cache_dir(&self) -> PathBuf {
        match &self.cache_dir {
            Some(dir) => dir.clone(),
            None => dirs::cache_dir()
                .unwrap_or_else(env::temp_dir)
                .join("swatch"),
        }
    }

    /// Full path of the writable stylesheet copy.
    pub fn writable_path(&self) -> PathBuf {
        self.cache_dir().join(&self.stylesheet_file)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
