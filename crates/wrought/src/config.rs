// File: src/config.rs
// Purpose: Configuration parsing from wrought.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
///
/// Loaded once at process start and threaded into `Dispatcher::new` and
/// `View::new` by reference; treated as read-only for the remainder of
/// the process.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub view: ViewConfig,
}

/// Runtime mode; production gates asset minification and versioning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    Production,
    #[default]
    Development,
}

/// Site-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Root directory all include-path segments are relative to
    #[serde(default = "default_root")]
    pub root: PathBuf,

    #[serde(default)]
    pub mode: RuntimeMode,
}

/// Controller routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Ordered, semicolon-delimited include-path segments; each segment
    /// is combined with the fixed `controllers/` or `templates/` suffix
    #[serde(default = "default_include_path")]
    pub include_path: String,

    /// Controller substituted when resolution fails
    #[serde(default = "default_controller_404")]
    pub controller_404: String,

    /// File extension of controller artifacts (`<Name>Controller.<ext>`)
    #[serde(default = "default_controller_ext")]
    pub controller_ext: String,

    /// Action assumed when the request carries none
    #[serde(default = "default_action")]
    pub default_action: String,
}

/// View and asset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Cache-busting version appended to namespaced asset URLs
    #[serde(default = "default_version")]
    pub version: String,

    /// File extension of template files
    #[serde(default = "default_template_ext")]
    pub template_ext: String,
}

// Default values
fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_include_path() -> String {
    "default".to_string()
}

fn default_controller_404() -> String {
    "Default".to_string()
}

fn default_controller_ext() -> String {
    "rs".to_string()
}

fn default_action() -> String {
    "index".to_string()
}

fn default_version() -> String {
    "0".to_string()
}

fn default_template_ext() -> String {
    "html".to_string()
}

// Default implementations
impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            mode: RuntimeMode::Development,
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            include_path: default_include_path(),
            controller_404: default_controller_404(),
            controller_ext: default_controller_ext(),
            default_action: default_action(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            template_ext: default_template_ext(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        // If file is empty, return default config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from the default path (./wrought.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("wrought.toml")
    }

    /// Ordered candidate directories for controller artifacts.
    ///
    /// Splits the include path on `;`, skips empty segments, appends the
    /// fixed `controllers/` suffix, and keeps only directories that exist.
    pub fn controller_dirs(&self) -> Vec<PathBuf> {
        self.suffixed_dirs("controllers")
    }

    /// Ordered candidate directories for template files.
    pub fn template_dirs(&self) -> Vec<PathBuf> {
        self.suffixed_dirs("templates")
    }

    pub fn is_production(&self) -> bool {
        self.site.mode == RuntimeMode::Production
    }

    fn suffixed_dirs(&self, suffix: &str) -> Vec<PathBuf> {
        self.routing
            .include_path
            .split(';')
            .filter(|segment| !segment.is_empty())
            .filter_map(|segment| {
                let dir = self.site.root.join(segment).join(suffix);
                dir.canonicalize().ok()
            })
            .collect()
    }
}
