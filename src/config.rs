//! Tool configuration.
//!
//! Guidepress reads an optional `config.toml` from the working directory (or
//! a path given with `--config`). Both options are optional; defaults shown:
//!
//! ```toml
//! site_root = "zola"    # Site tree to write content/ and static/ into
//! files_dir = "files"   # Content-addressed image originals
//! ```
//!
//! CLI flags override file values, file values override defaults. Unknown
//! keys are rejected to catch typos early.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `config.toml`.
///
/// All fields have defaults; a config file need only specify the values it
/// wants to override.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site tree the generated content and assets are written into.
    pub site_root: PathBuf,
    /// Directory holding the content-addressed image originals.
    pub files_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_root: PathBuf::from("zola"),
            files_dir: PathBuf::from("files"),
        }
    }
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site_root.as_os_str().is_empty() {
            return Err(ConfigError::Validation("site_root must not be empty".into()));
        }
        if self.files_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation("files_dir must not be empty".into()));
        }
        Ok(())
    }
}

/// Load configuration from a `config.toml` path.
///
/// A missing file is not an error: defaults apply, matching a fresh
/// checkout with no config at all.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    if !path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: SiteConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// A documented stock `config.toml`, printed by `guidepress gen-config`.
pub fn stock_config_toml() -> String {
    let defaults = SiteConfig::default();
    format!(
        r#"# guidepress configuration. All options are optional - defaults shown below.

# Site tree the generated content and assets are written into:
#   <site_root>/content/locations/<id>.md
#   <site_root>/content/events/<id>.md
#   <site_root>/static/img/...
site_root = {:?}

# Directory holding the content-addressed image originals. Inline image
# payloads from the admin export are persisted here, named by content digest.
files_dir = {:?}
"#,
        defaults.site_root.display().to_string(),
        defaults.files_dir.display().to_string(),
    )
}
