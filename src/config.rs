//! Run configuration.
//!
//! Settings come in three layers, each overriding the one before:
//!
//! 1. stock defaults ([`ManagerConfig::default`]),
//! 2. an optional TOML file passed with `--config`,
//! 3. command-line flags.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! keep_originals = false    # Keep JPEGs after conversion, write resized copies
//!
//! [naming]
//! prefix = "spr"            # Required leading prefix of sanitized names
//! disallowed = "()"         # Characters replaced by `replacement`
//! replacement = "_"         # Separator and replacement character
//!
//! [convert]
//! sanitize_names = false    # Name converted PNGs after the sanitized stem
//!
//! [resize]
//! # ratio = 0.5             # Scale factor, or:
//! # width = 800             # fixed width (height keeps the aspect ratio)
//! # height = 600            # fixed height (width keeps the aspect ratio)
//! suffix = "_resized"       # Inserted before the extension of kept copies
//!
//! [corners]
//! radius = 14               # Corner radius in pixels
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::error::Error;
use crate::naming::NamingRules;
use crate::transform::DEFAULT_RESIZE_SUFFIX;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Complete configuration of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManagerConfig {
    /// Keep JPEG originals after conversion; write resized copies instead of
    /// overwriting.
    pub keep_originals: bool,
    pub naming: NamingConfig,
    pub convert: ConvertConfig,
    pub resize: ResizeConfig,
    pub corners: CornersConfig,
}

impl ManagerConfig {
    /// Validate config values are within acceptable ranges.
    ///
    /// Whether resize has *enough* parameters is only checked when a resize
    /// is actually requested.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.naming.rules().validate().map_err(|e| match e {
            Error::InvalidArgument(msg) => ConfigError::Validation(msg),
            other => ConfigError::Validation(other.to_string()),
        })?;
        if let Some(ratio) = self.resize.ratio
            && !(ratio.is_finite() && ratio > 0.0)
        {
            return Err(ConfigError::Validation(
                "resize.ratio must be a positive number".into(),
            ));
        }
        if self.resize.width == Some(0) || self.resize.height == Some(0) {
            return Err(ConfigError::Validation(
                "resize.width and resize.height must be > 0".into(),
            ));
        }
        if self.resize.suffix.is_empty() || self.resize.suffix.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "resize.suffix must be a non-empty file name fragment".into(),
            ));
        }
        if self.corners.radius == 0 {
            return Err(ConfigError::Validation(
                "corners.radius must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Sanitized-name settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
    pub prefix: String,
    /// Every character of this string is disallowed.
    pub disallowed: String,
    pub replacement: char,
}

impl Default for NamingConfig {
    fn default() -> Self {
        let rules = NamingRules::default();
        Self {
            prefix: rules.prefix,
            disallowed: rules.disallowed.into_iter().collect(),
            replacement: rules.replacement,
        }
    }
}

impl NamingConfig {
    pub fn rules(&self) -> NamingRules {
        NamingRules {
            prefix: self.prefix.clone(),
            disallowed: self.disallowed.chars().collect(),
            replacement: self.replacement,
        }
    }
}

/// JPEG → PNG conversion settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// Write converted files under their sanitized name.
    pub sanitize_names: bool,
}

/// Resize settings. At most one of `ratio` or `width`/`height` may be set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Inserted before the extension of resized copies.
    pub suffix: String,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            ratio: None,
            width: None,
            height: None,
            suffix: DEFAULT_RESIZE_SUFFIX.to_string(),
        }
    }
}

/// Corner rounding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CornersConfig {
    pub radius: u32,
}

impl Default for CornersConfig {
    fn default() -> Self {
        Self { radius: 14 }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ManagerConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// The file was named explicitly, so a missing file is an error.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(value)
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ManagerConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ManagerConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the configuration: stock defaults, overridden by `path` if given.
pub fn load_config(path: Option<&Path>) -> Result<ManagerConfig, ConfigError> {
    let overlay = path.map(load_raw_config).transpose()?;
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock config file.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# image-manager configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Command-line flags override this file.
# Unknown keys will cause an error.

# Keep JPEG originals after conversion, and write resized images to a
# suffixed copy instead of overwriting them.
keep_originals = false

# ---------------------------------------------------------------------------
# Sanitized file names (--rename, --sanitize)
# ---------------------------------------------------------------------------
[naming]
# Every sanitized name starts with this prefix.
prefix = "spr"

# Characters replaced by `replacement`.
disallowed = "()"

# Separator and replacement character. Trailing ones are stripped.
replacement = "_"

# ---------------------------------------------------------------------------
# JPEG -> PNG conversion (--png-convert)
# ---------------------------------------------------------------------------
[convert]
# Name converted PNGs after the sanitized stem instead of the original one.
sanitize_names = false

# ---------------------------------------------------------------------------
# Resize (--resize)
# ---------------------------------------------------------------------------
[resize]
# Exactly one of: ratio, width, height, or width + height.
# ratio = 0.5
# width = 800
# height = 600

# Inserted before the extension when originals are kept.
suffix = "_resized"

# ---------------------------------------------------------------------------
# Rounded corners (--corner-round)
# ---------------------------------------------------------------------------
[corners]
# Corner radius in pixels.
radius = 14
"##
}
