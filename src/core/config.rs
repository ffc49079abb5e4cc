//! Configuration module for `taxontree`
//!
//! One TOML file holds both the host settings (logging, paths) and the engine
//! tunables (layout, animation, camera, navigation). Keys are addressed as
//! `section.field`; the logging and path keys also accept their bare field
//! name.

use crate::core::camera::CameraConfig;
use crate::core::layout::LayoutConfig;
use crate::core::navigation::NavigationConfig;
use crate::core::render::AnimationConfig;
use crate::core::session::EngineSettings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default CLI configuration, picked by build profile
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory in path values
pub const DIR_VARIABLE: &str = "$TAXONTREE";

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Dataset JSON file; empty means the compiled-in dataset
    #[serde(default)]
    pub dataset: String,
    /// Directory for rendered snapshots
    #[serde(default)]
    pub output_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Layout spacing and collapse policy
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Transition durations
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Camera limits and viewport
    #[serde(default)]
    pub camera: CameraConfig,
    /// Reference links
    #[serde(default)]
    pub navigation: NavigationConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override dataset path
    pub dataset: Option<String>,
    /// Override output directory
    pub output_dir: Option<String>,
}

/// Every key accepted by [`Config::get`], [`Config::set`] and [`Config::unset`]
pub const KEYS: &[&str] = &[
    "logging.level",
    "logging.file",
    "logging.verbose",
    "paths.dataset",
    "paths.output_dir",
    "layout.node_spacing",
    "layout.level_spacing",
    "layout.collapse_depth",
    "layout.family_depth",
    "layout.margin_top",
    "layout.margin_bottom",
    "layout.canvas_padding",
    "animation.relayout_ms",
    "animation.camera_ms",
    "animation.fit_ms",
    "animation.hover_ms",
    "camera.min_scale",
    "camera.max_scale",
    "camera.focus_scale",
    "camera.fit_margin",
    "camera.viewport_width",
    "camera.viewport_height",
    "navigation.base_url",
    "navigation.suffix",
    "navigation.hint",
];

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, String> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| format!("Invalid value for '{key}': '{value}'"))
}

/// Map bare field names onto their section key
fn canonical_key(key: &str) -> &str {
    match key {
        "level" => "logging.level",
        "file" => "logging.file",
        "verbose" => "logging.verbose",
        "dataset" => "paths.dataset",
        "output_dir" | "output-dir" => "paths.output_dir",
        other => other,
    }
}

impl Config {
    /// Get the `$TAXONTREE` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/taxontree`
    /// - macOS: `~/Library/Application Support/taxontree`
    /// - Windows: `%APPDATA%\taxontree`
    #[must_use]
    pub fn get_taxontree_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("taxontree")
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_taxontree_dir`](Self::get_taxontree_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_taxontree_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$TAXONTREE` to the config directory
    #[must_use]
    pub fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_taxontree_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Parse a config from TOML and expand `$TAXONTREE` in path values.
    ///
    /// Missing sections and fields take their serde defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;
        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.dataset = Self::expand_variables(&config.paths.dataset);
        config.paths.output_dir = Self::expand_variables(&config.paths.output_dir);
        Ok(config)
    }

    /// Load the compiled-in defaults
    ///
    /// # Panics
    ///
    /// Panics if the embedded default configuration is invalid TOML. The
    /// defaults are compiled into the binary, so this is a build defect.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Fill empty string fields from `defaults`. Returns `true` if anything changed.
    ///
    /// Engine sections need no merging: their missing fields already take the
    /// engine defaults when parsed.
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        fn fill(target: &mut String, default: &str) -> bool {
            if target.is_empty() && !default.is_empty() {
                default.clone_into(target);
                true
            } else {
                false
            }
        }

        let mut changed = fill(&mut self.logging.level, &defaults.logging.level);
        changed |= fill(&mut self.logging.file, &defaults.logging.file);
        changed |= fill(&mut self.paths.dataset, &defaults.paths.dataset);
        changed |= fill(&mut self.paths.output_dir, &defaults.paths.output_dir);
        changed
    }

    /// Apply CLI-provided overrides for this run only
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(dataset) = &overrides.dataset {
            self.paths.dataset.clone_from(dataset);
        }
        if let Some(output_dir) = &overrides.output_dir {
            self.paths.output_dir.clone_from(output_dir);
        }
    }

    /// Load from the user config file, creating it from defaults on first run.
    ///
    /// An existing file has missing fields merged from the defaults and is
    /// re-saved when that added anything. Any read or parse failure falls
    /// back to the defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            let _ = defaults.save();
        }

        defaults
    }

    /// Save to the user config file
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save to an explicit path
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails, the directory cannot be
    /// created or the file cannot be written
    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str)?;
        Ok(())
    }

    /// Engine settings carried by this config
    #[must_use]
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            layout: self.layout.clone(),
            animation: self.animation.clone(),
            camera: self.camera.clone(),
            navigation: self.navigation.clone(),
        }
    }

    /// Dataset path, `None` for the compiled-in dataset
    #[must_use]
    pub fn dataset_path(&self) -> Option<PathBuf> {
        (!self.paths.dataset.is_empty()).then(|| PathBuf::from(&self.paths.dataset))
    }

    /// Get a configuration value by key
    ///
    /// Accepts every entry of [`KEYS`] plus the bare names `level`, `file`,
    /// `verbose`, `dataset` and `output_dir`. Returns `None` for unknown keys.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match canonical_key(key) {
            "logging.level" => self.logging.level.clone(),
            "logging.file" => self.logging.file.clone(),
            "logging.verbose" => self.logging.verbose.to_string(),
            "paths.dataset" => self.paths.dataset.clone(),
            "paths.output_dir" => self.paths.output_dir.clone(),
            "layout.node_spacing" => self.layout.node_spacing.to_string(),
            "layout.level_spacing" => self.layout.level_spacing.to_string(),
            "layout.collapse_depth" => self.layout.collapse_depth.to_string(),
            "layout.family_depth" => self.layout.family_depth.to_string(),
            "layout.margin_top" => self.layout.margin_top.to_string(),
            "layout.margin_bottom" => self.layout.margin_bottom.to_string(),
            "layout.canvas_padding" => self.layout.canvas_padding.to_string(),
            "animation.relayout_ms" => self.animation.relayout_ms.to_string(),
            "animation.camera_ms" => self.animation.camera_ms.to_string(),
            "animation.fit_ms" => self.animation.fit_ms.to_string(),
            "animation.hover_ms" => self.animation.hover_ms.to_string(),
            "camera.min_scale" => self.camera.min_scale.to_string(),
            "camera.max_scale" => self.camera.max_scale.to_string(),
            "camera.focus_scale" => self.camera.focus_scale.to_string(),
            "camera.fit_margin" => self.camera.fit_margin.to_string(),
            "camera.viewport_width" => self.camera.viewport_width.to_string(),
            "camera.viewport_height" => self.camera.viewport_height.to_string(),
            "navigation.base_url" => self.navigation.base_url.clone(),
            "navigation.suffix" => self.navigation.suffix.clone(),
            "navigation.hint" => self.navigation.hint.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Set a configuration value by key
    ///
    /// Numbers and booleans are parsed; `logging.level` must be a known
    /// level. Only updates memory: call [`save`](Self::save) to persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value doesn't parse
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let key = canonical_key(key);
        match key {
            "logging.level" => {
                logger::Level::from_str(value)?;
                self.logging.level = value.to_lowercase();
            }
            "logging.file" => self.logging.file = value.to_string(),
            "logging.verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "paths.dataset" => self.paths.dataset = value.to_string(),
            "paths.output_dir" => self.paths.output_dir = value.to_string(),
            "layout.node_spacing" => self.layout.node_spacing = parse_value(key, value)?,
            "layout.level_spacing" => self.layout.level_spacing = parse_value(key, value)?,
            "layout.collapse_depth" => self.layout.collapse_depth = parse_value(key, value)?,
            "layout.family_depth" => self.layout.family_depth = parse_value(key, value)?,
            "layout.margin_top" => self.layout.margin_top = parse_value(key, value)?,
            "layout.margin_bottom" => self.layout.margin_bottom = parse_value(key, value)?,
            "layout.canvas_padding" => self.layout.canvas_padding = parse_value(key, value)?,
            "animation.relayout_ms" => self.animation.relayout_ms = parse_value(key, value)?,
            "animation.camera_ms" => self.animation.camera_ms = parse_value(key, value)?,
            "animation.fit_ms" => self.animation.fit_ms = parse_value(key, value)?,
            "animation.hover_ms" => self.animation.hover_ms = parse_value(key, value)?,
            "camera.min_scale" => self.camera.min_scale = parse_value(key, value)?,
            "camera.max_scale" => self.camera.max_scale = parse_value(key, value)?,
            "camera.focus_scale" => self.camera.focus_scale = parse_value(key, value)?,
            "camera.fit_margin" => self.camera.fit_margin = parse_value(key, value)?,
            "camera.viewport_width" => self.camera.viewport_width = parse_value(key, value)?,
            "camera.viewport_height" => self.camera.viewport_height = parse_value(key, value)?,
            "navigation.base_url" => self.navigation.base_url = value.to_string(),
            "navigation.suffix" => self.navigation.suffix = value.to_string(),
            "navigation.hint" => self.navigation.hint = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset one key to its value in `defaults`
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        let default = defaults
            .get(key)
            .ok_or_else(|| format!("Unknown config key: '{key}'"))?;
        self.set(key, &default)
    }

    /// Delete the user config file; the next [`load`](Self::load) recreates it
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut section = "";
        for key in KEYS {
            let (name, field) = key.split_once('.').unwrap_or(("", key));
            if name != section {
                if !section.is_empty() {
                    writeln!(f)?;
                }
                writeln!(f, "[{name}]")?;
                section = name;
            }
            let value = self.get(key).unwrap_or_default();
            if value.parse::<f64>().is_ok() || value.parse::<bool>().is_ok() {
                writeln!(f, "  {field} = {value}")?;
            } else {
                writeln!(f, "  {field} = \"{value}\"")?;
            }
        }
        Ok(())
    }
}
