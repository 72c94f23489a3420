//! Configuration file support.
//!
//! Settings are stored as versioned JSON: in the user's config directory on
//! native and in `localStorage` on the web.

use std::time::Duration;

use atelier_ui::ViewerSettings;
use atelier_ui::constants::{
    BUTTON_ZOOM_STEP, CAPTION_MAX_CHARS, COPY_ACK_DURATION, DOUBLE_CLICK_INTERVAL,
    MIN_ZOOM_STEP, VIEWPORT_FRACTION, WHEEL_ZOOM_STEP,
};
use serde::{Deserialize, Serialize};

use crate::gallery::{SortOrder, TypeFilter};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }

    /// Same as [`Self::to_level_filter`], for loggers that take a `Level`.
    pub fn to_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    #[serde(default)]
    pub preferences: UserPreferences,

    #[serde(default)]
    pub viewer: ViewerConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,
}

/// User preferences section of the config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Enlarged viewer section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub button_zoom_step: f32,
    pub wheel_zoom_step: f32,
    /// Container size as a fraction of the window
    pub viewport_fraction: f32,
    pub copy_ack_millis: u64,
    pub caption_max_chars: usize,
    /// Native only: maximum gap between two presses of a double click
    pub double_click_millis: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            button_zoom_step: BUTTON_ZOOM_STEP,
            wheel_zoom_step: WHEEL_ZOOM_STEP,
            viewport_fraction: VIEWPORT_FRACTION,
            copy_ack_millis: COPY_ACK_DURATION.as_millis() as u64,
            caption_max_chars: CAPTION_MAX_CHARS,
            double_click_millis: DOUBLE_CLICK_INTERVAL.as_millis() as u64,
        }
    }
}

/// Positive, finite `value` or `fallback` (with a warning).
fn positive_or(name: &str, value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        log::warn!("Invalid viewer.{name} {value}, using {fallback}");
        fallback
    }
}

/// A zoom step of at least `MIN_ZOOM_STEP`, or `fallback` (with a warning).
fn step_or(name: &str, value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value >= MIN_ZOOM_STEP {
        value
    } else {
        log::warn!("Invalid viewer.{name} {value} (minimum {MIN_ZOOM_STEP}), using {fallback}");
        fallback
    }
}

impl ViewerConfig {
    /// Validated viewer settings. Invalid values fall back to their defaults.
    pub fn to_settings(&self) -> ViewerSettings {
        let defaults = ViewerConfig::default();
        let fraction = positive_or(
            "viewport_fraction",
            self.viewport_fraction,
            defaults.viewport_fraction,
        );
        let fraction = if fraction > 1.0 {
            log::warn!("viewer.viewport_fraction {fraction} exceeds 1, clamping");
            1.0
        } else {
            fraction
        };
        let copy_ack_millis = if self.copy_ack_millis == 0 {
            log::warn!("Invalid viewer.copy_ack_millis 0, using {}", defaults.copy_ack_millis);
            defaults.copy_ack_millis
        } else {
            self.copy_ack_millis
        };
        let caption_max_chars = if self.caption_max_chars < 4 {
            log::warn!(
                "viewer.caption_max_chars {} is too small, using {}",
                self.caption_max_chars,
                defaults.caption_max_chars
            );
            defaults.caption_max_chars
        } else {
            self.caption_max_chars
        };

        ViewerSettings {
            button_zoom_step: step_or(
                "button_zoom_step",
                self.button_zoom_step,
                defaults.button_zoom_step,
            ),
            wheel_zoom_step: step_or(
                "wheel_zoom_step",
                self.wheel_zoom_step,
                defaults.wheel_zoom_step,
            ),
            viewport_fraction: fraction,
            copy_ack: Duration::from_millis(copy_ack_millis),
            caption_max_chars,
            navigation: true,
        }
    }

    pub fn double_click_interval(&self) -> Duration {
        if self.double_click_millis == 0 {
            DOUBLE_CLICK_INTERVAL
        } else {
            Duration::from_millis(self.double_click_millis)
        }
    }
}

/// Gallery page defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub sort: SortOrder,
    pub filter: TypeFilter,
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            ..Default::default()
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// File name of the config file inside the config directory.
    pub fn default_filename() -> &'static str {
        "atelier-config.json"
    }

    /// `<config dir>/atelier/atelier-config.json`, falling back to
    /// `~/.config` when the platform has no config directory.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        let base = dirs::config_dir().or_else(|| dirs::home_dir().map(|home| home.join(".config")))?;
        Some(base.join("atelier").join(Self::default_filename()))
    }

    /// Load `path`. A missing file is not an error; unreadable or invalid
    /// files are logged and ignored.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Option<Self> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}", path.display());
                return None;
            }
            Err(e) => {
                log::warn!("Cannot read config {}: {e}", path.display());
                return None;
            }
        };
        Self::from_json(&json)
            .inspect(|_| log::info!("Using config {}", path.display()))
            .inspect_err(|e| log::warn!("Ignoring config {}: {e}", path.display()))
            .ok()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        Self::load_from_path(&Self::default_path()?)
    }

    /// Write the config to `path`, creating its directory.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Wrote config {}", path.display());
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_default_path(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no config directory on this platform",
            ))
        })?;
        self.save_to_path(&path)
    }

    #[cfg(target_arch = "wasm32")]
    const LOCALSTORAGE_KEY: &'static str = "atelier-config";

    #[cfg(target_arch = "wasm32")]
    fn local_storage() -> Result<web_sys::Storage, ConfigError> {
        web_sys::window()
            .ok_or_else(|| ConfigError::StorageError("no window".to_string()))?
            .local_storage()
            .map_err(|e| ConfigError::StorageError(format!("{e:?}")))?
            .ok_or_else(|| ConfigError::StorageError("localStorage disabled".to_string()))
    }

    /// Config saved in `localStorage`, if any.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_local_storage() -> Option<Self> {
        let stored = Self::local_storage()
            .and_then(|storage| {
                storage
                    .get_item(Self::LOCALSTORAGE_KEY)
                    .map_err(|e| ConfigError::StorageError(format!("{e:?}")))
            })
            .inspect_err(|e| log::warn!("Cannot read stored config: {e}"))
            .ok()??;
        Self::from_json(&stored)
            .inspect_err(|e| log::warn!("Ignoring stored config: {e}"))
            .ok()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Storage error (localStorage in WASM)
    #[error("Storage error: {0}")]
    StorageError(String),
}
