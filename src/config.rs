//! Viewer configuration.
//!
//! Every tunable constant of the pipeline lives in [`ViewerConfig`]. Defaults match the
//! reference scale target (one million records, 60px rows, a 600px viewport). With the
//! `config` feature enabled, overrides can be read from a TOML file.

use crate::error::{Result, RollcallError};
use std::str::FromStr;
use std::time::Duration;

/// Uniform row height in pixels.
pub const DEFAULT_ROW_HEIGHT: u64 = 60;
/// Container height used until the rendering surface reports a measurement.
pub const DEFAULT_CONTAINER_HEIGHT: u64 = 600;
/// Rows materialized beyond each visible edge.
pub const DEFAULT_BUFFER_ROWS: usize = 10;
/// Quiet period before typed search text is applied.
pub const DEFAULT_DEBOUNCE_MS: u64 = 250;
/// Lower bound for the search debounce interval.
pub const MIN_DEBOUNCE_MS: u64 = 250;
/// Number of synthetic records generated for the store.
pub const DEFAULT_DATASET_SIZE: usize = 1_000_000;
/// Seed for the score generator.
pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;

/// Named color scheme for the terminal front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "config",
    derive(serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum ThemeKind {
    #[default]
    Default,
    Monochrome,
    HighContrast,
}

impl FromStr for ThemeKind {
    type Err = RollcallError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(ThemeKind::Default),
            "monochrome" | "mono" => Ok(ThemeKind::Monochrome),
            "high-contrast" | "high_contrast" => Ok(ThemeKind::HighContrast),
            other => Err(RollcallError::config(format!("unknown theme '{other}'"))),
        }
    }
}

/// Host-settable constants for the store, query pipeline and windower.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize), serde(default))]
pub struct ViewerConfig {
    /// Row height in pixels
    pub row_height: u64,

    /// Fallback container height in pixels
    pub default_container_height: u64,

    /// Buffer rows on each side of the visible range
    pub buffer_rows: usize,

    /// Search debounce interval in milliseconds
    pub debounce_ms: u64,

    /// Number of records to generate
    pub dataset_size: usize,

    /// Score generator seed
    pub seed: u64,

    /// Terminal color scheme
    pub theme: ThemeKind,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            default_container_height: DEFAULT_CONTAINER_HEIGHT,
            buffer_rows: DEFAULT_BUFFER_ROWS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            dataset_size: DEFAULT_DATASET_SIZE,
            seed: DEFAULT_SEED,
            theme: ThemeKind::Default,
        }
    }
}

impl ViewerConfig {
    /// Search debounce interval as a `Duration`.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Reject configurations the pipeline cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.row_height == 0 {
            return Err(RollcallError::config("row_height must be positive"));
        }
        if self.default_container_height == 0 {
            return Err(RollcallError::config(
                "default_container_height must be positive",
            ));
        }
        if self.debounce_ms < MIN_DEBOUNCE_MS {
            return Err(RollcallError::config(format!(
                "debounce_ms must be at least {MIN_DEBOUNCE_MS}, got {}",
                self.debounce_ms
            )));
        }
        if self.dataset_size == 0 {
            return Err(RollcallError::config("dataset_size must be positive"));
        }
        if self.dataset_size > u32::MAX as usize {
            return Err(RollcallError::config(format!(
                "dataset_size must not exceed {}",
                u32::MAX
            )));
        }
        Ok(())
    }
}

#[cfg(feature = "config")]
mod file {
    use super::ViewerConfig;
    use crate::error::{Result, RollcallError};
    use std::path::{Path, PathBuf};

    impl ViewerConfig {
        /// Default location: `<config dir>/rollcall/config.toml`.
        pub fn default_path() -> Option<PathBuf> {
            dirs::config_dir().map(|dir| dir.join("rollcall").join("config.toml"))
        }

        /// Parse a TOML document; absent keys keep their defaults.
        pub fn from_toml(contents: &str) -> Result<Self> {
            let config: ViewerConfig = toml::from_str(contents)
                .map_err(|err| RollcallError::config(err.to_string()))?;
            config.validate()?;
            Ok(config)
        }

        /// Load and validate a configuration file.
        pub fn load_from_file(path: &Path) -> Result<Self> {
            let contents = std::fs::read_to_string(path).map_err(|err| RollcallError::Io {
                message: format!("Failed to read config {}", path.display()),
                source: err,
            })?;
            let config = Self::from_toml(&contents)?;
            log::info!("Loaded configuration from {}", path.display());
            Ok(config)
        }

        /// Load from the default path, falling back to defaults when no file exists.
        pub fn load_default() -> Result<Self> {
            match Self::default_path() {
                Some(path) if path.is_file() => Self::load_from_file(&path),
                _ => {
                    log::info!("No configuration file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_scale_target() {
        let config = ViewerConfig::default();
        assert_eq!(config.row_height, 60);
        assert_eq!(config.default_container_height, 600);
        assert_eq!(config.buffer_rows, 10);
        assert_eq!(config.debounce(), Duration::from_millis(250));
        assert_eq!(config.dataset_size, 1_000_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_degenerate_values() {
        let zero_rows = ViewerConfig {
            row_height: 0,
            ..ViewerConfig::default()
        };
        assert!(matches!(
            zero_rows.validate(),
            Err(RollcallError::ConfigError { .. })
        ));

        let fast_debounce = ViewerConfig {
            debounce_ms: 100,
            ..ViewerConfig::default()
        };
        assert!(fast_debounce.validate().is_err());

        let empty = ViewerConfig {
            dataset_size: 0,
            ..ViewerConfig::default()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_theme_names() {
        assert_eq!("mono".parse::<ThemeKind>().unwrap(), ThemeKind::Monochrome);
        assert_eq!(
            "High-Contrast".parse::<ThemeKind>().unwrap(),
            ThemeKind::HighContrast
        );
        assert!(matches!(
            "neon".parse::<ThemeKind>(),
            Err(RollcallError::ConfigError { .. })
        ));
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_theme_from_toml() {
        let config = ViewerConfig::from_toml("theme = \"high-contrast\"").unwrap();
        assert_eq!(config.theme, ThemeKind::HighContrast);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_load_partial_toml_file() {
        let file = tempfile::NamedTempFile::new().expect("create temp file");
        std::fs::write(file.path(), "row_height = 30\nbuffer_rows = 4\n").expect("write config");

        let config = ViewerConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.row_height, 30);
        assert_eq!(config.buffer_rows, 4);
        assert_eq!(config.debounce_ms, DEFAULT_DEBOUNCE_MS);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_toml_validation_errors_surface() {
        let err = ViewerConfig::from_toml("debounce_ms = 10").unwrap_err();
        assert!(err.to_string().contains("debounce_ms"));
    }
}
