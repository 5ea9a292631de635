//! Persisted configuration file.
//!
//! Stores user defaults (page aspect ratio, slicing direction, export
//! settings) in an INI file under the platform config directory, e.g.
//! `~/.config/panoslice/config.ini` on Linux. Missing file or missing
//! keys fall back to defaults; unknown keys are ignored on load.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;
use tracing::debug;

use crate::layout::{SliceDirection, LETTER_LANDSCAPE_RATIO};

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config directory could not be determined for this platform.
    #[error("could not determine config directory")]
    NoConfigDir,

    /// Reading or writing the config file failed.
    #[error("config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid INI.
    #[error("config file parse error: {0}")]
    Parse(String),

    /// A value does not parse for its key.
    #[error("invalid value '{value}' for key '{key}'")]
    InvalidValue { key: String, value: String },
}

/// Path of the configuration file.
///
/// # Errors
///
/// Returns `ConfigError::NoConfigDir` if the platform config directory
/// cannot be determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(dir.join("panoslice").join("config.ini"))
}

/// Page layout defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    /// Printable page aspect ratio (width / height).
    pub aspect_ratio: f64,
    /// Default slicing direction.
    pub direction: SliceDirection,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: LETTER_LANDSCAPE_RATIO,
            direction: SliceDirection::LeftToRight,
        }
    }
}

/// Export defaults.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExportConfig {
    /// Default output directory; empty means alongside the source image.
    pub output_dir: PathBuf,
    /// Whether to pad clipped edge tiles to the nominal page size.
    pub pad_to_page: bool,
}

/// The whole configuration file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigFile {
    /// `[page]` section.
    pub page: PageConfig,
    /// `[export]` section.
    pub export: ExportConfig,
}

impl ConfigFile {
    /// Load the config file from the default location.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or
    /// parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_file_path()?;
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let ini = Ini::load_from_file(&path).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(Self::from_ini(&ini))
    }

    /// Save the config file to the default location, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` on I/O failure.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_file_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.to_ini().write_to_file(&path)?;
        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    fn from_ini(ini: &Ini) -> Self {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some("page")) {
            if let Some(value) = section.get("aspect_ratio") {
                if let Ok(ratio) = value.parse::<f64>() {
                    if ratio.is_finite() && ratio > 0.0 {
                        config.page.aspect_ratio = ratio;
                    }
                }
            }
            if let Some(value) = section.get("direction") {
                if let Ok(direction) = parse_direction(value) {
                    config.page.direction = direction;
                }
            }
        }

        if let Some(section) = ini.section(Some("export")) {
            if let Some(value) = section.get("output_dir") {
                config.export.output_dir = PathBuf::from(value);
            }
            if let Some(value) = section.get("pad_to_page") {
                if let Ok(pad) = value.parse::<bool>() {
                    config.export.pad_to_page = pad;
                }
            }
        }

        config
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        ini.with_section(Some("page"))
            .set("aspect_ratio", self.page.aspect_ratio.to_string())
            .set("direction", direction_str(self.page.direction));
        ini.with_section(Some("export"))
            .set(
                "output_dir",
                self.export.output_dir.to_string_lossy().to_string(),
            )
            .set("pad_to_page", self.export.pad_to_page.to_string());
        ini
    }
}

fn parse_direction(s: &str) -> Result<SliceDirection, ()> {
    match s.to_lowercase().as_str() {
        "ltr" | "left-to-right" => Ok(SliceDirection::LeftToRight),
        "rtl" | "right-to-left" => Ok(SliceDirection::RightToLeft),
        _ => Err(()),
    }
}

fn direction_str(direction: SliceDirection) -> &'static str {
    match direction {
        SliceDirection::LeftToRight => "ltr",
        SliceDirection::RightToLeft => "rtl",
    }
}

/// A settable configuration key, in `section.key` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// `page.aspect_ratio`
    PageAspectRatio,
    /// `page.direction`
    PageDirection,
    /// `export.output_dir`
    ExportOutputDir,
    /// `export.pad_to_page`
    ExportPadToPage,
}

impl ConfigKey {
    /// All known keys, for `config list`.
    pub const ALL: [ConfigKey; 4] = [
        ConfigKey::PageAspectRatio,
        ConfigKey::PageDirection,
        ConfigKey::ExportOutputDir,
        ConfigKey::ExportPadToPage,
    ];

    /// Current value of this key, as a display string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::PageAspectRatio => config.page.aspect_ratio.to_string(),
            ConfigKey::PageDirection => direction_str(config.page.direction).to_string(),
            ConfigKey::ExportOutputDir => config.export.output_dir.to_string_lossy().to_string(),
            ConfigKey::ExportPadToPage => config.export.pad_to_page.to_string(),
        }
    }

    /// Set this key from a string value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the value does not parse.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: self.to_string(),
            value: value.to_string(),
        };
        match self {
            ConfigKey::PageAspectRatio => {
                let ratio = value.parse::<f64>().map_err(|_| invalid())?;
                if !ratio.is_finite() || ratio <= 0.0 {
                    return Err(invalid());
                }
                config.page.aspect_ratio = ratio;
            }
            ConfigKey::PageDirection => {
                config.page.direction = parse_direction(value).map_err(|_| invalid())?;
            }
            ConfigKey::ExportOutputDir => {
                config.export.output_dir = PathBuf::from(value);
            }
            ConfigKey::ExportPadToPage => {
                config.export.pad_to_page = value.parse::<bool>().map_err(|_| invalid())?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConfigKey::PageAspectRatio => "page.aspect_ratio",
            ConfigKey::PageDirection => "page.direction",
            ConfigKey::ExportOutputDir => "export.output_dir",
            ConfigKey::ExportPadToPage => "export.pad_to_page",
        };
        f.write_str(s)
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "page.aspect_ratio" => Ok(ConfigKey::PageAspectRatio),
            "page.direction" => Ok(ConfigKey::PageDirection),
            "export.output_dir" => Ok(ConfigKey::ExportOutputDir),
            "export.pad_to_page" => Ok(ConfigKey::ExportPadToPage),
            _ => Err(ConfigError::InvalidValue {
                key: s.to_string(),
                value: String::new(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();
        assert!((config.page.aspect_ratio - 11.0 / 8.5).abs() < 1e-12);
        assert_eq!(config.page.direction, SliceDirection::LeftToRight);
        assert!(!config.export.pad_to_page);
    }

    #[test]
    fn test_ini_roundtrip() {
        let mut config = ConfigFile::default();
        config.page.aspect_ratio = 1.5;
        config.page.direction = SliceDirection::RightToLeft;
        config.export.output_dir = PathBuf::from("/tmp/pages");
        config.export.pad_to_page = true;

        let restored = ConfigFile::from_ini(&config.to_ini());
        assert_eq!(restored, config);
    }

    #[test]
    fn test_from_ini_ignores_bad_values() {
        let mut ini = Ini::new();
        ini.with_section(Some("page"))
            .set("aspect_ratio", "not-a-number")
            .set("direction", "sideways");

        let config = ConfigFile::from_ini(&ini);
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_config_key_parse_and_roundtrip() {
        for key in ConfigKey::ALL {
            let parsed: ConfigKey = key.to_string().parse().unwrap();
            assert_eq!(parsed, key);
        }
        assert!("page.nope".parse::<ConfigKey>().is_err());
    }

    #[test]
    fn test_config_key_set_validates() {
        let mut config = ConfigFile::default();

        ConfigKey::PageDirection.set(&mut config, "rtl").unwrap();
        assert_eq!(config.page.direction, SliceDirection::RightToLeft);

        assert!(ConfigKey::PageAspectRatio.set(&mut config, "-2").is_err());
        assert!(ConfigKey::ExportPadToPage.set(&mut config, "maybe").is_err());
    }
}
