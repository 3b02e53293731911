//! Settings persistence utilities
//!
//! Loads and saves per-demo presentation settings to disk. Character and
//! wish state is deliberately never stored: every run starts with the full
//! cast unfreed, like a page reload.

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Error type for settings operations
#[derive(Debug)]
pub enum ConfigError {
    /// The platform offers no config directory
    NoConfigDir,
    /// IO failure while reading or writing a settings file
    Io(io::Error),
    /// The settings file is not valid TOML for the expected shape
    Parse(toml::de::Error),
    /// The settings value refused to serialize
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "no usable config directory on this platform"),
            ConfigError::Io(e) => write!(f, "settings I/O failed: {}", e),
            ConfigError::Parse(e) => write!(f, "settings file is not valid TOML: {}", e),
            ConfigError::Serialize(e) => write!(f, "settings could not be serialized: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

/// Base directory holding every demo's settings file.
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "wish-series", "wishes")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Path of one demo's settings file, named after the demo.
pub fn config_path(demo_name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(format!("{}.toml", demo_name)))
}

/// Load a demo's settings.
///
/// A missing file is not an error: it yields `Ok(None)` and the caller
/// falls back to defaults. A file that exists but will not parse is.
pub fn load_config<T: DeserializeOwned>(demo_name: &str) -> Result<Option<T>, ConfigError> {
    let path = config_path(demo_name).ok_or(ConfigError::NoConfigDir)?;

    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let config: T = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Save a demo's settings, creating the config directory on first save.
pub fn save_config<T: Serialize>(demo_name: &str, config: &T) -> Result<(), ConfigError> {
    let path = config_path(demo_name).ok_or(ConfigError::NoConfigDir)?;
    let contents = toml::to_string_pretty(config)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, contents)?;
    Ok(())
}

/// Remove a demo's settings file. Removing a file that was never written
/// is fine.
pub fn delete_config(demo_name: &str) -> Result<(), ConfigError> {
    let path = config_path(demo_name).ok_or(ConfigError::NoConfigDir)?;

    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestSettings {
        reduced_motion: bool,
        angle: f32,
    }

    #[test]
    fn test_config_dir() {
        let dir = config_dir();
        assert!(dir.is_some());
    }

    #[test]
    fn test_config_path_is_named_after_the_demo() {
        let path = config_path("test_demo");
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("test_demo.toml"));
    }

    #[test]
    fn test_settings_round_trip_via_toml() {
        let settings = TestSettings {
            reduced_motion: true,
            angle: 30.0,
        };
        let text = toml::to_string_pretty(&settings).unwrap();
        let back: TestSettings = toml::from_str(&text).unwrap();
        assert_eq!(back, settings);
    }
}
