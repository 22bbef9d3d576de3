//! Configuration management for codekeeper.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::entry::Coordinates;
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "codekeeper";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "codekeeper.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `CODEKEEPER_`)
/// 2. TOML config file at `~/.config/codekeeper/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Location configuration.
    pub location: LocationConfig,
    /// Reverse-geocoding configuration.
    pub geocoding: GeocodingConfig,
    /// Nearby-view configuration.
    pub nearby: NearbyConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/codekeeper/codekeeper.db`
    pub database_path: Option<PathBuf>,
}

/// Location-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Fixed latitude used as the current position, in degrees.
    pub latitude: Option<f64>,
    /// Fixed longitude used as the current position, in degrees.
    pub longitude: Option<f64>,
    /// Timeout for a single position acquisition, in seconds.
    pub timeout_secs: u64,
}

/// Reverse-geocoding configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    /// Whether to attempt reverse geocoding at all.
    pub enabled: bool,
    /// Base URL of the geocoding service.
    pub endpoint: String,
    /// Client identifier sent as the User-Agent header.
    pub user_agent: String,
}

/// Nearby-view configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NearbyConfig {
    /// Radius of the nearby view, in miles.
    pub radius_miles: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            timeout_secs: 10,
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("codekeeper/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for NearbyConfig {
    fn default() -> Self {
        Self { radius_miles: 50.0 }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `CODEKEEPER_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("CODEKEEPER_").split("_"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.nearby.radius_miles <= 0.0 {
            return Err(Error::ConfigValidation {
                message: format!(
                    "radius_miles must be greater than 0 (got {})",
                    self.nearby.radius_miles
                ),
            });
        }

        if self.location.timeout_secs == 0 {
            return Err(Error::ConfigValidation {
                message: "timeout_secs must be greater than 0".to_string(),
            });
        }

        if self.location.latitude.is_some() != self.location.longitude.is_some() {
            return Err(Error::ConfigValidation {
                message: "latitude and longitude must be set together".to_string(),
            });
        }

        if let Some(lat) = self.location.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(Error::ConfigValidation {
                    message: format!("latitude {lat} is outside [-90, 90]"),
                });
            }
        }

        if let Some(lon) = self.location.longitude {
            if !(-180.0..=180.0).contains(&lon) {
                return Err(Error::ConfigValidation {
                    message: format!("longitude {lon} is outside [-180, 180]"),
                });
            }
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the geolocation timeout as a Duration.
    #[must_use]
    pub fn geolocation_timeout(&self) -> Duration {
        Duration::from_secs(self.location.timeout_secs)
    }

    /// Get the configured fixed position, if both components are set.
    #[must_use]
    pub fn configured_position(&self) -> Option<Coordinates> {
        match (self.location.latitude, self.location.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.database_path.is_none());
        assert!(config.geocoding.enabled);
        assert_eq!(config.location.timeout_secs, 10);
        assert!((config.nearby.radius_miles - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_radius() {
        let mut config = Config::default();
        config.nearby.radius_miles = 0.0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("radius_miles"));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.location.timeout_secs = 0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_validate_lone_latitude() {
        let mut config = Config::default();
        config.location.latitude = Some(40.0);

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("together"));
    }

    #[test]
    fn test_validate_out_of_range_latitude() {
        let mut config = Config::default();
        config.location.latitude = Some(95.0);
        config.location.longitude = Some(0.0);

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn test_validate_out_of_range_longitude() {
        let mut config = Config::default();
        config.location.latitude = Some(0.0);
        config.location.longitude = Some(200.0);

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("longitude"));
    }

    #[test]
    fn test_database_path_default() {
        let config = Config::default();
        let path = config.database_path();

        assert!(path.to_string_lossy().contains("codekeeper.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/db.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/db.sqlite")
        );
    }

    #[test]
    fn test_geolocation_timeout() {
        let config = Config::default();
        assert_eq!(config.geolocation_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_configured_position_requires_both() {
        let mut config = Config::default();
        assert!(config.configured_position().is_none());

        config.location.latitude = Some(40.0);
        assert!(config.configured_position().is_none());

        config.location.longitude = Some(-74.0);
        let coords = config.configured_position().unwrap();
        assert!((coords.latitude - 40.0).abs() < f64::EPSILON);
        assert!((coords.longitude + 74.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("codekeeper"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_serialize_round_trip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_geocoding_defaults() {
        let geocoding = GeocodingConfig::default();
        assert!(geocoding.enabled);
        assert!(geocoding.endpoint.contains("nominatim"));
        assert!(geocoding.user_agent.starts_with("codekeeper/"));
    }
}
