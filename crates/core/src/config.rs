//! Hotel configuration schema and loader
//!
//! Settings are read from `hotel.toml` in the platform config directory
//! unless another path is given. A missing file yields the defaults.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::primes::is_prime;

/// Environment variable that overrides the config file location
pub const CONFIG_ENV_VAR: &str = "HILBERT_CONFIG";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "hotel.toml";

/// Hotel settings loaded from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HotelConfig {
    /// Bases for the first assignment batch
    pub initial_primes: [u64; 2],
    /// Default destination offered by the save command
    pub export_file: PathBuf,
    /// Clear the terminal between menu screens
    pub clear_screen: bool,
    /// Log filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for HotelConfig {
    fn default() -> Self {
        Self {
            initial_primes: [2, 3],
            export_file: PathBuf::from("hotel_data.txt"),
            clear_screen: true,
            log_filter: "warn".to_string(),
        }
    }
}

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Initial base {0} is not prime")]
    NotPrime(u64),
    #[error("Initial bases must be distinct, got {0} twice")]
    EqualBases(u64),
}

impl HotelConfig {
    /// Load config from a file, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), "Loaded hotel config");
        Ok(config)
    }

    /// Parse and validate config from TOML content
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: HotelConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(&base) = self.initial_primes.iter().find(|&&base| !is_prime(base)) {
            return Err(ConfigError::NotPrime(base));
        }
        let [first, second] = self.initial_primes;
        if first == second {
            return Err(ConfigError::EqualBases(first));
        }
        Ok(())
    }

    /// Default config file location for this platform
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "onyx", "hilbert-hotel")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Pick the config path: explicit argument, then environment, then
    /// the platform default
    pub fn resolve_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
            .or_else(Self::default_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_empty_config() {
        let config = HotelConfig::from_toml("").unwrap();
        assert_eq!(config, HotelConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
initial_primes = [5, 7]
export_file = "guests.txt"
clear_screen = false
log_filter = "hilbert_core=debug"
"#;
        let config = HotelConfig::from_toml(toml).unwrap();
        assert_eq!(config.initial_primes, [5, 7]);
        assert_eq!(config.export_file, PathBuf::from("guests.txt"));
        assert!(!config.clear_screen);
        assert_eq!(config.log_filter, "hilbert_core=debug");
    }

    #[test]
    fn test_composite_base_rejected() {
        let err = HotelConfig::from_toml("initial_primes = [2, 9]").unwrap_err();
        assert!(matches!(err, ConfigError::NotPrime(9)));
    }

    #[test]
    fn test_equal_bases_rejected() {
        let err = HotelConfig::from_toml("initial_primes = [3, 3]").unwrap_err();
        assert!(matches!(err, ConfigError::EqualBases(3)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = HotelConfig::from_toml("rooms = 3").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = HotelConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, HotelConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "initial_primes = [3, 11]\n").unwrap();

        let config = HotelConfig::load(&path).unwrap();
        assert_eq!(config.initial_primes, [3, 11]);
        assert!(config.clear_screen);
    }

    #[test]
    fn test_explicit_path_wins() {
        let explicit = PathBuf::from("/tmp/custom.toml");
        assert_eq!(
            HotelConfig::resolve_path(Some(explicit.clone())),
            Some(explicit)
        );
    }
}
