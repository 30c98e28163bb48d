//! # Booking Configuration
//!
//! Where bookings are sent and the defaults filled into payloads.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TAVERN_API_BASE_URL=https://tavern.example.com/restaurant          │
//! │     TAVERN_API_TIMEOUT_SECS=5                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/tavern/booking.toml (Linux)                              │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost/restaurant, table 1, party of 2                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "http://localhost/restaurant"
//! table_endpoint = "book_table.php"
//! game_endpoint = "api/game-booking.php"
//! timeout_secs = 10
//!
//! [booking]
//! default_party_size = 2
//! table_id = 1
//!
//! [auth]
//! login_path = "/login"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tavern_core::BookingKind;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{BookingError, BookingResult};

// =============================================================================
// API Settings
// =============================================================================

/// Backend endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL the endpoint paths are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the table booking endpoint, relative to `base_url`.
    #[serde(default = "default_table_endpoint")]
    pub table_endpoint: String,

    /// Path of the game booking endpoint, relative to `base_url`.
    #[serde(default = "default_game_endpoint")]
    pub game_endpoint: String,

    /// Request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost/restaurant".to_string()
}

fn default_table_endpoint() -> String {
    "book_table.php".to_string()
}

fn default_game_endpoint() -> String {
    "api/game-booking.php".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            table_endpoint: default_table_endpoint(),
            game_endpoint: default_game_endpoint(),
            timeout_secs: default_timeout(),
        }
    }
}

// =============================================================================
// Booking Settings
// =============================================================================

/// Defaults filled into table payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSettings {
    /// Guests sent when the form leaves party size empty.
    #[serde(default = "default_party_size")]
    pub default_party_size: u32,

    /// Table every table booking is recorded against.
    #[serde(default = "default_table_id")]
    pub table_id: u32,
}

fn default_party_size() -> u32 {
    2
}

fn default_table_id() -> u32 {
    1
}

impl Default for BookingSettings {
    fn default() -> Self {
        BookingSettings {
            default_party_size: default_party_size(),
            table_id: default_table_id(),
        }
    }
}

// =============================================================================
// Auth Settings
// =============================================================================

/// Where anonymous visitors are sent to sign in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSettings {
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

fn default_login_path() -> String {
    "/login".to_string()
}

impl Default for AuthSettings {
    fn default() -> Self {
        AuthSettings {
            login_path: default_login_path(),
        }
    }
}

// =============================================================================
// Main Booking Configuration
// =============================================================================

/// Complete booking configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub booking: BookingSettings,

    #[serde(default)]
    pub auth: AuthSettings,
}

impl BookingConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (booking.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> BookingResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading booking config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load booking config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> BookingResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| BookingError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| BookingError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| BookingError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Booking config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> BookingResult<()> {
        let base = self.base_url()?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(BookingError::InvalidUrl(format!(
                "API base URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        // Endpoints must resolve against the base
        self.endpoint_url(&BookingKind::Table)?;
        self.endpoint_url(&BookingKind::Game {
            variant: tavern_core::GameVariant::TableTennis,
        })?;

        if self.api.timeout_secs == 0 {
            return Err(BookingError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.booking.default_party_size == 0 {
            return Err(BookingError::InvalidConfig(
                "default_party_size must be greater than 0".into(),
            ));
        }

        if !self.auth.login_path.starts_with('/') {
            return Err(BookingError::InvalidConfig(format!(
                "login_path must be an absolute path, got: {}",
                self.auth.login_path
            )));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("TAVERN_API_BASE_URL") {
            debug!(url = %url, "Overriding API base URL from environment");
            self.api.base_url = url;
        }

        if let Ok(timeout) = std::env::var("TAVERN_API_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(t) => self.api.timeout_secs = t,
                Err(_) => warn!(value = %timeout, "Ignoring invalid TAVERN_API_TIMEOUT_SECS"),
            }
        }

        if let Ok(table_id) = std::env::var("TAVERN_TABLE_ID") {
            if let Ok(id) = table_id.parse::<u32>() {
                self.booking.table_id = id;
            }
        }

        if let Ok(path) = std::env::var("TAVERN_LOGIN_PATH") {
            self.auth.login_path = path;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tavern", "tavern")
            .map(|dirs| dirs.config_dir().join("booking.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Parsed base URL, with a trailing slash so relative endpoints append.
    pub fn base_url(&self) -> BookingResult<Url> {
        let mut raw = self.api.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Ok(Url::parse(&raw)?)
    }

    /// Full URL a booking of `kind` is posted to.
    pub fn endpoint_url(&self, kind: &BookingKind) -> BookingResult<Url> {
        let endpoint = match kind {
            BookingKind::Table => &self.api.table_endpoint,
            BookingKind::Game { .. } => &self.api.game_endpoint,
        };
        Ok(self.base_url()?.join(endpoint.trim_start_matches('/'))?)
    }

    /// Request timeout.
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.api.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tavern_core::GameVariant;

    #[test]
    fn test_default_config() {
        let config = BookingConfig::default();
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.booking.default_party_size, 2);
        assert_eq!(config.booking.table_id, 1);
        assert_eq!(config.auth.login_path, "/login");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoint_urls() {
        let config = BookingConfig::default();
        assert_eq!(
            config.endpoint_url(&BookingKind::Table).unwrap().as_str(),
            "http://localhost/restaurant/book_table.php"
        );
        assert_eq!(
            config
                .endpoint_url(&BookingKind::Game {
                    variant: GameVariant::EightBallPool
                })
                .unwrap()
                .as_str(),
            "http://localhost/restaurant/api/game-booking.php"
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = BookingConfig::default();

        config.api.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "https://tavern.example.com/restaurant/".to_string();
        assert!(config.validate().is_ok());

        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
        config.api.timeout_secs = 5;

        config.booking.default_party_size = 0;
        assert!(config.validate().is_err());
        config.booking.default_party_size = 2;

        config.auth.login_path = "login".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: BookingConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://tavern.example.com"

            [booking]
            table_id = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://tavern.example.com");
        assert_eq!(config.api.table_endpoint, "book_table.php");
        assert_eq!(config.booking.table_id, 7);
        assert_eq!(config.booking.default_party_size, 2);
        assert_eq!(config.auth.login_path, "/login");
    }

    #[test]
    fn test_save_and_load_roundtrip_through_file() {
        let dir = std::env::temp_dir().join(format!("tavern-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join("booking.toml");

        let mut config = BookingConfig::default();
        config.booking.table_id = 4;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[api]"));
        assert!(contents.contains("[booking]"));

        let loaded: BookingConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded.booking.table_id, 4);

        std::fs::remove_dir_all(dir).unwrap();
    }
}
