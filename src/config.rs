//! Layered runtime settings: coded defaults, an optional `config.toml`, and
//! environment variables.

use config::{Config, ConfigError};
use serde::Deserialize;

/// Top-level settings tree.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Local slot storage.
    pub storage: StorageSettings,
    /// Advisory mirror credentials.
    pub mirror: MirrorSettings,
    /// Log filter.
    pub logging: LoggingSettings,
}

/// Location of the slot database.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Filesystem path of the SQLite slot database.
    pub path: String,
}

/// Credentials for the table-storage mirror.
#[derive(Debug, Clone, Deserialize)]
pub struct MirrorSettings {
    /// Table-storage base identifier.
    pub base_id: String,
    /// Bearer token.
    pub api_key: String,
    /// Remote table name.
    pub table_name: String,
}

impl MirrorSettings {
    /// True when both credentials are present and not the `YOUR_…`
    /// placeholders shipped in `config.example.toml`.
    pub fn is_configured(&self) -> bool {
        let placeholder = |v: &str| v.is_empty() || v.starts_with("YOUR_");
        !placeholder(&self.base_id) && !placeholder(&self.api_key)
    }
}

/// Log verbosity.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `rsvplog=debug`.
    pub level: String,
}

impl Settings {
    /// Loads settings from coded defaults, an optional `config.toml`, and
    /// `RSVPLOG`-prefixed environment variables (`__` path separator).
    /// Environment variables take precedence.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("storage.path", "rsvplog.db")?
            .set_default("mirror.base_id", "")?
            .set_default("mirror.api_key", "")?
            .set_default("mirror.table_name", "RSVPs")?
            .set_default("logging.level", "info")?
            .add_source(config::File::with_name("config.toml").required(false))
            .add_source(
                config::Environment::with_prefix("RSVPLOG")
                    .separator("__")
                    .ignore_empty(true),
            )
            .build()?
            .try_deserialize::<Settings>()
    }
}

/// Loads `.env` when present, then [`Settings::load`].
pub fn load_config() -> Result<Settings, ConfigError> {
    dotenvy::dotenv().ok();
    Settings::load()
}
