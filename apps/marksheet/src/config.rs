//! # Configuration
//!
//! Settings are layered, later layers winning:
//! 1. Built-in defaults
//! 2. Optional TOML file (`--config marksheet.toml`)
//! 3. Environment variables (`MARKSHEET_CORS_ORIGINS`, `MARKSHEET_RATE_LIMIT`)
//! 4. Command-line flags (applied by the CLI)
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [storage]
//! backend = "redb"
//! path = "students.redb"
//!
//! [http]
//! cors_origins = "http://localhost:3000"
//! rate_limit = 100
//! body_limit_bytes = 65536
//! ```

use marksheet_core::{MarksheetError, Registry};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default rate limit: 100 requests per second.
pub const DEFAULT_RATE_LIMIT: u32 = 100;

/// Default cap on request body size (64 KiB).
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

// =============================================================================
// CONFIG SECTIONS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Which record store to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Volatile in-memory map.
    Memory,
    /// redb database file.
    #[default]
    Redb,
}

impl Backend {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Redb => "redb",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub backend: Backend,
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            path: PathBuf::from("marksheet.redb"),
        }
    }
}

impl StorageConfig {
    /// Open a registry on the configured backend.
    pub fn open_registry(&self) -> Result<Registry, MarksheetError> {
        match self.backend {
            Backend::Memory => Ok(Registry::new()),
            Backend::Redb => Registry::with_redb(&self.path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    /// Comma-separated allowed origins, `"*"` for all, `None` for localhost only.
    pub cors_origins: Option<String>,
    /// Requests per second across all clients. 0 disables rate limiting.
    pub rate_limit: u32,
    pub body_limit_bytes: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            cors_origins: None,
            rate_limit: DEFAULT_RATE_LIMIT,
            body_limit_bytes: DEFAULT_BODY_LIMIT,
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

impl Config {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, MarksheetError> {
        toml::from_str(text)
            .map_err(|e| MarksheetError::SerializationError(format!("Invalid config: {}", e)))
    }

    /// Load defaults, then the optional file, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, MarksheetError> {
        let mut config = match path {
            Some(p) => {
                let text = std::fs::read_to_string(p).map_err(|e| {
                    MarksheetError::IoError(format!("Cannot read config '{}': {}", p.display(), e))
                })?;
                Self::from_toml_str(&text)?
            }
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Apply `MARKSHEET_*` environment overrides.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from `lookup`, keyed by environment variable name.
    /// An unparsable rate limit is logged and leaves the current value.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(origins) = lookup("MARKSHEET_CORS_ORIGINS") {
            self.http.cors_origins = Some(origins);
        }
        if let Some(raw) = lookup("MARKSHEET_RATE_LIMIT") {
            match raw.trim().parse::<u32>() {
                Ok(limit) => self.http.rate_limit = limit,
                Err(e) => tracing::warn!("Ignoring invalid MARKSHEET_RATE_LIMIT '{}': {}", raw, e),
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
