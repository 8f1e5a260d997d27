use std::path::PathBuf;
use std::time::Duration;

use crate::client::DEFAULT_BACKEND_BASE;
use crate::error::ConfigError;

pub const ENV_BACKEND_BASE: &str = "LOGWATCH_BACKEND_BASE";
pub const ENV_TOKEN_STORE: &str = "LOGWATCH_TOKEN_STORE";
pub const ENV_DATA_DIR: &str = "LOGWATCH_DATA_DIR";
pub const ENV_HTTP_TIMEOUT: &str = "LOGWATCH_HTTP_TIMEOUT_SECS";

/// Where the session token is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStoreKind {
    Keychain,
    Sqlite,
    /// Keychain with SQLite fallback.
    Layered,
    Memory,
}

impl std::str::FromStr for TokenStoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keychain" => Ok(TokenStoreKind::Keychain),
            "sqlite" => Ok(TokenStoreKind::Sqlite),
            "layered" => Ok(TokenStoreKind::Layered),
            "memory" => Ok(TokenStoreKind::Memory),
            _ => Err(ConfigError::InvalidValue {
                key: ENV_TOKEN_STORE,
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub backend_base: String,
    pub token_store: TokenStoreKind,
    pub data_dir: PathBuf,
    pub http_timeout: Option<Duration>,
}

impl AppConfig {
    /// Load `.env` (if present) and read settings from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable source. Unset or blank
    /// variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend_base = var(ENV_BACKEND_BASE).unwrap_or_else(|| DEFAULT_BACKEND_BASE.to_string());

        let token_store = match var(ENV_TOKEN_STORE) {
            Some(v) => v.parse()?,
            None => TokenStoreKind::Layered,
        };

        let data_dir = match var(ENV_DATA_DIR) {
            Some(v) => PathBuf::from(v),
            None => crate::db::logwatch_data_dir()?,
        };

        let http_timeout = match var(ENV_HTTP_TIMEOUT) {
            Some(v) => {
                let secs: u64 = v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: ENV_HTTP_TIMEOUT,
                    value: v.clone(),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            backend_base,
            token_store,
            data_dir,
            http_timeout,
        })
    }

    pub fn db_path(&self) -> PathBuf {
        crate::db::db_path(&self.data_dir)
    }
}
