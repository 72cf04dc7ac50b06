//! Application configuration loaded from environment variables.

use std::env;

use feedsync_infra::RemoteConfig;

#[cfg(feature = "sqlite")]
use feedsync_infra::SqliteConfig;

/// Which local store backs the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalStoreKind {
    Memory,
    Sqlite,
}

impl LocalStoreKind {
    /// Unknown values fall back to `Memory`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "sqlite" => Self::Sqlite,
            _ => Self::Memory,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub remote: RemoteConfig,
    pub store: LocalStoreKind,
    #[cfg(feature = "sqlite")]
    pub sqlite: SqliteConfig,
    pub page_size: u32,
    pub start_online: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            remote: RemoteConfig::default(),
            store: LocalStoreKind::Memory,
            #[cfg(feature = "sqlite")]
            sqlite: SqliteConfig::default(),
            page_size: 10,
            start_online: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            remote: RemoteConfig::from_env(),
            store: env::var("LOCAL_STORE")
                .map(|v| LocalStoreKind::parse(&v))
                .unwrap_or(LocalStoreKind::Memory),
            #[cfg(feature = "sqlite")]
            sqlite: SqliteConfig::from_env(),
            page_size: env::var("PAGE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|&size| size > 0)
                .unwrap_or(10),
            start_online: env::var("START_ONLINE")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        }
    }
}
