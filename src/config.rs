use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server_addr: String,
    pub storage: StorageBackend,
    pub database_url: String,
    pub upload_dir: PathBuf,
    /// Base URL prefixed to icon paths when assets are not embedded.
    pub asset_base_url: String,
    /// When set, reference-data icons are read from this directory at
    /// startup and served as base64 data URIs.
    pub assets_dir: Option<PathBuf>,
    /// Single-page-app shell served on unmatched routes. Without it the
    /// fallback is a plain 404.
    pub spa_index: Option<PathBuf>,
    pub log_level: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("config"))
            .add_source(Environment::default())
            .build()?;

        s.try_deserialize()
    }
}
