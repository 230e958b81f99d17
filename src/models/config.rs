//! Configuration model loaded from external sources.

use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::search::DEFAULT_PAGE_SIZE;

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_search_debounce_ms() -> u64 {
    300
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// SQLite database holding advocates. When unset the bundled list is served.
    #[serde(default)]
    pub database_url: Option<String>,
    pub templates_dir: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Idle time before the search box submits a new query.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

impl ServerConfig {
    /// Returns the configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Loads settings from `config/default`, the `APP_ENV` profile (defaults to
/// `local`) and `APP_*` environment variables, in that order.
pub fn load_server_config() -> Result<ServerConfig, ConfigError> {
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    Config::builder()
        .add_source(File::with_name("config/default"))
        .add_source(File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(Environment::with_prefix("APP"))
        .build()?
        .try_deserialize::<ServerConfig>()
}
