//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (DEX_*)
//! 2. TOML config file (if DEX_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (DEX_*)
/// 2. TOML config file (if DEX_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite database that receives entity and move records.
    ///
    /// Set via DEX_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// First page of the entity chain.
    ///
    /// Set via DEX_START_URL environment variable.
    #[serde(default = "default_start_url")]
    pub start_url: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via DEX_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum bytes to fetch per request.
    ///
    /// Set via DEX_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// HTTP request / page navigation timeout in milliseconds.
    ///
    /// Set via DEX_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Bounded wait for page sections when rendering in a browser.
    ///
    /// Set via DEX_QUERY_TIMEOUT_MS environment variable.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Whether to respect robots.txt rules.
    ///
    /// Set via DEX_RESPECT_ROBOTS environment variable.
    #[serde(default = "default_true")]
    pub respect_robots: bool,

    /// Whether pages are rendered in a headless browser instead of fetched as static HTML.
    ///
    /// Set via DEX_RENDER_ENABLED environment variable.
    #[serde(default)]
    pub render_enabled: bool,

    /// Directory sprite images are written to.
    ///
    /// Set via DEX_ASSET_DIR environment variable.
    #[serde(default = "default_asset_dir")]
    pub asset_dir: PathBuf,

    /// URL prefix stripped from sprite URLs to derive the file name.
    ///
    /// Set via DEX_ASSET_PREFIX environment variable.
    #[serde(default = "default_asset_prefix")]
    pub asset_prefix: String,

    /// Stop after this many entity pages. Unbounded when unset.
    ///
    /// Set via DEX_MAX_PAGES environment variable.
    #[serde(default)]
    pub max_pages: Option<usize>,

    /// Whether to crawl the generation-indexed move catalog before the entity chain.
    ///
    /// Set via DEX_CATALOG_ENABLED environment variable.
    #[serde(default)]
    pub catalog_enabled: bool,

    /// Catalog page URL without the trailing generation number.
    ///
    /// Set via DEX_CATALOG_BASE_URL environment variable.
    #[serde(default = "default_catalog_base_url")]
    pub catalog_base_url: String,

    /// Number of generations in the move catalog.
    ///
    /// Set via DEX_GENERATIONS environment variable.
    #[serde(default = "default_generations")]
    pub generations: u8,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./dexcrawl.sqlite")
}

fn default_start_url() -> String {
    "https://www.serebii.net/pokedex-swsh/bulbasaur".into()
}

fn default_user_agent() -> String {
    "dexcrawl/0.1".into()
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_query_timeout_ms() -> u64 {
    1_000
}

fn default_true() -> bool {
    true
}

fn default_asset_dir() -> PathBuf {
    PathBuf::from("./images")
}

fn default_asset_prefix() -> String {
    "https://www.serebii.net/swordshield/pokemon/".into()
}

fn default_catalog_base_url() -> String {
    "https://pokemondb.net/move/generation/".into()
}

fn default_generations() -> u8 {
    8
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            start_url: default_start_url(),
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            timeout_ms: default_timeout_ms(),
            query_timeout_ms: default_query_timeout_ms(),
            respect_robots: true,
            render_enabled: false,
            asset_dir: default_asset_dir(),
            asset_prefix: default_asset_prefix(),
            max_pages: None,
            catalog_enabled: false,
            catalog_base_url: default_catalog_base_url(),
            generations: default_generations(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `DEX_`
    /// 2. TOML file from `DEX_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("DEX_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("DEX_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
