//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog root; the crawl starts here and images resolve against it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Value of the single User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Stop once at least this many records are collected
    #[serde(default = "default_target_records")]
    pub target_records: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries after the first failed attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Backoff unit; retry N waits 2^N units
    #[serde(default = "default_backoff_unit_ms")]
    pub backoff_unit_ms: u64,

    /// Lower bound of the politeness delay after each successful fetch
    #[serde(default = "default_delay_min_ms")]
    pub delay_min_ms: u64,

    /// Upper bound of the politeness delay after each successful fetch
    #[serde(default = "default_delay_max_ms")]
    pub delay_max_ms: u64,

    /// Look up the next-page link in the already parsed listing instead of fetching it again
    #[serde(default)]
    pub reuse_listing_for_next_page: bool,

    /// Row-oriented output file
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,

    /// Document-oriented output file
    #[serde(default = "default_json_path")]
    pub json_path: PathBuf,
}

fn default_base_url() -> String {
    "https://books.toscrape.com/".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

fn default_target_records() -> usize {
    500
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_backoff_unit_ms() -> u64 {
    1000
}

fn default_delay_min_ms() -> u64 {
    1000
}

fn default_delay_max_ms() -> u64 {
    3000
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("books_data.csv")
}

fn default_json_path() -> PathBuf {
    PathBuf::from("books_data.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            proxy: None,
            target_records: default_target_records(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            backoff_unit_ms: default_backoff_unit_ms(),
            delay_min_ms: default_delay_min_ms(),
            delay_max_ms: default_delay_max_ms(),
            reuse_listing_for_next_page: false,
            csv_path: default_csv_path(),
            json_path: default_json_path(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("book-scraper").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(base_url) = std::env::var("BOOKS_BASE_URL") {
            if url::Url::parse(&base_url).is_ok() {
                self.base_url = base_url;
            }
        }

        if let Ok(target) = std::env::var("BOOKS_TARGET") {
            if let Ok(t) = target.parse() {
                self.target_records = t;
            }
        }

        if let Ok(proxy) = std::env::var("BOOKS_PROXY") {
            self.proxy = Some(proxy);
        }

        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
