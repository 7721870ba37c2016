//! Configuration loading and resolution
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is not an error: the dashboard starts on defaults.
//! A config file that exists but does not parse is.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const ENV_CONFIG: &str = "ROADSENSE_CONFIG";
pub const ENV_PORT: &str = "ROADSENSE_PORT";
pub const ENV_BIND: &str = "ROADSENSE_BIND";
pub const ENV_FEED_URL: &str = "ROADSENSE_FEED_URL";
pub const ENV_CACHE_TTL_SECS: &str = "ROADSENSE_CACHE_TTL_SECS";

pub const DEFAULT_PORT: u16 = 5780;
pub const DEFAULT_FEED_URL: &str = "https://511on.ca/api/v2/get/event";

/// Whole configuration file (`config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub feed: FeedConfig,
    pub map: MapConfig,
    pub logging: LoggingConfig,
}

/// `[server]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// `[feed]` section: the upstream traffic API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub url: String,
    pub format: String,
    pub lang: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Fetch cache lifetime; 0 refetches on every request
    pub cache_ttl_secs: u64,
    /// Fixed UTC offset (minutes east) used to date offset-bearing timestamps
    pub display_utc_offset_minutes: Option<i32>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            format: "json".to_string(),
            lang: "en".to_string(),
            user_agent: format!("RoadSense/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            cache_ttl_secs: 3600,
            display_utc_offset_minutes: None,
        }
    }
}

impl FeedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// `None` when unset or a full day or more from UTC
    pub fn display_offset(&self) -> Option<FixedOffset> {
        self.display_utc_offset_minutes
            .and_then(|minutes| FixedOffset::east_opt(minutes.checked_mul(60)?))
    }

    /// Query parameters sent with every fetch
    pub fn query(&self) -> Vec<(String, String)> {
        vec![
            ("format".to_string(), self.format.clone()),
            ("lang".to_string(), self.lang.clone()),
        ]
    }
}

/// `[map]` section: initial view and tile layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        // Downtown Toronto
        Self {
            center_latitude: 43.651070,
            center_longitude: -79.347015,
            zoom: 11,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; OpenStreetMap contributors".to_string(),
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter directive (overridden by `RUST_LOG`)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl TomlConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Reject settings the dashboard cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("server.port must be non-zero".to_string()));
        }
        if self.feed.url.trim().is_empty() {
            return Err(Error::Config("feed.url must not be empty".to_string()));
        }
        if self.feed.timeout_secs == 0 {
            return Err(Error::Config("feed.timeout_secs must be non-zero".to_string()));
        }
        if self.feed.display_utc_offset_minutes.is_some() && self.feed.display_offset().is_none() {
            return Err(Error::Config(
                "feed.display_utc_offset_minutes must be within ±1439".to_string(),
            ));
        }
        if self.map.zoom > 20 {
            return Err(Error::Config(format!("map.zoom {} out of range 0-20", self.map.zoom)));
        }
        if !(-90.0..=90.0).contains(&self.map.center_latitude) {
            return Err(Error::Config(format!(
                "map.center_latitude {} out of range",
                self.map.center_latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.map.center_longitude) {
            return Err(Error::Config(format!(
                "map.center_longitude {} out of range",
                self.map.center_longitude
            )));
        }
        Ok(())
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub feed_url: Option<String>,
    pub cache_ttl_secs: Option<u64>,
}

/// Where the file layer of a resolved configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No config file found; compiled defaults were used
    Defaults,
}

/// Outcome of [`ConfigResolver::resolve`]
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: TomlConfig,
    pub source: ConfigSource,
}

/// Resolves the effective configuration from CLI, environment, file and defaults
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    overrides: ConfigOverrides,
}

impl ConfigResolver {
    pub fn new(overrides: ConfigOverrides) -> Self {
        Self { overrides }
    }

    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let (mut config, source) = self.load_file_layer()?;

        // Environment layer
        if let Some(bind) = env_string(ENV_BIND) {
            config.server.bind = bind;
        }
        if let Some(port) = env_parsed::<u16>(ENV_PORT)? {
            config.server.port = port;
        }
        if let Some(url) = env_string(ENV_FEED_URL) {
            config.feed.url = url;
        }
        if let Some(ttl) = env_parsed::<u64>(ENV_CACHE_TTL_SECS)? {
            config.feed.cache_ttl_secs = ttl;
        }

        // Command-line layer
        if let Some(bind) = &self.overrides.bind {
            config.server.bind = bind.clone();
        }
        if let Some(port) = self.overrides.port {
            config.server.port = port;
        }
        if let Some(url) = &self.overrides.feed_url {
            config.feed.url = url.clone();
        }
        if let Some(ttl) = self.overrides.cache_ttl_secs {
            config.feed.cache_ttl_secs = ttl;
        }

        Ok(ResolvedConfig { config, source })
    }

    /// An explicitly named file must exist; the default locations may not
    fn load_file_layer(&self) -> Result<(TomlConfig, ConfigSource)> {
        let explicit = self
            .overrides
            .config_path
            .clone()
            .or_else(|| env_string(ENV_CONFIG).map(PathBuf::from));

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!("Config file not found: {}", path.display())));
            }
            let config = TomlConfig::load_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        match default_config_path() {
            Some(path) => {
                let config = TomlConfig::load_file(&path)?;
                Ok((config, ConfigSource::File(path)))
            }
            None => Ok((TomlConfig::default(), ConfigSource::Defaults)),
        }
    }
}

/// First existing config file in the platform's usual locations
pub fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("roadsense").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/roadsense/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match env_string(name) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::Config(format!("{} has invalid value '{}'", name, value))),
        None => Ok(None),
    }
}
