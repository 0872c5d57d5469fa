use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::{ScoringVariant, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub appwrite: AppwriteSettings,
    #[serde(default)]
    pub collection: CollectionSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppwriteSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    #[serde(default = "default_users_collection")]
    pub users: String,
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            users: default_users_collection(),
        }
    }
}

fn default_users_collection() -> String { "users".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    /// Without a Redis URL the cache is in-process only
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
    /// Documents requested per page when loading the mentor pool
    #[serde(default = "default_mentor_page_size")]
    pub mentor_page_size: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_top_n: default_top_n(),
            mentor_page_size: default_mentor_page_size(),
        }
    }
}

impl MatchingSettings {
    /// Resolve the requested result count: default when absent, 0 when negative
    pub fn resolve_top_n(&self, requested: Option<i32>) -> usize {
        match requested {
            None => self.default_top_n,
            Some(n) => usize::try_from(n).unwrap_or(0),
        }
    }
}

fn default_top_n() -> usize { crate::core::DEFAULT_TOP_N }
fn default_mentor_page_size() -> usize { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default = "default_variant")]
    pub variant: ScoringVariant,
    #[serde(default)]
    pub weights: WeightsConfig,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            variant: default_variant(),
            weights: WeightsConfig::default(),
        }
    }
}

fn default_variant() -> ScoringVariant { ScoringVariant::Canonical }

/// Optional per-factor overrides applied on top of the selected variant
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeightsConfig {
    pub major: Option<f64>,
    pub interests: Option<f64>,
    pub personality: Option<f64>,
}

impl ScoringSettings {
    pub fn weights(&self) -> ScoringWeights {
        let base = self.variant.weights();
        ScoringWeights {
            major: self.weights.major.unwrap_or(base.major),
            interests: self.weights.interests.unwrap_or(base.interests),
            personality: self.weights.personality.unwrap_or(base.personality),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MENTOR__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MENTOR__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        settings = apply_well_known_env(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        settings.try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("MENTOR")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Honor `DATABASE_URL` and `REDIS_URL` as used by hosting platforms
fn apply_well_known_env(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(url) = std::env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", url)?;
    }
    if let Ok(url) = std::env::var("REDIS_URL") {
        builder = builder.set_override("cache.redis_url", url)?;
    }

    builder.build()
}
