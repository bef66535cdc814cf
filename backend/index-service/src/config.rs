/// Configuration management for Index Service
///
/// Loads configuration from environment variables (and `.env` when present).
use crate::error::IndexError;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Index feed configuration
    #[serde(default)]
    pub index: IndexConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

/// Index feed configuration. Chosen once at startup, never per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Which feed strategy serves the index timeline
    #[serde(default)]
    pub mode: IndexMode,
    /// What the friend strategy does when the relationship graph is unavailable
    #[serde(default)]
    pub on_graph_lookup_failure: GraphLookupPolicy,
    /// Whether page and total are read from one snapshot
    #[serde(default)]
    pub consistency: ReadConsistency,
    /// Largest page a caller may request
    #[serde(default = "default_max_page_size")]
    pub max_page_size: i64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            mode: IndexMode::default(),
            on_graph_lookup_failure: GraphLookupPolicy::default(),
            consistency: ReadConsistency::default(),
            max_page_size: default_max_page_size(),
        }
    }
}

/// Feed strategy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexMode {
    /// Public posts, own private posts, and friend-only posts of friends
    #[default]
    Friend,
    /// Posts from followed users (not available yet)
    Following,
    /// Public posts and own private posts, no relationship graph
    Light,
    /// Public posts only; identical for every viewer
    Simple,
}

impl IndexMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexMode::Friend => "friend",
            IndexMode::Following => "following",
            IndexMode::Light => "light",
            IndexMode::Simple => "simple",
        }
    }
}

impl fmt::Display for IndexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "friend" => Ok(IndexMode::Friend),
            "following" | "follow" => Ok(IndexMode::Following),
            "light" => Ok(IndexMode::Light),
            "simple" => Ok(IndexMode::Simple),
            other => Err(anyhow!("unknown index mode '{}'", other)),
        }
    }
}

/// Behaviour of the friend strategy when the friend lookup fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphLookupPolicy {
    /// Continue with an empty friend set (viewer still sees own posts)
    #[default]
    Degrade,
    /// Abort the request with a graph lookup error
    Fail,
}

impl GraphLookupPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphLookupPolicy::Degrade => "degrade",
            GraphLookupPolicy::Fail => "fail",
        }
    }
}

impl FromStr for GraphLookupPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "degrade" => Ok(GraphLookupPolicy::Degrade),
            "fail" => Ok(GraphLookupPolicy::Fail),
            other => Err(anyhow!("unknown graph lookup policy '{}'", other)),
        }
    }
}

/// Read consistency between the page fetch and the total count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadConsistency {
    /// Two independent reads; total may drift from the page under concurrent writes
    #[default]
    Eventual,
    /// Both reads inside one REPEATABLE READ, READ ONLY transaction
    Snapshot,
}

impl ReadConsistency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadConsistency::Eventual => "eventual",
            ReadConsistency::Snapshot => "snapshot",
        }
    }
}

impl FromStr for ReadConsistency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eventual" => Ok(ReadConsistency::Eventual),
            "snapshot" => Ok(ReadConsistency::Snapshot),
            other => Err(anyhow!("unknown read consistency '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow!("unknown log format '{}'", other)),
        }
    }
}

// Default values
fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

fn default_max_page_size() -> i64 {
    100
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let app = AppConfig {
            env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_format: parse_env_or_default("LOG_FORMAT", LogFormat::default())?,
        };

        let database = DatabaseConfig {
            url: std::env::var("DATABASE_URL")
                .context("DATABASE_URL environment variable not set")?,
            max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_max_connections),
            acquire_timeout_secs: std::env::var("DATABASE_ACQUIRE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_acquire_timeout_secs),
        };

        let index = IndexConfig::from_env()?;

        Ok(Config {
            app,
            database,
            index,
        })
    }

    /// Build the Postgres pool shared by the repository, graph and formatter
    pub async fn connect_pool(&self) -> Result<PgPool> {
        PgPoolOptions::new()
            .max_connections(self.database.max_connections)
            .acquire_timeout(Duration::from_secs(self.database.acquire_timeout_secs))
            .connect(&self.database.url)
            .await
            .context("Failed to connect to PostgreSQL")
    }
}

impl IndexConfig {
    /// Load the INDEX_* variables; anything unset keeps its default
    pub fn from_env() -> Result<Self> {
        let config = IndexConfig {
            mode: parse_env_or_default("INDEX_MODE", IndexMode::default())?,
            on_graph_lookup_failure: parse_env_or_default(
                "INDEX_GRAPH_LOOKUP_FAILURE",
                GraphLookupPolicy::default(),
            )?,
            consistency: parse_env_or_default("INDEX_CONSISTENCY", ReadConsistency::default())?,
            max_page_size: parse_env_or_default("INDEX_MAX_PAGE_SIZE", default_max_page_size())?,
        };
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), IndexError> {
        if self.max_page_size <= 0 {
            return Err(IndexError::Config(format!(
                "max_page_size must be positive, got {}",
                self.max_page_size
            )));
        }
        Ok(())
    }
}

fn parse_env_or_default<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse()
            .map_err(|e| anyhow!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(default),
    }
}
