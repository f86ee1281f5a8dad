use config::{Config, ConfigError, Environment, File, builder::DefaultState};
use credit_core::ServerConfig;
use credit_scorer::ScorerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub scorer: ScorerConfig,
    #[serde(default = "default_max_concurrent_scorer_calls")]
    pub max_concurrent_scorer_calls: usize,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

fn default_max_concurrent_scorer_calls() -> usize {
    10
}

type Builder = config::ConfigBuilder<DefaultState>;

fn with_defaults() -> Result<Builder, ConfigError> {
    Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("database.url", "sqlite://credit.db?mode=rwc")?
        .set_default("database.max_connections", 10)?
        .set_default("scorer.provider", "mock")?
        .set_default("max_concurrent_scorer_calls", 10)
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Later sources override earlier ones:
    /// 1. Default values
    /// 2. config.toml file (if present)
    /// 3. Environment variables (prefixed with CREDIT_)
    ///
    /// Environment variables use double underscore for nesting:
    /// - CREDIT_SERVER__PORT=9000
    /// - CREDIT_SCORER__PROVIDER=gemini
    /// - CREDIT_SCORER__API_KEY=...
    pub fn load() -> Result<Self, ConfigError> {
        let builder = with_defaults()?;

        let builder = if Path::new("config.toml").exists() {
            builder.add_source(File::with_name("config"))
        } else {
            builder
        };

        builder.add_source(environment()).build()?.try_deserialize()
    }
}

/// `CREDIT_` prefix, `__` between nested keys
fn environment() -> Environment {
    Environment::with_prefix("CREDIT")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
