use crate::lifecycle::ManagerOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Search engine connection
    #[serde(default)]
    pub engine: EngineConfig,

    /// Lifecycle behaviour
    #[serde(default)]
    pub lifecycle: LifecycleConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from defaults, file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path = std::env::var("INDICE_MANAGER_CONFIG")
            .unwrap_or_else(|_| "config/indice-manager.toml".to_string());

        Self::load_from(config_path)
    }

    /// Load configuration using an explicit file path
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        let path = path.as_ref().to_string_lossy().into_owned();

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&path).required(false))
            // Override with environment variables (prefix: INDICE_MANAGER_)
            .add_source(
                config::Environment::with_prefix("INDICE_MANAGER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        self.engine.validate()
    }

    /// Manager options derived from the lifecycle section
    pub fn manager_options(&self) -> ManagerOptions {
        let options = ManagerOptions::default()
            .serialize_per_indice(self.lifecycle.serialize_per_indice);

        if self.lifecycle.log_transitions {
            options.with_tracing_log()
        } else {
            options
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EngineBackend {
    /// Elasticsearch REST API
    #[default]
    Http,
    /// Process-local engine (tests and dry runs)
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Engine backend type
    #[serde(default)]
    pub backend: EngineBackend,

    /// Base URL of the cluster, scheme and port included
    #[serde(default = "default_url")]
    pub url: String,

    /// Basic auth username
    pub username: Option<String>,

    /// Basic auth password
    pub password: Option<String>,

    /// API key, sent as `Authorization: ApiKey <key>`
    pub api_key: Option<String>,

    /// Timeout for ordinary requests (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Timeout for a blocking reindex (seconds)
    #[serde(default = "default_reindex_timeout")]
    pub reindex_timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: EngineBackend::default(),
            url: default_url(),
            username: None,
            password: None,
            api_key: None,
            request_timeout_secs: default_request_timeout(),
            reindex_timeout_secs: default_reindex_timeout(),
        }
    }
}

impl EngineConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.backend == EngineBackend::Memory {
            return Ok(());
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(format!("engine url must start with http:// or https://, got '{}'", self.url));
        }

        if self.api_key.is_some() && self.username.is_some() {
            return Err("engine api_key and username are mutually exclusive".to_string());
        }

        if self.password.is_some() && self.username.is_none() {
            return Err("engine password requires a username".to_string());
        }

        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }

        if self.reindex_timeout_secs == 0 {
            return Err("reindex_timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Serialize create/reindex/swap/clear per logical indice
    #[serde(default = "default_true")]
    pub serialize_per_indice: bool,

    /// Report lifecycle transitions through tracing
    #[serde(default = "default_true")]
    pub log_transitions: bool,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            serialize_per_indice: true,
            log_transitions: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value functions for serde
fn default_url() -> String {
    "http://localhost:9200".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_reindex_timeout() -> u64 {
    3600
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "indice_manager=info".to_string()
}
