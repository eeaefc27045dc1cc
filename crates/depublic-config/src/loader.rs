//! Configuration loader with layered sources.

use crate::{AppConfig, CacheBackend};
use config::{Config, ConfigError, Environment, File};
use depublic_core::DepublicError;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Uncommitted local overrides
    /// 4. Environment variables with `DEPUBLIC_` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, DepublicError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, DepublicError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    ///
    /// The previous configuration stays in effect if the new one is invalid.
    pub async fn reload(&self) -> Result<(), DepublicError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> Result<AppConfig, DepublicError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("DEPUBLIC_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("DEPUBLIC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_depublic_error)?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_depublic_error)?;

        validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Gets a specific configuration value by key path, e.g. `"cache.ttl_secs"`.
    pub async fn get_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let config = self.config.read().await;
        let json = serde_json::to_value(&*config).ok()?;

        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }

        serde_json::from_value(current.clone()).ok()
    }
}

/// Validates a loaded configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), DepublicError> {
    if config.database.url.is_empty() {
        return Err(DepublicError::Configuration("Database URL is required".to_string()));
    }

    if config.database.max_connections < config.database.min_connections {
        return Err(DepublicError::Configuration(
            "database.max_connections must be >= database.min_connections".to_string(),
        ));
    }

    if config.cache.ttl_secs == 0 {
        return Err(DepublicError::Configuration(
            "cache.ttl_secs must be greater than zero".to_string(),
        ));
    }

    if config.cache.backend == CacheBackend::Redis && config.redis.url.is_empty() {
        return Err(DepublicError::Configuration(
            "Redis URL is required when the cache backend is redis".to_string(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_addr.parse::<SocketAddr>().is_err()
    {
        return Err(DepublicError::Configuration(format!(
            "Invalid metrics address: {}",
            config.observability.metrics_addr
        )));
    }

    if config.app.environment == "production" && config.cache.backend == CacheBackend::Memory {
        warn!("In-memory cache in production: entries are not shared between processes");
    }

    Ok(())
}

fn config_error_to_depublic_error(err: ConfigError) -> DepublicError {
    DepublicError::Configuration(err.to_string())
}
