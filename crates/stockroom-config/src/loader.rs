//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use stockroom_core::StockroomError;
use tracing::{debug, info, warn};
use url::Url;

/// Configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a loader reading from `config_dir`.
    ///
    /// Sources are applied in order, later ones winning:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml`
    /// 3. `config/local.toml`
    /// 4. Environment variables with the `STOCKROOM_` prefix (`__` separator)
    /// 5. The plain `MYSQL_*`, `REDIS_*` and `PORT` variables
    pub fn new(config_dir: impl Into<String>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Loader for the default location (`./config`).
    #[must_use]
    pub fn from_default_location() -> Self {
        Self::new("./config")
    }

    /// Loads and validates the configuration.
    pub fn load(&self) -> Result<AppConfig, StockroomError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("STOCKROOM_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", self.config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("STOCKROOM")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_stockroom_error)?;

        let mut app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_stockroom_error)?;
        app_config.app.environment = environment;

        apply_legacy_env(&mut app_config, |key| std::env::var(key).ok());

        ConfigValidator::validate(&app_config)
            .map_err(|errors| StockroomError::Configuration(format_validation_errors(&errors)))?;

        Ok(app_config)
    }
}

/// Applies the un-prefixed variables used by earlier deployments of the
/// service (`MYSQL_USER`, `MYSQL_HOST`, `REDIS_HOST`, `PORT`, ...).
///
/// A group only takes effect when its host variable is set.
pub fn apply_legacy_env<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(host) = var("MYSQL_HOST") {
        let port = var("MYSQL_PORT").unwrap_or_else(|| "3306".to_string());
        let database = var("MYSQL_DATABASE").unwrap_or_default();
        match mysql_url(
            &host,
            &port,
            var("MYSQL_USER").as_deref(),
            var("MYSQL_PASSWORD").as_deref(),
            &database,
        ) {
            Ok(url) => {
                config.database.url = url;
                debug!("Database URL taken from MYSQL_* variables");
            }
            Err(e) => warn!("Ignoring MYSQL_* variables: {}", e),
        }
    }

    if let Some(host) = var("REDIS_HOST") {
        let port = var("REDIS_PORT").unwrap_or_else(|| "6379".to_string());
        let db = match var("REDIS_DB") {
            Some(raw) => raw.parse::<u32>().unwrap_or_else(|e| {
                warn!("Invalid REDIS_DB '{}', using default DB 0: {}", raw, e);
                0
            }),
            None => 0,
        };
        config.redis.url = format!("redis://{host}:{port}/{db}");
        debug!("Redis URL taken from REDIS_* variables");
    }

    if let Some(raw) = var("PORT") {
        match raw.parse::<u16>() {
            Ok(port) => config.server.port = port,
            Err(e) => warn!("Ignoring invalid PORT '{}': {}", raw, e),
        }
    }
}

/// Builds a MySQL URL with the credentials percent-encoded.
///
/// `Url` leaves `%` alone in userinfo, so it is escaped first to keep
/// literal percent signs from being decoded by the driver.
fn mysql_url(
    host: &str,
    port: &str,
    user: Option<&str>,
    password: Option<&str>,
    database: &str,
) -> Result<String, String> {
    let mut url = Url::parse(&format!("mysql://{host}:{port}"))
        .map_err(|e| format!("invalid host or port '{host}:{port}': {e}"))?;
    url.set_path(database);

    if let Some(user) = user {
        url.set_username(&user.replace('%', "%25"))
            .map_err(|()| "MYSQL_USER cannot be set on this URL".to_string())?;
        if let Some(password) = password {
            url.set_password(Some(&password.replace('%', "%25")))
                .map_err(|()| "MYSQL_PASSWORD cannot be set on this URL".to_string())?;
        }
    }

    Ok(url.into())
}

fn config_error_to_stockroom_error(err: ConfigError) -> StockroomError {
    StockroomError::Configuration(err.to_string())
}
