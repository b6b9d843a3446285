//! Server startup utilities.

use stockroom_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
   _____ __             __
  / ___// /_____  _____/ /________  ____  ____ ___
  \__ \/ __/ __ \/ ___/ //_/ ___/ __ \/ __ \/ __ `__ \
 ___/ / /_/ /_/ / /__/ ,< / /  / /_/ / /_/ / / / / / /
/____/\__/\____/\___/_/|_/_/   \____/\____/_/ /_/ /_/
    "#);
}

/// Prints where the server can be reached and which backends it runs on.
pub fn print_startup_info(config: &AppConfig) {
    let base = format!("http://{}", config.server.addr());
    let separator = "=".repeat(60);

    info!("{}", separator);
    info!("Products:  {}/products", base);
    info!("Health:    {}/health", base);
    info!("API Docs:  {}/swagger-ui", base);
    if config.observability.metrics_enabled {
        info!("Metrics:   {}{}", base, config.observability.metrics_path);
    }
    info!(
        "Store:     {:?}, cache: {:?} (enabled: {}, ttl {}s)",
        config.database.backend,
        config.redis.backend,
        config.redis.enabled,
        config.cache.ttl_secs
    );
    info!("{}", separator);
}
