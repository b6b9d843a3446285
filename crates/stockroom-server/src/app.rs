//! Application assembly and serving.

use crate::di::AppModule;
use axum::Router;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::future::Future;
use stockroom_config::AppConfig;
use stockroom_core::{StockroomError, StockroomResult};
use stockroom_rest::{create_router, MetricsEndpoint};
use tokio::net::TcpListener;
use tracing::info;

/// Installs the global Prometheus recorder and describes the cache counters.
///
/// Can only succeed once per process.
pub fn install_metrics_recorder() -> StockroomResult<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        StockroomError::internal(format!("Failed to install metrics recorder: {}", e))
    })?;
    stockroom_service::metrics::register_metrics();
    Ok(handle)
}

/// A fully wired application, ready to serve.
pub struct App {
    config: AppConfig,
    module: AppModule,
    router: Router,
}

impl App {
    /// Builds the component graph and the router.
    ///
    /// The metrics route is mounted only when a handle is given.
    pub async fn build(config: AppConfig, metrics: Option<PrometheusHandle>) -> StockroomResult<Self> {
        let module = AppModule::build(&config).await?;

        let metrics = metrics.map(|handle| MetricsEndpoint {
            path: config.observability.metrics_path.clone(),
            handle,
        });
        let router = create_router(module.app_state(), &config.server, metrics);

        Ok(Self {
            config,
            module,
            router,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Binds the configured `host:port`.
    pub async fn bind(&self) -> StockroomResult<TcpListener> {
        let addr = self.config.server.addr();
        TcpListener::bind(&addr)
            .await
            .map_err(|e| StockroomError::internal(format!("Failed to bind {}: {}", addr, e)))
    }

    /// Serves requests until `shutdown` resolves, then closes the pools.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> StockroomResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Ok(addr) = listener.local_addr() {
            info!("Listening on http://{}", addr);
        }

        let result = axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| StockroomError::internal(format!("HTTP server error: {}", e)));

        self.module.shutdown().await;
        info!("Server shutdown complete");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_config::{CacheBackend, StoreBackend};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    fn memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config.database.backend = StoreBackend::Memory;
        config.redis.backend = CacheBackend::Memory;
        config
    }

    async fn http_get(addr: std::net::SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!(
            "GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
            path
        );
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_serves_until_shutdown() {
        let app = App::build(memory_config(), None).await.unwrap();
        let listener = app.bind().await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (tx, rx) = oneshot::channel::<()>();
        let server = tokio::spawn(app.serve(listener, async {
            let _ = rx.await;
        }));

        let response = http_get(addr, "/health").await;
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("healthy"));

        let response = http_get(addr, "/products").await;
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with("[]"));

        tx.send(()).unwrap();
        server.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_metrics_route_follows_handle() {
        let mut config = memory_config();
        config.observability.metrics_path = "/internal/metrics".to_string();
        let handle = PrometheusBuilder::new().build_recorder().handle();

        let app = App::build(config, Some(handle)).await.unwrap();
        let listener = app.bind().await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (tx, rx) = oneshot::channel::<()>();
        let server = tokio::spawn(app.serve(listener, async {
            let _ = rx.await;
        }));

        let response = http_get(addr, "/internal/metrics").await;
        assert!(response.starts_with("HTTP/1.1 200"));

        let response = http_get(addr, "/metrics").await;
        assert!(response.starts_with("HTTP/1.1 404"));

        tx.send(()).unwrap();
        server.await.unwrap().unwrap();
    }
}
