//! Transport service - orchestrates different transport types.
//!
//! This service provides a unified interface for starting the MCP server
//! with different transport mechanisms, and stops any of them on ctrl-c.

use std::future::Future;

use tracing::{info, warn};

use super::{TransportConfig, TransportResult};
use crate::core::McpServer;

#[cfg(feature = "stdio")]
use super::stdio::StdioTransport;

#[cfg(feature = "tcp")]
use super::tcp::TcpTransport;

#[cfg(feature = "http")]
use super::http::HttpTransport;

/// Transport service - manages the transport layer for the MCP server.
pub struct TransportService {
    config: TransportConfig,
}

impl TransportService {
    /// Create a new transport service with the given configuration.
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Start the transport with the given MCP server.
    ///
    /// Returns when the transport finishes on its own (stdin closed) or on
    /// ctrl-c, whichever comes first.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        self.run_until(server, shutdown_signal()).await
    }

    /// Start the transport and stop it cleanly once `shutdown` resolves.
    ///
    /// A shutdown that is already due wins over starting the transport.
    pub async fn run_until(
        self,
        server: McpServer,
        shutdown: impl Future<Output = ()>,
    ) -> TransportResult<()> {
        info!("Starting transport: {}", self.config.description());

        let serve = async move {
            match self.config {
                #[cfg(feature = "stdio")]
                TransportConfig::Stdio => StdioTransport::run(server).await,
                #[cfg(feature = "tcp")]
                TransportConfig::Tcp(cfg) => TcpTransport::new(cfg).run(server).await,
                #[cfg(feature = "http")]
                TransportConfig::Http(cfg) => HttpTransport::new(cfg).run(server).await,
            }
        };

        tokio::select! {
            biased;

            _ = shutdown => {
                info!("Shutdown signal received");
                Ok(())
            }
            result = serve => result,
        }
    }
}

/// Resolve on ctrl-c. Never resolves if the handler cannot be installed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::tools::upstream::mock::MockUpstream;
    use crate::domains::tools::{Endpoint, EnumPolicy, ToolRegistry, Toolset};
    use serde_json::json;
    use tokio_test::assert_ok;

    fn server() -> McpServer {
        let registry = ToolRegistry::for_toolset(
            Toolset::Route,
            MockUpstream::replying(json!({})),
            Endpoint::new("https://restapi.amap.com", "test-key"),
            EnumPolicy::Strict,
        );
        McpServer::with_registry(Config::new(), Toolset::Route, registry)
    }

    #[tokio::test]
    async fn test_shutdown_signal_stops_cleanly() {
        let service = TransportService::new(TransportConfig::default());
        assert_ok!(service.run_until(server(), std::future::ready(())).await);
    }

    #[cfg(feature = "tcp")]
    #[tokio::test]
    async fn test_transport_failure_is_reported_before_shutdown() {
        use crate::core::transport::{TcpConfig, TransportError};

        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = TransportConfig::Tcp(TcpConfig {
            port: taken.local_addr().unwrap().port(),
            host: "127.0.0.1".to_string(),
        });

        let result = TransportService::new(config)
            .run_until(server(), std::future::pending())
            .await;
        assert!(matches!(result, Err(TransportError::BindError { .. })));
    }
}
