//! Process entry point shared by both binaries.
//!
//! Loads configuration, initializes logging, builds the server for a toolset
//! and runs the configured transport until the peer goes away or ctrl-c.

use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use super::{Config, McpServer, TransportService};
use crate::domains::tools::Toolset;

/// Run one adapter process serving `toolset`.
///
/// A missing credential is reported before any transport is started and
/// makes the process exit non-zero.
pub async fn run(toolset: Toolset) -> anyhow::Result<()> {
    let config = Config::new()
        .with_server_name(toolset.server_name())
        .with_env();

    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);
    info!(
        "Upstream: {} (timeout: {:?}, strict enums: {})",
        config.upstream.base_url, config.upstream.timeout_secs, config.upstream.strict_enums
    );

    let transport = TransportService::new(config.transport.clone());

    let server = match McpServer::new(config, toolset) {
        Ok(server) => server,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };

    info!("Server initialized with {} tools", server.tools().len());

    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Parse a log level name, defaulting to INFO.
fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Initialize the logging subsystem.
///
/// Output goes to stderr; stdout belongs to the STDIO transport.
fn init_logging(level: &str) {
    let filter = EnvFilter::from_default_env().add_directive(parse_level(level).into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
