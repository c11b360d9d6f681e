//! AMap MCP adapter library
//!
//! This crate exposes AMap (Gaode) web-service endpoints as Model Context
//! Protocol tools. Two binaries share it:
//!
//! - `amap-search-mcp`: coordinate conversion, place search and AOI boundaries
//! - `amap-route-mcp`: walking, transit, driving and cycling routes, distances
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and transports
//! - **domains**
//!   - **tools**: the tool catalog, argument validation and the upstream client
//!
//! A call flows catalog → validator → upstream GET → response envelope.
//! Upstream failures are reported inside the envelope with `isError: true`;
//! unknown tools and invalid arguments are protocol errors.
//!
//! # Example
//!
//! ```rust,no_run
//! use amap_mcp_server::{Config, McpServer, Toolset};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::new()
//!         .with_server_name(Toolset::Route.server_name())
//!         .with_env();
//!     let server = McpServer::new(config, Toolset::Route)?;
//!     println!("{} tools", server.tools().len());
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use domains::tools::Toolset;
