//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type covering startup and transport
//! failures. Tool call failures never reach this level: validation errors
//! become protocol errors and upstream failures are reported inside the tool
//! response.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// The upstream client could not be set up.
    #[error("Upstream error: {0}")]
    Upstream(#[from] crate::domains::tools::UpstreamError),

    /// Error raised by a transport.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
