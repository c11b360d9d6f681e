//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the [`ToolRegistry`].
//!
//! ## Tool Architecture
//!
//! Tools are rows in `domains/tools/definitions/`. The registry built from
//! them is the single place that validates and dispatches calls, for every
//! transport. **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::Result;
use crate::domains::tools::{AmapClient, Endpoint, EnumPolicy, ToolRegistry, Toolset};

/// The main MCP server handler.
///
/// Cloning is cheap: configuration and registry are shared read-only.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Which tool table this process serves.
    toolset: Toolset,

    /// Registry handling tool listing and calls.
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a server talking to AMap with the configured credential.
    ///
    /// Fails with a configuration error when no API key is set.
    pub fn new(config: Config, toolset: Toolset) -> Result<Self> {
        let endpoint = Endpoint::new(config.upstream.base_url.clone(), config.api_key()?);
        let client = AmapClient::new(config.upstream.timeout())?;
        let registry = ToolRegistry::for_toolset(
            toolset,
            Arc::new(client),
            endpoint,
            EnumPolicy::from_strict(config.upstream.strict_enums),
        );

        Ok(Self::with_registry(config, toolset, registry))
    }

    /// Create a server around an already built registry.
    pub fn with_registry(config: Config, toolset: Toolset, registry: ToolRegistry) -> Self {
        Self {
            config: Arc::new(config),
            toolset,
            registry: Arc::new(registry),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Instructions sent to clients on initialization.
    pub fn instructions(&self) -> &'static str {
        self.toolset.instructions()
    }

    /// All available tools as MCP models, in catalog order.
    pub fn tools(&self) -> Vec<Tool> {
        self.registry.tools()
    }

    /// Call a tool by name.
    ///
    /// Unknown tools and invalid arguments are protocol errors; upstream
    /// failures are a successful result with `is_error` set.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let arguments = arguments.unwrap_or_default();
        let response = self.registry.call(name, &arguments).await?;
        Ok(response.into())
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(self.instructions().to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        info!("Calling tool: {}", request.name);
        self.call(&request.name, request.arguments).await
    }
}
