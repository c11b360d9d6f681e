//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The process-wide, immutable map from tool name to handler
//! - Validation and dispatch of tool calls, shared by every transport
//! - Tool metadata for listing

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use rmcp::model::{JsonObject, Tool};
use tracing::{info, instrument, warn};

use super::catalog::ToolDescriptor;
use super::definitions::Toolset;
use super::error::{ToolError, ValidationError};
use super::handlers::{ToolHandler, ToolResponse};
use super::upstream::{Endpoint, Upstream};
use super::validator::{EnumPolicy, TypedArgs};

/// Tool registry - owns the handlers and the upstream seam.
///
/// Built once at startup and shared behind an `Arc`; nothing in it changes
/// after construction.
pub struct ToolRegistry {
    handlers: IndexMap<&'static str, Arc<dyn ToolHandler>>,
    upstream: Arc<dyn Upstream>,
    endpoint: Endpoint,
    enum_policy: EnumPolicy,
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tool_names())
            .field("endpoint", &self.endpoint)
            .field("enum_policy", &self.enum_policy)
            .finish()
    }
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new(upstream: Arc<dyn Upstream>, endpoint: Endpoint, enum_policy: EnumPolicy) -> Self {
        Self {
            handlers: IndexMap::new(),
            upstream,
            endpoint,
            enum_policy,
        }
    }

    /// Create a registry holding every tool of a toolset.
    pub fn for_toolset(
        toolset: Toolset,
        upstream: Arc<dyn Upstream>,
        endpoint: Endpoint,
        enum_policy: EnumPolicy,
    ) -> Self {
        toolset
            .tools()
            .iter()
            .fold(Self::new(upstream, endpoint, enum_policy), |registry, tool| {
                registry.with_handler(*tool)
            })
    }

    /// Register a handler.
    ///
    /// # Panics
    ///
    /// Panics if a tool with the same name is already registered.
    pub fn with_handler(mut self, handler: impl ToolHandler + 'static) -> Self {
        let name = handler.describe().name;
        assert!(
            !self.handlers.contains_key(name),
            "Tool '{name}' is already registered"
        );
        self.handlers.insert(name, Arc::new(handler));
        self
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.handlers.keys().copied().collect()
    }

    /// Every descriptor, in registration order.
    pub fn list_tools(&self) -> Vec<&ToolDescriptor> {
        self.handlers.values().map(|h| h.describe()).collect()
    }

    /// Every descriptor as an MCP `Tool` model.
    pub fn tools(&self) -> Vec<Tool> {
        self.list_tools().into_iter().map(ToolDescriptor::to_tool).collect()
    }

    /// Check arguments for the named tool without touching the network.
    pub fn validate(&self, name: &str, args: &JsonObject) -> Result<TypedArgs, ValidationError> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| ValidationError::UnknownTool(name.to_string()))?;
        handler.validate(args, self.enum_policy)
    }

    /// Issue the upstream request for already validated arguments.
    ///
    /// Upstream failures come back as `Ok` with `is_error` set; only an
    /// unknown tool is an `Err`.
    #[instrument(skip(self, args))]
    pub async fn dispatch(&self, name: &str, args: &TypedArgs) -> Result<ToolResponse, ToolError> {
        let handler = self.handlers.get(name).ok_or_else(|| {
            warn!("Unknown tool requested: {}", name);
            ToolError::not_found(name)
        })?;

        let request = handler.build_request(&self.endpoint, args);
        info!("Forwarding to {}", request.url);

        match self.upstream.get(&request).await {
            Ok(body) => Ok(ToolResponse::success(&body)),
            Err(e) => {
                warn!("Upstream call for {} failed: {}", name, e);
                Ok(ToolResponse::upstream_failure(&e))
            }
        }
    }

    /// Validate then dispatch a call.
    pub async fn call(&self, name: &str, args: &JsonObject) -> Result<ToolResponse, ToolError> {
        let typed = self.validate(name, args).map_err(|e| {
            warn!("Rejected call to {}: {}", name, e);
            ToolError::invalid_arguments(name, e)
        })?;
        self.dispatch(name, &typed).await
    }
}
