//! Tools domain module.
//!
//! This module turns AMap web service endpoints into MCP tools. Every tool
//! follows the same path: declared schema, validated arguments, one upstream
//! `GET`, raw JSON wrapped in a response envelope.
//!
//! ## Architecture
//!
//! - `catalog.rs` - Tool descriptors and parameter specs (pure data)
//! - `definitions/` - The two tool tables, one per server process
//! - `validator.rs` - Generic argument validation against a descriptor
//! - `upstream.rs` - Request templates and the HTTP client seam
//! - `handlers.rs` - The handler trait and the response envelope
//! - `registry.rs` - Name to handler map, shared by all transports
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! Add one `UpstreamTool` row to `definitions/search.rs` or
//! `definitions/route.rs` and list it in that file's `TOOLS`.

pub mod catalog;
pub mod definitions;
mod error;
mod handlers;
mod registry;
pub mod upstream;
pub mod validator;

pub use catalog::{ParamKind, ParameterSpec, ToolDescriptor};
pub use definitions::Toolset;
pub use error::{ToolError, ValidationError};
pub use handlers::{ResponseContent, ToolHandler, ToolResponse, UpstreamTool};
pub use registry::ToolRegistry;
pub use upstream::{AmapClient, Endpoint, Upstream, UpstreamBody, UpstreamError, UpstreamRequest};
pub use validator::{ArgValue, EnumPolicy, TypedArgs};
