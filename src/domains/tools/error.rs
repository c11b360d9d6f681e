//! Tool-specific error types.

use rmcp::ErrorData as McpError;
use serde_json::json;
use thiserror::Error;

use super::catalog::ParamKind;

/// Argument shape errors. None of these ever reach the network.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// No descriptor carries this tool name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A required parameter is absent or null.
    #[error("Missing required parameter '{param}'")]
    MissingRequired { param: &'static str },

    /// A present value has the wrong JSON kind.
    #[error("Parameter '{param}' must be a {expected}, got {found}")]
    WrongType {
        param: &'static str,
        expected: ParamKind,
        found: &'static str,
    },

    /// A value falls outside the declared enumeration.
    #[error("Parameter '{param}' must be one of [{allowed}], got '{value}'")]
    InvalidEnum {
        param: &'static str,
        value: String,
        allowed: String,
    },
}

impl ValidationError {
    /// Short machine-readable reason, reported in protocol error data.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "unknown_tool",
            Self::MissingRequired { .. } => "missing_required",
            Self::WrongType { .. } => "wrong_type",
            Self::InvalidEnum { .. } => "invalid_enum",
        }
    }
}

/// Errors that can occur during tool operations.
///
/// Upstream failures are not here: they become soft `ToolResponse`s.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Arguments did not match the tool's parameters.
    #[error("Invalid arguments for '{tool}': {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: ValidationError,
    },
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Wrap a validation failure for the named tool.
    pub fn invalid_arguments(tool: impl Into<String>, source: ValidationError) -> Self {
        match source {
            ValidationError::UnknownTool(name) => Self::NotFound(name),
            source => Self::InvalidArguments {
                tool: tool.into(),
                source,
            },
        }
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        match &err {
            ToolError::NotFound(name) => {
                McpError::invalid_params(err.to_string(), Some(json!({ "tool": name })))
            }
            ToolError::InvalidArguments { tool, source } => McpError::invalid_params(
                err.to_string(),
                Some(json!({ "tool": tool, "reason": source.reason() })),
            ),
        }
    }
}
