//! Tool handlers and the response envelope.
//!
//! A [`ToolHandler`] describes a tool, validates its arguments and turns them
//! into an [`UpstreamRequest`]. [`UpstreamTool`] is the table-driven handler
//! every catalog row uses; the registry only ever sees the trait.

use rmcp::model::{CallToolResult, Content, JsonObject};
use serde::{Deserialize, Serialize};

use super::catalog::ToolDescriptor;
use super::error::ValidationError;
use super::upstream::{
    Endpoint, PROVIDER_NAME, UpstreamBody, UpstreamError, UpstreamRequest, UpstreamRequestTemplate,
};
use super::validator::{EnumPolicy, TypedArgs, validate};

/// One content item of a tool response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResponseContent {
    Text { text: String },
}

/// Output from a tool execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    pub content: Vec<ResponseContent>,
    pub is_error: bool,
}

impl ToolResponse {
    /// Wrap an upstream body. JSON keeps the provider's key order; any other
    /// payload is forwarded as received.
    pub fn success(body: &UpstreamBody) -> Self {
        Self {
            content: vec![ResponseContent::Text {
                text: body.to_string(),
            }],
            is_error: false,
        }
    }

    /// Report an upstream failure through the normal response channel.
    pub fn upstream_failure(err: &UpstreamError) -> Self {
        Self {
            content: vec![ResponseContent::Text {
                text: format!("{} API error: {}", PROVIDER_NAME, err),
            }],
            is_error: true,
        }
    }

    /// Text of the first content item.
    pub fn text(&self) -> &str {
        match self.content.first() {
            Some(ResponseContent::Text { text }) => text.as_str(),
            None => "",
        }
    }
}

impl From<ToolResponse> for CallToolResult {
    fn from(response: ToolResponse) -> Self {
        let content = response
            .content
            .into_iter()
            .map(|ResponseContent::Text { text }| Content::text(text))
            .collect();

        if response.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}

/// Capability every registered tool provides.
pub trait ToolHandler: Send + Sync {
    /// Catalog metadata.
    fn describe(&self) -> &ToolDescriptor;

    /// Check raw arguments against the declared parameters.
    fn validate(&self, args: &JsonObject, policy: EnumPolicy) -> Result<TypedArgs, ValidationError>;

    /// Build the single upstream request for validated arguments.
    fn build_request(&self, endpoint: &Endpoint, args: &TypedArgs) -> UpstreamRequest;
}

/// A catalog row: descriptor plus the request it forwards to.
#[derive(Debug, Clone, Copy)]
pub struct UpstreamTool {
    pub descriptor: ToolDescriptor,
    pub template: UpstreamRequestTemplate,
}

impl ToolHandler for UpstreamTool {
    fn describe(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn validate(&self, args: &JsonObject, policy: EnumPolicy) -> Result<TypedArgs, ValidationError> {
        validate(&self.descriptor, args, policy)
    }

    fn build_request(&self, endpoint: &Endpoint, args: &TypedArgs) -> UpstreamRequest {
        self.template.build(endpoint, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;
    use serde_json::json;

    #[test]
    fn test_success_is_compact_passthrough() {
        let response = ToolResponse::success(&UpstreamBody::from_text(
            r#"{ "status": "1", "info": "OK", "infocode": "10000" }"#.to_string(),
        ));
        assert!(!response.is_error);
        assert_eq!(response.text(), r#"{"status":"1","info":"OK","infocode":"10000"}"#);
    }

    #[test]
    fn test_success_forwards_text_body() {
        let response = ToolResponse::success(&UpstreamBody::Text("<response/>".to_string()));
        assert!(!response.is_error);
        assert_eq!(response.text(), "<response/>");
    }

    #[test]
    fn test_upstream_failure_names_provider() {
        let response =
            ToolResponse::upstream_failure(&UpstreamError::Transport("connection refused".into()));
        assert!(response.is_error);
        assert_eq!(response.text(), "AMap API error: connection refused");
    }

    #[test]
    fn test_envelope_serialization() {
        let response = ToolResponse::success(&UpstreamBody::Json(json!({"status": "1"})));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "content": [{"type": "text", "text": "{\"status\":\"1\"}"}],
                "isError": false
            })
        );
    }

    #[test]
    fn test_into_call_tool_result() {
        let result: CallToolResult =
            ToolResponse::upstream_failure(&UpstreamError::Transport("dns".into())).into();
        assert_eq!(result.is_error, Some(true));
        if let RawContent::Text(text) = &result.content[0].raw {
            assert_eq!(text.text, "AMap API error: dns");
        } else {
            panic!("expected text content");
        }
    }
}
