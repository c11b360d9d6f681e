//! Tool catalog - static descriptors and their JSON schema rendering.
//!
//! A [`ToolDescriptor`] is pure data: a unique name, a description shown to
//! agents, and an ordered list of [`ParameterSpec`]s. Descriptors are declared
//! as `const` tables in `definitions/` and never mutated.

use std::fmt;
use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde_json::{Value, json};

/// The JSON kind a parameter value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Number,
    Boolean,
}

impl ParamKind {
    /// JSON schema `type` keyword for this kind.
    pub fn as_json_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_json_type())
    }
}

/// Declared contract for a single tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub allowed_values: Option<&'static [&'static str]>,
    pub description: &'static str,
}

impl ParameterSpec {
    /// An optional string parameter.
    pub const fn string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::String,
            required: false,
            allowed_values: None,
            description,
        }
    }

    /// An optional number parameter.
    pub const fn number(name: &'static str, description: &'static str) -> Self {
        Self {
            kind: ParamKind::Number,
            ..Self::string(name, description)
        }
    }

    /// An optional boolean parameter.
    pub const fn boolean(name: &'static str, description: &'static str) -> Self {
        Self {
            kind: ParamKind::Boolean,
            ..Self::string(name, description)
        }
    }

    /// Mark the parameter as required.
    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    /// Restrict the parameter to an enumeration.
    pub const fn one_of(self, values: &'static [&'static str]) -> Self {
        Self {
            allowed_values: Some(values),
            ..self
        }
    }

    fn to_schema(self) -> Value {
        let mut schema = json!({
            "type": self.kind.as_json_type(),
            "description": self.description,
        });
        if let Some(values) = self.allowed_values {
            schema["enum"] = json!(values);
        }
        schema
    }
}

/// Descriptive metadata for one tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: &'static [ParameterSpec],
}

impl ToolDescriptor {
    /// Look up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Names of the required parameters, in declaration order.
    pub fn required_parameters(&self) -> Vec<&'static str> {
        self.parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect()
    }

    /// Render the parameter list as a JSON schema object.
    pub fn input_schema(&self) -> JsonObject {
        let properties: serde_json::Map<String, Value> = self
            .parameters
            .iter()
            .map(|p| (p.name.to_string(), p.to_schema()))
            .collect();

        let mut schema = JsonObject::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        schema.insert("required".into(), json!(self.required_parameters()));
        schema
    }

    /// Create the MCP `Tool` model for this descriptor.
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: Some(self.description.into()),
            input_schema: Arc::new(self.input_schema()),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
