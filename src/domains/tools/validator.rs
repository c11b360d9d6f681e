//! Argument validation against a tool's declared parameters.
//!
//! One routine interprets every [`ParameterSpec`] list, so adding a tool never
//! requires writing a new check. Validation happens before any request is
//! built; an `Err` here guarantees no upstream call.

use rmcp::model::JsonObject;
use serde_json::{Number, Value};

use super::catalog::{ParamKind, ParameterSpec, ToolDescriptor};
use super::error::ValidationError;

/// How `allowed_values` enumerations are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnumPolicy {
    /// Reject values outside the declared set.
    #[default]
    Strict,
    /// Forward any value of the right kind.
    Lenient,
}

impl EnumPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Lenient }
    }
}

/// A validated, typed argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    String(String),
    Number(Number),
    Boolean(bool),
}

impl ArgValue {
    /// Render the value the way the provider expects it in a query string.
    pub fn to_query_value(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Boolean(b) => b.to_string(),
        }
    }
}

/// Validated arguments, in the order the tool declares its parameters.
///
/// Absent optional parameters are simply not present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypedArgs {
    values: Vec<(&'static str, ArgValue)>,
}

impl TypedArgs {
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ArgValue)> {
        self.values.iter().map(|(key, value)| (*key, value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Check `args` against the descriptor's parameters.
///
/// JSON `null` counts as absent. Keys the descriptor does not declare are
/// dropped.
pub fn validate(
    descriptor: &ToolDescriptor,
    args: &JsonObject,
    policy: EnumPolicy,
) -> Result<TypedArgs, ValidationError> {
    let mut values = Vec::with_capacity(descriptor.parameters.len());

    for spec in descriptor.parameters {
        match args.get(spec.name).filter(|v| !v.is_null()) {
            Some(raw) => values.push((spec.name, check_value(spec, raw, policy)?)),
            None if spec.required => {
                return Err(ValidationError::MissingRequired { param: spec.name });
            }
            None => {}
        }
    }

    Ok(TypedArgs { values })
}

fn check_value(
    spec: &ParameterSpec,
    raw: &Value,
    policy: EnumPolicy,
) -> Result<ArgValue, ValidationError> {
    let value = match (spec.kind, raw) {
        (ParamKind::String, Value::String(s)) => ArgValue::String(s.clone()),
        (ParamKind::Number, Value::Number(n)) => ArgValue::Number(n.clone()),
        (ParamKind::Boolean, Value::Bool(b)) => ArgValue::Boolean(*b),
        _ => {
            return Err(ValidationError::WrongType {
                param: spec.name,
                expected: spec.kind,
                found: json_type_name(raw),
            });
        }
    };

    if policy == EnumPolicy::Strict {
        if let Some(allowed) = spec.allowed_values {
            let rendered = value.to_query_value();
            if !allowed.contains(&rendered.as_str()) {
                return Err(ValidationError::InvalidEnum {
                    param: spec.name,
                    value: rendered,
                    allowed: allowed.join(", "),
                });
            }
        }
    }

    Ok(value)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
