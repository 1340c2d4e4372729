//! Tool domain entities: immutable shape metadata
//!
//! Descriptors drive two things: parameter validation/coercion in the tool
//! base contract, and the LLM-facing function schema.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Scalar value kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    String,
    Number,
    Integer,
    Boolean,
}

impl ScalarType {
    pub fn as_str(&self) -> &str {
        match self {
            ScalarType::String => "string",
            ScalarType::Number => "number",
            ScalarType::Integer => "integer",
            ScalarType::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shape of a parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDescriptor {
    Scalar(ScalarType),
    /// String restricted to a fixed set of options
    Enum { options: Vec<String> },
    Array { items: Box<TypeDescriptor> },
    Object { properties: Vec<ParameterDescriptor> },
}

impl TypeDescriptor {
    pub fn string() -> Self {
        TypeDescriptor::Scalar(ScalarType::String)
    }

    pub fn number() -> Self {
        TypeDescriptor::Scalar(ScalarType::Number)
    }

    pub fn integer() -> Self {
        TypeDescriptor::Scalar(ScalarType::Integer)
    }

    pub fn boolean() -> Self {
        TypeDescriptor::Scalar(ScalarType::Boolean)
    }

    pub fn enumeration<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TypeDescriptor::Enum {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn array(items: TypeDescriptor) -> Self {
        TypeDescriptor::Array {
            items: Box::new(items),
        }
    }

    pub fn object(properties: Vec<ParameterDescriptor>) -> Self {
        TypeDescriptor::Object { properties }
    }

    /// JSON Schema `type` keyword for this shape
    pub fn json_type(&self) -> &str {
        match self {
            TypeDescriptor::Scalar(scalar) => scalar.as_str(),
            TypeDescriptor::Enum { .. } => "string",
            TypeDescriptor::Array { .. } => "array",
            TypeDescriptor::Object { .. } => "object",
        }
    }

    pub fn to_json_schema(&self) -> Value {
        match self {
            TypeDescriptor::Scalar(scalar) => json!({ "type": scalar.as_str() }),
            TypeDescriptor::Enum { options } => json!({ "type": "string", "enum": options }),
            TypeDescriptor::Array { items } => {
                json!({ "type": "array", "items": items.to_json_schema() })
            }
            TypeDescriptor::Object { properties } => object_schema(properties),
        }
    }
}

impl std::fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeDescriptor::Scalar(scalar) => write!(f, "{}", scalar),
            TypeDescriptor::Enum { options } => write!(f, "enum({})", options.join("|")),
            TypeDescriptor::Array { items } => write!(f, "array<{}>", items),
            TypeDescriptor::Object { .. } => write!(f, "object"),
        }
    }
}

fn object_schema(properties: &[ParameterDescriptor]) -> Value {
    let mut props = serde_json::Map::new();
    let mut required = Vec::new();

    for param in properties {
        let mut schema = param.ty.to_json_schema();
        if let Value::Object(map) = &mut schema {
            map.insert("description".to_string(), json!(param.description));
        }
        props.insert(param.name.clone(), schema);

        if param.required {
            required.push(json!(param.name));
        }
    }

    json!({
        "type": "object",
        "properties": props,
        "required": required,
    })
}

/// Parameter specification for a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Value shape
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
}

impl ParameterDescriptor {
    /// Create a string parameter
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            ty: TypeDescriptor::string(),
        }
    }

    pub fn with_type(mut self, ty: TypeDescriptor) -> Self {
        self.ty = ty;
        self
    }
}

/// Definition of a tool exposed to callers and to the LLM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    /// Unique name within a collection; also the LLM-facing function name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Ordered parameter specifications
    pub parameters: Vec<ParameterDescriptor>,
}

impl FunctionDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ParameterDescriptor) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn with_parameters(mut self, params: impl IntoIterator<Item = ParameterDescriptor>) -> Self {
        self.parameters.extend(params);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn required_parameters(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.parameters.iter().filter(|p| p.required)
    }

    /// LLM-facing function schema
    pub fn to_json_schema(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "parameters": object_schema(&self.parameters),
        })
    }
}
