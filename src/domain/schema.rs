use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Structured-output schema sent with a generation request.
///
/// Serializes to the Gemini `responseSchema` dialect (upper-case type names,
/// `properties`/`required` for objects, `items` for arrays).
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    String {
        description: Option<String>,
    },
    Number {
        description: Option<String>,
    },
    Array {
        items: Box<SchemaNode>,
    },
    Object {
        properties: Vec<(String, SchemaNode)>,
        required: Vec<String>,
    },
}

impl SchemaNode {
    pub fn string() -> Self {
        SchemaNode::String { description: None }
    }

    pub fn number() -> Self {
        SchemaNode::Number { description: None }
    }

    pub fn array(items: SchemaNode) -> Self {
        SchemaNode::Array {
            items: Box::new(items),
        }
    }

    /// An object whose listed properties are all required.
    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaNode)>,
        K: Into<String>,
    {
        let properties: Vec<(String, SchemaNode)> = properties
            .into_iter()
            .map(|(name, node)| (name.into(), node))
            .collect();
        let required = properties.iter().map(|(name, _)| name.clone()).collect();
        SchemaNode::Object {
            properties,
            required,
        }
    }

    pub fn with_description(self, text: impl Into<String>) -> Self {
        match self {
            SchemaNode::String { .. } => SchemaNode::String {
                description: Some(text.into()),
            },
            SchemaNode::Number { .. } => SchemaNode::Number {
                description: Some(text.into()),
            },
            other => other,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            SchemaNode::String { .. } => "STRING",
            SchemaNode::Number { .. } => "NUMBER",
            SchemaNode::Array { .. } => "ARRAY",
            SchemaNode::Object { .. } => "OBJECT",
        }
    }
}

struct Properties<'a>(&'a [(String, SchemaNode)]);

impl Serialize for Properties<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, node) in self.0 {
            map.serialize_entry(name, node)?;
        }
        map.end()
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.type_name())?;
        match self {
            SchemaNode::String { description } | SchemaNode::Number { description } => {
                if let Some(description) = description {
                    map.serialize_entry("description", description)?;
                }
            }
            SchemaNode::Array { items } => {
                map.serialize_entry("items", items.as_ref())?;
            }
            SchemaNode::Object {
                properties,
                required,
            } => {
                map.serialize_entry("properties", &Properties(properties))?;
                map.serialize_entry("required", required)?;
            }
        }
        map.end()
    }
}
