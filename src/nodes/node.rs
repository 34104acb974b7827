//! Content node model

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Namespace for ids derived with [`create_node_id`]
const NODE_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6a1f_3c52_9e0b_4d7a_b1c8_2f4e_5d60_7a93);

/// Bookkeeping every node carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Internal {
    #[serde(rename = "type")]
    pub type_name: String,
    pub content_digest: String,
    pub content: String,
    pub description: String,
}

/// A typed record in the content graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub parent: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
    pub internal: Internal,
    #[serde(flatten)]
    pub fields: IndexMap<String, Value>,
}

impl Node {
    /// Build a node whose digest and serialized content are derived from
    /// `data`. Object keys of `data` become the node's fields.
    pub fn new(
        id: impl Into<String>,
        type_name: &str,
        description: &str,
        parent: Option<String>,
        data: Value,
    ) -> Self {
        let content = data.to_string();
        let content_digest = create_content_digest(&data);
        let fields = match data {
            Value::Object(map) => map.into_iter().collect(),
            Value::Null => IndexMap::new(),
            other => IndexMap::from([("value".to_string(), other)]),
        };

        Self {
            id: id.into(),
            parent,
            children: Vec::new(),
            internal: Internal {
                type_name: type_name.to_string(),
                content_digest,
                content,
                description: description.to_string(),
            },
            fields,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.internal.type_name
    }

    /// Look up a field by dotted path (`frontmatter.title`)
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let first = parts.next()?;
        let mut current = self.fields.get(first)?;
        for part in parts {
            current = current.get(part)?;
        }
        Some(current)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Full JSON view of the node, as handed out by resolvers
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Deterministic node id for a string key
pub fn create_node_id(key: &str) -> String {
    Uuid::new_v5(&NODE_ID_NAMESPACE, key.as_bytes()).to_string()
}

/// Hex SHA-256 fingerprint of a JSON value
pub fn create_content_digest(data: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.to_string().as_bytes());
    hex::encode(hasher.finalize())
}
