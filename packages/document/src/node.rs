//! # Node Tree
//!
//! Canonical, loosely-typed view of document content: a tree of mappings,
//! ordered sequences and scalars.
//!
//! Children are held behind `Arc` so that copying a container is a shallow
//! pointer copy. A path write clones only the containers on the path and
//! shares every sibling with the original tree.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// One node of the content tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Arc<Node>>),
    Map(BTreeMap<String, Arc<Node>>),
}

impl Node {
    /// Empty mapping
    pub fn empty_map() -> Self {
        Node::Map(BTreeMap::new())
    }

    /// Build a mapping from key/value pairs
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Node)>,
    {
        Node::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), Arc::new(v)))
                .collect(),
        )
    }

    /// Build a sequence from nodes
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        Node::List(items.into_iter().map(Arc::new).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Node::List(_) | Node::Map(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Arc<Node>]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Arc<Node>>> {
        match self {
            Node::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a key in a mapping
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_map()
            .and_then(|entries| entries.get(key))
            .map(Arc::as_ref)
    }

    /// Copy of this mapping with `key` removed. Non-mappings are returned as-is.
    pub fn without_key(&self, key: &str) -> Node {
        match self {
            Node::Map(entries) => {
                let mut entries = entries.clone();
                entries.remove(key);
                Node::Map(entries)
            }
            other => other.clone(),
        }
    }

    /// Deep conversion to a JSON value
    pub fn to_value(&self) -> Value {
        match self {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(*b),
            Node::Number(n) => Value::Number(n.clone()),
            Node::String(s) => Value::String(s.clone()),
            Node::List(items) => Value::Array(items.iter().map(|n| n.to_value()).collect()),
            Node::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect(),
            ),
        }
    }

    /// Project this node onto a typed view
    pub fn to_typed<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_value())
    }

    /// Build a node from any serializable value
    pub fn from_typed<T: Serialize>(value: &T) -> Result<Node, serde_json::Error> {
        serde_json::to_value(value).map(Node::from)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => Node::Number(n),
            Value::String(s) => Node::String(s),
            Value::Array(items) => Node::List(
                items
                    .into_iter()
                    .map(|v| Arc::new(Node::from(v)))
                    .collect(),
            ),
            Value::Object(entries) => Node::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Arc::new(Node::from(v))))
                    .collect(),
            ),
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        node.to_value()
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::String(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::String(s)
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Number(n.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_round_trip_preserves_shape() {
        let value = json!({
            "title": "Menu",
            "price": 12.5,
            "count": 3,
            "items": [{ "title": "Tea", "description": "Hot" }],
            "images": ["a.jpg", "b.jpg"],
            "flag": true
        });

        let node = Node::from(value.clone());
        let text = serde_json::to_string(&node).unwrap();
        let back: Node = serde_json::from_str(&text).unwrap();

        assert_eq!(back, node);
        assert_eq!(back.to_value(), value);
    }

    #[test]
    fn test_absent_key_is_not_null() {
        let node = Node::map([("title", Node::from("Hi"))]);
        let text = serde_json::to_string(&node).unwrap();
        assert_eq!(text, r#"{"title":"Hi"}"#);
        assert!(node.get("subtitle").is_none());
    }

    #[test]
    fn test_without_key() {
        let node = Node::map([("a", Node::from(1i64)), ("b", Node::from(2i64))]);
        let trimmed = node.without_key("a");
        assert!(trimmed.get("a").is_none());
        assert!(node.get("a").is_some());
    }
}
