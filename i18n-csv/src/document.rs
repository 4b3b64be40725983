//! In-memory language documents.
//!
//! A document is a tree of [`Node`]s: leaves hold translated strings, branches
//! hold ordered child maps keyed by path segment. Keys keep insertion order so
//! serialized output follows the order rows were read.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// One node of a language document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(String),
    Branch(Branch),
}

impl Node {
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Branch(_) => None,
        }
    }

    /// Converts the subtree into a JSON value, keeping key order.
    pub fn to_value(&self) -> Value {
        match self {
            Node::Leaf(value) => Value::String(value.clone()),
            Node::Branch(branch) => branch.to_value(),
        }
    }
}

/// An ordered map from segment name to child node.
#[derive(Debug, Clone, Default)]
pub struct Branch {
    entries: Vec<(String, Node)>,
    index: HashMap<String, usize>,
}

impl PartialEq for Branch {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Branch {}

impl Branch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// Children in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    /// Sets `key` to `node`, returning the node it replaced.
    ///
    /// A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, node: Node) -> Option<Node> {
        let key = key.into();
        match self.index.get(&key).copied() {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, node)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, node));
                None
            }
        }
    }

    /// Returns the child branch under `key`, creating it if needed.
    ///
    /// When `key` currently holds a leaf, the leaf is replaced by an empty
    /// branch and the second tuple element is `true`.
    pub fn descend(&mut self, key: &str) -> (&mut Branch, bool) {
        let i = match self.index.get(key).copied() {
            Some(i) => i,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries
                    .push((key.to_string(), Node::Branch(Branch::new())));
                self.entries.len() - 1
            }
        };

        let slot = &mut self.entries[i].1;
        let replaced_leaf = matches!(slot, Node::Leaf(_));
        if replaced_leaf {
            *slot = Node::Branch(Branch::new());
        }
        match slot {
            Node::Branch(branch) => (branch, replaced_leaf),
            Node::Leaf(_) => unreachable!("slot holds a branch after replacement"),
        }
    }

    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(key, node)| (key.clone(), node.to_value()))
            .collect();
        Value::Object(map)
    }
}

/// The nested translations of a single language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageDocument {
    pub language: String,
    pub root: Branch,
}

impl LanguageDocument {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            root: Branch::new(),
        }
    }

    /// File name the document is persisted under, e.g. `en.json`.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.language)
    }

    pub fn to_value(&self) -> Value {
        self.root.to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_keeps_position_on_replace() {
        let mut branch = Branch::new();
        branch.insert("b", Node::Leaf("1".into()));
        branch.insert("a", Node::Leaf("2".into()));
        let old = branch.insert("b", Node::Leaf("3".into()));

        assert_eq!(old, Some(Node::Leaf("1".into())));
        let keys: Vec<&str> = branch.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(branch.get("b").and_then(Node::as_leaf), Some("3"));
    }

    #[test]
    fn test_descend_replaces_leaf() {
        let mut branch = Branch::new();
        branch.insert("a", Node::Leaf("x".into()));

        let (child, replaced) = branch.descend("a");
        assert!(replaced);
        assert!(child.is_empty());

        let (_, replaced_again) = branch.descend("a");
        assert!(!replaced_again);
    }

    #[test]
    fn test_to_value_preserves_order() {
        let mut doc = LanguageDocument::new("en");
        doc.root.insert("zeta", Node::Leaf("Z".into()));
        let (common, _) = doc.root.descend("common");
        common.insert("loading", Node::Leaf("Loading...".into()));

        let value = doc.to_value();
        assert_eq!(value, json!({"zeta": "Z", "common": {"loading": "Loading..."}}));
        let rendered = serde_json::to_string(&value).unwrap();
        assert_eq!(rendered, r#"{"zeta":"Z","common":{"loading":"Loading..."}}"#);
        assert_eq!(doc.file_name(), "en.json");
    }
}
