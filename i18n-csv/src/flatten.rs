//! Flattening nested JSON documents back into `(path, value)` pairs.
//!
//! The walk uses an explicit stack instead of recursion and visits keys in the
//! object's own order, so output is deterministic. Only objects are descended
//! into; arrays, numbers, booleans and null are leaves rendered as text.

use std::collections::HashSet;

use serde_json::Value;

use crate::{
    document::LanguageDocument,
    error::Error,
    path::{DELIMITER, MAX_DEPTH},
};

/// Renders a leaf as display text.
///
/// Strings are returned as-is, `null`/numbers/booleans print as JSON does,
/// arrays print as compact JSON. This is not meant to round-trip.
pub fn leaf_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Flattens a document into `(path, value)` pairs in visitation order.
///
/// A non-object root is treated as an empty document.
pub fn flatten(document: &Value) -> Result<Vec<(String, String)>, Error> {
    let mut out = Vec::new();
    walk(document, |path, leaf| out.push((path, leaf_to_string(leaf))))?;
    Ok(out)
}

/// Distinct paths of a document, in first-visited order.
pub fn flatten_paths(document: &Value) -> Result<Vec<String>, Error> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    walk(document, |path, _| {
        if seen.insert(path.clone()) {
            out.push(path);
        }
    })?;
    Ok(out)
}

impl LanguageDocument {
    /// Flattens the document into `(path, value)` pairs.
    pub fn flatten(&self) -> Result<Vec<(String, String)>, Error> {
        flatten(&self.to_value())
    }
}

fn walk<F>(document: &Value, mut emit: F) -> Result<(), Error>
where
    F: FnMut(String, &Value),
{
    let Value::Object(root) = document else {
        return Ok(());
    };

    // (depth, path, node); children are pushed in reverse so they pop in order.
    let mut stack: Vec<(usize, String, &Value)> = root
        .iter()
        .rev()
        .map(|(key, value)| (1, key.clone(), value))
        .collect();

    while let Some((depth, path, node)) = stack.pop() {
        match node {
            Value::Object(children) => {
                if children.is_empty() {
                    continue;
                }
                if depth >= MAX_DEPTH {
                    return Err(Error::DepthLimit {
                        path,
                        limit: MAX_DEPTH,
                    });
                }
                for (key, child) in children.iter().rev() {
                    stack.push((depth + 1, format!("{path}{DELIMITER}{key}"), child));
                }
            }
            leaf => emit(path, leaf),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_in_order() {
        let doc = json!({
            "common": {"loading": "Loading...", "error": "Oops"},
            "auth": {"login": "Login"}
        });
        let pairs = flatten(&doc).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("common.loading".to_string(), "Loading...".to_string()),
                ("common.error".to_string(), "Oops".to_string()),
                ("auth.login".to_string(), "Login".to_string()),
            ]
        );
    }

    #[test]
    fn test_non_string_leaves_are_stringified() {
        let doc = json!({"n": 3, "b": true, "z": null, "list": ["a", "b"]});
        let pairs = flatten(&doc).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("n".to_string(), "3".to_string()),
                ("b".to_string(), "true".to_string()),
                ("z".to_string(), "null".to_string()),
                ("list".to_string(), r#"["a","b"]"#.to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_objects_emit_nothing() {
        let doc = json!({"a": {}, "b": {"c": {}}});
        assert!(flatten(&doc).unwrap().is_empty());
        assert!(flatten(&json!({})).unwrap().is_empty());
    }

    #[test]
    fn test_flatten_paths_deduplicates() {
        let doc = json!({"a.b": "dotted", "a": {"b": "nested"}});
        assert_eq!(flatten_paths(&doc).unwrap(), vec!["a.b".to_string()]);
        assert_eq!(flatten(&doc).unwrap().len(), 2);
    }

    #[test]
    fn test_non_object_root_is_empty() {
        assert!(flatten(&json!("text")).unwrap().is_empty());
    }

    #[test]
    fn test_depth_limit() {
        let mut doc = json!("leaf");
        for _ in 0..=MAX_DEPTH {
            doc = json!({ "k": doc });
        }
        let err = flatten(&doc).unwrap_err();
        assert!(matches!(err, Error::DepthLimit { .. }));
    }

    #[test]
    fn test_at_depth_limit_is_accepted() {
        let mut doc = json!("leaf");
        for _ in 0..MAX_DEPTH {
            doc = json!({ "k": doc });
        }
        let pairs = flatten(&doc).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0.split('.').count(), MAX_DEPTH);
    }
}
