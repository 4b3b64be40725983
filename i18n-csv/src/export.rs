//! Rebuilding a spreadsheet from language documents.
//!
//! Two shapes are supported: a full export that merges every language's
//! document into one table, and a template that flattens a single
//! source-language document so translators can fill in the other columns.

use std::collections::{BTreeSet, HashMap};

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::{
    error::Error, flatten::flatten, formats::TranslationTable, path, types::TranslationRow,
};

/// Longest source text quoted in a generated description.
const DESCRIPTION_QUOTE_LIMIT: usize = 50;

lazy_static! {
    static ref CAPITAL_REGEX: Regex = Regex::new(r"([A-Z])").unwrap();
}

/// Description used for exported rows.
pub fn export_description(path: &str) -> String {
    format!("Translation for {}", path)
}

/// Merges documents into one table.
///
/// Rows are the union of every document's paths, sorted. Columns follow the
/// order of `documents`. A language lacking a path gets an empty cell.
pub fn table_from_documents(documents: &[(String, Value)]) -> Result<TranslationTable, Error> {
    let mut paths = BTreeSet::new();
    let mut values: Vec<(String, HashMap<String, String>)> = Vec::with_capacity(documents.len());

    for (language, document) in documents {
        let pairs: HashMap<String, String> = flatten(document)?.into_iter().collect();
        paths.extend(pairs.keys().cloned());
        values.push((language.clone(), pairs));
    }

    let languages = documents.iter().map(|(lang, _)| lang.clone()).collect();
    let mut table = TranslationTable::new(languages);
    for path in paths {
        let mut row = TranslationRow::new(path.clone(), export_description(&path));
        for (language, pairs) in &values {
            if let Some(value) = pairs.get(&path) {
                row.set_value(language.clone(), value.clone());
            }
        }
        table.add_row(row);
    }
    Ok(table)
}

/// Flattens one source-language document into a translation template.
///
/// Only the `source_language` column is pre-filled, and only when it is one of
/// `targets`. Rows are sorted by path.
pub fn template_from_document(
    document: &Value,
    source_language: &str,
    targets: &[String],
) -> Result<TranslationTable, Error> {
    let mut pairs = flatten(document)?;
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    pairs.dedup_by(|a, b| a.0 == b.0);

    let mut table = TranslationTable::new(targets.to_vec());
    for (path, text) in pairs {
        let mut row = TranslationRow::new(path.clone(), describe_path(&path, &text));
        for target in targets {
            let value = if target == source_language {
                text.clone()
            } else {
                String::new()
            };
            row.set_value(target.clone(), value);
        }
        table.add_row(row);
    }
    Ok(table)
}

/// Human-readable description for a key, e.g. `members.addMember` with text
/// `Add Member` becomes `Add member - "Add Member"`.
pub fn describe_path(path: &str, text: &str) -> String {
    let last = path::split(path).last().copied().unwrap_or_default();
    let spaced = CAPITAL_REGEX.replace_all(last, " $1").replace(['-', '_'], " ");
    let readable = spaced.to_lowercase();
    let readable = readable.trim();

    let mut chars = readable.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };

    if text.is_empty() {
        return capitalized;
    }

    let quoted = if text.chars().count() > DESCRIPTION_QUOTE_LIMIT {
        let head: String = text.chars().take(DESCRIPTION_QUOTE_LIMIT).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    };
    format!("{} - \"{}\"", capitalized, quoted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_describe_path_splits_camel_case() {
        assert_eq!(
            describe_path("members.addMember", "Add Member"),
            "Add member - \"Add Member\""
        );
        assert_eq!(describe_path("common.loading", ""), "Loading");
        assert_eq!(describe_path("ui.save-button_text", ""), "Save button text");
    }

    #[test]
    fn test_describe_path_truncates_long_text() {
        let text = "x".repeat(60);
        let description = describe_path("a.body", &text);
        assert_eq!(description, format!("Body - \"{}...\"", "x".repeat(50)));
    }

    #[test]
    fn test_table_from_documents_unions_and_sorts_paths() {
        let documents = vec![
            ("en".to_string(), json!({"b": "B", "a": {"x": "AX"}})),
            ("mr".to_string(), json!({"c": "क"})),
        ];
        let table = table_from_documents(&documents).unwrap();

        assert_eq!(table.languages, vec!["en", "mr"]);
        let paths: Vec<&str> = table.rows.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["a.x", "b", "c"]);
        assert_eq!(table.rows[0].description, "Translation for a.x");
        assert_eq!(table.rows[0].value("en"), "AX");
        assert_eq!(table.rows[0].value("mr"), "");
        assert_eq!(table.rows[2].value("mr"), "क");
    }

    #[test]
    fn test_template_prefills_source_language_only() {
        let document = json!({"members": {"title": "Members"}, "auth": {"login": "Login"}});
        let targets = vec!["en".to_string(), "mr".to_string()];
        let table = template_from_document(&document, "en", &targets).unwrap();

        let paths: Vec<&str> = table.rows.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["auth.login", "members.title"]);
        assert_eq!(table.rows[0].value("en"), "Login");
        assert_eq!(table.rows[0].value("mr"), "");
        assert_eq!(table.rows[0].description, "Login - \"Login\"");
    }
}
