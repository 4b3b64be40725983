//! Cross-checking persisted language documents against the spreadsheet.
//!
//! The spreadsheet is authoritative: a key it defines that a document lacks is
//! an error, a key a document carries that the spreadsheet does not define is
//! only a warning.

use std::collections::{HashMap, HashSet};

use serde_json::Value;
use tracing::debug;

use crate::{
    error::Error,
    flatten::flatten_paths,
    types::{Diagnostic, TranslationRow, ValidationResult},
};

/// Outcome of loading one language document: the parsed JSON, or why it
/// could not be loaded.
pub type LoadedDocument = Result<Value, Error>;

/// Compares each language's document with the paths defined in `source_rows`.
///
/// A language whose document failed to load gets one file-level error and is
/// skipped; the remaining languages are still checked. A language missing from
/// `documents` altogether is treated the same way.
pub fn validate_against_source(
    source_rows: &[TranslationRow],
    documents: &HashMap<String, LoadedDocument>,
    languages: &[String],
) -> ValidationResult {
    let mut result = ValidationResult::new();

    let mut source_paths: Vec<&str> = Vec::new();
    let mut source_set: HashSet<&str> = HashSet::new();
    for row in source_rows {
        if source_set.insert(row.path.as_str()) {
            source_paths.push(row.path.as_str());
        }
    }

    for lang in languages {
        let file_name = format!("{}.json", lang);
        let document = match documents.get(lang) {
            Some(Ok(document)) => document,
            Some(Err(err)) => {
                result.push(load_failure(lang, &file_name, err));
                continue;
            }
            None => {
                result.push(Diagnostic::error(
                    0,
                    lang.as_str(),
                    format!("Error reading {}: document not loaded", file_name),
                ));
                continue;
            }
        };

        let document_paths = match flatten_paths(document) {
            Ok(paths) => paths,
            Err(err) => {
                result.push(load_failure(lang, &file_name, &err));
                continue;
            }
        };
        let document_set: HashSet<&str> = document_paths.iter().map(String::as_str).collect();

        for path in &source_paths {
            if !document_set.contains(path) {
                result.push(
                    Diagnostic::error(
                        0,
                        lang.as_str(),
                        format!("Missing translation key in {}: {}", file_name, path),
                    )
                    .with_value(*path),
                );
            }
        }

        for path in &document_paths {
            if !source_set.contains(path.as_str()) {
                result.push(
                    Diagnostic::warning(
                        0,
                        lang.as_str(),
                        format!("Extra translation key in {} (not in CSV): {}", file_name, path),
                    )
                    .with_value(path.clone()),
                );
            }
        }

        debug!(
            language = %lang,
            source_keys = source_paths.len(),
            document_keys = document_paths.len(),
            "compared document with source"
        );
    }

    result
}

fn load_failure(lang: &str, file_name: &str, err: &Error) -> Diagnostic {
    match err {
        Error::NotFound { path } => Diagnostic::error(
            0,
            lang,
            format!("JSON file not found: {}", path.display()),
        )
        .with_value(path.display().to_string()),
        other => Diagnostic::error(0, lang, format!("Error reading {}: {}", file_name, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(paths: &[&str]) -> Vec<TranslationRow> {
        paths
            .iter()
            .map(|p| TranslationRow::new(*p, "d").with_value("en", "x"))
            .collect()
    }

    fn en() -> Vec<String> {
        vec!["en".to_string()]
    }

    #[test]
    fn test_missing_key_is_error() {
        let mut documents = HashMap::new();
        documents.insert("en".to_string(), Ok(json!({"common": {"loading": "Loading..."}})));

        let result =
            validate_against_source(&rows(&["common.loading", "auth.login"]), &documents, &en());

        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
        assert!(result.warnings().is_empty());
        let message = &result.errors()[0].message;
        assert!(message.contains("Missing translation key"));
        assert!(message.contains("auth.login"));
    }

    #[test]
    fn test_extra_key_is_warning() {
        let mut documents = HashMap::new();
        documents.insert(
            "en".to_string(),
            Ok(json!({
                "common": {"loading": "Loading...", "extra": "Extra"},
                "auth": {"login": "Login"}
            })),
        );

        let result =
            validate_against_source(&rows(&["common.loading", "auth.login"]), &documents, &en());

        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
        let message = &result.warnings()[0].message;
        assert!(message.contains("Extra translation key"));
        assert!(message.contains("common.extra"));
    }

    #[test]
    fn test_load_failure_skips_only_that_language() {
        let mut documents = HashMap::new();
        documents.insert(
            "en".to_string(),
            Err(Error::not_found("out/en.json")),
        );
        documents.insert("mr".to_string(), Ok(json!({"a": "x"})));
        let languages = vec!["en".to_string(), "mr".to_string()];

        let result = validate_against_source(&rows(&["a"]), &documents, &languages);

        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].column, "en");
        assert_eq!(result.errors()[0].row, 0);
        assert!(result.errors()[0].message.contains("JSON file not found"));
    }

    #[test]
    fn test_unloaded_language_is_error() {
        let documents = HashMap::new();
        let result = validate_against_source(&rows(&["a"]), &documents, &en());
        assert_eq!(result.errors().len(), 1);
        assert!(result.errors()[0].message.contains("en.json"));
    }

    #[test]
    fn test_duplicate_source_paths_reported_once() {
        let mut documents = HashMap::new();
        documents.insert("en".to_string(), Ok(json!({})));
        let result = validate_against_source(&rows(&["a", "a"]), &documents, &en());
        assert_eq!(result.errors().len(), 1);
    }
}
