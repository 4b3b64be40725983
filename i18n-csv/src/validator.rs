//! Structural and semantic checks over parsed spreadsheet rows.
//!
//! Every check runs on every row; nothing short-circuits. The caller gets the
//! complete list of findings in one pass and decides what to do with them.

use std::collections::HashSet;

use tracing::debug;

use crate::{
    path,
    types::{
        DESCRIPTION_COLUMN, Diagnostic, GENERAL_COLUMN, HEADERS_COLUMN, PATH_COLUMN,
        TranslationRow, ValidationResult, is_reserved_column,
    },
};

/// Spreadsheet row number of the first data row (the header is row 1).
const FIRST_DATA_ROW: usize = 2;

/// Checks that the fixed columns and at least one language column exist.
///
/// Returns one message per problem; an empty list means the headers are fine.
pub fn validate_headers<S: AsRef<str>>(headers: &[S]) -> Vec<String> {
    let mut problems = Vec::new();

    for required in [PATH_COLUMN, DESCRIPTION_COLUMN] {
        if !headers.iter().any(|h| h.as_ref() == required) {
            problems.push(format!("Missing required column: {}", required));
        }
    }

    if !headers.iter().any(|h| !is_reserved_column(h.as_ref())) {
        problems.push("No language columns found. Expected at least one language column.".to_string());
    }

    problems
}

/// Paths that occur more than once, each listed once, in the order their
/// first repeat was seen. Matching is exact and case-sensitive.
pub fn find_duplicates(rows: &[TranslationRow]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for row in rows {
        let path = row.path.as_str();
        if !seen.insert(path) && reported.insert(path) {
            duplicates.push(path.to_string());
        }
    }

    duplicates
}

/// Validates headers and rows against the declared languages.
pub fn validate_rows<S: AsRef<str>>(
    headers: &[S],
    rows: &[TranslationRow],
    languages: &[String],
) -> ValidationResult {
    let mut result = ValidationResult::new();

    for problem in validate_headers(headers) {
        result.push(Diagnostic::error(0, HEADERS_COLUMN, problem));
    }

    for (index, row) in rows.iter().enumerate() {
        result.extend(check_row(index + FIRST_DATA_ROW, row, languages));
    }

    let duplicates = find_duplicates(rows);
    if !duplicates.is_empty() {
        let duplicates: HashSet<&str> = duplicates.iter().map(String::as_str).collect();
        for (index, row) in rows.iter().enumerate() {
            if duplicates.contains(row.path.as_str()) {
                result.push(
                    Diagnostic::error(
                        index + FIRST_DATA_ROW,
                        PATH_COLUMN,
                        format!("Duplicate path found: {}", row.path),
                    )
                    .with_value(row.path.clone()),
                );
            }
        }
    }

    let blank_rows = rows.iter().filter(|row| row.is_blank(languages)).count();
    if blank_rows > 0 {
        result.push(Diagnostic::warning(
            0,
            GENERAL_COLUMN,
            format!("Found {} empty rows that will be skipped", blank_rows),
        ));
    }

    debug!(
        rows = rows.len(),
        errors = result.errors().len(),
        warnings = result.warnings().len(),
        "validated translation rows"
    );
    result
}

fn check_row(row_number: usize, row: &TranslationRow, languages: &[String]) -> Vec<Diagnostic> {
    let mut found = Vec::new();

    if row.path.trim().is_empty() {
        found.push(
            Diagnostic::error(row_number, PATH_COLUMN, "Path is required")
                .with_value(row.path.clone()),
        );
    } else if !path::validate(&row.path) {
        found.push(
            Diagnostic::error(
                row_number,
                PATH_COLUMN,
                format!("Invalid path format. {}", path::PATH_FORMAT_HINT),
            )
            .with_value(row.path.clone()),
        );
    } else if path::depth(&row.path) > path::MAX_DEPTH {
        found.push(
            Diagnostic::error(
                row_number,
                PATH_COLUMN,
                format!("Path is nested deeper than {} levels", path::MAX_DEPTH),
            )
            .with_value(row.path.clone()),
        );
    }

    if row.description.trim().is_empty() {
        found.push(
            Diagnostic::warning(
                row_number,
                DESCRIPTION_COLUMN,
                "Description is empty. Consider adding a description for better context.",
            )
            .with_value(row.description.clone()),
        );
    }

    for lang in languages {
        let value = row.value(lang);
        if value.trim().is_empty() {
            found.push(
                Diagnostic::warning(row_number, lang.as_str(), format!("Translation for {} is empty", lang))
                    .with_value(value),
            );
        } else if value.contains('\\') || value.contains('"') {
            found.push(
                Diagnostic::warning(
                    row_number,
                    lang.as_str(),
                    "Translation contains special characters that will be escaped in JSON",
                )
                .with_value(value),
            );
        }
    }

    found
}
