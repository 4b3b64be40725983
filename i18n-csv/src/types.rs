//! Core, format-agnostic types for i18n-csv.
//! The CSV reader decodes into these; the builder and validators consume them.

use std::{collections::HashMap, fmt::Display};

use serde::Serialize;

/// Column name for the key path.
pub const PATH_COLUMN: &str = "path";
/// Column name for the translator-facing description.
pub const DESCRIPTION_COLUMN: &str = "description";
/// Pseudo column used for header-level diagnostics.
pub const HEADERS_COLUMN: &str = "headers";
/// Pseudo column used for file-level diagnostics that concern no single column.
pub const GENERAL_COLUMN: &str = "general";

/// Returns `true` for the two fixed columns every source must declare.
pub fn is_reserved_column(name: &str) -> bool {
    name == PATH_COLUMN || name == DESCRIPTION_COLUMN
}

/// One data row of the translation spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationRow {
    /// Dot-notation key path, as read (not trimmed).
    pub path: String,

    /// Advisory description for translators; may be empty.
    pub description: String,

    /// Language code → translated text. Absent and empty are equivalent.
    pub values: HashMap<String, String>,
}

impl TranslationRow {
    /// Creates a row with no translations.
    pub fn new(path: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
            values: HashMap::new(),
        }
    }

    /// Adds a translation, returning `self` for chaining.
    pub fn with_value(mut self, language: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(language.into(), value.into());
        self
    }

    /// Sets the translation for a language.
    pub fn set_value(&mut self, language: impl Into<String>, value: impl Into<String>) {
        self.values.insert(language.into(), value.into());
    }

    /// Translation for `language`, or `""` when the row has none.
    pub fn value(&self, language: &str) -> &str {
        self.values.get(language).map(String::as_str).unwrap_or("")
    }

    /// `true` when path, description and every listed language are blank.
    pub fn is_blank(&self, languages: &[String]) -> bool {
        self.path.trim().is_empty()
            && self.description.trim().is_empty()
            && languages.iter().all(|lang| self.value(lang).trim().is_empty())
    }
}

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single validation finding.
///
/// Diagnostics are plain values: checks push them into a result and carry on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,

    /// 1-based spreadsheet row (the header is row 1); `0` means file-level.
    pub row: usize,

    /// `path`, `description`, a language code, `headers` or `general`.
    pub column: String,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Diagnostic {
    pub fn error(row: usize, column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            row,
            column: column.into(),
            message: message.into(),
            value: None,
        }
    }

    pub fn warning(row: usize, column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            row,
            column: column.into(),
            message: message.into(),
            value: None,
        }
    }

    /// Attaches the offending value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn is_file_level(&self) -> bool {
        self.row == 0
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_file_level() {
            write!(f, "{}", self.message)
        } else {
            write!(
                f,
                "Row {}, Column \"{}\": {}",
                self.row, self.column, self.message
            )
        }
    }
}

/// Outcome of one validation pass.
///
/// Errors and warnings keep the order in which the checks produced them.
/// The result is valid exactly when no error was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationResult {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Files a diagnostic under its severity.
    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.errors.push(diagnostic),
            Severity::Warning => self.warnings.push(diagnostic),
        }
    }

    pub(crate) fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.push(diagnostic);
        }
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Summary counts for reporting.
    pub fn stats(&self, total_rows: usize) -> ValidationStats {
        ValidationStats {
            total_rows,
            error_count: self.errors.len(),
            warning_count: self.warnings.len(),
            is_valid: self.is_valid(),
        }
    }
}

/// Summary counts of a [`ValidationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationStats {
    pub total_rows: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub is_valid: bool,
}
