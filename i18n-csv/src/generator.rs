//! End-to-end operations over files: generate documents from a spreadsheet,
//! validate either side, and go back from documents to a spreadsheet.

use std::{fs, path::Path};

use tracing::{debug, info, warn};

use crate::{
    builder::{Bundle, Collision, TreeBuilder},
    consistency::validate_against_source,
    error::Error,
    export::{table_from_documents, template_from_document},
    formats::{JsonDocument, TranslationTable, WriteOutcome, load_documents, read_json_dir, write_bundle},
    options::GeneratorConfig,
    traits::Parser,
    types::{Diagnostic, GENERAL_COLUMN, TranslationRow, ValidationResult, ValidationStats},
    validator::validate_rows,
};

/// Languages used by `init` and `from_json` when none are given.
pub const DEFAULT_LANGUAGES: [&str; 2] = ["en", "mr"];

/// Language whose column `from_json` pre-fills by default.
pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";

/// `(path, description, english, marathi)` rows written by `init`.
const SAMPLE_ROWS: &[(&str, &str, &str, &str)] = &[
    ("common.loading", "Loading text shown during data fetch", "Loading...", "लोड होत आहे..."),
    ("common.error", "Error message text", "An error occurred", "एक त्रुटी आली"),
    ("auth.login", "Login button text", "Login", "लॉगिन"),
    ("auth.logout", "Logout button text", "Logout", "लॉगआउट"),
    ("navigation.dashboard", "Dashboard menu item", "Dashboard", "डॅशबोर्ड"),
    ("members.title", "Members page title", "Members", "सदस्य"),
    ("members.addMember", "Add member button", "Add Member", "सदस्य जोडा"),
];

/// Result of validating a spreadsheet, alone or against its documents.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub languages: Vec<String>,
    pub total_rows: usize,
    pub result: ValidationResult,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.result.is_valid()
    }

    pub fn stats(&self) -> ValidationStats {
        self.result.stats(self.total_rows)
    }
}

/// Result of a `generate` run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Validation findings; only warnings, since errors abort the run.
    pub validation: ValidationReport,
    pub outcomes: Vec<WriteOutcome>,
    pub collisions: Vec<Collision>,
}

impl GenerateReport {
    /// `true` when every language document was written.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(WriteOutcome::is_ok)
    }

    pub fn failures(&self) -> impl Iterator<Item = &WriteOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_ok())
    }
}

/// What `export_to_csv` or `from_json` wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub languages: Vec<String>,
    pub rows: usize,
}

impl From<&TranslationTable> for TableSummary {
    fn from(table: &TranslationTable) -> Self {
        Self {
            languages: table.languages.clone(),
            rows: table.rows.len(),
        }
    }
}

/// Runs spreadsheet-driven operations for one [`GeneratorConfig`].
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Reads the spreadsheet and applies alias normalization and the
    /// language filter.
    pub fn load_table(&self) -> Result<TranslationTable, Error> {
        let mut table = TranslationTable::read_from(&self.config.input)?;
        if self.config.normalize_languages {
            table = table.normalize_languages(&self.config.aliases);
        }
        if let Some(filter) = &self.config.languages {
            table.retain_languages(filter);
        }
        debug!(
            input = %self.config.input.display(),
            rows = table.rows.len(),
            languages = ?table.languages,
            "loaded translation table"
        );
        Ok(table)
    }

    /// Runs the record validator over an already loaded table.
    ///
    /// Rows are only checked for the languages the header declares; each
    /// selected language without a column gets one file-level warning.
    pub fn validate_table(&self, table: &TranslationTable) -> ValidationReport {
        let undeclared = table.undeclared_languages();
        let declared: Vec<String> = table
            .languages
            .iter()
            .filter(|code| !undeclared.contains(&code.as_str()))
            .cloned()
            .collect();

        let mut result = validate_rows(&table.headers, &table.rows, &declared);
        for code in undeclared {
            result.push(Diagnostic::warning(
                0,
                GENERAL_COLUMN,
                format!(
                    "Language {} has no column in the CSV; {}.json will be empty",
                    code, code
                ),
            ));
        }

        ValidationReport {
            languages: table.languages.clone(),
            total_rows: table.rows.len(),
            result,
        }
    }

    /// Validates the spreadsheet without writing anything.
    pub fn validate(&self) -> Result<ValidationReport, Error> {
        let table = self.load_table()?;
        Ok(self.validate_table(&table))
    }

    /// Builds the documents for a table without persisting them.
    pub fn build(&self, table: &TranslationTable) -> Result<Bundle, Error> {
        TreeBuilder::new(table.languages.clone())
            .with_keep_empty(self.config.keep_empty)
            .build(&table.rows)
    }

    /// Validates, builds and writes the documents for an already loaded table.
    ///
    /// Refuses to write anything when validation finds errors. Each language
    /// file is written independently; failures are reported in the outcomes.
    pub fn generate_table(&self, table: &TranslationTable) -> Result<GenerateReport, Error> {
        let validation = self.validate_table(table);
        self.generate_validated(table, validation)
    }

    /// Builds and writes the documents for a table whose validation report
    /// the caller already holds, so the rows are checked only once.
    pub fn generate_validated(
        &self,
        table: &TranslationTable,
        validation: ValidationReport,
    ) -> Result<GenerateReport, Error> {
        if !validation.is_valid() {
            return Err(Error::validation_error(format!(
                "CSV validation failed with {} error(s). Please fix the errors before generating JSON files.",
                validation.result.errors().len()
            )));
        }

        let bundle = self.build(table)?;
        let outcomes = write_bundle(&bundle, &self.config.output_dir, self.config.backup)?;

        let failed = outcomes.iter().filter(|outcome| !outcome.is_ok()).count();
        if failed > 0 {
            warn!(failed, "some language documents could not be written");
        }
        info!(
            output = %self.config.output_dir.display(),
            files = outcomes.len() - failed,
            "generated language documents"
        );

        Ok(GenerateReport {
            validation,
            outcomes,
            collisions: bundle.collisions,
        })
    }

    /// Reads the spreadsheet and generates every language document.
    pub fn generate(&self) -> Result<GenerateReport, Error> {
        let table = self.load_table()?;
        self.generate_table(&table)
    }

    /// Checks the documents in `json_dir` against the spreadsheet's keys.
    pub fn validate_json(&self, json_dir: &Path) -> Result<ValidationReport, Error> {
        let table = self.load_table()?;
        let documents = load_documents(json_dir, &table.languages);
        Ok(ValidationReport {
            languages: table.languages.clone(),
            total_rows: table.rows.len(),
            result: validate_against_source(&table.rows, &documents, &table.languages),
        })
    }
}

/// Merges every `*.json` document in `json_dir` into one spreadsheet.
pub fn export_to_csv(json_dir: &Path, output: &Path) -> Result<TableSummary, Error> {
    let documents = read_json_dir(json_dir)?;
    if documents.is_empty() {
        return Err(Error::DataMismatch(
            "No JSON files found in the specified directory".to_string(),
        ));
    }

    let table = table_from_documents(&documents)?;
    ensure_parent(output)?;
    table.write_to(output)?;
    info!(output = %output.display(), rows = table.rows.len(), "exported spreadsheet");
    Ok(TableSummary::from(&table))
}

/// Turns one source-language document into a spreadsheet template with a
/// column per target language.
pub fn from_json(
    source: &Path,
    output: &Path,
    source_language: &str,
    targets: &[String],
) -> Result<TableSummary, Error> {
    let document = JsonDocument::read_from(source)?;
    let table = template_from_document(&document.value, source_language, targets)?;
    ensure_parent(output)?;
    table.write_to(output)?;
    info!(output = %output.display(), rows = table.rows.len(), "wrote template");
    Ok(TableSummary::from(&table))
}

/// Writes a sample spreadsheet.
///
/// The first language column gets English sample text and the second gets
/// Marathi; any further columns are left empty.
pub fn create_sample_csv(output: &Path, languages: &[String]) -> Result<TableSummary, Error> {
    let mut table = TranslationTable::new(languages.to_vec());
    for (path, description, english, marathi) in SAMPLE_ROWS {
        let mut row = TranslationRow::new(*path, *description);
        for (i, lang) in languages.iter().enumerate() {
            let text = match i {
                0 => *english,
                1 => *marathi,
                _ => "",
            };
            row.set_value(lang.clone(), text);
        }
        table.add_row(row);
    }

    ensure_parent(output)?;
    table.write_to(output)?;
    info!(output = %output.display(), "created sample spreadsheet");
    Ok(TableSummary::from(&table))
}

fn ensure_parent(path: &Path) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("translations.csv");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_generate_writes_one_file_per_language() {
        let dir = TempDir::new().unwrap();
        let input = write_csv(&dir, "path,description,en,mr\na.b,d,X,\n");
        let out = dir.path().join("i18n");

        let generator = Generator::new(GeneratorConfig::new(&input).with_output_dir(&out));
        let report = generator.generate().unwrap();

        assert!(report.is_success());
        assert_eq!(report.outcomes.len(), 2);
        assert!(report.validation.is_valid());
        assert!(!report.validation.result.warnings().is_empty());

        let en: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("en.json")).unwrap()).unwrap();
        assert_eq!(en, json!({"a": {"b": "X"}}));
        assert_eq!(fs::read_to_string(out.join("mr.json")).unwrap(), "{}");
    }

    #[test]
    fn test_generate_refuses_invalid_input() {
        let dir = TempDir::new().unwrap();
        let input = write_csv(&dir, "path,description,en\na,d,x\na,d,y\n");
        let out = dir.path().join("i18n");

        let err = Generator::new(GeneratorConfig::new(&input).with_output_dir(&out))
            .generate()
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_input_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = Generator::new(GeneratorConfig::new(dir.path().join("nope.csv")))
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_language_filter_and_normalization() {
        let dir = TempDir::new().unwrap();
        let input = write_csv(&dir, "path,description,English,Marathi,fr\na,d,A,अ,Ä\n");
        let config = GeneratorConfig::new(&input)
            .with_normalize_languages(true)
            .with_languages(Some(vec!["mr".to_string(), "en".to_string()]));

        let table = Generator::new(config).load_table().unwrap();
        assert_eq!(table.languages, vec!["mr", "en"]);
        assert_eq!(table.rows[0].value("mr"), "अ");
    }

    #[test]
    fn test_requested_language_without_column_gets_empty_document() {
        let dir = TempDir::new().unwrap();
        let input = write_csv(&dir, "path,description,en\na.b,d,X\n");
        let out = dir.path().join("i18n");
        let config = GeneratorConfig::new(&input)
            .with_output_dir(&out)
            .with_languages(Some(vec!["en".to_string(), "fr".to_string()]));

        let report = Generator::new(config).generate().unwrap();
        assert!(report.is_success());
        let written: Vec<&str> = report.outcomes.iter().map(|o| o.language.as_str()).collect();
        assert_eq!(written, vec!["en", "fr"]);
        assert_eq!(fs::read_to_string(out.join("fr.json")).unwrap(), "{}");

        let warnings = report.validation.result.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].column, GENERAL_COLUMN);
        assert!(warnings[0].message.contains("fr.json will be empty"));
    }

    #[test]
    fn test_filter_naming_only_missing_languages_still_writes_them() {
        let dir = TempDir::new().unwrap();
        let input = write_csv(&dir, "path,description,en\na.b,d,X\n");
        let out = dir.path().join("i18n");
        let config = GeneratorConfig::new(&input)
            .with_output_dir(&out)
            .with_languages(Some(vec!["fr".to_string()]));

        let report = Generator::new(config).generate().unwrap();
        assert_eq!(report.outcomes.len(), 1);
        assert!(out.join("fr.json").exists());
        assert!(!out.join("en.json").exists());
        assert!(!report.validation.result.warnings().is_empty());
    }

    #[test]
    fn test_normalization_lowercases_known_codes() {
        let dir = TempDir::new().unwrap();
        let input = write_csv(&dir, "path,description,EN,MR\na,d,A,अ\n");
        let out = dir.path().join("i18n");
        let config = GeneratorConfig::new(&input)
            .with_output_dir(&out)
            .with_normalize_languages(true);

        let report = Generator::new(config).generate().unwrap();
        assert_eq!(report.validation.languages, vec!["en", "mr"]);
        assert!(out.join("en.json").exists());
        assert!(out.join("mr.json").exists());
    }

    #[test]
    fn test_generate_validated_reuses_report() {
        let dir = TempDir::new().unwrap();
        let input = write_csv(&dir, "path,description,en\na,d,x\na,d,y\n");
        let out = dir.path().join("i18n");
        let generator = Generator::new(GeneratorConfig::new(&input).with_output_dir(&out));

        let table = generator.load_table().unwrap();
        let validation = generator.validate_table(&table);
        assert_eq!(validation.result.errors().len(), 2);
        let err = generator.generate_validated(&table, validation).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(!out.exists());
    }

    #[test]
    fn test_create_sample_csv() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("nested").join("sample.csv");
        let languages = vec!["en".to_string(), "mr".to_string(), "fr".to_string()];

        let summary = create_sample_csv(&output, &languages).unwrap();
        assert_eq!(summary.rows, 7);

        let table = TranslationTable::read_from(&output).unwrap();
        assert_eq!(table.languages, languages);
        assert_eq!(table.rows[6].path, "members.addMember");
        assert_eq!(table.rows[6].value("en"), "Add Member");
        assert_eq!(table.rows[6].value("mr"), "सदस्य जोडा");
        assert_eq!(table.rows[6].value("fr"), "");

        let report = Generator::new(GeneratorConfig::new(&output)).validate().unwrap();
        assert!(report.is_valid());
    }

    #[test]
    fn test_export_requires_documents() {
        let dir = TempDir::new().unwrap();
        let err = export_to_csv(dir.path(), &dir.path().join("out.csv")).unwrap_err();
        assert!(err.to_string().contains("No JSON files found"));
    }
}
