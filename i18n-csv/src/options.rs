//! Settings for a [`crate::Generator`] run.

use std::path::PathBuf;

use crate::languages::LanguageAliases;

/// Default output directory for generated documents.
pub const DEFAULT_OUTPUT_DIR: &str = "./i18n";

/// Where to read from, where to write to, and how to treat the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Path of the translation spreadsheet.
    pub input: PathBuf,
    /// Directory that receives `<lang>.json` files.
    pub output_dir: PathBuf,
    /// Restricts processing to these languages when set.
    pub languages: Option<Vec<String>>,
    /// Copies existing documents aside before overwriting them.
    pub backup: bool,
    /// Renames language columns through `aliases` after reading.
    pub normalize_languages: bool,
    pub aliases: LanguageAliases,
    /// Stores blank translations as empty strings instead of omitting them.
    pub keep_empty: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            languages: None,
            backup: false,
            normalize_languages: false,
            aliases: LanguageAliases::builtin(),
            keep_empty: false,
        }
    }
}

impl GeneratorConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Sets the language filter. An empty list clears it.
    pub fn with_languages(mut self, languages: Option<Vec<String>>) -> Self {
        self.languages = languages.filter(|langs| !langs.is_empty());
        self
    }

    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    pub fn with_normalize_languages(mut self, normalize: bool) -> Self {
        self.normalize_languages = normalize;
        self
    }

    /// Replaces the alias table.
    pub fn with_aliases(mut self, aliases: LanguageAliases) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_keep_empty(mut self, keep_empty: bool) -> Self {
        self.keep_empty = keep_empty;
        self
    }
}
