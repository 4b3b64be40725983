//! Project configuration file (`i18n-csv.toml`).
//!
//! Every field is optional. Command-line flags take precedence over values
//! read here.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use i18n_csv::LanguageAliases;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "i18n-csv.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Translation spreadsheet.
    pub input: Option<String>,
    /// Directory holding `<lang>.json` files.
    pub output: Option<String>,
    pub backup: Option<bool>,
    pub languages: Option<Vec<String>>,
    pub normalize_languages: Option<bool>,
    pub keep_empty: Option<bool>,
    pub watch_interval_ms: Option<u64>,
    /// Extra alias → code pairs merged over the built-in table.
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

impl FileConfig {
    /// Built-in aliases overridden by the ones in this file.
    pub fn alias_table(&self) -> LanguageAliases {
        let mut table = LanguageAliases::builtin();
        table.extend(self.aliases.iter().map(|(alias, code)| (alias.as_str(), code.clone())));
        table
    }
}

/// Loads the configuration.
///
/// An explicit path must exist. Without one, `i18n-csv.toml` in the working
/// directory is used when present and defaults apply otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<FileConfig, String> {
    let path: PathBuf = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(format!("Config file does not exist: {}", path.display()));
            }
            path.to_path_buf()
        }
        None => {
            let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !candidate.is_file() {
                return Ok(FileConfig::default());
            }
            candidate
        }
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|e| format!("Cannot read config file {}: {}", path.display(), e))?;
    toml::from_str::<FileConfig>(&content)
        .map_err(|e| format!("Invalid config file {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let cfg: FileConfig = toml::from_str(
            r#"
            input = "translations.csv"
            output = "src/assets/i18n"
            backup = true
            languages = ["en", "mr"]
            watch_interval_ms = 250

            [aliases]
            klingon = "tlh"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.input.as_deref(), Some("translations.csv"));
        assert_eq!(cfg.backup, Some(true));
        assert_eq!(cfg.languages, Some(vec!["en".to_string(), "mr".to_string()]));
        assert_eq!(cfg.watch_interval_ms, Some(250));
        assert_eq!(cfg.alias_table().resolve("Klingon"), "tlh");
        assert_eq!(cfg.alias_table().resolve("english"), "en");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(toml::from_str::<FileConfig>("inptu = \"x.csv\"").is_err());
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = TempDir::new().unwrap();
        let err = load_config(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(err.contains("does not exist"));
    }

    #[test]
    fn test_explicit_path_is_parsed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "output = \"out\"\n").unwrap();
        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.output.as_deref(), Some("out"));
    }
}
