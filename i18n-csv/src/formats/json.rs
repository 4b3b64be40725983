//! Support for per-language JSON documents (`<lang>.json`).
//!
//! Documents are written pretty-printed with two-space indentation. Reading
//! accepts any JSON object; non-string leaves are allowed and are stringified
//! when flattened.
use std::{
    collections::HashMap,
    fs::{self, File, OpenOptions},
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    builder::Bundle, consistency::LoadedDocument, document::LanguageDocument, error::Error,
    traits::Parser,
};

/// One language document on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonDocument {
    /// Always a JSON object.
    pub value: Value,
}

impl JsonDocument {
    pub fn new(value: Value) -> Result<Self, Error> {
        if !value.is_object() {
            return Err(Error::DataMismatch(
                "top-level JSON value must be an object".to_string(),
            ));
        }
        Ok(Self { value })
    }
}

impl From<&LanguageDocument> for JsonDocument {
    fn from(document: &LanguageDocument) -> Self {
        Self {
            value: document.to_value(),
        }
    }
}

impl Parser for JsonDocument {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::new(value)
    }

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(writer, &self.value)?;
        Ok(())
    }

    /// Reads a document, naming the file in any parse failure.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::not_found(path));
        }
        let content = fs::read_to_string(path)?;
        Self::from_str(&content).map_err(|err| match err {
            Error::Parse(e) => Error::invalid_document(path, e.to_string()),
            Error::DataMismatch(message) => Error::invalid_document(path, message),
            other => other,
        })
    }
}

/// Result of writing one language document.
#[derive(Debug)]
pub struct WriteOutcome {
    pub language: String,
    pub path: PathBuf,
    /// Where the previous file was copied, when a backup was taken.
    pub backup: Option<PathBuf>,
    pub result: Result<(), Error>,
}

impl WriteOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Creates a fresh backup file `<file>.backup.<millis>` and returns it open
/// for writing.
///
/// The name is claimed with `create_new`, so concurrent backups never share a
/// file. When the name is taken a `-<n>` counter is appended.
pub fn create_backup_file(path: &Path) -> Result<(PathBuf, File), Error> {
    let millis = Utc::now().timestamp_millis();
    let base = format!("{}.backup.{}", path.display(), millis);
    let mut candidate = PathBuf::from(&base);
    let mut counter = 1;
    loop {
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(file) => return Ok((candidate, file)),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                candidate = PathBuf::from(format!("{}-{}", base, counter));
                counter += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Copies `path` to a fresh backup file, if it exists.
pub fn backup_existing(path: &Path) -> Result<Option<PathBuf>, Error> {
    if !path.exists() {
        return Ok(None);
    }
    let mut source = File::open(path)?;
    let (target, mut file) = create_backup_file(path)?;
    io::copy(&mut source, &mut file)?;
    file.flush()?;
    debug!(from = %path.display(), to = %target.display(), "backed up document");
    Ok(Some(target))
}

/// Writes every document of `bundle` into `output_dir` as `<lang>.json`.
///
/// The directory is created if needed. Each language is written on its own:
/// a failure for one language is recorded in its outcome and does not stop
/// the others.
pub fn write_bundle(
    bundle: &Bundle,
    output_dir: &Path,
    backup: bool,
) -> Result<Vec<WriteOutcome>, Error> {
    fs::create_dir_all(output_dir)?;

    let outcomes = bundle
        .iter()
        .map(|document| {
            let path = output_dir.join(document.file_name());
            let mut outcome = WriteOutcome {
                language: document.language.clone(),
                path: path.clone(),
                backup: None,
                result: Ok(()),
            };

            if backup {
                match backup_existing(&path) {
                    Ok(saved) => outcome.backup = saved,
                    Err(err) => {
                        warn!(language = %document.language, error = %err, "backup failed");
                        outcome.result = Err(err);
                        return outcome;
                    }
                }
            }

            outcome.result = JsonDocument::from(document).write_to(&path);
            match &outcome.result {
                Ok(()) => info!(language = %document.language, path = %path.display(), "wrote document"),
                Err(err) => warn!(language = %document.language, error = %err, "write failed"),
            }
            outcome
        })
        .collect();

    Ok(outcomes)
}

/// Loads `<lang>.json` from `dir` for every language.
///
/// Failures are kept per language so callers can report them and carry on.
pub fn load_documents(dir: &Path, languages: &[String]) -> HashMap<String, LoadedDocument> {
    languages
        .iter()
        .map(|lang| {
            let path = dir.join(format!("{}.json", lang));
            let loaded = JsonDocument::read_from(&path).map(|doc| doc.value);
            (lang.clone(), loaded)
        })
        .collect()
}

/// Reads every `*.json` file in `dir`, sorted by file name.
///
/// Returns `(language, document)` pairs where the language is the file stem.
/// Any unreadable document fails the whole call.
pub fn read_json_dir(dir: &Path) -> Result<Vec<(String, Value)>, Error> {
    if !dir.is_dir() {
        return Err(Error::not_found(dir));
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    files
        .into_iter()
        .map(|path| {
            let language = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            let document = JsonDocument::read_from(&path)?;
            Ok((language, document.value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builder::build_documents, types::TranslationRow};
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_pretty_print_two_spaces() {
        let doc = JsonDocument::new(json!({"a": {"b": "X"}})).unwrap();
        let mut out = Vec::new();
        doc.to_writer(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\n  \"a\": {\n    \"b\": \"X\"\n  }\n}"
        );
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = JsonDocument::from_str("[1, 2]").unwrap_err();
        assert!(matches!(err, Error::DataMismatch(_)));
    }

    #[test]
    fn test_read_from_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("en.json");
        fs::write(&path, "{ broken").unwrap();

        let err = JsonDocument::read_from(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidDocument { .. }));
        assert!(err.to_string().contains("en.json"));

        let missing = JsonDocument::read_from(dir.path().join("mr.json")).unwrap_err();
        assert!(matches!(missing, Error::NotFound { .. }));
    }

    #[test]
    fn test_backup_names_do_not_collide() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("en.json");
        fs::write(&path, "{}").unwrap();

        let first = backup_existing(&path).unwrap().unwrap();
        let second = backup_existing(&path).unwrap().unwrap();
        assert_ne!(first, second);
        assert!(first.exists());
        assert!(second.exists());
        assert!(
            first
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("en.json.backup.")
        );
    }

    #[test]
    fn test_concurrent_backups_claim_distinct_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("en.json");
        fs::write(&path, "{\"k\": \"v\"}").unwrap();

        let mut targets: Vec<PathBuf> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| backup_existing(&path).unwrap().unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for target in &targets {
            assert_eq!(fs::read_to_string(target).unwrap(), "{\"k\": \"v\"}");
        }
        targets.sort();
        targets.dedup();
        assert_eq!(targets.len(), 8);
    }

    #[test]
    fn test_backup_skipped_when_file_absent() {
        let dir = TempDir::new().unwrap();
        assert!(backup_existing(&dir.path().join("en.json")).unwrap().is_none());
    }

    #[test]
    fn test_write_bundle_and_load_back() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("i18n");
        let rows = vec![TranslationRow::new("a.b", "d").with_value("en", "X")];
        let languages = vec!["en".to_string(), "mr".to_string()];
        let bundle = build_documents(&rows, &languages).unwrap();

        let outcomes = write_bundle(&bundle, &out, false).unwrap();
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(WriteOutcome::is_ok));

        let loaded = load_documents(&out, &languages);
        assert_eq!(loaded["en"].as_ref().unwrap(), &json!({"a": {"b": "X"}}));
        assert_eq!(loaded["mr"].as_ref().unwrap(), &json!({}));
    }

    #[test]
    fn test_write_bundle_with_backup() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("en.json"), "{\"old\": \"value\"}").unwrap();
        let bundle = build_documents(&[], &["en".to_string()]).unwrap();

        let outcomes = write_bundle(&bundle, dir.path(), true).unwrap();
        let backup = outcomes[0].backup.as_ref().expect("backup taken");
        assert_eq!(fs::read_to_string(backup).unwrap(), "{\"old\": \"value\"}");
        assert_eq!(fs::read_to_string(dir.path().join("en.json")).unwrap(), "{}");
    }

    #[test]
    fn test_read_json_dir_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("mr.json"), "{\"a\": \"अ\"}").unwrap();
        fs::write(dir.path().join("en.json"), "{\"a\": \"A\"}").unwrap();
        fs::write(dir.path().join("en.json.backup.1"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let docs = read_json_dir(dir.path()).unwrap();
        let languages: Vec<&str> = docs.iter().map(|(lang, _)| lang.as_str()).collect();
        assert_eq!(languages, vec!["en", "mr"]);
    }
}
