//! On-disk representations: the translation spreadsheet and the per-language
//! JSON documents.

pub mod csv;
pub mod json;

pub use csv::TranslationTable;
pub use json::{
    JsonDocument, WriteOutcome, backup_existing, create_backup_file, load_documents, read_json_dir,
    write_bundle,
};
