#![forbid(unsafe_code)]
//! Translation spreadsheets to nested JSON bundles, and back.
//!
//! A spreadsheet (CSV) holds one row per translatable unit: a dot-notation key
//! path, a description for translators, and one column per language. This
//! crate turns it into one nested `<lang>.json` document per language,
//! validates the rows, cross-checks existing documents against the
//! spreadsheet, and rebuilds a spreadsheet from documents.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use i18n_csv::{Generator, GeneratorConfig};
//!
//! let config = GeneratorConfig::new("translations.csv")
//!     .with_output_dir("src/assets/i18n")
//!     .with_backup(true);
//! let report = Generator::new(config).generate()?;
//! for outcome in &report.outcomes {
//!     println!("{} -> {}", outcome.language, outcome.path.display());
//! }
//! # Ok::<(), i18n_csv::Error>(())
//! ```
//!
//! # Building blocks
//!
//! - [`path`]: the key path grammar (`section.subsection.key`)
//! - [`builder`]: rows → one [`LanguageDocument`] per language
//! - [`flatten`]: JSON document → `(path, value)` pairs
//! - [`validator`]: structural checks over spreadsheet rows
//! - [`consistency`]: documents checked against the spreadsheet's keys
//!
//! Problems found in the data are reported as [`Diagnostic`] values; only
//! failing to read or write a file is an [`Error`].

pub mod builder;
pub mod consistency;
pub mod document;
pub mod error;
pub mod export;
pub mod flatten;
pub mod formats;
pub mod generator;
pub mod languages;
pub mod options;
pub mod path;
pub mod traits;
pub mod types;
pub mod validator;

// Re-export most used types for easy consumption
pub use crate::{
    builder::{Bundle, Collision, CollisionKind, TreeBuilder, build_documents},
    consistency::validate_against_source,
    document::{Branch, LanguageDocument, Node},
    error::Error,
    flatten::{flatten, flatten_paths},
    formats::{JsonDocument, TranslationTable, WriteOutcome},
    generator::{
        GenerateReport, Generator, TableSummary, ValidationReport, create_sample_csv,
        export_to_csv, from_json,
    },
    languages::LanguageAliases,
    options::GeneratorConfig,
    traits::Parser,
    types::{Diagnostic, Severity, TranslationRow, ValidationResult, ValidationStats},
    validator::{find_duplicates, validate_headers, validate_rows},
};
