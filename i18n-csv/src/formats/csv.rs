//! Support for the translation spreadsheet (CSV) format.
//!
//! The first record is the header row: `path`, `description` and one column per
//! language, in any order. Standard quoting applies, so fields may contain
//! commas, doubled quotes and line breaks. A leading byte-order mark is removed
//! (UTF-16 files with a BOM are transcoded to UTF-8).
use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::{debug, warn};

use crate::{
    error::Error,
    languages::LanguageAliases,
    traits::Parser,
    types::{DESCRIPTION_COLUMN, PATH_COLUMN, TranslationRow, is_reserved_column},
};

const BOM: char = '\u{feff}';

/// A parsed spreadsheet: its header row, data rows and language columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationTable {
    /// Header names as read (trimmed), in column order.
    pub headers: Vec<String>,
    pub rows: Vec<TranslationRow>,
    /// Every header other than `path`/`description`, in column order.
    pub languages: Vec<String>,
}

impl TranslationTable {
    /// Creates an empty table with the standard header for `languages`.
    pub fn new(languages: Vec<String>) -> Self {
        let mut headers = vec![PATH_COLUMN.to_string(), DESCRIPTION_COLUMN.to_string()];
        headers.extend(languages.iter().cloned());
        Self {
            headers,
            rows: Vec::new(),
            languages,
        }
    }

    pub fn add_row(&mut self, row: TranslationRow) {
        self.rows.push(row);
    }

    /// Renames language columns through `aliases`.
    ///
    /// Row values are re-keyed along with the headers so lookups by the
    /// canonical code keep working. When two columns resolve to the same code
    /// the one further right wins.
    pub fn normalize_languages(mut self, aliases: &LanguageAliases) -> Self {
        for header in &mut self.headers {
            if !is_reserved_column(header) {
                *header = aliases.resolve(header);
            }
        }

        let mut languages: Vec<String> = Vec::new();
        for lang in &self.languages {
            let code = aliases.resolve(lang);
            if !languages.contains(&code) {
                languages.push(code);
            }
        }

        for row in &mut self.rows {
            let mut values = HashMap::with_capacity(row.values.len());
            for original in &self.languages {
                if let Some(value) = row.values.remove(original) {
                    values.insert(aliases.resolve(original), value);
                }
            }
            row.values = values;
        }

        self.languages = languages;
        self
    }

    /// Restricts the table to the given languages, in the given order.
    ///
    /// Codes the table has no column for are kept; they read as empty cells,
    /// so the languages still get (empty) documents.
    pub fn retain_languages(&mut self, keep: &[String]) {
        let mut languages: Vec<String> = Vec::with_capacity(keep.len());
        for code in keep {
            if languages.contains(code) {
                continue;
            }
            if !self.declares(code) {
                warn!(language = %code, "requested language has no column in the spreadsheet");
            }
            languages.push(code.clone());
        }
        self.languages = languages;
    }

    /// Whether the header row has a column for `code`.
    pub fn declares(&self, code: &str) -> bool {
        !is_reserved_column(code) && self.headers.iter().any(|h| h == code)
    }

    /// Selected languages that have no column in the header row.
    pub fn undeclared_languages(&self) -> Vec<&str> {
        self.languages
            .iter()
            .map(String::as_str)
            .filter(|code| !self.declares(code))
            .collect()
    }
}

impl Parser for TranslationTable {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let h = if i == 0 { h.trim_start_matches(BOM) } else { h };
                h.trim().to_string()
            })
            .collect();

        let position = |name: &str| headers.iter().position(|h| h == name);
        let path_idx = position(PATH_COLUMN);
        let description_idx = position(DESCRIPTION_COLUMN);

        let mut languages: Vec<String> = Vec::new();
        let mut language_columns: Vec<(usize, String)> = Vec::new();
        for (i, header) in headers.iter().enumerate() {
            if is_reserved_column(header) {
                continue;
            }
            if !languages.contains(header) {
                languages.push(header.clone());
            }
            language_columns.push((i, header.clone()));
        }

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let cell = |idx: Option<usize>| {
                idx.and_then(|i| record.get(i))
                    .unwrap_or_default()
                    .to_string()
            };

            let mut row = TranslationRow::new(cell(path_idx), cell(description_idx));
            for (i, lang) in &language_columns {
                row.set_value(lang.clone(), cell(Some(*i)));
            }
            rows.push(row);
        }

        debug!(
            rows = rows.len(),
            languages = languages.len(),
            "parsed translation table"
        );
        Ok(TranslationTable {
            headers,
            rows,
            languages,
        })
    }

    fn to_writer<W: std::io::Write>(&self, writer: W) -> Result<(), Error> {
        let mut wtr = csv::WriterBuilder::new().from_writer(writer);

        let mut header = vec![PATH_COLUMN, DESCRIPTION_COLUMN];
        header.extend(self.languages.iter().map(String::as_str));
        wtr.write_record(&header)?;

        for row in &self.rows {
            let mut record = vec![row.path.as_str(), row.description.as_str()];
            record.extend(self.languages.iter().map(|lang| row.value(lang)));
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// Reads a file, auto-detecting a BOM and decoding to UTF-8.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::not_found(path));
        }
        let file = File::open(path)?;
        let decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);
        Self::from_reader(BufReader::new(decoder))
    }
}
