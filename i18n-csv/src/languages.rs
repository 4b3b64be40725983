//! Language column naming.
//!
//! Spreadsheet headers are used as language codes verbatim unless alias
//! normalization is switched on, in which case well-known names such as
//! `english` or `eng` are mapped to their ISO 639-1 code (`en`).

use std::collections::HashMap;

/// Built-in alias → code pairs.
const DEFAULT_ALIASES: &[(&str, &[&str])] = &[
    ("en", &["eng", "english"]),
    ("es", &["esp", "spanish"]),
    ("fr", &["fra", "french"]),
    ("de", &["deu", "german"]),
    ("it", &["ita", "italian"]),
    ("pt", &["por", "portuguese"]),
    ("ru", &["rus", "russian"]),
    ("ja", &["jpn", "japanese"]),
    ("ko", &["kor", "korean"]),
    ("zh", &["zho", "chinese"]),
    ("ar", &["ara", "arabic"]),
    ("hi", &["hin", "hindi"]),
    ("mr", &["mar", "marathi"]),
    ("bn", &["ben", "bengali"]),
    ("ta", &["tam", "tamil"]),
    ("te", &["tel", "telugu"]),
    ("kn", &["kan", "kannada"]),
    ("ml", &["mal", "malayalam"]),
    ("gu", &["guj", "gujarati"]),
    ("pa", &["pan", "punjabi"]),
    ("ur", &["urd", "urdu"]),
];

/// Case-insensitive alias → canonical code table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LanguageAliases {
    aliases: HashMap<String, String>,
}

impl LanguageAliases {
    /// An empty table: every name maps to itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table pre-filled with common English names and ISO 639-2 codes.
    ///
    /// Each code is also its own alias, so `EN` resolves to `en`.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (code, aliases) in DEFAULT_ALIASES {
            table.insert(*code, *code);
            for alias in *aliases {
                table.insert(*alias, *code);
            }
        }
        table
    }

    /// Registers `alias` (matched case-insensitively) for `code`.
    pub fn insert(&mut self, alias: impl AsRef<str>, code: impl Into<String>) {
        self.aliases
            .insert(alias.as_ref().to_lowercase(), code.into());
    }

    /// Adds every `(alias, code)` pair, overriding existing aliases.
    pub fn extend<I, A, C>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (A, C)>,
        A: AsRef<str>,
        C: Into<String>,
    {
        for (alias, code) in pairs {
            self.insert(alias, code);
        }
    }

    /// Canonical code for `name`, or `name` unchanged when it is not an alias.
    pub fn resolve(&self, name: &str) -> String {
        self.aliases
            .get(&name.to_lowercase())
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
