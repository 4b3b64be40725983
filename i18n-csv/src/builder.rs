//! Folding translation rows into one nested document per language.
//!
//! # Example
//!
//! ```rust
//! use i18n_csv::{TranslationRow, builder::TreeBuilder};
//!
//! let rows = vec![TranslationRow::new("common.loading", "Spinner").with_value("en", "Loading...")];
//! let languages = vec!["en".to_string(), "mr".to_string()];
//! let bundle = TreeBuilder::new(languages).build(&rows)?;
//!
//! assert_eq!(
//!     bundle.get("en").unwrap().to_value(),
//!     serde_json::json!({"common": {"loading": "Loading..."}})
//! );
//! assert!(bundle.get("mr").unwrap().root.is_empty());
//! # Ok::<(), i18n_csv::Error>(())
//! ```

use tracing::{debug, warn};

use crate::{
    document::{LanguageDocument, Node},
    error::Error,
    path::{self, MAX_DEPTH},
    types::TranslationRow,
};

/// A write that replaced existing structure in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub language: String,

    /// Path of the row whose value caused the overwrite.
    pub path: String,

    /// Path of the node that was overwritten.
    pub replaced: String,

    pub kind: CollisionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// A longer path had to descend through a string value.
    LeafReplacedByBranch,
    /// A shorter path wrote a string where nested keys already existed.
    BranchReplacedByLeaf,
}

impl std::fmt::Display for Collision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            CollisionKind::LeafReplacedByBranch => write!(
                f,
                "{}: value at `{}` replaced by nested keys of `{}`",
                self.language, self.replaced, self.path
            ),
            CollisionKind::BranchReplacedByLeaf => write!(
                f,
                "{}: nested keys under `{}` replaced by a value",
                self.language, self.replaced
            ),
        }
    }
}

/// The documents produced by one build, in requested language order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bundle {
    pub documents: Vec<LanguageDocument>,
    pub collisions: Vec<Collision>,
}

impl Bundle {
    /// Finds the document for a language code, if present.
    pub fn get(&self, language: &str) -> Option<&LanguageDocument> {
        self.documents.iter().find(|doc| doc.language == language)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|doc| doc.language.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LanguageDocument> {
        self.documents.iter()
    }
}

/// Builds language documents from rows.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    languages: Vec<String>,
    keep_empty: bool,
}

impl TreeBuilder {
    /// Creates a builder for the given languages. Duplicate codes are ignored.
    pub fn new(languages: Vec<String>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(languages.len());
        for lang in languages {
            if !unique.contains(&lang) {
                unique.push(lang);
            }
        }
        Self {
            languages: unique,
            keep_empty: false,
        }
    }

    /// Store blank translations verbatim instead of omitting the key.
    pub fn with_keep_empty(mut self, keep_empty: bool) -> Self {
        self.keep_empty = keep_empty;
        self
    }

    /// Folds `rows` into one document per language.
    ///
    /// Every requested language gets a document, even when no row carries a
    /// value for it. Fails only when a path is nested deeper than
    /// [`MAX_DEPTH`].
    pub fn build(&self, rows: &[TranslationRow]) -> Result<Bundle, Error> {
        let mut bundle = Bundle {
            documents: self
                .languages
                .iter()
                .map(|lang| LanguageDocument::new(lang.clone()))
                .collect(),
            collisions: Vec::new(),
        };

        for row in rows {
            if path::depth(&row.path) > MAX_DEPTH {
                return Err(Error::DepthLimit {
                    path: row.path.clone(),
                    limit: MAX_DEPTH,
                });
            }
            let segments = path::split(&row.path);

            for document in &mut bundle.documents {
                let value = row.value(&document.language);
                if !self.keep_empty && value.trim().is_empty() {
                    continue;
                }
                insert_value(document, &segments, &row.path, value, &mut bundle.collisions);
            }
        }

        debug!(
            rows = rows.len(),
            languages = bundle.documents.len(),
            collisions = bundle.collisions.len(),
            "built language documents"
        );
        Ok(bundle)
    }
}

/// Builds documents with the default trim-and-skip rule.
pub fn build_documents(rows: &[TranslationRow], languages: &[String]) -> Result<Bundle, Error> {
    TreeBuilder::new(languages.to_vec()).build(rows)
}

fn insert_value(
    document: &mut LanguageDocument,
    segments: &[&str],
    row_path: &str,
    value: &str,
    collisions: &mut Vec<Collision>,
) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut current = &mut document.root;
    for (depth, segment) in parents.iter().enumerate() {
        let (next, replaced_leaf) = current.descend(segment);
        if replaced_leaf {
            let collision = Collision {
                language: document.language.clone(),
                path: row_path.to_string(),
                replaced: path::join(&segments[..=depth]),
                kind: CollisionKind::LeafReplacedByBranch,
            };
            warn!(%collision, "path collision");
            collisions.push(collision);
        }
        current = next;
    }

    if let Some(Node::Branch(_)) = current.insert(*last, Node::Leaf(value.to_string())) {
        let collision = Collision {
            language: document.language.clone(),
            path: row_path.to_string(),
            replaced: row_path.to_string(),
            kind: CollisionKind::BranchReplacedByLeaf,
        };
        warn!(%collision, "path collision");
        collisions.push(collision);
    }
}
