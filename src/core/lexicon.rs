/// Categorized word lists — loading and uniform sampling.

use rustc_hash::FxHashMap;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::rng::PickSource;
use crate::schema::category::Category;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("unsupported lexicon format '{0}' (expected .json or .ron)")]
    UnsupportedFormat(String),
}

impl LexiconError {
    /// Whether the file itself could not be found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    /// Whether the file was read but its contents could not be parsed.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Json(_) | Self::Ron(_))
    }
}

/// A mapping from category to its candidate strings.
///
/// An absent category and an empty list behave the same: sampling yields
/// the empty string.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: FxHashMap<Category, Vec<String>>,
    unknown_keys: Vec<String>,
}

impl Lexicon {
    /// Load a lexicon from a `.json` or `.ron` file.
    pub fn load(path: &Path) -> Result<Lexicon, LexiconError> {
        let format = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("json")
            .to_ascii_lowercase();
        if format != "json" && format != "ron" {
            return Err(LexiconError::UnsupportedFormat(format));
        }

        let contents = std::fs::read_to_string(path)?;
        let lexicon = if format == "ron" {
            Self::parse_ron(&contents)?
        } else {
            Self::parse_json(&contents)?
        };
        debug!(
            path = %path.display(),
            categories = lexicon.entries.len(),
            "lexicon loaded"
        );
        Ok(lexicon)
    }

    /// Load a lexicon, falling back to an empty one when the file is
    /// missing or malformed. The failure is logged and handed back next to
    /// the fallback so the caller can report it.
    pub fn load_or_empty(path: &Path) -> (Lexicon, Option<LexiconError>) {
        match Self::load(path) {
            Ok(lexicon) => (lexicon, None),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "lexicon unavailable, continuing with empty lexicon");
                (Lexicon::default(), Some(e))
            }
        }
    }

    /// Parse a lexicon from a JSON object of string lists.
    pub fn parse_json(input: &str) -> Result<Lexicon, LexiconError> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(input)?;
        Ok(Self::from_raw(raw))
    }

    /// Parse a lexicon from a RON map of string lists.
    pub fn parse_ron(input: &str) -> Result<Lexicon, LexiconError> {
        let raw: HashMap<String, Vec<String>> = ron::from_str(input)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: HashMap<String, Vec<String>>) -> Lexicon {
        let mut lexicon = Lexicon::default();
        for (key, values) in raw {
            match Category::from_name(&key) {
                Some(category) => {
                    lexicon.entries.insert(category, values);
                }
                None => {
                    debug!(key = %key, "ignoring unrecognized lexicon key");
                    lexicon.unknown_keys.push(key);
                }
            }
        }
        lexicon.unknown_keys.sort();
        lexicon
    }

    /// Replace the entries for `category`.
    pub fn insert<I, S>(&mut self, category: Category, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .insert(category, values.into_iter().map(Into::into).collect());
    }

    /// Builder-style variant of [`Lexicon::insert`].
    pub fn with<I, S>(mut self, category: Category, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(category, values);
        self
    }

    /// Pick one entry of `category` uniformly, or `""` if there is none.
    pub fn sample<S: PickSource + ?Sized>(&self, category: Category, source: &mut S) -> &str {
        match self.entries.get(&category) {
            Some(values) if !values.is_empty() => values[source.pick(values.len())].as_str(),
            _ => "",
        }
    }

    /// The entries for `category`, empty if absent.
    pub fn entries(&self, category: Category) -> &[String] {
        self.entries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, category: Category) -> bool {
        self.entries.contains_key(&category)
    }

    /// Whether `category` has at least one entry to sample.
    pub fn has_entries(&self, category: Category) -> bool {
        !self.entries(category).is_empty()
    }

    /// True when no recognized category is present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys from the source file that did not name a known category, sorted.
    pub fn unknown_keys(&self) -> &[String] {
        &self.unknown_keys
    }
}
