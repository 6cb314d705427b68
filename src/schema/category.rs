use serde::{Deserialize, Serialize};
use std::fmt;

/// The word-list categories a lexicon can carry.
///
/// The four section categories (`Title`, `Beginning`, `Body`, `Ending`) hold
/// whole template sentences; the rest hold fragments spliced into those
/// templates by the substitution rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Title,
    Beginning,
    Body,
    Ending,
    Verb,
    Noun,
    Sentence,
    ParallelSentence,
    Phrase,
}

impl Category {
    /// Every recognized category, section categories first.
    pub const ALL: [Category; 9] = [
        Category::Title,
        Category::Beginning,
        Category::Body,
        Category::Ending,
        Category::Verb,
        Category::Noun,
        Category::Sentence,
        Category::ParallelSentence,
        Category::Phrase,
    ];

    /// Returns the key used for this category in a lexicon file.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Beginning => "beginning",
            Self::Body => "body",
            Self::Ending => "ending",
            Self::Verb => "verb",
            Self::Noun => "noun",
            Self::Sentence => "sentence",
            Self::ParallelSentence => "parallel_sentence",
            Self::Phrase => "phrase",
        }
    }

    /// Looks up a category by its lexicon key.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }

    /// Whether this category supplies whole templates for an essay section.
    pub fn is_section(&self) -> bool {
        matches!(
            self,
            Self::Title | Self::Beginning | Self::Body | Self::Ending
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
