use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::config::SectionRatios;

/// Indentation placed before the beginning, body and ending lines.
pub const DEFAULT_INDENT: &str = "    ";

/// A generated essay. Each field is produced independently and is never
/// substituted again once assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Essay {
    pub title: String,
    pub begin: String,
    pub body: String,
    pub end: String,
}

impl Essay {
    /// Render the essay as four lines: the title, then the beginning, body
    /// and ending each prefixed with `indent`.
    pub fn render(&self, indent: &str) -> String {
        format!(
            "{}\n{indent}{}\n{indent}{}\n{indent}{}",
            self.title, self.begin, self.body, self.end
        )
    }
}

impl fmt::Display for Essay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_INDENT))
    }
}

/// Minimum character counts for the three padded sections.
///
/// Values may be zero or negative when the requested essay length is; a
/// non-positive target means the section loop never runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionTargets {
    pub beginning: i64,
    pub body: i64,
    pub ending: i64,
}

impl SectionTargets {
    /// Split `essay_num` by `ratios`, truncating each product.
    pub fn split(essay_num: i64, ratios: &SectionRatios) -> Self {
        let part = |ratio: f64| (essay_num as f64 * ratio).trunc() as i64;
        Self {
            beginning: part(ratios.beginning),
            body: part(ratios.body),
            ending: part(ratios.ending),
        }
    }
}
