/// Placeholder rewrite rules and the fixed order they run in.
///
/// Each rule scans its input once, left to right, and replaces every
/// non-overlapping occurrence of its token. Text a rule inserts is never
/// rescanned by that rule, but later rules do see it.

use tracing::trace;

use crate::core::lexicon::Lexicon;
use crate::core::rng::PickSource;
use crate::schema::category::Category;

/// Separator between the verb+noun pairs produced for one `vn` token.
pub const PAIR_SEPARATOR: &str = "，";
/// Inclusive bounds on the number of pairs produced for one `vn` token.
pub const MIN_PAIRS: usize = 1;
pub const MAX_PAIRS: usize = 4;

/// What a matched token is replaced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replacement {
    /// One to four `verb`+`noun` concatenations joined by [`PAIR_SEPARATOR`].
    VerbNounPairs,
    /// A single sample from the category.
    Sample(Category),
    /// The caller's theme, verbatim.
    Theme,
}

/// A token and its replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub token: &'static str,
    pub replacement: Replacement,
}

/// The substitution pipeline.
///
/// Compound tokens run before the single letters they contain (`vn` before
/// `v` and `n`, `sp` before `p`). The theme goes last so its text is never
/// rewritten.
pub const PIPELINE: [Rule; 7] = [
    Rule {
        token: "vn",
        replacement: Replacement::VerbNounPairs,
    },
    Rule {
        token: "v",
        replacement: Replacement::Sample(Category::Verb),
    },
    Rule {
        token: "n",
        replacement: Replacement::Sample(Category::Noun),
    },
    Rule {
        token: "ss",
        replacement: Replacement::Sample(Category::Sentence),
    },
    Rule {
        token: "sp",
        replacement: Replacement::Sample(Category::ParallelSentence),
    },
    Rule {
        token: "p",
        replacement: Replacement::Sample(Category::Phrase),
    },
    Rule {
        token: "xx",
        replacement: Replacement::Theme,
    },
];

impl Rule {
    /// Rewrite every occurrence of this rule's token in `text`.
    pub fn apply<S: PickSource + ?Sized>(
        &self,
        text: &str,
        theme: &str,
        lexicon: &Lexicon,
        source: &mut S,
    ) -> String {
        match self.replacement {
            Replacement::Theme => text.replace(self.token, theme),
            Replacement::Sample(category) => replace_each(text, self.token, || {
                lexicon.sample(category, source).to_string()
            }),
            Replacement::VerbNounPairs => {
                replace_each(text, self.token, || verb_noun_pairs(lexicon, source))
            }
        }
    }
}

/// Run the whole pipeline over one template.
pub fn apply_all<S: PickSource + ?Sized>(
    template: &str,
    theme: &str,
    lexicon: &Lexicon,
    source: &mut S,
) -> String {
    let mut text = template.to_string();
    for rule in &PIPELINE {
        text = rule.apply(&text, theme, lexicon, source);
        trace!(token = rule.token, text = %text, "rule applied");
    }
    text
}

pub fn apply_theme(text: &str, theme: &str) -> String {
    text.replace("xx", theme)
}

pub fn apply_verb_noun_pairs<S: PickSource + ?Sized>(
    text: &str,
    lexicon: &Lexicon,
    source: &mut S,
) -> String {
    PIPELINE[0].apply(text, "", lexicon, source)
}

pub fn apply_verb<S: PickSource + ?Sized>(text: &str, lexicon: &Lexicon, source: &mut S) -> String {
    PIPELINE[1].apply(text, "", lexicon, source)
}

pub fn apply_noun<S: PickSource + ?Sized>(text: &str, lexicon: &Lexicon, source: &mut S) -> String {
    PIPELINE[2].apply(text, "", lexicon, source)
}

pub fn apply_sentence<S: PickSource + ?Sized>(
    text: &str,
    lexicon: &Lexicon,
    source: &mut S,
) -> String {
    PIPELINE[3].apply(text, "", lexicon, source)
}

pub fn apply_parallel_sentence<S: PickSource + ?Sized>(
    text: &str,
    lexicon: &Lexicon,
    source: &mut S,
) -> String {
    PIPELINE[4].apply(text, "", lexicon, source)
}

pub fn apply_phrase<S: PickSource + ?Sized>(
    text: &str,
    lexicon: &Lexicon,
    source: &mut S,
) -> String {
    PIPELINE[5].apply(text, "", lexicon, source)
}

/// Draw the pair count first, then a verb and a noun for each pair.
fn verb_noun_pairs<S: PickSource + ?Sized>(lexicon: &Lexicon, source: &mut S) -> String {
    let count = MIN_PAIRS + source.pick(MAX_PAIRS - MIN_PAIRS + 1);
    let mut pairs = Vec::with_capacity(count);
    for _ in 0..count {
        let verb = lexicon.sample(Category::Verb, source);
        let noun = lexicon.sample(Category::Noun, source);
        pairs.push(format!("{verb}{noun}"));
    }
    pairs.join(PAIR_SEPARATOR)
}

/// Replace each match of `token` with a freshly produced string.
fn replace_each<F>(text: &str, token: &str, mut produce: F) -> String
where
    F: FnMut() -> String,
{
    let mut result = String::with_capacity(text.len());
    let mut last = 0;
    for (start, matched) in text.match_indices(token) {
        result.push_str(&text[last..start]);
        result.push_str(&produce());
        last = start + matched.len();
    }
    result.push_str(&text[last..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::SequencePicks;

    fn lexicon() -> Lexicon {
        Lexicon::default()
            .with(Category::Verb, ["推进", "落实"])
            .with(Category::Noun, ["改革", "民生"])
            .with(Category::Sentence, ["民为邦本。"])
            .with(Category::ParallelSentence, ["既要谋当下，也要谋长远。"])
            .with(Category::Phrase, ["总而言之"])
    }

    #[test]
    fn replace_each_is_non_overlapping() {
        let mut n = 0;
        let out = replace_each("sss", "ss", || {
            n += 1;
            format!("[{n}]")
        });
        assert_eq!(out, "[1]s");
    }

    #[test]
    fn replace_each_without_match_is_identity() {
        assert_eq!(replace_each("无占位符", "vn", || unreachable!()), "无占位符");
    }

    #[test]
    fn theme_replaces_every_occurrence() {
        assert_eq!(apply_theme("xx与xx", "住房"), "住房与住房");
        assert_eq!(apply_theme("xxx", "A"), "Ax");
    }

    #[test]
    fn verb_noun_pairs_scripted() {
        // count pick 1 -> two pairs; then verb 0, noun 1, verb 1, noun 0
        let mut picks = SequencePicks::new(vec![1, 0, 1, 1, 0]);
        let out = apply_verb_noun_pairs("要vn。", &lexicon(), &mut picks);
        assert_eq!(out, "要推进民生，落实改革。");
    }

    #[test]
    fn each_vn_draws_its_own_count() {
        // first vn: count 1 (pick 0), second vn: count 3 (pick 2)
        let mut picks = SequencePicks::new(vec![0, 0, 0, 2, 0, 0, 0, 0, 0, 0]);
        let out = apply_verb_noun_pairs("vn|vn", &lexicon(), &mut picks);
        let parts: Vec<&str> = out.split('|').collect();
        assert_eq!(parts[0], "推进改革");
        assert_eq!(parts[1], "推进改革，推进改革，推进改革");
    }

    #[test]
    fn verb_noun_pair_count_bounds() {
        let lex = lexicon();
        for script in 0..8 {
            let mut picks = SequencePicks::new(vec![script, 0]);
            let out = apply_verb_noun_pairs("vn", &lex, &mut picks);
            let pairs = out.split(PAIR_SEPARATOR).count();
            assert!((MIN_PAIRS..=MAX_PAIRS).contains(&pairs), "{pairs} pairs");
            assert!(!out.contains("vn"));
        }
    }

    #[test]
    fn single_letter_rules() {
        let lex = lexicon();
        let mut picks = SequencePicks::new(vec![1]);
        assert_eq!(apply_verb("v和v", &lex, &mut picks), "落实和落实");
        assert_eq!(apply_noun("n", &lex, &mut picks), "民生");
        assert_eq!(apply_sentence("ss", &lex, &mut picks), "民为邦本。");
        assert_eq!(
            apply_parallel_sentence("sp", &lex, &mut picks),
            "既要谋当下，也要谋长远。"
        );
        assert_eq!(apply_phrase("p，", &lex, &mut picks), "总而言之，");
    }

    #[test]
    fn missing_category_removes_token() {
        let lex = Lexicon::default();
        let mut picks = SequencePicks::new(vec![0]);
        assert_eq!(apply_all("我们要v好n", "主题", &lex, &mut picks), "我们要好");
    }

    #[test]
    fn compound_tokens_resolved_before_letters() {
        let lex = lexicon();
        let mut picks = SequencePicks::new(vec![0]);
        let out = apply_all("vnp", "主题", &lex, &mut picks);
        assert_eq!(out, "推进改革总而言之");
        assert!(!out.contains(['v', 'n', 'p']));
    }

    #[test]
    fn sp_is_not_split_by_phrase_rule() {
        let lex = lexicon();
        let mut picks = SequencePicks::new(vec![0]);
        let out = apply_all("sp", "主题", &lex, &mut picks);
        assert_eq!(out, "既要谋当下，也要谋长远。");
    }

    #[test]
    fn theme_is_not_rewritten() {
        let lex = lexicon();
        let mut picks = SequencePicks::new(vec![0]);
        let out = apply_all("关于xx", "ss vn p", &lex, &mut picks);
        assert_eq!(out, "关于ss vn p");
    }

    #[test]
    fn later_rules_see_earlier_replacements() {
        // A verb sample carrying an `n` is picked up by the noun rule.
        let lex = Lexicon::default()
            .with(Category::Verb, ["run"])
            .with(Category::Noun, ["名"]);
        let mut picks = SequencePicks::new(vec![0]);
        assert_eq!(apply_all("v", "", &lex, &mut picks), "ru名");
    }

    #[test]
    fn pipeline_order_is_fixed() {
        let tokens: Vec<&str> = PIPELINE.iter().map(|r| r.token).collect();
        assert_eq!(tokens, ["vn", "v", "n", "ss", "sp", "p", "xx"]);
    }
}
