/// The essay pipeline: lexicon + rules → titled, length-padded sections.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

use crate::core::config::{ConfigError, GenerationConfig};
use crate::core::lexicon::{Lexicon, LexiconError};
use crate::core::rng::PickSource;
use crate::core::rules;
use crate::schema::category::Category;
use crate::schema::essay::{Essay, SectionTargets};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("lexicon error: {0}")]
    Lexicon(#[from] LexiconError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error(
        "section '{category}' reached {reached} of {target} characters after {iterations} samples"
    )]
    SectionDiverged {
        category: Category,
        target: i64,
        reached: usize,
        iterations: u32,
    },
}

/// The essay generator. Built via `EssayEngine::builder()`.
///
/// Generic over its randomness so tests can script every pick.
pub struct EssayEngine<S = StdRng> {
    lexicon: Lexicon,
    /// Why the lexicon file could not be used, when the engine fell back to
    /// an empty lexicon.
    load_error: Option<LexiconError>,
    config: GenerationConfig,
    source: S,
}

/// Builder for constructing an `EssayEngine`.
pub struct EssayEngineBuilder {
    lexicon_path: Option<PathBuf>,
    strict: bool,
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    /// Directly provided lexicon (for use without files).
    lexicon: Option<Lexicon>,
    /// Directly provided config; a config file takes precedence.
    config: Option<GenerationConfig>,
    max_iterations: Option<u32>,
}

impl EssayEngine {
    pub fn builder() -> EssayEngineBuilder {
        EssayEngineBuilder {
            lexicon_path: None,
            strict: false,
            config_path: None,
            seed: None,
            lexicon: None,
            config: None,
            max_iterations: None,
        }
    }
}

impl<S: PickSource> EssayEngine<S> {
    /// Assemble an engine from parts.
    pub fn from_parts(lexicon: Lexicon, config: GenerationConfig, source: S) -> Self {
        Self {
            lexicon,
            load_error: None,
            config,
            source,
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// The load failure recovered from while building, if any.
    pub fn load_error(&self) -> Option<&LexiconError> {
        self.load_error.as_ref()
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Sample one template from `category` and run it through every
    /// substitution rule.
    pub fn expand_once(&mut self, category: Category, theme: &str) -> String {
        let template = self.lexicon.sample(category, &mut self.source);
        rules::apply_all(template, theme, &self.lexicon, &mut self.source)
    }

    /// Sample and substitute templates from `category` until the result
    /// holds at least `min_chars` characters.
    ///
    /// The last template is kept whole, so the result may run past
    /// `min_chars`. Fails with `SectionDiverged` when the category has no
    /// templates or `max_iterations` samples were not enough.
    pub fn expand_section(
        &mut self,
        category: Category,
        theme: &str,
        min_chars: i64,
    ) -> Result<String, PipelineError> {
        let max_iterations = self.config.max_iterations;
        let mut section = String::new();
        let mut reached = 0usize;
        let mut iterations = 0u32;

        while (reached as i64) < min_chars {
            if iterations >= max_iterations || !self.lexicon.has_entries(category) {
                return Err(PipelineError::SectionDiverged {
                    category,
                    target: min_chars,
                    reached,
                    iterations,
                });
            }
            let expanded = self.expand_once(category, theme);
            reached += expanded.chars().count();
            section.push_str(&expanded);
            iterations += 1;
        }

        debug!(
            category = %category,
            target = min_chars,
            reached,
            iterations,
            "section expanded"
        );
        Ok(section)
    }

    /// Generate an essay on `theme` aiming for `essay_num` characters.
    pub fn generate(&mut self, theme: &str, essay_num: i64) -> Result<Essay, PipelineError> {
        let targets = SectionTargets::split(essay_num, &self.config.section_ratios);

        let title = self.expand_once(Category::Title, theme);
        let begin = self.expand_section(Category::Beginning, theme, targets.beginning)?;
        let body = self.expand_section(Category::Body, theme, targets.body)?;
        let end = self.expand_section(Category::Ending, theme, targets.ending)?;

        Ok(Essay {
            title,
            begin,
            body,
            end,
        })
    }

    /// Generate an essay and render it as text using the configured indent.
    pub fn generate_text(&mut self, theme: &str, essay_num: i64) -> Result<String, PipelineError> {
        let essay = self.generate(theme, essay_num)?;
        Ok(essay.render(&self.config.indent))
    }

    /// Generate using the theme and length from the engine's config.
    pub fn generate_configured(&mut self) -> Result<Essay, PipelineError> {
        let theme = self.config.theme.clone();
        let essay_num = self.config.essay_num;
        self.generate(&theme, essay_num)
    }
}

impl EssayEngineBuilder {
    /// Load the lexicon from a file. A missing or malformed file leaves the
    /// engine with an empty lexicon unless `strict` is set.
    pub fn lexicon_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.lexicon_path = Some(path.into());
        self
    }

    /// Fail `build` instead of falling back to an empty lexicon.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Provide a lexicon directly (for use without files).
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = Some(lexicon);
        self
    }

    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override the config's iteration cap.
    pub fn max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Build with a `StdRng` seeded from the configured seed, or from OS
    /// entropy when none was given.
    pub fn build(self) -> Result<EssayEngine, PipelineError> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.build_with_source(rng)
    }

    /// Build with a caller-supplied randomness source. Any seed set on the
    /// builder is ignored.
    pub fn build_with_source<S: PickSource>(
        self,
        source: S,
    ) -> Result<EssayEngine<S>, PipelineError> {
        let mut config = match self.config_path {
            Some(ref path) => GenerationConfig::load_from_ron(path)?,
            None => self.config.unwrap_or_default(),
        };
        if let Some(max_iterations) = self.max_iterations {
            config.max_iterations = max_iterations;
        }

        let (lexicon, load_error) = match (self.lexicon, self.lexicon_path) {
            (Some(lexicon), _) => (lexicon, None),
            (None, Some(path)) if self.strict => (Lexicon::load(&path)?, None),
            (None, Some(path)) => Lexicon::load_or_empty(&path),
            (None, None) => (Lexicon::default(), None),
        };

        let mut engine = EssayEngine::from_parts(lexicon, config, source);
        engine.load_error = load_error;
        Ok(engine)
    }
}
