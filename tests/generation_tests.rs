/// Essay generation integration tests — end-to-end lexicon-to-text runs.

use shenlun_engine::core::config::GenerationConfig;
use shenlun_engine::core::lexicon::Lexicon;
use shenlun_engine::core::pipeline::{EssayEngine, PipelineError};
use shenlun_engine::core::rng::SequencePicks;
use shenlun_engine::schema::category::Category;
use std::path::Path;

fn fixture_engine(seed: u64) -> EssayEngine {
    EssayEngine::builder()
        .lexicon_path("tests/fixtures/lexicon.json")
        .strict(true)
        .seed(seed)
        .build()
        .unwrap()
}

#[test]
fn generate_meets_section_targets() {
    for seed in 0..20 {
        let mut engine = fixture_engine(seed);
        let essay = engine.generate("测试主题", 100).unwrap();
        assert!(!essay.title.is_empty());
        assert!(essay.begin.chars().count() >= 15);
        assert!(essay.body.chars().count() >= 70);
        assert!(essay.end.chars().count() >= 15);
    }
}

#[test]
fn generated_text_has_no_residual_tokens() {
    let mut engine = fixture_engine(3);
    let text = engine.generate_text("住房保障", 800).unwrap();
    // Fixture fragments are free of ASCII letters, so any left over would be
    // an unconsumed placeholder.
    assert!(
        !text.chars().any(|c| c.is_ascii_alphabetic()),
        "residual token in: {}",
        text
    );
    assert!(text.contains("住房保障"));
}

#[test]
fn generate_text_layout() {
    let mut engine = fixture_engine(11);
    let text = engine.generate_text("乡村振兴", 300).unwrap();
    let lines: Vec<&str> = text.split('\n').collect();
    assert_eq!(lines.len(), 4);
    assert!(!lines[0].starts_with(' '));
    for line in &lines[1..] {
        assert!(line.starts_with("    "));
        assert!(!line[4..].starts_with(' '));
    }
}

#[test]
fn theme_with_token_letters_is_verbatim() {
    let mut engine = fixture_engine(5);
    let essay = engine.generate("ss and vn xx", 200).unwrap();
    assert!(essay.body.contains("ss and vn xx"));
}

#[test]
fn different_seeds_give_different_essays() {
    let first = fixture_engine(1).generate("主题", 500).unwrap();
    let found_different = (2..30).any(|seed| fixture_engine(seed).generate("主题", 500).unwrap() != first);
    assert!(found_different, "Expected different output with different seeds");
}

#[test]
fn unseeded_engines_differ() {
    let build = || {
        EssayEngine::builder()
            .lexicon_path("tests/fixtures/lexicon.json")
            .build()
            .unwrap()
    };
    let texts: Vec<String> = (0..5)
        .map(|_| build().generate_text("主题", 1000).unwrap())
        .collect();
    assert!(texts.iter().any(|t| t != &texts[0]));
}

#[test]
fn scripted_generation_is_exact() {
    let lexicon = Lexicon::load(Path::new("tests/fixtures/lexicon.ron")).unwrap();
    let mut engine = EssayEngine::builder()
        .with_lexicon(lexicon)
        .build_with_source(SequencePicks::new(vec![0]))
        .unwrap();
    let essay = engine.generate("xx", 20).unwrap();
    assert_eq!(essay.title, "论xx");
    assert_eq!(essay.begin, "xx问题日益突出。");
    // body target 14: "我们要推进改革，由此可见。" is 13 chars, so two samples
    assert_eq!(essay.body, "我们要推进改革，由此可见。".repeat(2));
    assert_eq!(essay.end, "总之，推进好改革。");
}

#[test]
fn config_file_drives_ratios() {
    let mut engine = EssayEngine::builder()
        .lexicon_path("tests/fixtures/lexicon.json")
        .config_path("tests/fixtures/config.ron")
        .seed(9)
        .build()
        .unwrap();
    assert_eq!(engine.config().max_iterations, 500);
    let essay = engine.generate_configured().unwrap();
    assert!(essay.begin.chars().count() >= 60);
    assert!(essay.body.chars().count() >= 180);
    assert!(essay.end.chars().count() >= 60);
}

#[test]
fn empty_lexicon_reports_divergence_instead_of_hanging() {
    let mut engine = EssayEngine::builder()
        .lexicon_path("tests/fixtures/no_such_lexicon.json")
        .build()
        .unwrap();
    let err = engine.generate("主题", 500).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::SectionDiverged {
            category: Category::Beginning,
            target: 75,
            ..
        }
    ));
}

#[test]
fn empty_lexicon_small_target_yields_blank_essay() {
    let mut engine = EssayEngine::builder()
        .with_config(GenerationConfig::default())
        .build()
        .unwrap();
    let essay = engine.generate("主题", 0).unwrap();
    assert!(essay.title.is_empty());
    assert!(essay.begin.is_empty() && essay.body.is_empty() && essay.end.is_empty());
}
