/// Lexicon Linter — validates category coverage and template quality.
///
/// Usage: lexicon_linter <lexicon file> [--min-alternatives <n>]

use clap::Parser;
use shenlun_engine::core::lexicon::Lexicon;
use shenlun_engine::core::rules::{Replacement, PIPELINE};
use shenlun_engine::schema::category::Category;
use std::path::PathBuf;
use std::process;

/// Check a lexicon file for gaps that produce blank or hanging output.
#[derive(Parser, Debug)]
#[command(name = "lexicon_linter", version, about)]
struct Args {
    /// Lexicon file (.json or .ron).
    path: PathBuf,

    /// Warn when a category has fewer entries than this.
    #[arg(long, default_value_t = 3)]
    min_alternatives: usize,
}

fn main() {
    let args = Args::parse();

    let lexicon = match Lexicon::load(&args.path) {
        Ok(lexicon) => lexicon,
        Err(e) => {
            eprintln!("ERROR: Failed to load lexicon: {}", e);
            process::exit(1);
        }
    };

    let (errors, warnings) = lint_lexicon(&lexicon, args.min_alternatives);

    println!("\n=== Lexicon Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    process::exit(if errors.is_empty() { 0 } else { 1 });
}

fn lint_lexicon(lexicon: &Lexicon, min_alternatives: usize) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for category in Category::ALL {
        let entries = lexicon.entries(category);

        if !lexicon.contains(category) {
            let message = format!("Missing category '{}'", category);
            // Padded sections never finish without templates.
            if category.is_section() && category != Category::Title {
                errors.push(message);
            } else {
                warnings.push(message);
            }
            continue;
        }

        if entries.is_empty() {
            let message = format!("Category '{}' is empty", category);
            if category.is_section() && category != Category::Title {
                errors.push(message);
            } else {
                warnings.push(message);
            }
            continue;
        }

        if entries.len() < min_alternatives {
            warnings.push(format!(
                "Category '{}' has only {} entries (minimum {} recommended)",
                category,
                entries.len(),
                min_alternatives
            ));
        }

        if category.is_section() && category != Category::Title {
            let all_blank = entries.iter().all(|t| !can_produce_text(t, lexicon));
            if all_blank {
                errors.push(format!(
                    "Every template in '{}' expands to empty text (section can never reach its length)",
                    category
                ));
            }
        }
    }

    // Tokens whose category is missing vanish from the output.
    for category in [Category::Title, Category::Beginning, Category::Body, Category::Ending] {
        for template in lexicon.entries(category) {
            for rule in &PIPELINE {
                if let Replacement::Sample(target) = rule.replacement {
                    if template.contains(rule.token) && !lexicon.has_entries(target) {
                        warnings.push(format!(
                            "Template '{}' in '{}' uses '{}' but '{}' has no entries",
                            template, category, rule.token, target
                        ));
                    }
                }
            }
        }
    }

    for key in lexicon.unknown_keys() {
        warnings.push(format!("Unrecognized key '{}' is ignored", key));
    }

    (errors, warnings)
}

/// Whether `template` can expand to something non-empty: any literal text,
/// the theme, or a token whose category has entries.
fn can_produce_text(template: &str, lexicon: &Lexicon) -> bool {
    let mut remainder = template.to_string();
    let mut productive = false;
    for rule in &PIPELINE {
        if !remainder.contains(rule.token) {
            continue;
        }
        productive |= match rule.replacement {
            Replacement::Theme => true,
            Replacement::Sample(category) => {
                lexicon.has_entries(category)
            }
            Replacement::VerbNounPairs => {
                lexicon.has_entries(Category::Verb) || lexicon.has_entries(Category::Noun)
            }
        };
        remainder = remainder.replace(rule.token, "");
    }
    productive || !remainder.is_empty()
}
