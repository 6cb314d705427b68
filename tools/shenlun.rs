/// Shenlun — generate an essay on a theme from a lexicon file.
///
/// Usage: shenlun [THEME] [-n <num>] [-d <lexicon>] [-c <config.ron>] [-s <seed>] [-o <file>]
///
/// When the theme or length is not given and stdin is a terminal, both are
/// asked for interactively.

use clap::{ArgAction, Parser};
use shenlun_engine::core::config::GenerationConfig;
use shenlun_engine::core::lexicon::LexiconError;
use shenlun_engine::core::pipeline::{EssayEngine, PipelineError};
use shenlun_engine::observability::init_logging;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;
use thiserror::Error;
use tracing::info;

/// Generate a template-driven essay on a theme.
#[derive(Parser, Debug)]
#[command(name = "shenlun", version, about)]
struct Cli {
    /// Essay theme, substituted wherever a template says `xx`.
    theme: Option<String>,

    /// Minimum essay length in characters.
    #[arg(short = 'n', long, env = "SHENLUN_ESSAY_NUM", allow_negative_numbers = true)]
    essay_num: Option<i64>,

    /// Lexicon file (.json or .ron).
    #[arg(short = 'd', long, default_value = "data.json", env = "SHENLUN_DATA_SOURCE")]
    data_source: PathBuf,

    /// Generation settings file (.ron).
    #[arg(short, long, env = "SHENLUN_CONFIG")]
    config: Option<PathBuf>,

    /// Fixed seed for reproducible output.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write the essay to this file as well as stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Never prompt, even on a terminal.
    #[arg(long)]
    no_prompt: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress log output.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Generation(#[from] PipelineError),
    #[error("failed to save essay to {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            Self::Generation(_) => 1,
            Self::Write { .. } => 2,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(cli.verbose);
    }

    if let Err(e) = run(cli) {
        eprintln!("错误: {e}");
        process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let base_config = match cli.config {
        Some(ref path) => GenerationConfig::load_from_ron(path).map_err(PipelineError::from)?,
        None => GenerationConfig::default(),
    };

    let interactive = !cli.no_prompt && io::stdin().is_terminal();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let theme = match cli.theme {
        Some(theme) => theme,
        None if interactive => prompt_theme(&mut input, &base_config.theme),
        None => base_config.theme.clone(),
    };
    let essay_num = match cli.essay_num {
        Some(n) => n,
        None if interactive => prompt_essay_num(&mut input, base_config.essay_num),
        None => base_config.essay_num,
    };

    let mut builder = EssayEngine::builder()
        .lexicon_path(cli.data_source.clone())
        .with_config(GenerationConfig {
            theme: theme.clone(),
            essay_num,
            ..base_config
        });
    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }
    let mut engine = builder.build()?;
    if let Some(error) = engine.load_error() {
        eprintln!("{}", describe_load_error(&cli.data_source, error));
    }

    let text = engine.generate_text(&theme, essay_num)?;
    let chars = text.chars().count();
    info!(theme = %theme, essay_num, chars, "essay generated");

    println!("生成的文章主题: {theme}");
    println!("生成的文章字数: {chars}");
    println!("\n生成的文章:");
    println!("{text}");

    let target = match cli.output {
        Some(path) => Some(path),
        None if interactive => prompt_save_path(&mut input),
        None => None,
    };
    if let Some(path) = target {
        save(&path, &text)?;
        println!("文章已成功保存到 {}", path.display());
    }

    Ok(())
}

/// The user-facing message for a lexicon file that could not be used.
fn describe_load_error(path: &Path, error: &LexiconError) -> String {
    let path = path.display();
    if error.is_not_found() {
        format!("错误: 数据源文件 {path} 未找到，将使用空词库")
    } else if error.is_malformed() {
        format!("错误: 数据源文件 {path} 格式不正确 ({error})，将使用空词库")
    } else {
        format!("错误: 数据源文件 {path} 无法读取 ({error})，将使用空词库")
    }
}

fn save(path: &Path, text: &str) -> Result<(), CliError> {
    std::fs::write(path, text).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Print `message` and read one trimmed line; `None` on EOF or read error.
fn ask(input: &mut impl BufRead, message: &str) -> Option<String> {
    print!("{message}");
    io::stdout().flush().ok();
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn prompt_theme(input: &mut impl BufRead, default: &str) -> String {
    ask(input, &format!("请输入文章主题 (默认: {default}): "))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn prompt_essay_num(input: &mut impl BufRead, default: i64) -> i64 {
    ask(input, &format!("请输入文章最少字数 (默认: {default}): "))
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn prompt_save_path(input: &mut impl BufRead) -> Option<PathBuf> {
    let choice = ask(input, "是否要将文章保存到文件？(y/n): ")?;
    if !choice.eq_ignore_ascii_case("y") {
        return None;
    }
    ask(input, "请输入保存文件的路径: ")
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}
