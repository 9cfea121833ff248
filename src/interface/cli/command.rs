//! CLI 명령 파싱 모듈.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::domain::review::{ClassifyOptions, OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "reviewtag", version)]
#[command(about = "Extract sentiment, quality, price and category from a product review")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Product review text (omit to read --file, piped stdin or an interactive prompt)
    review: Option<String>,

    /// Read the review from a file ("-" for stdin)
    #[arg(long, value_name = "PATH", conflicts_with = "review")]
    file: Option<PathBuf>,

    /// LLM provider to use instead of defaults.provider
    #[arg(long, value_parser = ["openai", "anthropic", "gemini", "gpt", "claude", "google"])]
    provider: Option<String>,

    /// Model name override
    #[arg(long)]
    model: Option<String>,

    /// API key (takes precedence over config and environment)
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Print the extracted record as JSON
    #[arg(long)]
    json: bool,

    /// Suppress progress output on stderr
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show effective merged config and API key resolution
    Config {
        /// Write a config template to the user config path
        #[arg(long)]
        init: bool,
    },
}

#[derive(Debug)]
pub enum CliAction {
    InspectConfig,
    InitConfig,
    Classify {
        options: ClassifyOptions,
        quiet: bool,
    },
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        let cli = Cli::parse();
        let stdin = io::stdin();
        let stdin_is_terminal = stdin.is_terminal();
        cli.into_action(&mut stdin.lock(), stdin_is_terminal)
    }

    /// 파싱 결과를 실행 액션으로 바꾼다. 리뷰 본문은 이 시점에 읽는다.
    fn into_action(
        self,
        stdin: &mut dyn Read,
        stdin_is_terminal: bool,
    ) -> Result<CliAction, String> {
        match self.command {
            Some(Commands::Config { init: true }) => return Ok(CliAction::InitConfig),
            Some(Commands::Config { init: false }) => return Ok(CliAction::InspectConfig),
            None => {}
        }

        let review = self.resolve_review(stdin, stdin_is_terminal)?;
        Ok(CliAction::Classify {
            options: ClassifyOptions {
                review,
                api_key: self.api_key,
                provider: self.provider,
                model: self.model,
                output: if self.json {
                    OutputFormat::Json
                } else {
                    OutputFormat::Text
                },
            },
            quiet: self.quiet,
        })
    }

    /// 인자 -> --file -> 파이프된 stdin 순. 모두 없으면 None(대화형 입력).
    fn resolve_review(
        &self,
        stdin: &mut dyn Read,
        stdin_is_terminal: bool,
    ) -> Result<Option<String>, String> {
        if let Some(review) = &self.review {
            return Ok(Some(review.clone()));
        }

        match self.file.as_deref() {
            Some(path) if path == Path::new("-") => read_stdin(stdin).map(Some),
            Some(path) => fs::read_to_string(path)
                .map(|text| Some(trim_trailing_newlines(&text)))
                .map_err(|err| format!("failed to read review file {}: {err}", path.display())),
            None if !stdin_is_terminal => read_stdin(stdin).map(Some),
            None => Ok(None),
        }
    }
}

fn read_stdin(stdin: &mut dyn Read) -> Result<String, String> {
    let mut text = String::new();
    stdin
        .read_to_string(&mut text)
        .map_err(|err| format!("failed to read review from stdin: {err}"))?;
    Ok(trim_trailing_newlines(&text))
}

fn trim_trailing_newlines(text: &str) -> String {
    text.trim_end_matches(['\r', '\n']).to_string()
}
