use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::judgments::{DEFAULT_MAX_ERRORS_SHOWN, JudgmentFormat};

#[derive(Parser, Debug)]
#[command(
    name = "search-relevance",
    version,
    about = "Judgment import and search result comparison tooling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    ParseJudgments(ParseJudgmentsArgs),
    ExportJudgments(ExportJudgmentsArgs),
    ParseQuerySet(ParseQuerySetArgs),
    Preview(PreviewArgs),
    Compare(CompareArgs),
    Highlight(HighlightArgs),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum InputFormat {
    Auto,
    Csv,
    Ndjson,
}

impl InputFormat {
    pub fn resolve(self) -> Option<JudgmentFormat> {
        match self {
            Self::Auto => None,
            Self::Csv => Some(JudgmentFormat::Csv),
            Self::Ndjson => Some(JudgmentFormat::Ndjson),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ParseJudgmentsArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    pub format: InputFormat,

    #[arg(long)]
    pub report_path: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_MAX_ERRORS_SHOWN)]
    pub max_errors_shown: usize,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExportJudgmentsArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ParseQuerySetArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub report_path: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_MAX_ERRORS_SHOWN)]
    pub max_errors_shown: usize,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum PreviewKind {
    Judgments,
    Queries,
}

#[derive(Args, Debug, Clone)]
pub struct PreviewArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, value_enum, default_value_t = PreviewKind::Judgments)]
    pub kind: PreviewKind,
}

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    #[arg(long)]
    pub result1: PathBuf,

    #[arg(long)]
    pub result2: PathBuf,

    #[arg(long, default_value = "")]
    pub query_text: String,

    #[arg(long, default_value = "Result 1")]
    pub label1: String,

    #[arg(long, default_value = "Result 2")]
    pub label2: String,

    #[arg(long, default_value = "_id")]
    pub display_field: String,

    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub report_path: Option<PathBuf>,

    /// Print hover detail for this `_id`.
    #[arg(long)]
    pub detail: Option<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct HighlightArgs {
    #[arg(long)]
    pub text: String,

    #[arg(long)]
    pub pre_tag: Option<String>,

    #[arg(long)]
    pub post_tag: Option<String>,

    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}
