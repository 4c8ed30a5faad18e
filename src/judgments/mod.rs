use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::util::read_text_file;

mod csv;
mod export;
mod fold;
mod ndjson;
mod summary;

use self::fold::JudgmentAccumulator;

pub use self::export::to_csv;
pub use self::summary::{DEFAULT_MAX_ERRORS_SHOWN, ImportStatus, SummaryDigest, digest};

pub const EMPTY_FILE_ERROR: &str = "File is empty.";
pub const UNREADABLE_FILE_ERROR: &str = "Failed to parse judgment file.";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JudgmentFormat {
    Csv,
    Ndjson,
}

impl JudgmentFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Ndjson => "ndjson",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingEntry {
    #[serde(rename = "docId")]
    pub doc_id: String,
    pub rating: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgmentGroup {
    pub query: String,
    pub ratings: Vec<RatingEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineError {
    pub line: usize,
    pub raw: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseSummary {
    pub total_lines_read: usize,
    pub header_lines_skipped: usize,
    pub successful_records: usize,
    pub failed_records: usize,
    pub duplicate_records: usize,
    pub errors: Vec<LineError>,
    pub rating_distribution: BTreeMap<String, usize>,
    pub unique_queries: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgmentParseOutcome {
    pub judgments: Vec<JudgmentGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub summary: ParseSummary,
}

impl JudgmentParseOutcome {
    pub fn failed(message: &str) -> Self {
        Self {
            judgments: Vec::new(),
            error: Some(message.to_string()),
            summary: ParseSummary::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Expected 3 columns (query, docid, rating) but found {found}")]
    ColumnCount { found: usize },
    #[error("Missing values: query, docid, and rating are all required")]
    MissingValues,
    #[error("Invalid rating \"{raw}\": rating must be numeric")]
    InvalidRating { raw: String },
    #[error("Duplicate rating for query \"{query}\" and docid \"{doc_id}\"; keeping the first occurrence")]
    Duplicate { query: String, doc_id: String },
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },
    #[error("Expected a JSON object with query, docId and rating")]
    NotAnObject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineRecord {
    Header,
    Fields(Vec<String>),
    Rejected(RecordError),
}

pub fn non_blank_lines(text: &str) -> Vec<RawLine<'_>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(index, text)| RawLine {
            number: index + 1,
            text,
        })
        .collect()
}

pub fn detect_format(path: Option<&Path>, text: &str) -> JudgmentFormat {
    let by_extension = path
        .and_then(|path| path.extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("ndjson") || ext.eq_ignore_ascii_case("jsonl"))
        .unwrap_or(false);

    let first_line_is_object = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.starts_with('{'))
        .unwrap_or(false);

    if by_extension || first_line_is_object {
        JudgmentFormat::Ndjson
    } else {
        JudgmentFormat::Csv
    }
}

pub fn parse_judgment_text(text: &str, format: JudgmentFormat) -> JudgmentParseOutcome {
    let lines = non_blank_lines(text);
    if lines.is_empty() {
        return JudgmentParseOutcome::failed(EMPTY_FILE_ERROR);
    }

    let outcome = lines
        .iter()
        .fold(JudgmentAccumulator::default(), |acc, line| {
            let record = match format {
                JudgmentFormat::Csv => csv::read_record(line.text),
                JudgmentFormat::Ndjson => ndjson::read_record(line.text),
            };
            acc.apply(line, record)
        })
        .finish();

    debug!(
        format = format.as_str(),
        lines = outcome.summary.total_lines_read,
        successful = outcome.summary.successful_records,
        failed = outcome.summary.failed_records,
        duplicates = outcome.summary.duplicate_records,
        "parsed judgment text"
    );

    outcome
}

pub fn parse_judgment_file(
    path: &Path,
    format: Option<JudgmentFormat>,
) -> (JudgmentFormat, JudgmentParseOutcome) {
    match read_text_file(path) {
        Ok(text) => {
            let format = format.unwrap_or_else(|| detect_format(Some(path), &text));
            (format, parse_judgment_text(&text, format))
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "judgment file unreadable");
            (
                format.unwrap_or(JudgmentFormat::Csv),
                JudgmentParseOutcome::failed(UNREADABLE_FILE_ERROR),
            )
        }
    }
}
