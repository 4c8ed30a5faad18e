use serde::Serialize;

use super::{JudgmentParseOutcome, LineError};

pub const DEFAULT_MAX_ERRORS_SHOWN: usize = 5;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStatus {
    Success,
    Partial,
    Failure,
}

impl ImportStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Partial => "partial",
            Self::Failure => "failure",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDigest {
    pub status: ImportStatus,
    pub headline: String,
    pub sample_errors: Vec<LineError>,
    pub total_errors: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncation_note: Option<String>,
}

pub fn digest(outcome: &JudgmentParseOutcome, max_errors: usize) -> SummaryDigest {
    let summary = &outcome.summary;

    let status = if outcome.error.is_some() || summary.successful_records == 0 {
        ImportStatus::Failure
    } else if summary.failed_records == 0 && summary.duplicate_records == 0 {
        ImportStatus::Success
    } else {
        ImportStatus::Partial
    };

    let headline = match &outcome.error {
        Some(error) => error.clone(),
        None => format!(
            "Imported {} ratings for {} queries ({} failed, {} duplicates, {} header lines skipped)",
            summary.successful_records,
            summary.unique_queries,
            summary.failed_records,
            summary.duplicate_records,
            summary.header_lines_skipped,
        ),
    };

    let total_errors = summary.errors.len();
    let sample_errors = summary
        .errors
        .iter()
        .take(max_errors)
        .cloned()
        .collect::<Vec<_>>();
    let truncation_note = (total_errors > sample_errors.len())
        .then(|| format!("Showing {} of {} errors", sample_errors.len(), total_errors));

    SummaryDigest {
        status,
        headline,
        sample_errors,
        total_errors,
        truncation_note,
    }
}
