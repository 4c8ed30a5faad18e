use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::judgments::{EMPTY_FILE_ERROR, LineError, RawLine, non_blank_lines};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryEntry {
    pub query_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_answer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySetSummary {
    pub total_lines_read: usize,
    pub successful_queries: usize,
    pub failed_lines: usize,
    pub duplicate_queries: usize,
    pub errors: Vec<LineError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuerySetParseOutcome {
    pub queries: Vec<QueryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub summary: QuerySetSummary,
}

pub fn parse_query_set_text(text: &str) -> QuerySetParseOutcome {
    let lines = non_blank_lines(text);
    if lines.is_empty() {
        return QuerySetParseOutcome {
            queries: Vec::new(),
            error: Some(EMPTY_FILE_ERROR.to_string()),
            summary: QuerySetSummary::default(),
        };
    }

    let mut queries = Vec::new();
    let mut seen = HashSet::new();
    let mut summary = QuerySetSummary::default();

    for line in &lines {
        summary.total_lines_read += 1;

        let entry = match read_entry(line.text) {
            Ok(entry) => entry,
            Err(message) => {
                summary.failed_lines += 1;
                push_error(&mut summary, line, message);
                continue;
            }
        };

        if !seen.insert(entry.query_text.clone()) {
            summary.duplicate_queries += 1;
            let message = format!("Duplicate query \"{}\"", entry.query_text);
            push_error(&mut summary, line, message);
            continue;
        }

        summary.successful_queries += 1;
        queries.push(entry);
    }

    QuerySetParseOutcome {
        queries,
        error: None,
        summary,
    }
}

fn read_entry(line: &str) -> Result<QueryEntry, String> {
    let entry = if line.starts_with('{') {
        let entry: QueryEntry =
            serde_json::from_str(line).map_err(|err| format!("Invalid JSON: {err}"))?;
        QueryEntry {
            query_text: entry.query_text.trim().to_string(),
            reference_answer: entry
                .reference_answer
                .map(|answer| answer.trim().to_string())
                .filter(|answer| !answer.is_empty()),
        }
    } else {
        QueryEntry {
            query_text: line.to_string(),
            reference_answer: None,
        }
    };

    if entry.query_text.is_empty() {
        return Err("Missing queryText".to_string());
    }
    Ok(entry)
}

fn push_error(summary: &mut QuerySetSummary, line: &RawLine<'_>, error: String) {
    debug!(line = line.number, error = %error, "query set line skipped");
    summary.errors.push(LineError {
        line: line.number,
        raw: line.text.to_string(),
        error,
    });
}

#[cfg(test)]
mod tests {
    use super::{QueryEntry, parse_query_set_text};
    use crate::judgments::EMPTY_FILE_ERROR;

    #[test]
    fn mixed_ndjson_and_plain_lines_are_accepted() {
        let text = concat!(
            "{\"queryText\": \"red shoes\", \"referenceAnswer\": \"sneakers\"}\n",
            "\n",
            "laptop bag\n",
            "{\"queryText\": \"red shoes\"}\n",
            "{\"queryText\": \"  \"}\n",
            "{\"queryText\": \n",
        );

        let outcome = parse_query_set_text(text);
        assert!(outcome.error.is_none());
        assert_eq!(
            outcome.queries,
            vec![
                QueryEntry {
                    query_text: "red shoes".to_string(),
                    reference_answer: Some("sneakers".to_string()),
                },
                QueryEntry {
                    query_text: "laptop bag".to_string(),
                    reference_answer: None,
                },
            ]
        );

        let summary = &outcome.summary;
        assert_eq!(summary.total_lines_read, 5);
        assert_eq!(summary.successful_queries, 2);
        assert_eq!(summary.duplicate_queries, 1);
        assert_eq!(summary.failed_lines, 2);
        assert_eq!(summary.errors[0].line, 3);
        assert_eq!(summary.errors[1].error, "Missing queryText");
        assert!(summary.errors[2].error.starts_with("Invalid JSON"));
    }

    #[test]
    fn blank_query_set_is_a_file_level_error() {
        let outcome = parse_query_set_text(" \n\n");
        assert_eq!(outcome.error.as_deref(), Some(EMPTY_FILE_ERROR));
        assert!(outcome.queries.is_empty());
    }
}
