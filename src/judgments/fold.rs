use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::{
    JudgmentGroup, JudgmentParseOutcome, LineError, LineRecord, ParseSummary, RatingEntry,
    RawLine, RecordError,
};
use crate::numeric::normalize_rating;

const EXPECTED_COLUMNS: usize = 3;

#[derive(Debug, Clone, Default)]
pub(crate) struct JudgmentAccumulator {
    groups: Vec<JudgmentGroup>,
    group_index: HashMap<String, usize>,
    seen_pairs: HashSet<(String, String)>,
    summary: ParseSummary,
}

impl JudgmentAccumulator {
    pub(crate) fn apply(mut self, line: &RawLine<'_>, record: LineRecord) -> Self {
        self.summary.total_lines_read += 1;

        let fields = match record {
            LineRecord::Header => {
                self.summary.header_lines_skipped += 1;
                return self;
            }
            LineRecord::Rejected(err) => return self.reject(line, err),
            LineRecord::Fields(fields) => fields,
        };

        let [query, doc_id, rating] = match <[String; EXPECTED_COLUMNS]>::try_from(fields) {
            Ok(columns) => columns,
            Err(fields) => {
                let found = fields.len();
                return self.reject(line, RecordError::ColumnCount { found });
            }
        };

        if query.is_empty() || doc_id.is_empty() || rating.is_empty() {
            return self.reject(line, RecordError::MissingValues);
        }

        let Some(normalized) = normalize_rating(&rating) else {
            return self.reject(line, RecordError::InvalidRating { raw: rating });
        };

        let pair = (query, doc_id);
        if self.seen_pairs.contains(&pair) {
            let (query, doc_id) = pair;
            self.summary.duplicate_records += 1;
            return self.record_error(line, RecordError::Duplicate { query, doc_id });
        }

        self.accept(pair, normalized)
    }

    pub(crate) fn finish(mut self) -> JudgmentParseOutcome {
        self.summary.unique_queries = self.groups.len();
        JudgmentParseOutcome {
            judgments: self.groups,
            error: None,
            summary: self.summary,
        }
    }

    fn accept(mut self, pair: (String, String), rating: String) -> Self {
        let (query, doc_id) = &pair;
        let index = match self.group_index.get(query) {
            Some(index) => *index,
            None => {
                self.groups.push(JudgmentGroup {
                    query: query.clone(),
                    ratings: Vec::new(),
                });
                self.group_index.insert(query.clone(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };

        self.groups[index].ratings.push(RatingEntry {
            doc_id: doc_id.clone(),
            rating: rating.clone(),
        });
        self.seen_pairs.insert(pair);
        self.summary.successful_records += 1;
        *self.summary.rating_distribution.entry(rating).or_insert(0) += 1;
        self
    }

    fn reject(mut self, line: &RawLine<'_>, err: RecordError) -> Self {
        self.summary.failed_records += 1;
        self.record_error(line, err)
    }

    fn record_error(mut self, line: &RawLine<'_>, err: RecordError) -> Self {
        debug!(line = line.number, error = %err, "judgment line skipped");
        self.summary.errors.push(LineError {
            line: line.number,
            raw: line.text.to_string(),
            error: err.to_string(),
        });
        self
    }

    #[cfg(test)]
    pub(crate) fn summary(&self) -> &ParseSummary {
        &self.summary
    }
}
