use serde::Serialize;

use crate::comparison::{
    ComparisonStatistics, ConnectorLine, DisplayField, ItemStatus, LegendEntry,
};
use crate::judgments::{JudgmentGroup, JudgmentParseOutcome, SummaryDigest};
use crate::query_set::QuerySetParseOutcome;

#[derive(Debug, Clone, Serialize)]
pub struct SourceFile {
    pub path: String,
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JudgmentImportReport {
    pub manifest_version: u32,
    pub run_id: String,
    pub generated_at: String,
    pub source: SourceFile,
    pub format: String,
    pub digest: SummaryDigest,
    pub outcome: JudgmentParseOutcome,
    #[serde(rename = "judgmentRatings")]
    pub judgment_ratings: Vec<JudgmentGroup>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuerySetImportReport {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source: SourceFile,
    pub outcome: QuerySetParseOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultSetSummary {
    pub label: String,
    pub source: SourceFile,
    pub item_count: usize,
    pub statuses: Vec<ItemStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub manifest_version: u32,
    pub run_id: String,
    pub generated_at: String,
    pub query_text: String,
    pub result1: ResultSetSummary,
    pub result2: ResultSetSummary,
    pub statistics: ComparisonStatistics,
    pub display_fields: Vec<DisplayField>,
    pub selected_field: String,
    pub image_field: Option<String>,
    pub legend: Vec<LegendEntry>,
    pub connectors: Vec<ConnectorLine>,
}
